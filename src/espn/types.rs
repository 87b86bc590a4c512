//! Wire types for the ESPN fantasy league endpoint.
//!
//! Only the fields the records need are modeled; everything is optional or
//! defaulted because the payload shape depends on which `view`s were asked for.

use crate::cli::types::{PlayerId, Season, TeamId};
use serde::{de::Error, Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;


fn de_str_key_map_u8_u8<'de, D>(deserializer: D) -> Result<BTreeMap<u8, u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: BTreeMap<String, u8> = Deserialize::deserialize(deserializer)?;
    raw.into_iter()
        .map(|(k, v)| k.parse::<u8>().map(|kk| (kk, v)).map_err(D::Error::custom))
        .collect()
}

/// Root of `/seasons/{season}/segments/0/leagues/{id}`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueResponse {
    #[serde(default)]
    pub season_id: Option<Season>,
    #[serde(default)]
    pub scoring_period_id: Option<u16>,
    #[serde(default)]
    pub status: Option<LeagueStatus>,
    #[serde(default)]
    pub settings: Option<LeagueSettings>,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub teams: Vec<TeamEntry>,
    #[serde(default)]
    pub schedule: Vec<ScheduleItem>,
    #[serde(default)]
    pub draft_detail: Option<DraftDetail>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueStatus {
    #[serde(default)]
    pub current_matchup_period: u16,
    #[serde(default)]
    pub final_scoring_period: u16,
    #[serde(default)]
    pub latest_scoring_period: u16,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueSettings {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub roster_settings: Option<RosterSettings>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterSettings {
    /// Starting lineup slot id -> number of such slots (keys come in as strings)
    #[serde(deserialize_with = "de_str_key_map_u8_u8", default)]
    pub lineup_slot_counts: BTreeMap<u8, u8>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamEntry {
    pub id: TeamId,
    #[serde(default)]
    pub abbrev: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
    /// Member ids; the first one is treated as the owner
    #[serde(default)]
    pub owners: Vec<String>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub record: Option<TeamRecord>,
    #[serde(default)]
    pub playoff_seed: Option<u16>,
    #[serde(default)]
    pub rank_calculated_final: Option<u16>,
    #[serde(default)]
    pub transaction_counter: Option<TransactionCounter>,
    #[serde(default)]
    pub roster: Option<Roster>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TeamRecord {
    #[serde(default)]
    pub overall: RecordLine,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordLine {
    #[serde(default)]
    pub wins: u16,
    #[serde(default)]
    pub losses: u16,
    #[serde(default)]
    pub ties: u16,
    #[serde(default)]
    pub points_for: f64,
    #[serde(default)]
    pub points_against: f64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionCounter {
    #[serde(default)]
    pub acquisitions: u32,
    #[serde(default)]
    pub drops: u32,
    #[serde(default)]
    pub trades: u32,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Roster {
    #[serde(default)]
    pub entries: Vec<RosterEntry>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntry {
    pub player_id: PlayerId,
    #[serde(default)]
    pub lineup_slot_id: u8,
    #[serde(default)]
    pub player_pool_entry: Option<PlayerPoolEntry>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerPoolEntry {
    /// Fantasy points for the requested scoring period
    #[serde(default)]
    pub applied_stat_total: Option<f64>,
    #[serde(default)]
    pub player: Option<PoolPlayer>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolPlayer {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub default_position_id: Option<i16>,
    #[serde(default)]
    pub eligible_slots: Vec<u8>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleItem {
    #[serde(default)]
    pub id: Option<u32>,
    pub matchup_period_id: u16,
    #[serde(default)]
    pub home: Option<MatchupSide>,
    #[serde(default)]
    pub away: Option<MatchupSide>,
    /// HOME | AWAY | TIE | UNDECIDED
    #[serde(default)]
    pub winner: Option<String>,
    #[serde(default)]
    pub playoff_tier_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchupSide {
    pub team_id: TeamId,
    #[serde(default)]
    pub total_points: f64,
    #[serde(default)]
    pub roster_for_current_scoring_period: Option<Roster>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftDetail {
    #[serde(default)]
    pub drafted: bool,
    #[serde(default)]
    pub picks: Vec<DraftPickEntry>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftPickEntry {
    pub player_id: PlayerId,
    pub team_id: TeamId,
    #[serde(default)]
    pub round_id: u16,
    #[serde(default)]
    pub round_pick_number: u16,
    #[serde(default)]
    pub keeper: bool,
}
