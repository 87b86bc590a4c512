//! League model built from ESPN payloads.
//!
//! A [`League`] is one season: teams resolved to their owners, the full
//! schedule as [`Matchup`]s, draft picks and lineup rules.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::cli::types::{OwnerId, PlayerId, Season, TeamId, Week};
use crate::espn::types::{LeagueResponse, MatchupSide, Member, Roster, ScheduleItem, TeamEntry};

/// Lineup slot for bench players
pub const BENCH_SLOT: u8 = 20;
/// Lineup slot for injured reserve
pub const IR_SLOT: u8 = 21;

/// Slots that do not score for the team
pub fn is_reserve_slot(slot: u8) -> bool {
    slot == BENCH_SLOT || slot == IR_SLOT
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Owner {
    pub id: OwnerId,
    pub display_name: String,
}

impl Owner {
    pub fn unknown() -> Self {
        Self {
            id: OwnerId::unknown(),
            display_name: "Unknown".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub abbrev: String,
    pub owner: Owner,
    /// Regular season standing (playoff seed); 0 when not yet seeded
    pub standing: u16,
    pub final_standing: u16,
    pub wins: u16,
    pub losses: u16,
    pub ties: u16,
    pub points_for: f64,
    pub points_against: f64,
    pub acquisitions: u32,
    pub roster: Vec<PlayerId>,
    pub logo: Option<String>,
}

impl Team {
    pub fn games_played(&self) -> u16 {
        self.wins + self.losses + self.ties
    }
}

/// One side of a matchup
#[derive(Debug, Clone, Serialize)]
pub struct Side {
    pub team_id: TeamId,
    pub team_name: String,
    pub owner: Owner,
    pub score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    Home,
    Away,
    Tie,
    Undecided,
}

impl Outcome {
    fn parse(winner: Option<&str>, home: f64, away: f64) -> Self {
        match winner {
            Some("HOME") => Outcome::Home,
            Some("AWAY") => Outcome::Away,
            Some("TIE") => Outcome::Tie,
            Some("UNDECIDED") => Outcome::Undecided,
            // no verdict field: fall back to the scores
            _ if home > away => Outcome::Home,
            _ if away > home => Outcome::Away,
            _ => Outcome::Tie,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Matchup {
    pub week: Week,
    pub home: Option<Side>,
    pub away: Option<Side>,
    pub outcome: Outcome,
    pub playoff: bool,
}

impl Matchup {
    /// Both sides, or `None` for a bye
    pub fn sides(&self) -> Option<(&Side, &Side)> {
        Some((self.home.as_ref()?, self.away.as_ref()?))
    }

    /// Whether the game has been decided (not upcoming or in progress)
    pub fn is_final(&self) -> bool {
        self.outcome != Outcome::Undecided
    }

    /// (winner, loser) by score; `None` for byes and ties
    pub fn winner_loser(&self) -> Option<(&Side, &Side)> {
        let (home, away) = self.sides()?;
        if home.score > away.score {
            Some((home, away))
        } else if away.score > home.score {
            Some((away, home))
        } else {
            None
        }
    }

    /// Absolute score difference; `None` for byes
    pub fn margin(&self) -> Option<f64> {
        let (home, away) = self.sides()?;
        Some((home.score - away.score).abs())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LineupEntry {
    pub player_id: PlayerId,
    pub name: String,
    pub slot: u8,
    pub eligible_slots: Vec<u8>,
    pub points: f64,
}

impl LineupEntry {
    pub fn is_starter(&self) -> bool {
        !is_reserve_slot(self.slot)
    }
}

/// A matchup with both teams' lineups for the week
#[derive(Debug, Clone, Serialize)]
pub struct BoxScore {
    pub matchup: Matchup,
    pub home_lineup: Vec<LineupEntry>,
    pub away_lineup: Vec<LineupEntry>,
}

impl BoxScore {
    /// Each present side with its lineup
    pub fn lineups(&self) -> impl Iterator<Item = (&Side, &[LineupEntry])> {
        let home = self
            .matchup
            .home
            .as_ref()
            .map(|side| (side, self.home_lineup.as_slice()));
        let away = self
            .matchup
            .away
            .as_ref()
            .map(|side| (side, self.away_lineup.as_slice()));
        home.into_iter().chain(away)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DraftPick {
    pub team_id: TeamId,
    pub player_id: PlayerId,
    pub round: u16,
    pub pick: u16,
    pub keeper: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct League {
    pub season: Season,
    pub name: String,
    pub teams: Vec<Team>,
    pub schedule: Vec<Matchup>,
    pub draft: Vec<DraftPick>,
    /// Starting slot id -> count (bench and IR excluded)
    pub lineup_slots: BTreeMap<u8, u8>,
    pub current_week: Week,
    pub final_week: Week,
}

impl League {
    pub fn from_response(season: Season, response: LeagueResponse) -> Self {
        let members: HashMap<&str, &Member> = response
            .members
            .iter()
            .map(|m| (m.id.as_str(), m))
            .collect();

        let teams: Vec<Team> = response
            .teams
            .iter()
            .map(|entry| build_team(entry, &members))
            .collect();

        let status = response.status.clone().unwrap_or_default();
        let final_week = Week::new(status.final_scoring_period);
        let current_week = match status.current_matchup_period {
            0 => {
                let period = response.scoring_period_id.unwrap_or(1);
                if status.final_scoring_period > 0 {
                    Week::new(period.min(status.final_scoring_period))
                } else {
                    Week::new(period)
                }
            }
            period => Week::new(period),
        };

        let lineup_slots = response
            .settings
            .as_ref()
            .and_then(|s| s.roster_settings.as_ref())
            .map(|rs| {
                rs.lineup_slot_counts
                    .iter()
                    .filter(|(slot, count)| !is_reserve_slot(**slot) && **count > 0)
                    .map(|(slot, count)| (*slot, *count))
                    .collect()
            })
            .unwrap_or_default();

        let name = response
            .settings
            .as_ref()
            .and_then(|s| s.name.clone())
            .unwrap_or_else(|| "Fantasy League".to_string());

        let draft = response
            .draft_detail
            .as_ref()
            .map(|d| {
                d.picks
                    .iter()
                    .map(|p| DraftPick {
                        team_id: p.team_id,
                        player_id: p.player_id,
                        round: p.round_id,
                        pick: p.round_pick_number,
                        keeper: p.keeper,
                    })
                    .collect()
            })
            .unwrap_or_default();

        let mut league = League {
            season: response.season_id.unwrap_or(season),
            name,
            teams,
            schedule: Vec::new(),
            draft,
            lineup_slots,
            current_week,
            final_week,
        };
        league.schedule = response
            .schedule
            .iter()
            .map(|item| league.matchup_from(item))
            .collect();
        league
    }

    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    /// Teams ordered by standing; unseeded teams last, then by id
    pub fn standings(&self) -> Vec<&Team> {
        let mut teams: Vec<&Team> = self.teams.iter().collect();
        teams.sort_by_key(|t| (t.standing == 0, t.standing, t.id));
        teams
    }

    /// Matchups of `week` from the league's own schedule
    pub fn matchups_for_week(&self, week: Week) -> Vec<Matchup> {
        self.schedule
            .iter()
            .filter(|m| m.week == week)
            .cloned()
            .collect()
    }

    /// Matchups at or after the current week
    pub fn upcoming(&self) -> Vec<&Matchup> {
        self.schedule
            .iter()
            .filter(|m| m.week >= self.current_week)
            .collect()
    }

    /// Player ids drafted by `team`
    pub fn drafted_by(&self, team: TeamId) -> impl Iterator<Item = PlayerId> + '_ {
        self.draft
            .iter()
            .filter(move |p| p.team_id == team)
            .map(|p| p.player_id)
    }

    /// Resolve a schedule item against this league's teams
    pub fn matchup_from(&self, item: &ScheduleItem) -> Matchup {
        let side = |s: &MatchupSide| {
            let (team_name, owner) = match self.team(s.team_id) {
                Some(team) => (team.name.clone(), team.owner.clone()),
                None => (format!("Team {}", s.team_id), Owner::unknown()),
            };
            Side {
                team_id: s.team_id,
                team_name,
                owner,
                score: s.total_points,
            }
        };
        let home = item.home.as_ref().map(side);
        let away = item.away.as_ref().map(side);
        let outcome = Outcome::parse(
            item.winner.as_deref(),
            home.as_ref().map_or(0.0, |s| s.score),
            away.as_ref().map_or(0.0, |s| s.score),
        );
        Matchup {
            week: Week::new(item.matchup_period_id),
            home,
            away,
            outcome,
            playoff: item
                .playoff_tier_type
                .as_deref()
                .is_some_and(|t| t != "NONE"),
        }
    }

    /// Box scores for `week` from a scoring-period payload
    pub fn box_scores_from(&self, items: &[ScheduleItem], week: Week) -> Vec<BoxScore> {
        items
            .iter()
            .filter(|item| item.matchup_period_id == week.as_u16())
            .map(|item| {
                let roster = |side: Option<&MatchupSide>| {
                    lineup(side.and_then(|s| s.roster_for_current_scoring_period.as_ref()))
                };
                BoxScore {
                    matchup: self.matchup_from(item),
                    home_lineup: roster(item.home.as_ref()),
                    away_lineup: roster(item.away.as_ref()),
                }
            })
            .collect()
    }
}

fn lineup(roster: Option<&Roster>) -> Vec<LineupEntry> {
    let Some(roster) = roster else {
        return Vec::new();
    };
    roster
        .entries
        .iter()
        .map(|entry| {
            let pool = entry.player_pool_entry.clone().unwrap_or_default();
            let player = pool.player.unwrap_or_default();
            LineupEntry {
                player_id: entry.player_id,
                name: player
                    .full_name
                    .unwrap_or_else(|| format!("Player {}", entry.player_id)),
                slot: entry.lineup_slot_id,
                eligible_slots: player.eligible_slots,
                points: pool.applied_stat_total.unwrap_or(0.0),
            }
        })
        .collect()
}

fn team_name(entry: &TeamEntry) -> String {
    if let Some(name) = entry.name.as_deref().filter(|n| !n.trim().is_empty()) {
        return name.trim().to_string();
    }
    let joined = [entry.location.as_deref(), entry.nickname.as_deref()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if joined.is_empty() {
        format!("Team {}", entry.id)
    } else {
        joined
    }
}

fn build_team(entry: &TeamEntry, members: &HashMap<&str, &Member>) -> Team {
    let owner = entry
        .owners
        .first()
        .map(|id| {
            let display_name = members
                .get(id.as_str())
                .and_then(|m| m.display_name.clone())
                .unwrap_or_else(|| "Unknown".to_string());
            Owner {
                id: OwnerId::new(id.clone()),
                display_name,
            }
        })
        .unwrap_or_else(Owner::unknown);

    let overall = entry
        .record
        .as_ref()
        .map(|r| r.overall.clone())
        .unwrap_or_default();

    Team {
        id: entry.id,
        name: team_name(entry),
        abbrev: entry.abbrev.clone().unwrap_or_default(),
        owner,
        standing: entry.playoff_seed.unwrap_or(0),
        final_standing: entry.rank_calculated_final.unwrap_or(0),
        wins: overall.wins,
        losses: overall.losses,
        ties: overall.ties,
        points_for: overall.points_for,
        points_against: overall.points_against,
        acquisitions: entry
            .transaction_counter
            .as_ref()
            .map_or(0, |t| t.acquisitions),
        roster: entry
            .roster
            .as_ref()
            .map(|r| r.entries.iter().map(|e| e.player_id).collect())
            .unwrap_or_default(),
        logo: entry.logo.clone(),
    }
}
