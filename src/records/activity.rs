//! Roster activity for the current season: waiver pickups and how much of
//! the draft survived.

use serde::Serialize;
use std::collections::HashSet;

use super::{Best, Extremes};
use crate::cli::types::{PlayerId, Season};
use crate::espn::{League, Team};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PickupRecord {
    pub owner: String,
    pub team: String,
    pub pickups: u32,
    pub season: Season,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetentionRecord {
    pub owner: String,
    pub team: String,
    /// Drafted players still on the roster
    pub retained: usize,
    pub drafted: usize,
    pub season: Season,
}

/// Hustler (most acquisitions) and Zen Master (fewest)
pub fn free_agent_activity(league: &League) -> Extremes<PickupRecord> {
    let mut most = Best::max();
    let mut least = Best::min();

    for team in &league.teams {
        let record = || pickup_record(team, league.season);
        let n = f64::from(team.acquisitions);
        most.offer(n, record);
        least.offer(n, record);
    }

    Extremes {
        most: most.into_inner(),
        least: least.into_inner(),
    }
}

fn pickup_record(team: &Team, season: Season) -> PickupRecord {
    PickupRecord {
        owner: team.owner.display_name.clone(),
        team: team.name.clone(),
        pickups: team.acquisitions,
        season,
    }
}

/// Loyalist: the team holding on to the most of its own draft picks.
///
/// `None` when the league has no draft or nobody kept a single pick.
pub fn draft_retention(league: &League) -> Option<RetentionRecord> {
    if league.draft.is_empty() {
        return None;
    }

    let mut best = Best::max();
    for team in &league.teams {
        let roster: HashSet<PlayerId> = team.roster.iter().copied().collect();
        let drafted: Vec<PlayerId> = league.drafted_by(team.id).collect();
        let retained = drafted.iter().filter(|id| roster.contains(id)).count();
        if retained == 0 {
            continue;
        }
        best.offer(retained as f64, || RetentionRecord {
            owner: team.owner.display_name.clone(),
            team: team.name.clone(),
            retained,
            drafted: drafted.len(),
            season: league.season,
        });
    }
    best.into_inner()
}
