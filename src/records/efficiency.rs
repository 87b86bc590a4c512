//! Lineup efficiency: points the starters scored against the best lineup
//! the roster allowed that week.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use super::Best;
use crate::cli::types::{OwnerId, Season};
use crate::collect::SeasonData;
use crate::espn::league::IR_SLOT;
use crate::espn::LineupEntry;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EfficiencyRecord {
    pub owner: String,
    pub team: String,
    pub season: Season,
    pub starter_points: f64,
    pub optimal_points: f64,
    /// `starter_points / optimal_points`, at most 1.0
    pub efficiency: f64,
}

/// Best legal lineup score for one week.
///
/// Every starting slot is matched to at most one eligible player so that the
/// total is as high as possible; a slot may stay empty. Injured reserve never
/// plays. Without slot rules the best `n` players count, `n` being the number
/// of starters actually used. The result is never below what the starters
/// scored.
pub fn optimal_lineup_points(lineup: &[LineupEntry], slots: &BTreeMap<u8, u8>) -> f64 {
    let starters: f64 = lineup.iter().filter(|p| p.is_starter()).map(|p| p.points).sum();
    let pool: Vec<&LineupEntry> = lineup.iter().filter(|p| p.slot != IR_SLOT).collect();

    let best: f64 = if slots.is_empty() {
        let mut points: Vec<f64> = pool.iter().map(|p| p.points).collect();
        points.sort_by(|a, b| b.total_cmp(a));
        let n = lineup.iter().filter(|p| p.is_starter()).count();
        points.into_iter().take(n).sum()
    } else {
        let seats: Vec<u8> = slots
            .iter()
            .flat_map(|(&slot, &count)| std::iter::repeat(slot).take(count as usize))
            .collect();
        best_assignment(&seats, &pool)
    };

    best.max(starters)
}

/// Highest total over all ways of seating `pool` players in `seats`.
///
/// Solved as a min-cost assignment (Hungarian method) with one row per seat
/// and one column per player, plus one empty column per seat so that every
/// seat can go unfilled at no cost.
fn best_assignment(seats: &[u8], pool: &[&LineupEntry]) -> f64 {
    let n = seats.len();
    if n == 0 {
        return 0.0;
    }
    let m = pool.len() + n;
    let gain = |row: usize, col: usize| -> f64 {
        match pool.get(col) {
            Some(p) if p.eligible_slots.contains(&seats[row]) && p.points > 0.0 => p.points,
            _ => 0.0,
        }
    };

    // 1-based potentials; column 0 is the virtual start column
    let mut u = vec![0.0_f64; n + 1];
    let mut v = vec![0.0_f64; m + 1];
    let mut owner = vec![0_usize; m + 1];
    let mut way = vec![0_usize; m + 1];

    for row in 1..=n {
        owner[0] = row;
        let mut j0 = 0;
        let mut min_v = vec![f64::INFINITY; m + 1];
        let mut used = vec![false; m + 1];
        loop {
            used[j0] = true;
            let i0 = owner[j0];
            let mut delta = f64::INFINITY;
            let mut j1 = 0;
            for j in 1..=m {
                if used[j] {
                    continue;
                }
                let cur = -gain(i0 - 1, j - 1) - u[i0] - v[j];
                if cur < min_v[j] {
                    min_v[j] = cur;
                    way[j] = j0;
                }
                if min_v[j] < delta {
                    delta = min_v[j];
                    j1 = j;
                }
            }
            for j in 0..=m {
                if used[j] {
                    u[owner[j]] += delta;
                    v[j] -= delta;
                } else {
                    min_v[j] -= delta;
                }
            }
            j0 = j1;
            if owner[j0] == 0 {
                break;
            }
        }
        while j0 != 0 {
            let j1 = way[j0];
            owner[j0] = owner[j1];
            j0 = j1;
        }
    }

    (1..=m)
        .filter(|&j| owner[j] != 0)
        .map(|j| gain(owner[j] - 1, j - 1))
        .sum()
}

struct Tally {
    owner: String,
    team: String,
    season: Season,
    starters: f64,
    optimal: f64,
}

/// Managing Maestro: the owner season with the best starter/optimal ratio
pub fn managing_maestro(seasons: &[SeasonData]) -> Option<EfficiencyRecord> {
    let mut tallies: Vec<Tally> = Vec::new();
    let mut index: HashMap<(Season, OwnerId), usize> = HashMap::new();

    for season in seasons {
        let slots = &season.league.lineup_slots;
        for score in season.box_scores() {
            for (side, lineup) in score.lineups() {
                if lineup.is_empty() {
                    continue;
                }
                let starters: f64 = lineup.iter().filter(|p| p.is_starter()).map(|p| p.points).sum();
                let optimal = optimal_lineup_points(lineup, slots);

                let i = *index
                    .entry((season.season, side.owner.id.clone()))
                    .or_insert_with(|| {
                        tallies.push(Tally {
                            owner: side.owner.display_name.clone(),
                            team: side.team_name.clone(),
                            season: season.season,
                            starters: 0.0,
                            optimal: 0.0,
                        });
                        tallies.len() - 1
                    });
                tallies[i].starters += starters;
                tallies[i].optimal += optimal;
            }
        }
    }

    let mut best = Best::max();
    for t in tallies.iter().filter(|t| t.optimal > 0.0) {
        let ratio = t.starters / t.optimal;
        best.offer(ratio, || EfficiencyRecord {
            owner: t.owner.clone(),
            team: t.team.clone(),
            season: t.season,
            starter_points: t.starters,
            optimal_points: t.optimal,
            efficiency: ratio,
        });
    }
    best.into_inner()
}
