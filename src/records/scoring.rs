//! Scoring extremes and point differentials.

use serde::Serialize;

use super::{Best, Extremes};
use crate::cli::types::{Season, Week};
use crate::collect::SeasonData;
use crate::espn::Side;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameRecord {
    pub owner: String,
    pub team: String,
    pub points: f64,
    pub season: Season,
    pub week: Week,
}

impl GameRecord {
    fn new(side: &Side, season: Season, week: Week) -> Self {
        Self {
            owner: side.owner.display_name.clone(),
            team: side.team_name.clone(),
            points: side.score,
            season,
            week,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonRecord {
    pub owner: String,
    pub team: String,
    pub points: f64,
    pub season: Season,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarginRecord {
    pub winner_owner: String,
    pub winner_team: String,
    pub loser_owner: String,
    pub loser_team: String,
    pub margin: f64,
    pub season: Season,
    pub week: Week,
}

/// Most and least points scored by one team in a single decided game
pub fn game_extremes(seasons: &[SeasonData]) -> Extremes<GameRecord> {
    let mut most = Best::max();
    let mut least = Best::min();

    for season in seasons {
        for matchup in season.matchups().filter(|m| m.is_final()) {
            let Some((home, away)) = matchup.sides() else {
                continue;
            };
            for side in [home, away] {
                most.offer(side.score, || GameRecord::new(side, season.season, matchup.week));
                least.offer(side.score, || GameRecord::new(side, season.season, matchup.week));
            }
        }
    }

    Extremes {
        most: most.into_inner(),
        least: least.into_inner(),
    }
}

/// Most and least points-for by one team over a season.
///
/// Teams that have not played a game yet are left out so an unstarted
/// season cannot claim the low mark.
pub fn season_extremes(seasons: &[SeasonData]) -> Extremes<SeasonRecord> {
    let mut most = Best::max();
    let mut least = Best::min();

    for season in seasons {
        for team in season.league.teams.iter().filter(|t| t.games_played() > 0) {
            let record = || SeasonRecord {
                owner: team.owner.display_name.clone(),
                team: team.name.clone(),
                points: team.points_for,
                season: season.season,
            };
            most.offer(team.points_for, record);
            least.offer(team.points_for, record);
        }
    }

    Extremes {
        most: most.into_inner(),
        least: least.into_inner(),
    }
}

/// Largest margin of victory and smallest non-zero margin
pub fn point_differentials(seasons: &[SeasonData]) -> Extremes<MarginRecord> {
    let mut largest = Best::max();
    let mut smallest = Best::min();

    for season in seasons {
        for matchup in season.matchups().filter(|m| m.is_final()) {
            // ties have no winner and no margin
            let (Some((winner, loser)), Some(margin)) = (matchup.winner_loser(), matchup.margin())
            else {
                continue;
            };
            let record = || MarginRecord {
                winner_owner: winner.owner.display_name.clone(),
                winner_team: winner.team_name.clone(),
                loser_owner: loser.owner.display_name.clone(),
                loser_team: loser.team_name.clone(),
                margin,
                season: season.season,
                week: matchup.week,
            };
            largest.offer(margin, record);
            smallest.offer(margin, record);
        }
    }

    Extremes {
        most: largest.into_inner(),
        least: smallest.into_inner(),
    }
}
