//! League record book.
//!
//! Everything here is pure accumulation over already-fetched
//! [`SeasonData`]. When two candidates tie for a record the first one seen
//! keeps it: seasons oldest first, weeks ascending, matchups in provider
//! order, home side before away side.

pub mod activity;
pub mod efficiency;
pub mod head_to_head;
pub mod scoring;

use serde::Serialize;

use crate::cli::types::Season;
use crate::collect::SeasonData;

pub use activity::{PickupRecord, RetentionRecord};
pub use efficiency::EfficiencyRecord;
pub use head_to_head::{GroupBy, HeadToHead, WinLoss};
pub use scoring::{GameRecord, MarginRecord, SeasonRecord};

/// Highest and lowest record of one kind
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Extremes<T> {
    pub most: Option<T>,
    pub least: Option<T>,
}

impl<T> Default for Extremes<T> {
    fn default() -> Self {
        Self {
            most: None,
            least: None,
        }
    }
}

/// Running maximum or minimum that keeps the first candidate on ties
pub(crate) struct Best<T> {
    pick: Option<(f64, T)>,
    want_max: bool,
}

impl<T> Best<T> {
    pub(crate) fn max() -> Self {
        Self {
            pick: None,
            want_max: true,
        }
    }

    pub(crate) fn min() -> Self {
        Self {
            pick: None,
            want_max: false,
        }
    }

    pub(crate) fn offer(&mut self, value: f64, make: impl FnOnce() -> T) {
        let better = match &self.pick {
            None => !value.is_nan(),
            Some((current, _)) if self.want_max => value > *current,
            Some((current, _)) => value < *current,
        };
        if better {
            self.pick = Some((value, make()));
        }
    }

    pub(crate) fn into_inner(self) -> Option<T> {
        self.pick.map(|(_, t)| t)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RecordBook {
    /// Seasons that actually contributed, oldest first
    pub seasons: Vec<Season>,
    pub current_season: Season,
    pub most_points_game: Option<GameRecord>,
    pub least_points_game: Option<GameRecord>,
    pub most_points_season: Option<SeasonRecord>,
    pub least_points_season: Option<SeasonRecord>,
    pub largest_margin: Option<MarginRecord>,
    pub smallest_margin: Option<MarginRecord>,
    /// Best starters / optimal lineup ratio over a season
    pub managing_maestro: Option<EfficiencyRecord>,
    /// Most free agent pickups in the current season
    pub hustler: Option<PickupRecord>,
    /// Fewest free agent pickups in the current season
    pub zen_master: Option<PickupRecord>,
    /// Most drafted players still rostered in the current season
    pub loyalist: Option<RetentionRecord>,
}

impl RecordBook {
    pub fn compile(seasons: &[SeasonData], current_season: Season) -> Self {
        let games = scoring::game_extremes(seasons);
        let totals = scoring::season_extremes(seasons);
        let margins = scoring::point_differentials(seasons);

        let current = seasons.iter().find(|s| s.season == current_season);
        let pickups = current
            .map(|s| activity::free_agent_activity(&s.league))
            .unwrap_or_default();
        let loyalist = current.and_then(|s| activity::draft_retention(&s.league));

        Self {
            seasons: seasons.iter().map(|s| s.season).collect(),
            current_season,
            most_points_game: games.most,
            least_points_game: games.least,
            most_points_season: totals.most,
            least_points_season: totals.least,
            largest_margin: margins.most,
            smallest_margin: margins.least,
            managing_maestro: efficiency::managing_maestro(seasons),
            hustler: pickups.most,
            zen_master: pickups.least,
            loyalist,
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Builders for hand-made seasons

    use std::collections::BTreeMap;

    use crate::cli::types::{OwnerId, PlayerId, Season, TeamId, Week};
    use crate::collect::{SeasonData, WeekData};
    use crate::espn::{BoxScore, League, LineupEntry, Matchup, Outcome, Owner, Side, Team};

    /// (owner id, owner name, team name, score)
    pub type SideParts<'a> = (&'a str, &'a str, &'a str, f64);

    fn side(parts: SideParts<'_>) -> Side {
        let (id, name, team, score) = parts;
        Side {
            team_id: TeamId::new(team.len() as u32),
            team_name: team.to_string(),
            owner: Owner {
                id: OwnerId::new(id),
                display_name: name.to_string(),
            },
            score,
        }
    }

    pub fn game(week: u16, home: SideParts<'_>, away: SideParts<'_>) -> Matchup {
        let outcome = if home.3 > away.3 {
            Outcome::Home
        } else if away.3 > home.3 {
            Outcome::Away
        } else {
            Outcome::Tie
        };
        Matchup {
            week: Week::new(week),
            home: Some(side(home)),
            away: Some(side(away)),
            outcome,
            playoff: false,
        }
    }

    pub fn team(id: u32, owner: (&str, &str), name: &str) -> Team {
        Team {
            id: TeamId::new(id),
            name: name.to_string(),
            abbrev: String::new(),
            owner: Owner {
                id: OwnerId::new(owner.0),
                display_name: owner.1.to_string(),
            },
            standing: id as u16,
            final_standing: 0,
            wins: 0,
            losses: 0,
            ties: 0,
            points_for: 0.0,
            points_against: 0.0,
            acquisitions: 0,
            roster: Vec::<PlayerId>::new(),
            logo: None,
        }
    }

    pub fn league(season: u16, teams: Vec<Team>) -> League {
        League {
            season: Season::new(season),
            name: "Test League".to_string(),
            teams,
            schedule: Vec::new(),
            draft: Vec::new(),
            lineup_slots: BTreeMap::new(),
            current_week: Week::new(1),
            final_week: Week::new(17),
        }
    }

    pub fn season_from(league: League, games: Vec<Matchup>) -> SeasonData {
        let mut weeks: BTreeMap<Week, Vec<Matchup>> = BTreeMap::new();
        for g in games {
            weeks.entry(g.week).or_default().push(g);
        }
        SeasonData {
            season: league.season,
            league,
            weeks: weeks
                .into_iter()
                .map(|(week, matchups)| WeekData {
                    week,
                    matchups,
                    box_scores: Vec::new(),
                })
                .collect(),
        }
    }

    pub fn season_with_games(season: u16, games: Vec<Matchup>) -> SeasonData {
        season_from(league(season, Vec::new()), games)
    }

    pub fn player(id: i64, slot: u8, eligible: &[u8], points: f64) -> LineupEntry {
        LineupEntry {
            player_id: PlayerId::new(id),
            name: format!("Player {}", id),
            slot,
            eligible_slots: eligible.to_vec(),
            points,
        }
    }

    pub fn box_score(
        matchup: Matchup,
        home_lineup: Vec<LineupEntry>,
        away_lineup: Vec<LineupEntry>,
    ) -> BoxScore {
        BoxScore {
            matchup,
            home_lineup,
            away_lineup,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::cli::types::PlayerId;

    #[test]
    fn test_best_keeps_first_on_ties() {
        let mut best = Best::max();
        best.offer(10.0, || "first");
        best.offer(10.0, || "second");
        best.offer(9.0, || "third");
        assert_eq!(best.into_inner(), Some("first"));

        let mut least = Best::min();
        least.offer(3.0, || "a");
        least.offer(1.0, || "b");
        least.offer(1.0, || "c");
        assert_eq!(least.into_inner(), Some("b"));
    }

    #[test]
    fn test_best_ignores_nan() {
        let mut best = Best::max();
        best.offer(f64::NAN, || 1);
        assert_eq!(best.into_inner(), None);
    }

    #[test]
    fn test_compile_record_book() {
        let mut alpha = team(1, ("{A}", "alice"), "Alpha");
        alpha.wins = 2;
        alpha.points_for = 200.0;
        alpha.acquisitions = 12;
        alpha.roster = vec![PlayerId::new(1), PlayerId::new(2)];
        let mut beta = team(2, ("{B}", "bob"), "Beta");
        beta.losses = 2;
        beta.points_for = 170.0;
        beta.acquisitions = 3;
        beta.roster = vec![PlayerId::new(9)];

        let mut current = league(2024, vec![alpha, beta]);
        current.draft = vec![
            crate::espn::league::DraftPick {
                team_id: crate::cli::types::TeamId::new(1),
                player_id: PlayerId::new(1),
                round: 1,
                pick: 1,
                keeper: false,
            },
            crate::espn::league::DraftPick {
                team_id: crate::cli::types::TeamId::new(2),
                player_id: PlayerId::new(5),
                round: 1,
                pick: 2,
                keeper: false,
            },
        ];

        let seasons = vec![
            season_with_games(
                2023,
                vec![game(1, ("{A}", "alice", "Alpha", 140.2), ("{B}", "bob", "Beta", 60.1))],
            ),
            season_from(
                current,
                vec![
                    game(1, ("{A}", "alice", "Alpha", 100.0), ("{B}", "bob", "Beta", 90.0)),
                    game(2, ("{B}", "bob", "Beta", 80.0), ("{A}", "alice", "Alpha", 100.0)),
                ],
            ),
        ];

        let book = RecordBook::compile(&seasons, Season::new(2024));

        assert_eq!(book.seasons, vec![Season::new(2023), Season::new(2024)]);
        let most = book.most_points_game.unwrap();
        assert_eq!((most.owner.as_str(), most.points), ("alice", 140.2));
        assert_eq!(most.season, Season::new(2023));
        let least = book.least_points_game.unwrap();
        assert_eq!((least.owner.as_str(), least.points), ("bob", 60.1));

        let largest = book.largest_margin.unwrap();
        assert_eq!(largest.winner_team, "Alpha");
        let smallest = book.smallest_margin.unwrap();
        assert_eq!(smallest.margin, 10.0);

        assert_eq!(book.most_points_season.unwrap().points, 200.0);
        assert_eq!(book.least_points_season.unwrap().owner, "bob");

        assert_eq!(book.hustler.unwrap().pickups, 12);
        assert_eq!(book.zen_master.unwrap().owner, "bob");

        let loyalist = book.loyalist.unwrap();
        assert_eq!(loyalist.owner, "alice");
        assert_eq!(loyalist.retained, 1);

        assert!(book.managing_maestro.is_none());
    }

    #[test]
    fn test_compile_without_current_season() {
        let seasons = vec![season_with_games(
            2022,
            vec![game(1, ("{A}", "alice", "Alpha", 1.0), ("{B}", "bob", "Beta", 2.0))],
        )];
        let book = RecordBook::compile(&seasons, Season::new(2024));

        assert!(book.most_points_game.is_some());
        assert!(book.hustler.is_none());
        assert!(book.zen_master.is_none());
        assert!(book.loyalist.is_none());
    }

    #[test]
    fn test_compile_empty() {
        let book = RecordBook::compile(&[], Season::new(2024));
        assert!(book.seasons.is_empty());
        assert!(book.most_points_game.is_none());
        assert!(book.largest_margin.is_none());
        let json = serde_json::to_value(&book).unwrap();
        assert!(json["most_points_game"].is_null());
    }
}
