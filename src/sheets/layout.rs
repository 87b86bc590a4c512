//! Tab grids for the export.

use super::{Cell, Grid};
use crate::espn::League;
use crate::records::{HeadToHead, RecordBook};
use crate::row;

pub const RECORDS_TAB: &str = "Records";
pub const CURRENT_SEASON_TAB: &str = "Current Season";
pub const HEAD_TO_HEAD_TAB: &str = "Head-to-Head";

const MIN_ROWS: usize = 100;
const MIN_COLS: usize = 10;

const LOYALIST_BLURB: &str = "This award goes to the manager who retained the most players \
from their original draft roster throughout the season.";

/// A worksheet title and its full contents
#[derive(Debug, Clone)]
pub struct Tab {
    pub title: &'static str,
    pub grid: Grid,
}

impl Tab {
    /// Worksheet size to request: the grid, but never below 100x10
    pub fn min_size(&self) -> (usize, usize) {
        let cols = self.grid.iter().map(Vec::len).max().unwrap_or(0);
        (self.grid.len().max(MIN_ROWS), cols.max(MIN_COLS))
    }
}

fn opt<T>(value: Option<&T>, f: impl FnOnce(&T) -> Vec<Cell>, width: usize) -> Vec<Cell> {
    match value {
        Some(v) => f(v),
        None => vec![Cell::empty(); width],
    }
}

pub fn records_tab(book: &RecordBook) -> Tab {
    let mut grid: Grid = Vec::new();

    grid.push(row!["🏆 Most / Least Points in Game & Season"]);
    grid.push(row!["Category", "Owner", "Team", "Points", "Year", "Week"]);
    for (label, rec) in [
        ("Most Points Game", &book.most_points_game),
        ("Least Points Game", &book.least_points_game),
    ] {
        let mut line = row![label];
        line.extend(opt(
            rec.as_ref(),
            |r| {
                vec![
                    Cell::from(r.owner.as_str()),
                    Cell::from(r.team.as_str()),
                    Cell::rounded(r.points, 2),
                    Cell::from(r.season.as_u16()),
                    Cell::from(r.week.as_u16()),
                ]
            },
            5,
        ));
        grid.push(line);
    }
    for (label, rec) in [
        ("Most Points Season", &book.most_points_season),
        ("Least Points Season", &book.least_points_season),
    ] {
        let mut line = row![label];
        line.extend(opt(
            rec.as_ref(),
            |r| {
                vec![
                    Cell::from(r.owner.as_str()),
                    Cell::from(r.team.as_str()),
                    Cell::rounded(r.points, 2),
                    Cell::from(r.season.as_u16()),
                    Cell::from("-"),
                ]
            },
            5,
        ));
        grid.push(line);
    }
    grid.push(Vec::new());

    grid.push(row!["📊 Largest / Smallest Point Differentials in a Game"]);
    grid.push(row![
        "Category",
        "Winner",
        "Loser",
        "Winner Team",
        "Loser Team",
        "Point Diff",
        "Year",
        "Week"
    ]);
    for (label, rec) in [
        ("Largest Point Differential", &book.largest_margin),
        ("Smallest Point Differential", &book.smallest_margin),
    ] {
        let mut line = row![label];
        line.extend(opt(
            rec.as_ref(),
            |r| {
                vec![
                    Cell::from(r.winner_owner.as_str()),
                    Cell::from(r.loser_owner.as_str()),
                    Cell::from(r.winner_team.as_str()),
                    Cell::from(r.loser_team.as_str()),
                    Cell::rounded(r.margin, 2),
                    Cell::from(r.season.as_u16()),
                    Cell::from(r.week.as_u16()),
                ]
            },
            7,
        ));
        grid.push(line);
    }
    grid.push(Vec::new());

    grid.push(row!["🎯 The Managing Maestro (Season Efficiency)"]);
    grid.push(row!["Owner", "Team", "Efficiency (Starters / Max Possible)", "Year"]);
    grid.push(opt(
        book.managing_maestro.as_ref(),
        |r| {
            vec![
                Cell::from(r.owner.as_str()),
                Cell::from(r.team.as_str()),
                Cell::rounded(r.efficiency, 4),
                Cell::from(r.season.as_u16()),
            ]
        },
        4,
    ));
    grid.push(Vec::new());

    grid.push(row![
        "⚡ The Hustler (Most Free Agent Pickups) & 🧘 The Zen Master (Fewest Free Agent Pickups)"
    ]);
    grid.push(row!["Award", "Owner", "Team", "Pickups", "Year"]);
    for (label, rec) in [("The Hustler", &book.hustler), ("The Zen Master", &book.zen_master)] {
        let mut line = row![label];
        line.extend(opt(
            rec.as_ref(),
            |r| {
                vec![
                    Cell::from(r.owner.as_str()),
                    Cell::from(r.team.as_str()),
                    Cell::from(r.pickups),
                    Cell::from(r.season.as_u16()),
                ]
            },
            4,
        ));
        grid.push(line);
    }
    grid.push(Vec::new());

    grid.push(row!["🏅 The Loyalist"]);
    grid.push(row![LOYALIST_BLURB]);
    grid.push(row!["Owner", "Team", "Players Retained", "Year"]);
    grid.push(opt(
        book.loyalist.as_ref(),
        |r| {
            vec![
                Cell::from(r.owner.as_str()),
                Cell::from(r.team.as_str()),
                Cell::from(r.retained),
                Cell::from(r.season.as_u16()),
            ]
        },
        4,
    ));

    Tab {
        title: RECORDS_TAB,
        grid,
    }
}

/// Standings followed by the rest of the schedule
pub fn current_season_tab(league: &League) -> Tab {
    let mut grid: Grid = Vec::new();

    grid.push(row!["🏆 Current Standings"]);
    grid.push(row![
        "Rank",
        "Team",
        "Owner",
        "Wins",
        "Losses",
        "Points For",
        "Points Against"
    ]);
    for team in league.standings() {
        grid.push(vec![
            Cell::from(team.standing),
            Cell::from(team.name.as_str()),
            Cell::from(team.owner.display_name.as_str()),
            Cell::from(team.wins),
            Cell::from(team.losses),
            Cell::rounded(team.points_for, 2),
            Cell::rounded(team.points_against, 2),
        ]);
    }
    grid.push(Vec::new());

    grid.push(row!["📅 Upcoming Schedule"]);
    grid.push(row!["Week", "Matchup"]);
    for m in league.upcoming() {
        let name = |side: &Option<crate::espn::Side>| {
            side.as_ref()
                .map(|s| s.team_name.clone())
                .unwrap_or_else(|| "TBD".to_string())
        };
        grid.push(vec![
            Cell::from(m.week.as_u16()),
            Cell::from(format!("{} vs {}", name(&m.home), name(&m.away))),
        ]);
    }

    Tab {
        title: CURRENT_SEASON_TAB,
        grid,
    }
}

/// Owner matrix: names across row 1 and down column A
pub fn head_to_head_tab(h2h: &HeadToHead) -> Tab {
    let mut grid: Grid = Vec::new();

    if !h2h.is_empty() {
        let mut header = vec![Cell::empty()];
        header.extend(h2h.entrants().iter().map(|e| Cell::from(e.name.as_str())));
        grid.push(header);

        for r in h2h.rows() {
            let mut line = vec![Cell::from(r.name)];
            line.extend(r.cells.into_iter().map(Cell::from));
            grid.push(line);
        }
    }

    Tab {
        title: HEAD_TO_HEAD_TAB,
        grid,
    }
}
