//! Head-to-head win/loss matrix across seasons.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::collect::SeasonData;
use crate::espn::Side;

/// Placeholder shown where an entrant meets itself
pub const SELF_CELL: &str = "—";

/// What a row/column of the matrix stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    /// Owner account; follows a manager through team renames
    #[default]
    Owner,
    /// Team name as shown in each season
    Team,
}

impl GroupBy {
    fn key_and_label(self, side: &Side) -> (String, String) {
        match self {
            GroupBy::Owner => (
                side.owner.id.as_str().to_string(),
                side.owner.display_name.clone(),
            ),
            GroupBy::Team => (side.team_name.clone(), side.team_name.clone()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WinLoss {
    pub wins: u32,
    pub losses: u32,
}

impl fmt::Display for WinLoss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.wins, self.losses)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entrant {
    pub key: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HeadToHeadRow {
    pub key: String,
    pub name: String,
    /// One cell per entrant, in entrant order
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct HeadToHead {
    entrants: Vec<Entrant>,
    records: HashMap<(String, String), WinLoss>,
}

impl HeadToHead {
    /// Tally every decided game with two sides; ties count for neither side
    pub fn build(seasons: &[SeasonData], by: GroupBy) -> Self {
        let mut names: BTreeMap<String, String> = BTreeMap::new();
        let mut records: HashMap<(String, String), WinLoss> = HashMap::new();

        for season in seasons {
            for matchup in season.matchups() {
                let Some((home, away)) = matchup.sides() else {
                    continue;
                };
                if !matchup.is_final() {
                    continue;
                }

                let (home_key, home_name) = by.key_and_label(home);
                let (away_key, away_name) = by.key_and_label(away);
                names.insert(home_key.clone(), home_name);
                names.insert(away_key.clone(), away_name);

                let (winner, loser) = if home.score > away.score {
                    (home_key, away_key)
                } else if away.score > home.score {
                    (away_key, home_key)
                } else {
                    continue;
                };

                records
                    .entry((winner.clone(), loser.clone()))
                    .or_default()
                    .wins += 1;
                records.entry((loser, winner)).or_default().losses += 1;
            }
        }

        let mut entrants: Vec<Entrant> = names
            .into_iter()
            .map(|(key, name)| Entrant { key, name })
            .collect();
        entrants.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.key.cmp(&b.key))
        });

        Self { entrants, records }
    }

    pub fn entrants(&self) -> &[Entrant] {
        &self.entrants
    }

    pub fn is_empty(&self) -> bool {
        self.entrants.is_empty()
    }

    /// `a`'s record against `b`
    pub fn record(&self, a: &str, b: &str) -> WinLoss {
        self.records
            .get(&(a.to_string(), b.to_string()))
            .copied()
            .unwrap_or_default()
    }

    /// Matrix rows with `"W-L"` cells and the self cell on the diagonal
    pub fn rows(&self) -> Vec<HeadToHeadRow> {
        self.entrants
            .iter()
            .map(|row| HeadToHeadRow {
                key: row.key.clone(),
                name: row.name.clone(),
                cells: self
                    .entrants
                    .iter()
                    .map(|col| {
                        if col.key == row.key {
                            SELF_CELL.to_string()
                        } else {
                            self.record(&row.key, &col.key).to_string()
                        }
                    })
                    .collect(),
            })
            .collect()
    }

    /// Total (wins, losses) for an entrant across all opponents
    pub fn totals(&self, key: &str) -> WinLoss {
        self.records
            .iter()
            .filter(|((a, _), _)| a == key)
            .fold(WinLoss::default(), |acc, (_, r)| WinLoss {
                wins: acc.wins + r.wins,
                losses: acc.losses + r.losses,
            })
    }
}

#[derive(Serialize)]
struct HeadToHeadJson<'a> {
    entrants: &'a [Entrant],
    rows: Vec<HeadToHeadRow>,
}

impl Serialize for HeadToHead {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        HeadToHeadJson {
            entrants: &self.entrants,
            rows: self.rows(),
        }
        .serialize(serializer)
    }
}
