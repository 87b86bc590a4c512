//! Season/week walk over the provider.
//!
//! A season that cannot be loaded is skipped, and so is a week whose
//! scoreboard cannot be loaded. Nothing is retried.

use serde::Serialize;

use crate::{
    cli::types::{Season, Week},
    espn::{BoxScore, EspnClient, League, Matchup},
};

#[derive(Debug, Clone, Serialize)]
pub struct WeekData {
    pub week: Week,
    pub matchups: Vec<Matchup>,
    /// Empty unless box scores were requested and available
    pub box_scores: Vec<BoxScore>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeasonData {
    pub season: Season,
    pub league: League,
    pub weeks: Vec<WeekData>,
}

impl SeasonData {
    pub fn matchups(&self) -> impl Iterator<Item = &Matchup> {
        self.weeks.iter().flat_map(|w| w.matchups.iter())
    }

    pub fn box_scores(&self) -> impl Iterator<Item = &BoxScore> {
        self.weeks.iter().flat_map(|w| w.box_scores.iter())
    }
}

#[derive(Debug, Clone)]
pub struct CollectOptions {
    /// Seasons to walk, oldest first
    pub seasons: Vec<Season>,
    /// Weeks per season, starting at 1
    pub weeks: u16,
    /// Also fetch per-player lineups (needed for lineup efficiency)
    pub box_scores: bool,
}

impl CollectOptions {
    pub fn new(current: Season, history: u16, weeks: u16) -> Self {
        Self {
            seasons: current.trailing(history),
            weeks,
            box_scores: false,
        }
    }

    pub fn with_box_scores(mut self, box_scores: bool) -> Self {
        self.box_scores = box_scores;
        self
    }
}

/// Fetch every requested season and week, skipping the ones that fail
pub async fn collect_seasons(client: &EspnClient, opts: &CollectOptions) -> Vec<SeasonData> {
    let mut out = Vec::with_capacity(opts.seasons.len());

    for &season in &opts.seasons {
        let league = match client.get_league(season).await {
            Ok(league) => league,
            Err(e) => {
                tracing::warn!(%season, "skipping season, league unavailable: {}", e);
                continue;
            }
        };

        let mut weeks = Vec::new();
        for n in 1..=opts.weeks {
            let week = Week::new(n);
            let matchups = match client.get_scoreboard(&league, week).await {
                Ok(m) => m,
                Err(e) => {
                    tracing::warn!(%season, %week, "skipping week, scoreboard unavailable: {}", e);
                    continue;
                }
            };
            if matchups.is_empty() {
                tracing::debug!(%season, %week, "no matchups scheduled");
                continue;
            }

            let box_scores = if opts.box_scores {
                match client.get_box_scores(&league, week).await {
                    Ok(b) => b,
                    Err(e) => {
                        tracing::warn!(%season, %week, "box scores unavailable: {}", e);
                        Vec::new()
                    }
                }
            } else {
                Vec::new()
            };

            weeks.push(WeekData {
                week,
                matchups,
                box_scores,
            });
        }

        tracing::info!(%season, weeks = weeks.len(), "season loaded");
        out.push(SeasonData {
            season,
            league,
            weeks,
        });
    }

    out
}
