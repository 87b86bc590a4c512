//! ESPN Fantasy Football league records
//!
//! Walks several seasons of an ESPN fantasy football league and derives the
//! league's record book: head-to-head win/loss records between owners,
//! scoring extremes, point differentials, lineup efficiency, free agent
//! activity and draft retention.
//!
//! ## Features
//!
//! - **Dashboard**: standings, this week's matchups and the head-to-head
//!   matrix served over HTTP
//! - **Spreadsheet Export**: Records, Current Season and Head-to-Head tabs
//!   written to Google Sheets
//! - **Caching**: finished seasons are cached on disk, the live season in
//!   memory for a few minutes
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ffl_records::{
//!     collect::{collect_seasons, CollectOptions},
//!     espn::EspnClient,
//!     records::RecordBook,
//!     LeagueId, Season,
//! };
//!
//! # async fn example() -> ffl_records::Result<()> {
//! let season = Season::new(2024);
//! let client = EspnClient::new(LeagueId::new(123456), season)?;
//! let seasons = collect_seasons(&client, &CollectOptions::new(season, 3, 17)).await;
//! let book = RecordBook::compile(&seasons, season);
//! println!("{:?}", book.most_points_game);
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! ```bash
//! export FFL_LEAGUE_ID=123456
//! export ESPN_SWID='{...}' ESPN_S2='...'   # private leagues
//! export GOOGLE_CREDS="$(cat service-account.json)"   # export only
//! ```

pub mod cli;
pub mod collect;
pub mod commands;
pub mod core;
pub mod error;
pub mod espn;
pub mod logging;
pub mod records;
pub mod sheets;
pub mod web;

// Re-export commonly used types
pub use cli::types::{LeagueId, OwnerId, PlayerId, Season, TeamId, Week};
pub use error::{FflError, Result};

pub const LEAGUE_ID_ENV_VAR: &str = "FFL_LEAGUE_ID";
