//! CLI argument definitions and parsing.

pub mod types;

use std::net::IpAddr;

use clap::{Args, Parser, Subcommand};
use types::{LeagueId, Season};

use crate::records::head_to_head::GroupBy;

/// Name of the spreadsheet the export writes to unless told otherwise.
pub const DEFAULT_SPREADSHEET: &str = "Fantasy Football Records";

/// League and history selection shared between commands
#[derive(Debug, Clone, Args)]
pub struct LeagueArgs {
    /// League ID (or set `FFL_LEAGUE_ID` env var).
    #[clap(long, short)]
    pub league_id: Option<LeagueId>,

    /// Current season year (e.g. 2025). Defaults to the season in progress.
    #[clap(long, short, default_value_t = Season::current())]
    pub season: Season,

    /// Number of seasons to walk, ending with `--season`.
    #[clap(long, default_value_t = 3, value_parser = clap::value_parser!(u16).range(1..))]
    pub history: u16,

    /// Weeks (matchup periods) to walk per season.
    #[clap(long, default_value_t = 17, value_parser = clap::value_parser!(u16).range(1..=25))]
    pub weeks: u16,

    /// Ignore cached ESPN responses and fetch everything again.
    #[clap(long)]
    pub refresh: bool,
}

#[derive(Debug, Parser)]
#[clap(
    name = "ffl-records",
    about = "ESPN Fantasy Football league records, head-to-head and spreadsheet export"
)]
pub struct Cli {
    /// Log progress at debug level.
    #[clap(long, short, global = true)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Serve the league dashboard (`/` and `/headtohead`).
    Serve {
        #[clap(flatten)]
        league: LeagueArgs,

        /// Address to bind.
        #[clap(long, default_value = "127.0.0.1")]
        host: IpAddr,

        /// Port to listen on.
        #[clap(long, env = "PORT", default_value_t = 5000)]
        port: u16,
    },

    /// Export records, current season and head-to-head tabs to Google Sheets.
    ///
    /// Requires a service account in the `GOOGLE_CREDS` environment variable
    /// unless `--dry-run` is given.
    Export {
        #[clap(flatten)]
        league: LeagueArgs,

        /// Spreadsheet name, looked up through Google Drive and created if missing.
        #[clap(long, default_value = DEFAULT_SPREADSHEET)]
        spreadsheet: String,

        /// Spreadsheet id; skips the lookup by name.
        #[clap(long)]
        spreadsheet_id: Option<String>,

        /// Print the tabs instead of writing them.
        #[clap(long)]
        dry_run: bool,
    },

    /// Print the league record book.
    Records {
        #[clap(flatten)]
        league: LeagueArgs,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Print the head-to-head win/loss matrix.
    HeadToHead {
        #[clap(flatten)]
        league: LeagueArgs,

        /// Group records by owner (stable across seasons) or by team name.
        #[clap(long, value_enum, default_value_t = GroupBy::Owner)]
        by: GroupBy,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Print current standings and the remaining schedule.
    Standings {
        #[clap(flatten)]
        league: LeagueArgs,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },
}
