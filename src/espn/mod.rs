//! ESPN Fantasy Football provider: wire types, league model and HTTP client.

pub mod http;
pub mod league;
pub mod types;

pub use http::EspnClient;
pub use league::{BoxScore, League, LineupEntry, Matchup, Outcome, Owner, Side, Team};
