//! Type-safe wrappers for ESPN Fantasy Football identifiers and periods.

pub mod ids;
pub mod time;

pub use ids::{LeagueId, OwnerId, PlayerId, TeamId};
pub use time::{Season, Week};
