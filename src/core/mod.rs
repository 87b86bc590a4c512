//! Core utilities shared across the application
//!
//! - `cache`: memory + file caching of ESPN responses
//! - `http`: request headers and credentials for ESPN

pub mod cache;
pub mod http;

pub use cache::{default_cache_dir, ResponseKey, UnifiedCache};
pub use http::espn_headers;
