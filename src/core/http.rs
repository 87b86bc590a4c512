//! HTTP utilities for ESPN API communication

use crate::Result;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, COOKIE};

pub const SWID_ENV_VAR: &str = "ESPN_SWID";
pub const S2_ENV_VAR: &str = "ESPN_S2";

/// Headers sent with every ESPN request.
///
/// Adds the `SWID` / `espn_s2` cookie when both `ESPN_SWID` and `ESPN_S2`
/// are set; public leagues need neither.
pub fn espn_headers() -> Result<HeaderMap> {
    let mut h = HeaderMap::new();
    h.insert(ACCEPT, HeaderValue::from_static("application/json"));
    if let Some(cookie) = cookie_from_env() {
        h.insert(COOKIE, HeaderValue::from_str(&cookie)?);
    }
    Ok(h)
}

fn cookie_from_env() -> Option<String> {
    let swid = std::env::var(SWID_ENV_VAR).ok().filter(|v| !v.is_empty())?;
    let s2 = std::env::var(S2_ENV_VAR).ok().filter(|v| !v.is_empty())?;
    Some(format!("SWID={}; espn_s2={}", swid, s2))
}
