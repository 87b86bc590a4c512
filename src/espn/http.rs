//! ESPN league client.
//!
//! Every request goes to the league endpoint with a different set of views
//! and is memoized through [`UnifiedCache`]. Seasons older than the current
//! one cannot change any more, so their payloads are also kept on disk.

use reqwest::{header::HeaderMap, header::HeaderValue, Client};
use serde_json::{json, Value};
use std::{collections::HashSet, sync::Mutex, time::Duration};

use crate::{
    cli::types::{LeagueId, Season, Week},
    core::{
        cache::{default_cache_dir, Resource, ResponseKey, UnifiedCache},
        http::espn_headers,
    },
    espn::{
        league::{BoxScore, League, Matchup},
        types::LeagueResponse,
    },
    Result,
};


/// Base path for ESPN Fantasy Football v3 API.
pub const FFL_BASE_URL: &str = "https://lm-api-reads.fantasy.espn.com/apis/v3/games/ffl";

const LEAGUE_VIEWS: [&str; 6] = [
    "mTeam",
    "mRoster",
    "mMatchup",
    "mSettings",
    "mStandings",
    "mDraftDetail",
];

/// How long live (current season) responses stay in memory
const LIVE_MAX_AGE: Duration = Duration::from_secs(300);
const MEMORY_CAPACITY: usize = 128;

pub struct EspnClient {
    http: Client,
    base_url: String,
    league_id: LeagueId,
    current_season: Season,
    headers: HeaderMap,
    cache: UnifiedCache<ResponseKey, Value>,
    refresh: bool,
    /// Keys already refetched during this run when `refresh` is on
    refreshed: Mutex<HashSet<ResponseKey>>,
}

impl EspnClient {
    /// Client for the public ESPN API, with cookies from the environment and
    /// the default on-disk cache
    pub fn new(league_id: LeagueId, current_season: Season) -> Result<Self> {
        let client = Self::with_base_url(FFL_BASE_URL, league_id, current_season)?;
        Ok(client.with_cache(
            UnifiedCache::new(MEMORY_CAPACITY)
                .with_max_age(LIVE_MAX_AGE)
                .with_disk(default_cache_dir()),
        ))
    }

    /// Client against `base_url` with a memory-only cache
    pub fn with_base_url(
        base_url: impl Into<String>,
        league_id: LeagueId,
        current_season: Season,
    ) -> Result<Self> {
        let http = Client::builder().user_agent("ffl-records/1.0").build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            league_id,
            current_season,
            headers: espn_headers()?,
            cache: UnifiedCache::new(MEMORY_CAPACITY).with_max_age(LIVE_MAX_AGE),
            refresh: false,
            refreshed: Mutex::new(HashSet::new()),
        })
    }

    pub fn with_cache(mut self, cache: UnifiedCache<ResponseKey, Value>) -> Self {
        self.cache = cache;
        self
    }

    /// Refetch every resource once, replacing whatever was cached for it
    pub fn refresh(mut self, refresh: bool) -> Self {
        self.refresh = refresh;
        self
    }

    pub fn league_id(&self) -> LeagueId {
        self.league_id
    }

    pub fn current_season(&self) -> Season {
        self.current_season
    }

    fn league_url(&self, season: Season) -> String {
        format!(
            "{}/seasons/{}/segments/0/leagues/{}",
            self.base_url,
            season.as_u16(),
            self.league_id.as_u32()
        )
    }

    /// True the first time `key` is seen while refreshing
    fn needs_refetch(&self, key: &ResponseKey) -> bool {
        if !self.refresh {
            return false;
        }
        self.refreshed
            .lock()
            .map(|mut seen| seen.insert(key.clone()))
            .unwrap_or(true)
    }

    async fn fetch(
        &self,
        season: Season,
        resource: Resource,
        params: &[(&str, String)],
        extra_headers: HeaderMap,
    ) -> Result<Value> {
        let key = ResponseKey::new(self.league_id, season, resource);
        let settled = season < self.current_season;

        if self.needs_refetch(&key) {
            if let Err(e) = self.cache.invalidate(&key) {
                tracing::warn!(season = %season, ?resource, "could not drop cached copy: {}", e);
            }
        } else if let Some(v) = self.cache.get(&key, settled) {
            tracing::debug!(season = %season, ?resource, "cache hit");
            return Ok(v);
        }

        let url = self.league_url(season);
        tracing::debug!(%url, ?resource, "GET");
        let mut headers = self.headers.clone();
        headers.extend(extra_headers);

        let v = self
            .http
            .get(&url)
            .headers(headers)
            .query(params)
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;

        self.cache.put(key, v.clone(), settled);
        Ok(v)
    }

    /// Raw league payload (teams, rosters, schedule, settings, standings, draft)
    pub async fn get_league_payload(&self, season: Season) -> Result<Value> {
        let params: Vec<(&str, String)> = LEAGUE_VIEWS
            .iter()
            .map(|v| ("view", v.to_string()))
            .collect();
        self.fetch(season, Resource::League, &params, HeaderMap::new())
            .await
    }

    pub async fn get_league(&self, season: Season) -> Result<League> {
        let payload = self.get_league_payload(season).await?;
        let response: LeagueResponse = serde_json::from_value(payload)?;
        Ok(League::from_response(season, response))
    }

    /// Matchups (scores only) for one week of `league`'s season.
    ///
    /// The provider answers with the whole season's schedule, which is
    /// fetched once per season and filtered here.
    pub async fn get_scoreboard(&self, league: &League, week: Week) -> Result<Vec<Matchup>> {
        let params = [("view", "mMatchupScore".to_string())];
        let payload = self
            .fetch(league.season, Resource::Schedule, &params, HeaderMap::new())
            .await?;
        let response: LeagueResponse = serde_json::from_value(payload)?;
        Ok(response
            .schedule
            .iter()
            .filter(|item| item.matchup_period_id == week.as_u16())
            .map(|item| league.matchup_from(item))
            .collect())
    }

    /// Matchups with per-player lineups for one week of `league`'s season
    pub async fn get_box_scores(&self, league: &League, week: Week) -> Result<Vec<BoxScore>> {
        let params = [
            ("view", "mMatchupScore".to_string()),
            ("view", "mScoreboard".to_string()),
            ("scoringPeriodId", week.as_u16().to_string()),
        ];
        let mut headers = HeaderMap::new();
        headers.insert("x-fantasy-filter", matchup_period_filter(week)?);

        let payload = self
            .fetch(league.season, Resource::BoxScores(week), &params, headers)
            .await?;
        let response: LeagueResponse = serde_json::from_value(payload)?;
        Ok(league.box_scores_from(&response.schedule, week))
    }
}

fn matchup_period_filter(week: Week) -> Result<HeaderValue> {
    let filter = json!({
        "schedule": {
            "filterMatchupPeriodIds": { "value": [week.as_u16()] }
        }
    });
    Ok(HeaderValue::from_str(&filter.to_string())?)
}
