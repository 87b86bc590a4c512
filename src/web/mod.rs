//! Web dashboard: standings and matchups at `/`, the owner matrix at
//! `/headtohead`.

pub mod render;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::{net::SocketAddr, sync::Arc};

use crate::{
    collect::{collect_seasons, CollectOptions},
    espn::EspnClient,
    records::{GroupBy, HeadToHead},
    FflError, Result,
};

#[derive(Clone)]
pub struct AppState {
    client: Arc<EspnClient>,
    history: u16,
    weeks: u16,
}

impl AppState {
    pub fn new(client: EspnClient, history: u16, weeks: u16) -> Self {
        Self {
            client: Arc::new(client),
            history,
            weeks,
        }
    }
}

/// Provider failure surfaced to the browser
pub struct WebError(FflError);

impl From<FflError> for WebError {
    fn from(e: FflError) -> Self {
        WebError(e)
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        tracing::warn!("request failed: {}", self.0);
        (
            StatusCode::BAD_GATEWAY,
            format!("League data unavailable: {}", self.0),
        )
            .into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/headtohead", get(head_to_head))
        .with_state(state)
}

async fn home(State(state): State<AppState>) -> std::result::Result<Html<String>, WebError> {
    let season = state.client.current_season();
    let league = state.client.get_league(season).await?;
    let matchups = state
        .client
        .get_scoreboard(&league, league.current_week)
        .await?;
    Ok(Html(render::home_page(&league, &matchups)))
}

async fn head_to_head(
    State(state): State<AppState>,
) -> std::result::Result<Html<String>, WebError> {
    let opts = CollectOptions::new(state.client.current_season(), state.history, state.weeks);
    let seasons = collect_seasons(&state.client, &opts).await;
    if seasons.is_empty() {
        return Err(FflError::NoSeasons {
            league_id: state.client.league_id().to_string(),
        }
        .into());
    }

    let h2h = HeadToHead::build(&seasons, GroupBy::Owner);
    let loaded: Vec<_> = seasons.iter().map(|s| s.season).collect();
    Ok(Html(render::head_to_head_page(&h2h, &loaded)))
}

/// Bind `addr` and serve until the process is stopped
pub async fn serve(state: AppState, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(state)).await?;
    Ok(())
}
