//! Command implementations for the records CLI

pub mod export;
pub mod head_to_head;
pub mod records;
pub mod serve;
pub mod standings;

use crate::{
    cli::LeagueArgs,
    collect::{collect_seasons, CollectOptions, SeasonData},
    espn::EspnClient,
    FflError, LeagueId, Result, LEAGUE_ID_ENV_VAR,
};

/// Use the given league id, falling back to `FFL_LEAGUE_ID`
pub fn resolve_league_id(league_id: Option<LeagueId>) -> Result<LeagueId> {
    if let Some(id) = league_id {
        return Ok(id);
    }
    match std::env::var(LEAGUE_ID_ENV_VAR) {
        Ok(raw) if !raw.trim().is_empty() => {
            raw.parse::<LeagueId>()
                .map_err(|_| FflError::InvalidLeagueId {
                    env_var: LEAGUE_ID_ENV_VAR.to_string(),
                    value: raw,
                })
        }
        _ => Err(FflError::MissingLeagueId {
            env_var: LEAGUE_ID_ENV_VAR.to_string(),
        }),
    }
}

/// ESPN client for the league and season named on the command line
pub fn client_for(args: &LeagueArgs) -> Result<EspnClient> {
    let league_id = resolve_league_id(args.league_id)?;
    Ok(EspnClient::new(league_id, args.season)?.refresh(args.refresh))
}

/// Walk the requested seasons; fails only when none could be loaded
pub async fn load_seasons(
    client: &EspnClient,
    args: &LeagueArgs,
    box_scores: bool,
) -> Result<Vec<SeasonData>> {
    let opts = CollectOptions::new(args.season, args.history, args.weeks).with_box_scores(box_scores);
    tracing::info!(
        league = %client.league_id(),
        seasons = ?opts.seasons,
        weeks = opts.weeks,
        "collecting league history"
    );

    let seasons = collect_seasons(client, &opts).await;
    if seasons.is_empty() {
        return Err(FflError::NoSeasons {
            league_id: client.league_id().to_string(),
        });
    }
    Ok(seasons)
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Mock ESPN league shared by the command tests

    use serde_json::json;
    use wiremock::{
        matchers::{method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    use crate::cli::{types::Season, LeagueArgs};
    use crate::espn::EspnClient;
    use crate::LeagueId;

    pub const LEAGUE: u32 = 4242;
    pub const SEASON: u16 = 2024;

    pub fn args(history: u16, weeks: u16) -> LeagueArgs {
        LeagueArgs {
            league_id: Some(LeagueId::new(LEAGUE)),
            season: Season::new(SEASON),
            history,
            weeks,
            refresh: false,
        }
    }

    pub fn client(server: &MockServer) -> EspnClient {
        EspnClient::with_base_url(server.uri(), LeagueId::new(LEAGUE), Season::new(SEASON))
            .unwrap()
    }

    pub fn league_path(season: u16) -> String {
        format!("/seasons/{}/segments/0/leagues/{}", season, LEAGUE)
    }

    /// Two-team league with one decided game in week 1 and an upcoming one
    /// in week 2
    pub async fn mount_league(server: &MockServer, season: u16) {
        let league = json!({
            "seasonId": season,
            "status": { "currentMatchupPeriod": 2 },
            "settings": {
                "name": "Test League",
                "rosterSettings": { "lineupSlotCounts": { "0": 1, "20": 3 } }
            },
            "members": [
                { "id": "{A}", "displayName": "alice" },
                { "id": "{B}", "displayName": "bob" }
            ],
            "teams": [
                { "id": 1, "name": "Alpha", "owners": ["{A}"], "playoffSeed": 1,
                  "transactionCounter": { "acquisitions": 9 },
                  "record": { "overall": { "wins": 1, "losses": 0, "pointsFor": 120.5, "pointsAgainst": 99.0 } },
                  "roster": { "entries": [ { "playerId": 10 }, { "playerId": 11 } ] } },
                { "id": 2, "name": "Beta", "owners": ["{B}"], "playoffSeed": 2,
                  "transactionCounter": { "acquisitions": 2 },
                  "record": { "overall": { "wins": 0, "losses": 1, "pointsFor": 99.0, "pointsAgainst": 120.5 } },
                  "roster": { "entries": [ { "playerId": 30 } ] } }
            ],
            "draftDetail": {
                "drafted": true,
                "picks": [
                    { "playerId": 10, "teamId": 1, "roundId": 1, "roundPickNumber": 1 },
                    { "playerId": 20, "teamId": 2, "roundId": 1, "roundPickNumber": 2 }
                ]
            }
        });
        let schedule = json!({
            "schedule": [
                { "matchupPeriodId": 1, "winner": "HOME",
                  "home": { "teamId": 1, "totalPoints": 120.5 },
                  "away": { "teamId": 2, "totalPoints": 99.0 } },
                { "matchupPeriodId": 2, "winner": "UNDECIDED",
                  "home": { "teamId": 2, "totalPoints": 0.0 },
                  "away": { "teamId": 1, "totalPoints": 0.0 } }
            ]
        });

        Mock::given(method("GET"))
            .and(path(league_path(season)))
            .and(query_param("view", "mTeam"))
            .respond_with(ResponseTemplate::new(200).set_body_json(league))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path(league_path(season)))
            .and(query_param("view", "mMatchupScore"))
            .respond_with(ResponseTemplate::new(200).set_body_json(schedule))
            .mount(server)
            .await;
    }
}
