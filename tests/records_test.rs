//! End-to-end record book against a mocked ESPN league

use ffl_records::{
    collect::{collect_seasons, CollectOptions},
    espn::EspnClient,
    records::{GroupBy, HeadToHead, RecordBook},
    LeagueId, Season,
};
use serde_json::{json, Value};
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

const LEAGUE: u32 = 31337;

fn league_path(season: u16) -> String {
    format!("/seasons/{}/segments/0/leagues/{}", season, LEAGUE)
}

fn league_body(season: u16) -> Value {
    json!({
        "seasonId": season,
        "status": { "currentMatchupPeriod": 2, "finalScoringPeriod": 17 },
        "settings": {
            "name": "Records League",
            "rosterSettings": { "lineupSlotCounts": { "0": 1, "2": 1, "20": 1, "21": 1 } }
        },
        "members": [
            { "id": "{A}", "displayName": "alice" },
            { "id": "{B}", "displayName": "bob" }
        ],
        "teams": [
            { "id": 1, "location": "Team", "nickname": "Alpha", "owners": ["{A}"],
              "record": { "overall": { "wins": 1, "pointsFor": 35.0 } } },
            { "id": 2, "name": "Beta", "owners": ["{B}"],
              "record": { "overall": { "losses": 1, "pointsFor": 30.0 } } }
        ]
    })
}

fn entry(id: i64, slot: u8, eligible: &[u8], points: f64) -> Value {
    json!({
        "playerId": id,
        "lineupSlotId": slot,
        "playerPoolEntry": {
            "appliedStatTotal": points,
            "player": { "fullName": format!("Player {}", id), "eligibleSlots": eligible }
        }
    })
}

fn schedule_body(with_rosters: bool) -> Value {
    let mut home = json!({ "teamId": 1, "totalPoints": 35.0 });
    let mut away = json!({ "teamId": 2, "totalPoints": 30.0 });
    if with_rosters {
        home["rosterForCurrentScoringPeriod"] = json!({ "entries": [
            entry(1, 0, &[0, 20], 25.0),
            entry(2, 2, &[2, 20], 10.0),
            entry(3, 20, &[2, 20], 15.0),
            entry(4, 21, &[2, 20, 21], 40.0)
        ]});
        away["rosterForCurrentScoringPeriod"] = json!({ "entries": [
            entry(5, 0, &[0, 20], 18.0),
            entry(6, 2, &[2, 20], 12.0),
            entry(7, 20, &[2, 20], 5.0)
        ]});
    }
    json!({
        "schedule": [
            { "matchupPeriodId": 1, "winner": "HOME", "home": home, "away": away },
            { "matchupPeriodId": 2, "winner": "UNDECIDED",
              "home": { "teamId": 2, "totalPoints": 4.0 }, "away": { "teamId": 1, "totalPoints": 2.0 } }
        ]
    })
}

async fn mount(server: &MockServer, season: u16) {
    // box score requests carry mScoreboard too, so they are matched first
    Mock::given(method("GET"))
        .and(path(league_path(season)))
        .and(query_param("view", "mScoreboard"))
        .respond_with(ResponseTemplate::new(200).set_body_json(schedule_body(true)))
        .with_priority(1)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(league_path(season)))
        .and(query_param("view", "mTeam"))
        .respond_with(ResponseTemplate::new(200).set_body_json(league_body(season)))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(league_path(season)))
        .and(query_param("view", "mMatchupScore"))
        .respond_with(ResponseTemplate::new(200).set_body_json(schedule_body(false)))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_record_book_end_to_end() {
    let server = MockServer::start().await;
    mount(&server, 2024).await;

    let season = Season::new(2024);
    let client = EspnClient::with_base_url(server.uri(), LeagueId::new(LEAGUE), season).unwrap();
    let opts = CollectOptions::new(season, 2, 3).with_box_scores(true);
    let seasons = collect_seasons(&client, &opts).await;

    // 2023 is not mocked and gets skipped
    assert_eq!(seasons.len(), 1);
    assert_eq!(seasons[0].league.teams[0].name, "Team Alpha");
    assert_eq!(seasons[0].box_scores().count(), 2);

    let book = RecordBook::compile(&seasons, season);

    let most = book.most_points_game.as_ref().unwrap();
    assert_eq!((most.owner.as_str(), most.points), ("alice", 35.0));
    let least = book.least_points_game.as_ref().unwrap();
    assert_eq!((least.owner.as_str(), least.points), ("bob", 30.0));
    assert_eq!(book.largest_margin.as_ref().unwrap().margin, 5.0);

    // alice left 15 on the bench (IR does not count): 35 / 40
    // bob started his best lineup: 30 / 30
    let maestro = book.managing_maestro.as_ref().unwrap();
    assert_eq!(maestro.owner, "bob");
    assert_eq!(maestro.efficiency, 1.0);
    assert_eq!(maestro.optimal_points, 30.0);

    let json = serde_json::to_value(&book).unwrap();
    assert_eq!(json["most_points_season"]["points"], 35.0);
    assert_eq!(json["seasons"], json!([2024]));
    assert!(json["loyalist"].is_null());
}

#[tokio::test]
async fn test_head_to_head_end_to_end() {
    let server = MockServer::start().await;
    mount(&server, 2023).await;
    mount(&server, 2024).await;

    let season = Season::new(2024);
    let client = EspnClient::with_base_url(server.uri(), LeagueId::new(LEAGUE), season).unwrap();
    let seasons = collect_seasons(&client, &CollectOptions::new(season, 2, 2)).await;
    assert_eq!(seasons.len(), 2);

    let h2h = HeadToHead::build(&seasons, GroupBy::Owner);
    assert_eq!(h2h.record("{A}", "{B}").wins, 2);
    assert_eq!(h2h.record("{B}", "{A}").losses, 2);

    let rows = h2h.rows();
    assert_eq!(rows[0].name, "alice");
    assert_eq!(rows[0].cells, vec!["—", "2-0"]);
}
