//! Standings command implementation

use serde::Serialize;

use crate::{
    cli::LeagueArgs,
    espn::{EspnClient, League, Matchup, Team},
    Result,
};

#[derive(Serialize)]
struct StandingsJson<'a> {
    season: crate::Season,
    current_week: crate::Week,
    standings: Vec<&'a Team>,
    upcoming: Vec<&'a Matchup>,
}

/// Handle the standings command
pub async fn handle_standings(client: &EspnClient, args: &LeagueArgs, as_json: bool) -> Result<()> {
    let league = client.get_league(args.season).await?;

    if as_json {
        let out = StandingsJson {
            season: league.season,
            current_week: league.current_week,
            standings: league.standings(),
            upcoming: league.upcoming(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for line in standings_lines(&league) {
            println!("{}", line);
        }
    }
    Ok(())
}

pub fn standings_lines(league: &League) -> Vec<String> {
    let mut lines = vec![format!("{} {}", league.name, league.season)];

    for team in league.standings() {
        lines.push(format!(
            "{:>2}. {} ({}) {}-{}-{}  PF {:.2}  PA {:.2}",
            team.standing,
            team.name,
            team.owner.display_name,
            team.wins,
            team.losses,
            team.ties,
            team.points_for,
            team.points_against
        ));
    }

    let upcoming = league.upcoming();
    if !upcoming.is_empty() {
        lines.push(String::new());
        lines.push("Upcoming:".to_string());
        for m in upcoming {
            let name = |side: Option<&crate::espn::Side>| {
                side.map_or("TBD".to_string(), |s| s.team_name.clone())
            };
            lines.push(format!(
                "  Week {:>2}: {} vs {}",
                m.week.as_u16(),
                name(m.home.as_ref()),
                name(m.away.as_ref())
            ));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::*;
    use wiremock::MockServer;

    #[tokio::test]
    async fn test_standings_lines() {
        let server = MockServer::start().await;
        mount_league(&server, SEASON).await;

        let league = client(&server)
            .get_league(crate::Season::new(SEASON))
            .await
            .unwrap();
        let lines = standings_lines(&league);

        assert_eq!(lines[0], "Test League 2024");
        assert_eq!(lines[1], " 1. Alpha (alice) 1-0-0  PF 120.50  PA 99.00");
        assert_eq!(lines[2], " 2. Beta (bob) 0-1-0  PF 99.00  PA 120.50");
        assert_eq!(lines[4], "Upcoming:");
        assert_eq!(lines[5], "  Week  2: Beta vs Alpha");
        assert_eq!(lines.len(), 6);
    }
}
