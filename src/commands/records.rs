//! Record book command implementation

use crate::{
    cli::LeagueArgs,
    espn::EspnClient,
    records::{GameRecord, MarginRecord, PickupRecord, RecordBook, SeasonRecord},
    Result,
};

use super::load_seasons;

/// Handle the records command
pub async fn handle_records(client: &EspnClient, args: &LeagueArgs, as_json: bool) -> Result<()> {
    // lineup efficiency needs per-player box scores
    let seasons = load_seasons(client, args, true).await?;
    let book = RecordBook::compile(&seasons, args.season);

    if as_json {
        println!("{}", serde_json::to_string_pretty(&book)?);
    } else {
        for line in record_lines(&book) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn game(r: &GameRecord) -> String {
    format!(
        "{} ({}) {:.2} pts, {} week {}",
        r.owner, r.team, r.points, r.season, r.week
    )
}

fn season(r: &SeasonRecord) -> String {
    format!("{} ({}) {:.2} pts, {}", r.owner, r.team, r.points, r.season)
}

fn margin(r: &MarginRecord) -> String {
    format!(
        "{} ({}) over {} ({}) by {:.2}, {} week {}",
        r.winner_owner, r.winner_team, r.loser_owner, r.loser_team, r.margin, r.season, r.week
    )
}

fn pickups(r: &PickupRecord) -> String {
    format!("{} ({}) {} pickups, {}", r.owner, r.team, r.pickups, r.season)
}

fn line<T>(label: &str, rec: Option<&T>, f: impl Fn(&T) -> String) -> String {
    format!(
        "{:<28} {}",
        format!("{}:", label),
        rec.map(f).unwrap_or_else(|| "n/a".to_string())
    )
}

/// One line per record, `n/a` where nothing qualified
pub fn record_lines(book: &RecordBook) -> Vec<String> {
    let seasons: Vec<String> = book.seasons.iter().map(|s| s.to_string()).collect();
    vec![
        format!("Seasons: {}", seasons.join(", ")),
        line("Most Points in a Game", book.most_points_game.as_ref(), game),
        line("Least Points in a Game", book.least_points_game.as_ref(), game),
        line("Most Points in a Season", book.most_points_season.as_ref(), season),
        line("Least Points in a Season", book.least_points_season.as_ref(), season),
        line("Largest Point Differential", book.largest_margin.as_ref(), margin),
        line("Smallest Point Differential", book.smallest_margin.as_ref(), margin),
        line("The Managing Maestro", book.managing_maestro.as_ref(), |r| {
            format!(
                "{} ({}) {:.1}% of optimal, {}",
                r.owner,
                r.team,
                r.efficiency * 100.0,
                r.season
            )
        }),
        line("The Hustler", book.hustler.as_ref(), pickups),
        line("The Zen Master", book.zen_master.as_ref(), pickups),
        line("The Loyalist", book.loyalist.as_ref(), |r| {
            format!(
                "{} ({}) kept {} of {} drafted, {}",
                r.owner, r.team, r.retained, r.drafted, r.season
            )
        }),
    ]
}
