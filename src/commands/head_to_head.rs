//! Head-to-head command implementation

use crate::{
    cli::LeagueArgs,
    espn::EspnClient,
    records::{GroupBy, HeadToHead},
    Result,
};

use super::load_seasons;

/// Handle the head-to-head command
pub async fn handle_head_to_head(
    client: &EspnClient,
    args: &LeagueArgs,
    by: GroupBy,
    as_json: bool,
) -> Result<()> {
    let seasons = load_seasons(client, args, false).await?;
    let h2h = HeadToHead::build(&seasons, by);

    if as_json {
        println!("{}", serde_json::to_string_pretty(&h2h)?);
    } else if h2h.is_empty() {
        println!("No completed games found.");
    } else {
        for line in table_lines(&h2h) {
            println!("{}", line);
        }
    }
    Ok(())
}

/// Fixed-width text table: names down the left, one column per opponent and
/// a final column with the overall record
pub fn table_lines(h2h: &HeadToHead) -> Vec<String> {
    let names: Vec<&str> = h2h.entrants().iter().map(|e| e.name.as_str()).collect();
    let label_width = names.iter().map(|n| n.chars().count()).max().unwrap_or(0);
    let col_width = names
        .iter()
        .map(|n| n.chars().count())
        .max()
        .unwrap_or(0)
        .max(5);

    let mut lines = Vec::with_capacity(names.len() + 1);
    let mut header = format!("{:<w$}", "", w = label_width);
    for n in &names {
        header.push_str(&format!("  {:>w$}", n, w = col_width));
    }
    header.push_str(&format!("  {:>w$}", "Total", w = col_width));
    lines.push(header.trim_end().to_string());

    for row in h2h.rows() {
        let mut line = format!("{:<w$}", row.name, w = label_width);
        for cell in &row.cells {
            line.push_str(&format!("  {:>w$}", cell, w = col_width));
        }
        let total = h2h.totals(&row.key).to_string();
        line.push_str(&format!("  {:>w$}", total, w = col_width));
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::*;
    use wiremock::MockServer;

    #[tokio::test]
    async fn test_table_from_mock_league() {
        let server = MockServer::start().await;
        mount_league(&server, SEASON).await;

        let seasons = load_seasons(&client(&server), &args(1, 3), false)
            .await
            .unwrap();
        let lines = table_lines(&HeadToHead::build(&seasons, GroupBy::Owner));

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "       alice    bob  Total");
        assert_eq!(lines[1], "alice      —    1-0    1-0");
        assert_eq!(lines[2], "bob      0-1      —    0-1");
    }

    #[tokio::test]
    async fn test_group_by_team() {
        let server = MockServer::start().await;
        mount_league(&server, SEASON).await;

        let seasons = load_seasons(&client(&server), &args(1, 1), false)
            .await
            .unwrap();
        let h2h = HeadToHead::build(&seasons, GroupBy::Team);
        let names: Vec<&str> = h2h.entrants().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Beta"]);
    }
}
