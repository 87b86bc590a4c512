//! Server-side HTML for the dashboard.

use std::fmt::Write;

use crate::cli::types::Season;
use crate::espn::{League, Matchup, Side};
use crate::records::HeadToHead;

/// Escape text for use in HTML element content and quoted attributes
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const STYLE: &str = "body{font-family:sans-serif;margin:2rem;}\
table{border-collapse:collapse;margin-bottom:2rem;}\
th,td{border:1px solid #ccc;padding:.3rem .6rem;text-align:center;}\
td.name{text-align:left;}td.self{background:#eee;}td.total{font-weight:bold;}\
img.logo{height:24px;vertical-align:middle;margin-right:.4rem;}";

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <nav><a href=\"/\">Home</a> | <a href=\"/headtohead\">Head-to-Head</a></nav>\n\
         {body}</body>\n</html>\n",
        title = escape(title),
    )
}

fn side_cells(side: Option<&Side>) -> (String, String) {
    match side {
        Some(s) => (escape(&s.team_name), format!("{:.2}", s.score)),
        None => ("BYE".to_string(), String::new()),
    }
}

/// Standings and this week's matchups
pub fn home_page(league: &League, matchups: &[Matchup]) -> String {
    let mut body = String::new();
    let _ = writeln!(
        body,
        "<h1>{} {}</h1>",
        escape(&league.name),
        league.season
    );

    body.push_str("<h2>Standings</h2>\n<table>\n<tr><th>Rank</th><th>Team</th><th>Owner</th>\
                   <th>W</th><th>L</th><th>T</th><th>PF</th><th>PA</th></tr>\n");
    for team in league.standings() {
        let logo = team
            .logo
            .as_deref()
            .map(|url| format!("<img class=\"logo\" src=\"{}\" alt=\"\">", escape(url)))
            .unwrap_or_default();
        let _ = writeln!(
            body,
            "<tr><td>{}</td><td class=\"name\">{}{}</td><td>{}</td><td>{}</td><td>{}</td>\
             <td>{}</td><td>{:.2}</td><td>{:.2}</td></tr>",
            team.standing,
            logo,
            escape(&team.name),
            escape(&team.owner.display_name),
            team.wins,
            team.losses,
            team.ties,
            team.points_for,
            team.points_against,
        );
    }
    body.push_str("</table>\n");

    let _ = writeln!(body, "<h2>Week {} Matchups</h2>", league.current_week);
    if matchups.is_empty() {
        body.push_str("<p>No matchups this week.</p>\n");
    } else {
        body.push_str(
            "<table>\n<tr><th>Home</th><th>Score</th><th>Score</th><th>Away</th></tr>\n",
        );
        for m in matchups {
            let (home, home_score) = side_cells(m.home.as_ref());
            let (away, away_score) = side_cells(m.away.as_ref());
            let _ = writeln!(
                body,
                "<tr><td class=\"name\">{}</td><td>{}</td><td>{}</td><td class=\"name\">{}</td></tr>",
                home, home_score, away_score, away
            );
        }
        body.push_str("</table>\n");
    }

    page(&league.name, &body)
}

/// Owner-by-owner win/loss matrix
pub fn head_to_head_page(h2h: &HeadToHead, seasons: &[Season]) -> String {
    let mut body = String::from("<h1>Head-to-Head Records</h1>\n");

    if let (Some(first), Some(last)) = (seasons.first(), seasons.last()) {
        let _ = writeln!(body, "<p>Seasons {}&ndash;{}</p>", first, last);
    }

    if h2h.is_empty() {
        body.push_str("<p>No completed games found.</p>\n");
        return page("Head-to-Head", &body);
    }

    body.push_str("<table>\n<tr><th></th>");
    for e in h2h.entrants() {
        let _ = write!(body, "<th>{}</th>", escape(&e.name));
    }
    body.push_str("<th>Total</th></tr>\n");

    for (i, row) in h2h.rows().into_iter().enumerate() {
        let _ = write!(body, "<tr><td class=\"name\">{}</td>", escape(&row.name));
        for (j, cell) in row.cells.iter().enumerate() {
            if i == j {
                let _ = write!(body, "<td class=\"self\">{}</td>", cell);
            } else {
                let _ = write!(body, "<td>{}</td>", escape(cell));
            }
        }
        let _ = writeln!(body, "<td class=\"total\">{}</td></tr>", h2h.totals(&row.key));
    }
    body.push_str("</table>\n");

    page("Head-to-Head", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::test_support::*;
    use crate::records::GroupBy;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<b>"Tom" & Jerry's</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; Jerry&#39;s&lt;/b&gt;"
        );
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_home_page_escapes_names() {
        let mut a = team(1, ("{A}", "<alice>"), "Bobby Tables'); DROP");
        a.wins = 3;
        a.points_for = 321.456;
        a.logo = Some("https://img/x.png?a=1&b=2".to_string());
        let l = league(2024, vec![a]);

        let m = game(1, ("{A}", "<alice>", "A & B", 88.0), ("{B}", "bob", "Beta", 77.5));
        let html = home_page(&l, &[m]);

        assert!(html.contains("&lt;alice&gt;"));
        assert!(!html.contains("<alice>"));
        assert!(html.contains("Bobby Tables&#39;); DROP"));
        assert!(html.contains("321.46"));
        assert!(html.contains("x.png?a=1&amp;b=2"));
        assert!(html.contains("A &amp; B"));
        assert!(html.contains("<td>77.50</td>"));
        assert!(html.contains("Week 1 Matchups"));
    }

    #[test]
    fn test_home_page_bye_and_empty_week() {
        let l = league(2024, Vec::new());
        assert!(home_page(&l, &[]).contains("No matchups this week."));

        let mut bye = game(1, ("{A}", "alice", "Alpha", 10.0), ("{B}", "bob", "Beta", 0.0));
        bye.away = None;
        assert!(home_page(&l, &[bye]).contains("BYE"));
    }

    #[test]
    fn test_head_to_head_page() {
        let seasons = vec![season_with_games(
            2023,
            vec![game(1, ("{A}", "alice", "Alpha", 100.0), ("{B}", "b&b", "Beta", 90.0))],
        )];
        let h2h = HeadToHead::build(&seasons, GroupBy::Owner);
        let html = head_to_head_page(&h2h, &[Season::new(2021), Season::new(2023)]);

        assert!(html.contains("Seasons 2021&ndash;2023"));
        assert!(html.contains("<th>b&amp;b</th>"));
        assert!(html.contains("<td class=\"self\">—</td><td>1-0</td><td class=\"total\">1-0</td>"));
        assert!(html.contains("<th>b&amp;b</th><th>Total</th>"));
    }

    #[test]
    fn test_head_to_head_page_empty() {
        let html = head_to_head_page(&HeadToHead::default(), &[]);
        assert!(html.contains("No completed games found."));
    }
}
