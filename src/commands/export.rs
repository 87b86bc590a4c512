//! Spreadsheet export command implementation

use crate::{
    cli::LeagueArgs,
    espn::EspnClient,
    records::{GroupBy, HeadToHead, RecordBook},
    sheets::{
        layout, write_tab, GoogleSheets, MemoryWorkbook, ServiceAccount, Spreadsheet,
        SpreadsheetTarget, Tab,
    },
    Result,
};

use super::load_seasons;

/// Handle the export command.
///
/// Credentials are checked before anything is fetched so a misconfigured
/// run fails fast.
pub async fn handle_export(
    client: &EspnClient,
    args: &LeagueArgs,
    target: SpreadsheetTarget,
    dry_run: bool,
) -> Result<()> {
    if dry_run {
        let mut workbook = MemoryWorkbook::new();
        export_tabs(client, args, &mut workbook).await?;
        print!("{}", workbook);
        return Ok(());
    }

    let account = ServiceAccount::from_env()?;
    println!("Google service account loaded for: {}", account.client_email);

    let tabs = build_tabs(client, args).await?;
    let mut sheets = GoogleSheets::connect(&account, target).await?;
    write_tabs(&mut sheets, &tabs).await?;
    println!(
        "✓ Exported {} tabs to spreadsheet {}",
        tabs.len(),
        sheets.spreadsheet_id()
    );
    Ok(())
}

/// Records, Current Season and Head-to-Head tabs for the league
pub async fn build_tabs(client: &EspnClient, args: &LeagueArgs) -> Result<Vec<Tab>> {
    let seasons = load_seasons(client, args, true).await?;
    let book = RecordBook::compile(&seasons, args.season);
    let h2h = HeadToHead::build(&seasons, GroupBy::Owner);

    let current = match seasons.iter().find(|s| s.season == args.season) {
        Some(s) => s.league.clone(),
        None => client.get_league(args.season).await?,
    };

    Ok(vec![
        layout::records_tab(&book),
        layout::current_season_tab(&current),
        layout::head_to_head_tab(&h2h),
    ])
}

pub async fn write_tabs<S: Spreadsheet>(sheet: &mut S, tabs: &[Tab]) -> Result<()> {
    for tab in tabs {
        println!("Writing {} tab...", tab.title);
        write_tab(sheet, tab).await?;
    }
    Ok(())
}

/// Build every tab and write it to `sheet`
pub async fn export_tabs<S: Spreadsheet>(
    client: &EspnClient,
    args: &LeagueArgs,
    sheet: &mut S,
) -> Result<()> {
    let tabs = build_tabs(client, args).await?;
    write_tabs(sheet, &tabs).await
}
