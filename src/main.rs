//! Entry point: parse CLI and dispatch to command handlers.

use clap::Parser;
use ffl_records::{
    cli::{Cli, Commands},
    commands::{
        client_for, export::handle_export, head_to_head::handle_head_to_head,
        records::handle_records, serve::handle_serve, standings::handle_standings,
    },
    logging::init_logging,
    sheets::SpreadsheetTarget,
    Result,
};

/// Run the CLI.
#[tokio::main]
async fn main() -> Result<()> {
    let app = Cli::parse();
    init_logging(app.verbose);

    match app.command {
        Commands::Serve { league, host, port } => {
            let client = client_for(&league)?;
            handle_serve(client, &league, host, port).await?
        }

        Commands::Export {
            league,
            spreadsheet,
            spreadsheet_id,
            dry_run,
        } => {
            let client = client_for(&league)?;
            let target = match spreadsheet_id {
                Some(id) => SpreadsheetTarget::Id(id),
                None => SpreadsheetTarget::Name(spreadsheet),
            };
            handle_export(&client, &league, target, dry_run).await?
        }

        Commands::Records { league, json } => {
            handle_records(&client_for(&league)?, &league, json).await?
        }

        Commands::HeadToHead { league, by, json } => {
            handle_head_to_head(&client_for(&league)?, &league, by, json).await?
        }

        Commands::Standings { league, json } => {
            handle_standings(&client_for(&league)?, &league, json).await?
        }
    }

    Ok(())
}
