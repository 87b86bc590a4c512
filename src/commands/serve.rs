//! Web dashboard command implementation

use std::net::{IpAddr, SocketAddr};

use crate::{
    cli::LeagueArgs,
    espn::EspnClient,
    web::{self, AppState},
    Result,
};

/// Handle the serve command; runs until interrupted
pub async fn handle_serve(client: EspnClient, args: &LeagueArgs, host: IpAddr, port: u16) -> Result<()> {
    let addr = SocketAddr::new(host, port);
    println!(
        "Serving league {} ({} seasons through {}) on http://{}",
        client.league_id(),
        args.history,
        args.season,
        addr
    );
    web::serve(AppState::new(client, args.history, args.weeks), addr).await
}
