//! Integration tests for command plumbing

use clap::Parser;
use ffl_records::{
    cli::{Cli, Commands},
    commands::{client_for, resolve_league_id},
    FflError, LeagueId, LEAGUE_ID_ENV_VAR,
};
use serial_test::serial;

#[test]
#[serial]
fn test_resolve_league_id_from_option() {
    std::env::set_var(LEAGUE_ID_ENV_VAR, "54321");
    let result = resolve_league_id(Some(LeagueId::new(12345)));
    assert_eq!(result.unwrap().as_u32(), 12345);
    std::env::remove_var(LEAGUE_ID_ENV_VAR);
}

#[test]
#[serial]
fn test_resolve_league_id_from_env() {
    std::env::set_var(LEAGUE_ID_ENV_VAR, " 54321 ");

    let result = resolve_league_id(None);
    assert_eq!(result.unwrap().as_u32(), 54321);

    std::env::remove_var(LEAGUE_ID_ENV_VAR);
}

#[test]
#[serial]
fn test_resolve_league_id_missing() {
    std::env::remove_var(LEAGUE_ID_ENV_VAR);

    match resolve_league_id(None).unwrap_err() {
        FflError::MissingLeagueId { env_var } => assert_eq!(env_var, "FFL_LEAGUE_ID"),
        other => panic!("Expected MissingLeagueId error, got {:?}", other),
    }
}

#[test]
#[serial]
fn test_resolve_league_id_invalid_env() {
    std::env::set_var(LEAGUE_ID_ENV_VAR, "not_a_number");
    let err = resolve_league_id(None).unwrap_err();
    std::env::remove_var(LEAGUE_ID_ENV_VAR);

    match err {
        FflError::InvalidLeagueId { env_var, value } => {
            assert_eq!(env_var, "FFL_LEAGUE_ID");
            assert_eq!(value, "not_a_number");
        }
        other => panic!("Expected InvalidLeagueId error, got {:?}", other),
    }
}

#[test]
#[serial]
fn test_resolve_league_id_blank_env_is_missing() {
    std::env::set_var(LEAGUE_ID_ENV_VAR, "  ");
    let result = resolve_league_id(None);
    std::env::remove_var(LEAGUE_ID_ENV_VAR);

    assert!(matches!(result, Err(FflError::MissingLeagueId { .. })));
}

#[test]
#[serial]
fn test_client_requires_league_id() {
    std::env::remove_var(LEAGUE_ID_ENV_VAR);
    let cli = Cli::parse_from(["ffl-records", "standings"]);
    let Commands::Standings { league, .. } = cli.command else {
        panic!("Expected Standings command");
    };
    assert!(matches!(
        client_for(&league),
        Err(FflError::MissingLeagueId { .. })
    ));
}

#[test]
#[serial]
fn test_serve_port_from_env() {
    std::env::set_var("PORT", "8080");
    let cli = Cli::parse_from(["ffl-records", "serve", "-l", "1"]);
    std::env::remove_var("PORT");

    match cli.command {
        Commands::Serve { league, host, port } => {
            assert_eq!(league.league_id, Some(LeagueId::new(1)));
            assert_eq!(host.to_string(), "127.0.0.1");
            assert_eq!(port, 8080);
        }
        other => panic!("Expected Serve command, got {:?}", other),
    }
}
