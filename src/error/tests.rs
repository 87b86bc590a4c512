//! Unit tests for error handling

use super::*;
use std::io;

#[cfg(test)]
mod ffl_error_tests {
    use super::*;

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err = FflError::from(json_error);

        match err {
            FflError::Json(_) => (),
            _ => panic!("Expected Json error variant"),
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let err = FflError::from(io_error);

        match err {
            FflError::Io(_) => (),
            _ => panic!("Expected Io error variant"),
        }
    }

    #[test]
    fn test_invalid_header_error_conversion() {
        let header_error = reqwest::header::HeaderValue::from_str("invalid\nheader").unwrap_err();
        let err = FflError::from(header_error);

        match err {
            FflError::InvalidHeader(_) => (),
            _ => panic!("Expected InvalidHeader error variant"),
        }
    }

    #[test]
    fn test_parse_int_error_conversion() {
        let parse_error = "abc".parse::<u32>().unwrap_err();
        let err = FflError::from(parse_error);

        match err {
            FflError::InvalidNumber(_) => (),
            _ => panic!("Expected InvalidNumber error variant"),
        }
    }

    #[test]
    fn test_missing_league_id_message() {
        let err = FflError::MissingLeagueId {
            env_var: "FFL_LEAGUE_ID".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "League ID not provided and FFL_LEAGUE_ID environment variable not set"
        );
    }

    #[test]
    fn test_invalid_league_id_message() {
        let err = FflError::InvalidLeagueId {
            env_var: "FFL_LEAGUE_ID".to_string(),
            value: "12ab".to_string(),
        };
        assert_eq!(err.to_string(), "FFL_LEAGUE_ID is not a valid league id: \"12ab\"");
    }

    #[test]
    fn test_missing_credentials_message() {
        let err = FflError::MissingCredentials {
            env_var: "GOOGLE_CREDS".to_string(),
        };
        assert_eq!(err.to_string(), "GOOGLE_CREDS environment variable not set");
    }

    #[test]
    fn test_sheets_helper() {
        let err = FflError::sheets("quota exceeded");
        match &err {
            FflError::Sheets { message } => assert_eq!(message, "quota exceeded"),
            _ => panic!("Expected Sheets error variant"),
        }
        assert_eq!(err.to_string(), "Spreadsheet error: quota exceeded");
    }

    #[test]
    fn test_error_debug_format() {
        let err = FflError::WorksheetNotFound {
            title: "Records".to_string(),
        };
        let debug = format!("{:?}", err);
        assert!(debug.contains("WorksheetNotFound"));
        assert!(debug.contains("Records"));
    }
}
