//! Error types for the league records tool

use thiserror::Error;

#[cfg(test)]
mod tests;

pub type Result<T> = std::result::Result<T, FflError>;

#[derive(Error, Debug)]
pub enum FflError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("League ID not provided and {env_var} environment variable not set")]
    MissingLeagueId { env_var: String },

    #[error("{env_var} is not a valid league id: {value:?}")]
    InvalidLeagueId { env_var: String, value: String },

    #[error("Failed to parse number: {0}")]
    InvalidNumber(#[from] std::num::ParseIntError),

    #[error("{env_var} environment variable not set")]
    MissingCredentials { env_var: String },

    #[error("Invalid credentials: {message}")]
    InvalidCredentials { message: String },

    #[error("Token signing failed: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Spreadsheet error: {message}")]
    Sheets { message: String },

    #[error("Worksheet not found: {title}")]
    WorksheetNotFound { title: String },

    #[error("No season could be loaded for league {league_id}")]
    NoSeasons { league_id: String },
}

impl FflError {
    pub fn sheets(message: impl Into<String>) -> Self {
        FflError::Sheets {
            message: message.into(),
        }
    }
}
