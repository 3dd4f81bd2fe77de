//! Error types for tubeharvest
//!
//! One enum covers the search side (authentication, transport, API
//! responses) and the file side (export and merge).

use thiserror::Error;

/// Error type for all tubeharvest operations
#[derive(Error, Debug)]
pub enum HarvestError {
    /// API credential missing or rejected by the platform
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// API answered with a non-success status
    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    /// Response body did not have the expected shape
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Search keyword is empty or otherwise unusable
    #[error("Invalid search query: {0}")]
    InvalidQuery(String),

    /// Filesystem error while exporting or merging
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV encoding or decoding error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Input file lacks a required column
    #[error("Missing column `{column}` in {path}")]
    MissingColumn { column: String, path: String },

    /// Merge directory contains nothing to merge
    #[error("No CSV files found in {0}")]
    NoInputFiles(String),
}

/// Result type alias for tubeharvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;
