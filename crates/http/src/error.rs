//! Error types for remote sheet fetching.

use sheet2json_core::ConfigError;
use thiserror::Error;

/// Result type for remote sheet operations.
pub type Result<T> = std::result::Result<T, FetchError>;

/// Errors that can occur while fetching a remote sheet.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Missing or invalid caller configuration; raised before any request.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The server answered with a non-success status.
    #[error(
        "Failed to fetch Google Sheet (status: {status}). \
         Make sure the sheet is shared as \"Anyone with the link can view\"."
    )]
    Status { status: u16 },

    /// The request could not be sent or completed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The base URL could not be turned into a request URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The response body was not a values payload.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl FetchError {
    /// HTTP status code, if the server answered with an error status.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status } => Some(*status),
            _ => None,
        }
    }
}
