use thiserror::Error;

use crate::document::DocumentError;

/// Errors that can occur while fetching language documents.
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("Unknown database: {0}")]
    UnknownCollection(String),

    #[error("Language {0} has been removed")]
    DeadLanguage(u32),

    #[error("Language {0} does not exist")]
    InvalidLanguage(u32),

    #[error("Server returned error: {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to parse document: {0}")]
    Document(#[from] DocumentError),
}

impl From<reqwest::Error> for DownloadError {
    fn from(err: reqwest::Error) -> Self {
        DownloadError::Network(err.to_string())
    }
}
