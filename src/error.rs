use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status}")]
    Api { status: reqwest::StatusCode },

    #[error("Invalid API response format: {0}")]
    InvalidResponse(#[source] serde_json::Error),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("Clipboard error: {0}")]
    Clipboard(#[from] arboard::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Rejected search terms.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("Please enter a search term")]
    Empty,

    #[error("Search term too long (max {max} characters)")]
    TooLong { max: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
