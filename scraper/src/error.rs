use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} fetching {url}")]
    Status { url: String, status: u16 },

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid selector '{css}': {reason}")]
    Selector { css: &'static str, reason: String },

    #[error("Missing element: {0}")]
    MissingElement(&'static str),

    #[error("Incomplete board: found {found} categories, need at least {needed}")]
    IncompleteBoard { found: usize, needed: usize },
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
