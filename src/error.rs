use thiserror::Error;

/// Errors raised while collecting the dataset.
///
/// Variants are split into two groups. Fatal errors (`Auth`, `Io`, `Config`)
/// stop the whole run, every other error only aborts the artist, album or
/// track that was being processed. See [`Error::is_fatal`].
#[derive(Error, Debug)]
pub enum Error {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rate limited by the catalog API (retry after {retry_after:?} seconds)")]
    RateLimited { retry_after: Option<u64> },

    #[error("Catalog API error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Cannot decode catalog response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Returns `true` for errors that must terminate the run.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Auth(_) | Error::Io(_) | Error::Config(_))
    }
}
