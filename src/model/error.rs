use super::CurrencyCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("currency {0} not found")]
    NotFound(CurrencyCode),

    #[error("{0}")]
    InvalidInput(String),

    #[error("rate store unavailable: {0}")]
    StoreUnavailable(#[from] rusqlite::Error),

    #[error("upstream fetch failed: {0}")]
    UpstreamFetchFailed(String),

    /// Any pool checkout failure. r2d2 reports a store that cannot be opened
    /// the same way as an exhausted pool, so both land here.
    #[error("timed out waiting for a store connection: {0}")]
    Timeout(#[from] r2d2::Error),

    #[error("{0}")]
    Internal(String),
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::UpstreamFetchFailed(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
