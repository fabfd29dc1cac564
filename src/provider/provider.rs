use crate::model::{RateSnapshot, Result};

/// Source of base-relative quotes.
#[rocket::async_trait]
pub trait Provider: Send + Sync {
    fn name(&self) -> String;

    /// One snapshot per call. Network and decode failures map to
    /// `UpstreamFetchFailed`.
    async fn fetch(&self) -> Result<RateSnapshot>;
}
