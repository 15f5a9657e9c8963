use crate::domain::errors::FetchError;
use async_trait::async_trait;

/// Source of raw stats documents.
///
/// Implementations return the full response body; the caller bounds the call
/// with its own deadline.
#[async_trait]
pub trait StatsSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<u8>, FetchError>;

    /// Human-readable endpoint, used in log lines
    fn endpoint(&self) -> String;
}
