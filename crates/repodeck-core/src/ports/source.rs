//! External repository metadata source port.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::RepoSnapshot;

/// Errors a metadata source can report.
///
/// The refresh coordinator absorbs all of these during background sweeps;
/// adapters only surface them on explicit, awaited fetches.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The repository does not exist at the source (or is not visible).
    #[error("Repository '{path}' not found at the source")]
    NotFound { path: String },

    /// The source rejected the request due to rate limiting.
    #[error("Source rate limit exceeded: {0}")]
    RateLimited(String),

    /// The source could not be reached or returned a server error.
    #[error("Source unavailable: {0}")]
    Unavailable(String),

    /// The source responded with something we could not interpret.
    #[error("Invalid response from source: {0}")]
    InvalidResponse(String),
}

/// Client for fetching current repository metadata from the external source.
#[async_trait]
pub trait SourceClient: Send + Sync {
    /// Fetch the current metadata for `owner/name`.
    async fn fetch(&self, owner: &str, name: &str) -> Result<RepoSnapshot, SourceError>;
}
