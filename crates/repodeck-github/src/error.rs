//! Internal error types for GitHub operations.
//!
//! These errors are internal to `repodeck-github` and are mapped to the
//! core `SourceError` at the port boundary.

use thiserror::Error;

/// Result type alias for GitHub operations.
pub type GithubResult<T> = Result<T, GithubError>;

/// Errors related to GitHub API operations.
#[derive(Debug, Error)]
pub enum GithubError {
    /// API request failed with an HTTP error status.
    #[error("GitHub API request failed with status {status}: {url}")]
    ApiRequestFailed {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
    },

    /// The requested repository was not found.
    #[error("Repository '{path}' not found on GitHub")]
    RepoNotFound {
        /// The `owner/name` path that was not found
        path: String,
    },

    /// The API rate limit was exhausted.
    #[error("GitHub rate limit exceeded for {url}")]
    RateLimited {
        /// The URL that was requested
        url: String,
    },

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}
