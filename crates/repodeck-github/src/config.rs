//! GitHub client configuration.

use std::time::Duration;

/// Configuration for the GitHub API client.
#[derive(Debug, Clone)]
pub struct GithubClientConfig {
    /// API base URL. Overridable for tests and GitHub Enterprise.
    pub base_url: String,
    /// Optional API token. Unauthenticated requests work but hit a much
    /// lower rate limit.
    pub token: Option<String>,
    /// Per-request timeout. Bounds sweep duration so the coordinator's
    /// in-flight marker cannot be held forever.
    pub timeout: Duration,
    /// Number of retries for transient (5xx / network) errors.
    pub max_retries: u8,
    /// Base delay for the exponential retry backoff.
    pub retry_base_delay: Duration,
}

impl Default for GithubClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.github.com".to_string(),
            token: None,
            timeout: Duration::from_secs(30),
            max_retries: 2,
            retry_base_delay: Duration::from_millis(500),
        }
    }
}

impl GithubClientConfig {
    /// Default configuration with an API token.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..Self::default()
        }
    }
}
