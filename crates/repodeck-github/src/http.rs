//! HTTP backend abstraction for the GitHub API.
//!
//! This module provides a trait-based HTTP backend that allows for
//! dependency injection and easy testing. The production implementation
//! uses reqwest with automatic retry logic for transient errors.

use crate::config::GithubClientConfig;
use crate::error::{GithubError, GithubResult};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// Trait for HTTP backends that can fetch JSON from URLs.
///
/// This is an implementation detail - external code should use
/// [`crate::DefaultGithubClient`] through the core `SourceClient` port.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// Fetch JSON from a URL and deserialize it.
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> GithubResult<T>;
}

/// Production HTTP backend using reqwest with retry logic.
///
/// Retries transient server errors (5xx) and network errors with
/// exponential backoff. Rate-limit responses and 404s fail immediately.
pub struct ReqwestBackend {
    client: reqwest::Client,
    max_retries: u8,
    retry_base_delay: Duration,
    auth_token: Option<String>,
}

impl ReqwestBackend {
    /// Create a new reqwest backend with the given configuration.
    pub fn new(config: &GithubClientConfig) -> GithubResult<Self> {
        // GitHub rejects requests without a User-Agent
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("repodeck/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            max_retries: config.max_retries,
            retry_base_delay: config.retry_base_delay,
            auth_token: config.token.clone(),
        })
    }

    /// Build a request with optional authentication.
    fn build_request(&self, url: &Url) -> reqwest::RequestBuilder {
        let mut request = self
            .client
            .get(url.as_str())
            .header("Accept", "application/vnd.github.v3+json");
        if let Some(ref token) = self.auth_token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }
        request
    }

    /// Fetch a URL with automatic retry for transient errors.
    async fn fetch_with_retry(&self, url: &Url) -> GithubResult<reqwest::Response> {
        let mut last_error: Option<GithubError> = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = self.retry_base_delay * 2u32.pow(u32::from(attempt) - 1);
                tokio::time::sleep(delay).await;
            }

            match self.build_request(url).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(response);
                    }

                    // 5xx errors are retryable (server-side issues)
                    if status.is_server_error() && attempt < self.max_retries {
                        last_error = Some(GithubError::ApiRequestFailed {
                            status: status.as_u16(),
                            url: url.to_string(),
                        });
                        continue;
                    }

                    return Err(classify_error_status(status, url, &response));
                }
                Err(e) => {
                    // Network errors are retryable
                    if attempt < self.max_retries {
                        last_error = Some(e.into());
                        continue;
                    }
                    return Err(e.into());
                }
            }
        }

        Err(last_error.unwrap_or_else(|| GithubError::ApiRequestFailed {
            status: 0,
            url: url.to_string(),
        }))
    }
}

/// Map a non-success status to the matching error.
///
/// GitHub signals an exhausted rate limit as 403 with a zeroed
/// `x-ratelimit-remaining` header, or as a plain 429.
fn classify_error_status(
    status: reqwest::StatusCode,
    url: &Url,
    response: &reqwest::Response,
) -> GithubError {
    if status.as_u16() == 404 {
        if let Some(path) = extract_repo_path(url.path()) {
            return GithubError::RepoNotFound { path };
        }
    }

    let rate_limit_hit = status.as_u16() == 429
        || (status.as_u16() == 403
            && response
                .headers()
                .get("x-ratelimit-remaining")
                .and_then(|h| h.to_str().ok())
                .is_some_and(|v| v == "0"));
    if rate_limit_hit {
        return GithubError::RateLimited {
            url: url.to_string(),
        };
    }

    GithubError::ApiRequestFailed {
        status: status.as_u16(),
        url: url.to_string(),
    }
}

/// Try to extract an `owner/name` path from an API path.
fn extract_repo_path(path: &str) -> Option<String> {
    let path = path.trim_start_matches('/');
    if let Some(rest) = path.strip_prefix("repos/") {
        let parts: Vec<&str> = rest.splitn(3, '/').collect();
        if parts.len() >= 2 && !parts[0].is_empty() && !parts[1].is_empty() {
            return Some(format!("{}/{}", parts[0], parts[1]));
        }
    }
    None
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> GithubResult<T> {
        let response = self.fetch_with_retry(url).await?;
        let data: T = response.json().await?;
        Ok(data)
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Canned outcome for the fake backend.
    pub enum CannedOutcome {
        Json(serde_json::Value),
        NotFound,
        RateLimited,
        ServerError(u16),
    }

    /// A fake HTTP backend that returns canned responses by URL substring.
    pub struct FakeBackend {
        responses: Mutex<HashMap<String, CannedOutcome>>,
    }

    impl FakeBackend {
        /// Create a new fake backend.
        pub fn new() -> Self {
            Self {
                responses: Mutex::new(HashMap::new()),
            }
        }

        /// Add a canned outcome for a URL pattern.
        pub fn with_outcome(self, url_contains: &str, outcome: CannedOutcome) -> Self {
            self.responses
                .lock()
                .unwrap()
                .insert(url_contains.to_string(), outcome);
            self
        }
    }

    impl Default for FakeBackend {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl HttpBackend for FakeBackend {
        async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> GithubResult<T> {
            let responses = self.responses.lock().unwrap();
            let outcome = responses
                .iter()
                .find(|(pattern, _)| url.as_str().contains(pattern.as_str()))
                .map(|(_, outcome)| outcome);

            match outcome {
                Some(CannedOutcome::Json(json)) => {
                    serde_json::from_value(json.clone()).map_err(Into::into)
                }
                Some(CannedOutcome::RateLimited) => Err(GithubError::RateLimited {
                    url: url.to_string(),
                }),
                Some(CannedOutcome::ServerError(status)) => Err(GithubError::ApiRequestFailed {
                    status: *status,
                    url: url.to_string(),
                }),
                Some(CannedOutcome::NotFound) | None => Err(GithubError::RepoNotFound {
                    path: extract_repo_path(url.path()).unwrap_or_else(|| url.to_string()),
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_repo_path() {
        assert_eq!(
            extract_repo_path("/repos/rust-lang/rust"),
            Some("rust-lang/rust".to_string())
        );
        assert_eq!(
            extract_repo_path("/repos/rust-lang/rust/issues"),
            Some("rust-lang/rust".to_string())
        );
        assert_eq!(extract_repo_path("/repos/"), None);
        assert_eq!(extract_repo_path("/other/path"), None);
    }

    #[test]
    fn test_reqwest_backend_creation() {
        let config = GithubClientConfig::default();
        let backend = ReqwestBackend::new(&config).unwrap();
        assert_eq!(backend.max_retries, 2);
        assert!(backend.auth_token.is_none());
    }

    #[test]
    fn test_reqwest_backend_with_token() {
        let config = GithubClientConfig::with_token("ghp_test");
        let backend = ReqwestBackend::new(&config).unwrap();
        assert_eq!(backend.auth_token.as_deref(), Some("ghp_test"));
    }
}
