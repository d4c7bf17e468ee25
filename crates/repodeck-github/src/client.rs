//! GitHub API client.

use crate::config::GithubClientConfig;
use crate::error::GithubResult;
use crate::http::{HttpBackend, ReqwestBackend};
use crate::wire::RepoResponse;
use repodeck_core::RepoSnapshot;
use tracing::debug;
use url::Url;

/// Client for fetching repository metadata from the GitHub REST API.
///
/// Generic over the HTTP backend so tests can substitute canned responses.
pub struct GithubClient<B: HttpBackend> {
    backend: B,
    base_url: String,
}

/// The production client, backed by reqwest.
pub type DefaultGithubClient = GithubClient<ReqwestBackend>;

impl DefaultGithubClient {
    /// Create a client from configuration.
    pub fn new(config: GithubClientConfig) -> GithubResult<Self> {
        let backend = ReqwestBackend::new(&config)?;
        Ok(Self::with_backend(backend, config.base_url))
    }
}

impl<B: HttpBackend> GithubClient<B> {
    /// Create a client with a custom backend.
    pub fn with_backend(backend: B, base_url: impl Into<String>) -> Self {
        Self {
            backend,
            base_url: base_url.into(),
        }
    }

    /// Fetch the current metadata for `owner/name`.
    pub async fn fetch_repo(&self, owner: &str, name: &str) -> GithubResult<RepoSnapshot> {
        let url = self.repo_url(owner, name)?;
        debug!(%url, "fetching repository metadata");
        let response: RepoResponse = self.backend.get_json(&url).await?;
        Ok(response.into())
    }

    fn repo_url(&self, owner: &str, name: &str) -> GithubResult<Url> {
        let url = Url::parse(&format!(
            "{}/repos/{owner}/{name}",
            self.base_url.trim_end_matches('/')
        ))?;
        Ok(url)
    }
}
