//! `SourceClient` port implementation.

use crate::client::GithubClient;
use crate::error::GithubError;
use crate::http::HttpBackend;
use async_trait::async_trait;
use repodeck_core::{RepoSnapshot, SourceClient, SourceError};

#[async_trait]
impl<B: HttpBackend> SourceClient for GithubClient<B> {
    async fn fetch(&self, owner: &str, name: &str) -> Result<RepoSnapshot, SourceError> {
        self.fetch_repo(owner, name).await.map_err(Into::into)
    }
}

impl From<GithubError> for SourceError {
    fn from(err: GithubError) -> Self {
        match err {
            GithubError::RepoNotFound { path } => Self::NotFound { path },
            GithubError::RateLimited { url } => Self::RateLimited(url),
            GithubError::ApiRequestFailed { .. } | GithubError::Network(_) => {
                Self::Unavailable(err.to_string())
            }
            GithubError::JsonParse(_) | GithubError::InvalidUrl(_) => {
                Self::InvalidResponse(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::testing::{CannedOutcome, FakeBackend};

    #[test]
    fn not_found_maps_to_source_not_found() {
        let err: SourceError = GithubError::RepoNotFound {
            path: "a/b".to_string(),
        }
        .into();
        assert!(matches!(err, SourceError::NotFound { ref path } if path == "a/b"));
    }

    #[test]
    fn server_error_maps_to_unavailable() {
        let err: SourceError = GithubError::ApiRequestFailed {
            status: 502,
            url: "https://api.github.com/repos/a/b".to_string(),
        }
        .into();
        assert!(matches!(err, SourceError::Unavailable(_)));
    }

    #[tokio::test]
    async fn port_fetch_maps_errors() {
        let backend =
            FakeBackend::new().with_outcome("/repos/busy/repo", CannedOutcome::RateLimited);
        let client = GithubClient::with_backend(backend, "https://api.github.com");

        let err = SourceClient::fetch(&client, "busy", "repo").await.unwrap_err();
        assert!(matches!(err, SourceError::RateLimited(_)));
    }
}
