//! Wire types for the GitHub REST API.
//!
//! Only the fields repodeck consumes are modeled; everything else in the
//! response body is ignored.

use chrono::{DateTime, Utc};
use repodeck_core::RepoSnapshot;
use serde::Deserialize;

/// `GET /repos/{owner}/{repo}` response body (the parts we use).
#[derive(Debug, Deserialize)]
pub struct RepoResponse {
    pub name: String,
    pub full_name: String,
    pub owner: OwnerResponse,
    pub html_url: String,
    pub description: Option<String>,
    pub stargazers_count: i64,
    pub forks_count: i64,
    pub open_issues_count: i64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub language: Option<String>,
    pub default_branch: Option<String>,
}

/// Owner object embedded in a repository response.
#[derive(Debug, Deserialize)]
pub struct OwnerResponse {
    pub login: String,
}

impl From<RepoResponse> for RepoSnapshot {
    fn from(repo: RepoResponse) -> Self {
        Self {
            name: repo.name,
            full_name: repo.full_name,
            owner: repo.owner.login,
            url: repo.html_url,
            description: repo.description,
            stars: repo.stargazers_count,
            forks: repo.forks_count,
            open_issues: repo.open_issues_count,
            created_at: repo.created_at,
            updated_at: repo.updated_at,
            language: repo.language,
            default_branch: repo.default_branch.unwrap_or_else(|| "main".to_string()),
        }
    }
}
