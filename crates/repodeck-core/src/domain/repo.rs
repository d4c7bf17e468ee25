//! Tracked repository types.
//!
//! A [`TrackedRepo`] is one user's cached view of an external GitHub
//! repository. Counters are a snapshot of whatever the source reported at
//! `last_refreshed`; they are only ever overwritten by a successful refresh.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ports::CoreError;

/// A repository tracked by a user, with cached source metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedRepo {
    /// Database ID.
    pub id: i64,
    /// Owning user.
    pub user_id: i64,
    /// Repository name (the part after the slash).
    pub name: String,
    /// Source path `owner/name`, unique per user.
    pub full_name: String,
    /// Owner login.
    pub owner: String,
    /// Canonical web URL.
    pub url: String,
    /// Description from the source, if any.
    pub description: Option<String>,
    /// Star count at last refresh.
    pub stars: i64,
    /// Fork count at last refresh.
    pub forks: i64,
    /// Open issue count at last refresh.
    pub open_issues: i64,
    /// When the repository was created upstream.
    pub created_at: Option<DateTime<Utc>>,
    /// When the repository was last updated upstream.
    pub updated_at: Option<DateTime<Utc>>,
    /// Primary language, if the source reports one.
    pub language: Option<String>,
    /// Default branch name.
    pub default_branch: String,
    /// When we last successfully refreshed this record. `None` until the
    /// first successful refresh completes.
    pub last_refreshed: Option<DateTime<Utc>>,
}

/// Data required to create a new tracked repository.
///
/// Records are created with placeholder counters; a background refresh
/// fills in real values shortly after.
#[derive(Debug, Clone)]
pub struct NewTrackedRepo {
    pub user_id: i64,
    pub name: String,
    pub full_name: String,
    pub owner: String,
    pub url: String,
    pub stars: i64,
    pub forks: i64,
    pub open_issues: i64,
    pub default_branch: String,
}

impl NewTrackedRepo {
    /// Build a placeholder record for a freshly added source path.
    pub fn placeholder(user_id: i64, path: &SourcePath) -> Self {
        Self {
            user_id,
            name: path.name.clone(),
            full_name: path.to_string(),
            owner: path.owner.clone(),
            url: format!("https://github.com/{path}"),
            stars: 0,
            forks: 0,
            open_issues: 0,
            default_branch: "main".to_string(),
        }
    }
}

/// Fresh metadata fetched from the external source for one repository.
///
/// This is the wire-independent shape every [`crate::ports::SourceClient`]
/// implementation produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSnapshot {
    pub name: String,
    pub full_name: String,
    pub owner: String,
    pub url: String,
    pub description: Option<String>,
    pub stars: i64,
    pub forks: i64,
    pub open_issues: i64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub language: Option<String>,
    pub default_branch: String,
}

/// A validated `owner/name` source path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePath {
    pub owner: String,
    pub name: String,
}

impl std::fmt::Display for SourcePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Parse and validate an `owner/name` source path.
///
/// Rejects empty segments, missing slashes and extra path components.
pub fn parse_source_path(path: &str) -> Result<SourcePath, CoreError> {
    let mut parts = path.split('/');
    let owner = parts.next().unwrap_or_default();
    let name = parts.next().unwrap_or_default();

    if owner.is_empty() || name.is_empty() || parts.next().is_some() {
        return Err(CoreError::Validation(format!(
            "Invalid repository path '{path}'. Expected format: owner/repo"
        )));
    }

    Ok(SourcePath {
        owner: owner.to_string(),
        name: name.to_string(),
    })
}
