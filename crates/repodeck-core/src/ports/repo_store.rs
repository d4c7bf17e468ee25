//! Tracked repository store trait definition.
//!
//! This port defines the interface for repository record persistence.
//! Implementations must handle all storage details internally.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::StoreError;
use crate::domain::{NewTrackedRepo, RepoSnapshot, TrackedRepo};

/// Store for tracked repository records.
///
/// Every operation is scoped by the owning user where ownership matters;
/// a record belonging to another user behaves exactly like a missing one.
#[async_trait]
pub trait RepoStore: Send + Sync {
    /// List all repositories tracked by a user, newest first.
    async fn list_for_user(&self, user_id: i64) -> Result<Vec<TrackedRepo>, StoreError>;

    /// Get a repository by ID, scoped to the owning user.
    ///
    /// Returns `Err(StoreError::NotFound)` if the record doesn't exist or
    /// belongs to a different user.
    async fn find_for_user(&self, id: i64, user_id: i64) -> Result<TrackedRepo, StoreError>;

    /// Insert a new tracked repository.
    ///
    /// Returns the persisted record with its assigned ID.
    /// Returns `Err(StoreError::AlreadyExists)` if the user already tracks
    /// the same source path.
    async fn insert(&self, repo: &NewTrackedRepo) -> Result<TrackedRepo, StoreError>;

    /// Overwrite a record's source-derived fields with a fresh snapshot
    /// and stamp `last_refreshed`.
    ///
    /// Returns `Err(StoreError::NotFound)` if the record doesn't exist.
    async fn apply_refresh(
        &self,
        id: i64,
        snapshot: &RepoSnapshot,
        last_refreshed: DateTime<Utc>,
    ) -> Result<(), StoreError>;

    /// Delete a repository by ID, scoped to the owning user.
    ///
    /// Returns `Err(StoreError::NotFound)` if nothing was deleted.
    async fn delete_for_user(&self, id: i64, user_id: i64) -> Result<(), StoreError>;
}
