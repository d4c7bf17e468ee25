//! `SQLite` implementation of the `RepoStore` trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use repodeck_core::{NewTrackedRepo, RepoSnapshot, RepoStore, StoreError, TrackedRepo};

use super::rows::{REPO_SELECT_COLUMNS, row_to_repo};

/// `SQLite` implementation of the `RepoStore` trait.
///
/// This struct holds a connection pool and implements all record
/// operations for tracked repositories using `SQLite`.
pub struct SqliteRepoStore {
    pool: SqlitePool,
}

impl SqliteRepoStore {
    /// Create a new `SQLite` repository store.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn map_insert_error(e: sqlx::Error, repo: &NewTrackedRepo) -> StoreError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::AlreadyExists(
            format!("Repository '{}' is already tracked", repo.full_name),
        ),
        _ => StoreError::Storage(e.to_string()),
    }
}

#[async_trait]
impl RepoStore for SqliteRepoStore {
    async fn list_for_user(&self, user_id: i64) -> Result<Vec<TrackedRepo>, StoreError> {
        let query = format!(
            "SELECT {REPO_SELECT_COLUMNS} FROM tracked_repos WHERE user_id = ? ORDER BY id DESC"
        );

        let rows = sqlx::query(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::Storage(e.to_string()))?;

        rows.iter().map(row_to_repo).collect()
    }

    async fn find_for_user(&self, id: i64, user_id: i64) -> Result<TrackedRepo, StoreError> {
        let query = format!(
            "SELECT {REPO_SELECT_COLUMNS} FROM tracked_repos WHERE id = ? AND user_id = ?"
        );

        let row = sqlx::query(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::Storage(e.to_string()))?
            .ok_or_else(|| StoreError::NotFound(format!("Repository with ID {id}")))?;

        row_to_repo(&row)
    }

    async fn insert(&self, repo: &NewTrackedRepo) -> Result<TrackedRepo, StoreError> {
        let result = sqlx::query(
            r#"INSERT INTO tracked_repos (
                user_id, name, full_name, owner, url,
                stars, forks, open_issues, default_branch
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(repo.user_id)
        .bind(&repo.name)
        .bind(&repo.full_name)
        .bind(&repo.owner)
        .bind(&repo.url)
        .bind(repo.stars)
        .bind(repo.forks)
        .bind(repo.open_issues)
        .bind(&repo.default_branch)
        .execute(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, repo))?;

        self.find_for_user(result.last_insert_rowid(), repo.user_id)
            .await
    }

    async fn apply_refresh(
        &self,
        id: i64,
        snapshot: &RepoSnapshot,
        last_refreshed: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE tracked_repos SET name = ?, full_name = ?, owner = ?, url = ?, description = ?, stars = ?, forks = ?, open_issues = ?, source_created_at = ?, source_updated_at = ?, language = ?, default_branch = ?, last_refreshed = ? WHERE id = ?"
        )
        .bind(&snapshot.name)
        .bind(&snapshot.full_name)
        .bind(&snapshot.owner)
        .bind(&snapshot.url)
        .bind(&snapshot.description)
        .bind(snapshot.stars)
        .bind(snapshot.forks)
        .bind(snapshot.open_issues)
        .bind(snapshot.created_at.as_ref().map(|dt| dt.to_string()))
        .bind(snapshot.updated_at.as_ref().map(|dt| dt.to_string()))
        .bind(&snapshot.language)
        .bind(&snapshot.default_branch)
        .bind(last_refreshed.to_string())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Storage(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("Repository with ID {id}")));
        }

        Ok(())
    }

    async fn delete_for_user(&self, id: i64, user_id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM tracked_repos WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Storage(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("Repository with ID {id}")));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::setup_test_database;
    use crate::stores::SqliteUserStore;
    use repodeck_core::{NewUser, UserStore, parse_source_path};

    async fn store_with_user() -> (SqliteRepoStore, i64) {
        let pool = setup_test_database().await.unwrap();
        let users = SqliteUserStore::new(pool.clone());
        let user = users
            .insert(&NewUser {
                email: "owner@example.com".to_string(),
                password_hash: "hash".to_string(),
            })
            .await
            .unwrap();
        (SqliteRepoStore::new(pool), user.id)
    }

    fn new_repo(user_id: i64, path: &str) -> NewTrackedRepo {
        NewTrackedRepo::placeholder(user_id, &parse_source_path(path).unwrap())
    }

    fn snapshot(path: &str, stars: i64) -> RepoSnapshot {
        let parsed = parse_source_path(path).unwrap();
        RepoSnapshot {
            name: parsed.name.clone(),
            full_name: path.to_string(),
            owner: parsed.owner,
            url: format!("https://github.com/{path}"),
            description: Some("desc".to_string()),
            stars,
            forks: 4,
            open_issues: 2,
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
            language: Some("Rust".to_string()),
            default_branch: "master".to_string(),
        }
    }

    #[tokio::test]
    async fn insert_assigns_id_and_placeholder_fields() {
        let (store, user_id) = store_with_user().await;

        let repo = store.insert(&new_repo(user_id, "a/one")).await.unwrap();

        assert!(repo.id > 0);
        assert_eq!(repo.full_name, "a/one");
        assert_eq!(repo.stars, 0);
        assert_eq!(repo.default_branch, "main");
        assert!(repo.last_refreshed.is_none());
        assert!(repo.description.is_none());
    }

    #[tokio::test]
    async fn duplicate_path_for_same_user_is_rejected() {
        let (store, user_id) = store_with_user().await;

        store.insert(&new_repo(user_id, "a/one")).await.unwrap();
        let err = store.insert(&new_repo(user_id, "a/one")).await.unwrap_err();

        assert!(matches!(err, StoreError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn same_path_for_different_users_is_allowed() {
        let pool = setup_test_database().await.unwrap();
        let users = SqliteUserStore::new(pool.clone());
        let store = SqliteRepoStore::new(pool);

        let mut ids = Vec::new();
        for email in ["a@example.com", "b@example.com"] {
            let user = users
                .insert(&NewUser {
                    email: email.to_string(),
                    password_hash: "hash".to_string(),
                })
                .await
                .unwrap();
            ids.push(user.id);
        }

        store.insert(&new_repo(ids[0], "a/one")).await.unwrap();
        store.insert(&new_repo(ids[1], "a/one")).await.unwrap();
    }

    #[tokio::test]
    async fn list_is_scoped_to_the_user() {
        let (store, user_id) = store_with_user().await;
        store.insert(&new_repo(user_id, "a/one")).await.unwrap();
        store.insert(&new_repo(user_id, "a/two")).await.unwrap();

        let repos = store.list_for_user(user_id).await.unwrap();
        assert_eq!(repos.len(), 2);

        let other = store.list_for_user(user_id + 1).await.unwrap();
        assert!(other.is_empty());
    }

    #[tokio::test]
    async fn find_rejects_foreign_user() {
        let (store, user_id) = store_with_user().await;
        let repo = store.insert(&new_repo(user_id, "a/one")).await.unwrap();

        assert!(store.find_for_user(repo.id, user_id).await.is_ok());
        let err = store.find_for_user(repo.id, user_id + 1).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn apply_refresh_round_trips_all_fields() {
        let (store, user_id) = store_with_user().await;
        let repo = store.insert(&new_repo(user_id, "a/one")).await.unwrap();

        let now = Utc::now();
        store
            .apply_refresh(repo.id, &snapshot("a/one", 99), now)
            .await
            .unwrap();

        let updated = store.find_for_user(repo.id, user_id).await.unwrap();
        assert_eq!(updated.stars, 99);
        assert_eq!(updated.forks, 4);
        assert_eq!(updated.open_issues, 2);
        assert_eq!(updated.description.as_deref(), Some("desc"));
        assert_eq!(updated.language.as_deref(), Some("Rust"));
        assert_eq!(updated.default_branch, "master");
        assert!(updated.created_at.is_some());
        // Second precision survives the TEXT round trip.
        assert_eq!(
            updated.last_refreshed.unwrap().timestamp(),
            now.timestamp()
        );
    }

    #[tokio::test]
    async fn apply_refresh_on_missing_record_is_not_found() {
        let (store, _user_id) = store_with_user().await;

        let err = store
            .apply_refresh(12345, &snapshot("a/one", 1), Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_is_scoped_to_the_user() {
        let (store, user_id) = store_with_user().await;
        let repo = store.insert(&new_repo(user_id, "a/one")).await.unwrap();

        let err = store
            .delete_for_user(repo.id, user_id + 1)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));

        store.delete_for_user(repo.id, user_id).await.unwrap();
        assert!(store.list_for_user(user_id).await.unwrap().is_empty());
    }
}
