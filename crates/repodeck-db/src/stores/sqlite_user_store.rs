//! `SQLite` implementation of the `UserStore` trait.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use repodeck_core::{NewUser, StoreError, User, UserStore};

use super::rows::row_to_user;

const USER_SELECT_COLUMNS: &str = "id, email, password_hash, created_at";

/// `SQLite` implementation of the `UserStore` trait.
pub struct SqliteUserStore {
    pool: SqlitePool,
}

impl SqliteUserStore {
    /// Create a new `SQLite` user store.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for SqliteUserStore {
    async fn insert(&self, user: &NewUser) -> Result<User, StoreError> {
        let result = sqlx::query(
            "INSERT INTO users (email, password_hash, created_at) VALUES (?, ?, ?)",
        )
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(Utc::now().to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                StoreError::AlreadyExists(format!("User '{}' already exists", user.email))
            }
            _ => StoreError::Storage(e.to_string()),
        })?;

        self.find_by_id(result.last_insert_rowid()).await
    }

    async fn find_by_email(&self, email: &str) -> Result<User, StoreError> {
        let query = format!("SELECT {USER_SELECT_COLUMNS} FROM users WHERE email = ?");

        let row = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::Storage(e.to_string()))?
            .ok_or_else(|| StoreError::NotFound(format!("User with email '{email}'")))?;

        row_to_user(&row)
    }

    async fn find_by_id(&self, id: i64) -> Result<User, StoreError> {
        let query = format!("SELECT {USER_SELECT_COLUMNS} FROM users WHERE id = ?");

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::Storage(e.to_string()))?
            .ok_or_else(|| StoreError::NotFound(format!("User with ID {id}")))?;

        row_to_user(&row)
    }
}
