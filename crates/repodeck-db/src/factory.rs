//! Composition utilities for wiring `SQLite` backends.
//!
//! This module provides factory functions for building the store container
//! from a pool. It is focused purely on construction and should not
//! contain any domain logic.

use sqlx::SqlitePool;
use std::sync::Arc;

use repodeck_core::Stores;

use crate::stores::{SqliteRepoStore, SqliteUserStore};

/// Factory for creating store instances with `SQLite` backends.
pub struct StoreFactory;

impl StoreFactory {
    /// Create a `SQLite` connection pool.
    ///
    /// # Arguments
    ///
    /// * `db_url` - `SQLite` connection URL (e.g., "sqlite:repodeck.db")
    pub async fn create_pool(db_url: &str) -> anyhow::Result<SqlitePool> {
        let pool = SqlitePool::connect(db_url).await?;
        Ok(pool)
    }

    /// Build all `SQLite` stores from a pool.
    ///
    /// This is the recommended way for adapters to obtain stores. Returns
    /// a `Stores` struct from `repodeck-core` containing trait-object-wrapped
    /// implementations.
    pub fn build_stores(pool: SqlitePool) -> Stores {
        Stores::new(
            Arc::new(SqliteRepoStore::new(pool.clone())),
            Arc::new(SqliteUserStore::new(pool)),
        )
    }

    /// Create a repository store from a pool.
    pub fn repo_store(pool: SqlitePool) -> Arc<SqliteRepoStore> {
        Arc::new(SqliteRepoStore::new(pool))
    }

    /// Create a user store from a pool.
    pub fn user_store(pool: SqlitePool) -> Arc<SqliteUserStore> {
        Arc::new(SqliteUserStore::new(pool))
    }
}
