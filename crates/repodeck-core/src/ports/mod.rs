//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No `sqlx` or `reqwest` types in any signature
//! - Store traits are minimal and CRUD-focused
//! - The source client is a single intent-based fetch

pub mod repo_store;
pub mod source;
pub mod user_store;

use std::sync::Arc;
use thiserror::Error;

pub use repo_store::RepoStore;
pub use source::{SourceClient, SourceError};
pub use user_store::UserStore;

/// Container for the store trait objects.
///
/// This struct provides a consistent way to wire stores across adapters
/// without coupling them to concrete implementations. It lives in
/// `repodeck-core` so services can accept it without depending on
/// `repodeck-db`.
#[derive(Clone)]
pub struct Stores {
    /// Tracked repository store.
    pub repos: Arc<dyn RepoStore>,
    /// User account store.
    pub users: Arc<dyn UserStore>,
}

impl Stores {
    /// Create a new Stores container.
    pub fn new(repos: Arc<dyn RepoStore>, users: Arc<dyn UserStore>) -> Self {
        Self { repos, users }
    }
}

/// Domain-specific errors for store operations.
///
/// This error type abstracts away storage implementation details (e.g.,
/// sqlx errors) and provides a clean interface for services to handle
/// storage failures.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested record was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A record with the same identity already exists.
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// Storage backend error.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Core error type for semantic domain errors.
///
/// This is the canonical error type used across the core domain.
/// Adapters map this to their own error types (HTTP status codes,
/// CLI exit codes).
#[derive(Debug, Error)]
pub enum CoreError {
    /// Store operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// External source operation failed.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Validation error (invalid input).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal error (unexpected condition).
    #[error("Internal error: {0}")]
    Internal(String),
}
