//! `SQLite` store implementations.

pub mod rows;
pub mod sqlite_repo_store;
pub mod sqlite_user_store;

pub use sqlite_repo_store::SqliteRepoStore;
pub use sqlite_user_store::SqliteUserStore;
