//! `SQLite` store implementations for repodeck.

pub mod factory;
pub mod setup;
pub mod stores;

// Re-export factory for convenient access
pub use factory::StoreFactory;

// Re-export store implementations
pub use stores::{SqliteRepoStore, SqliteUserStore};

// Re-export setup functions for convenient access
pub use setup::setup_database;
#[cfg(any(test, feature = "test-utils"))]
pub use setup::setup_test_database;

// Pin dev-dependencies that tests pull in indirectly
#[cfg(test)]
use tokio_test as _;
