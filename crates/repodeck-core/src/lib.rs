//! Core domain types and port definitions for repodeck.
//!
//! This crate holds the domain model (users, tracked repositories), the
//! port traits that adapters implement (stores, the metadata source), and
//! the refresh coordinator that keeps cached repository metadata current.

pub mod domain;
pub mod ports;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{
    NewTrackedRepo, NewUser, RepoSnapshot, SourcePath, TrackedRepo, User, parse_source_path,
};
pub use ports::{
    CoreError, RepoStore, SourceClient, SourceError, StoreError, Stores, UserStore,
};
pub use services::{RefreshConfig, RefreshCoordinator};

// Pin dev-dependencies that tests pull in indirectly
#[cfg(test)]
use mockall as _;
#[cfg(test)]
use tokio_test as _;
