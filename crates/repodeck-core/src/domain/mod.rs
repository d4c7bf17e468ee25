//! Domain types for repodeck.
//!
//! Plain data types shared by services and adapters. No storage or
//! transport details belong here.

pub mod repo;
pub mod user;

pub use repo::{NewTrackedRepo, RepoSnapshot, SourcePath, TrackedRepo, parse_source_path};
pub use user::{NewUser, User};
