//! Core services.

pub mod refresh;

pub use refresh::{RefreshConfig, RefreshCoordinator};
