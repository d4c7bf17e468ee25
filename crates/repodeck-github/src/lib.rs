//! GitHub API client for repodeck.
//!
//! Fetches repository metadata from the GitHub REST API behind the core
//! `SourceClient` port. The client is generic over an HTTP backend so
//! tests can run against canned responses.

mod client;
mod config;
mod error;
mod http;
mod port;
mod wire;

pub use client::{DefaultGithubClient, GithubClient};
pub use config::GithubClientConfig;
pub use error::{GithubError, GithubResult};

// Pin dev-dependencies that tests pull in indirectly
#[cfg(test)]
use tokio_test as _;
