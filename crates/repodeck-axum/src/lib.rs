//! Axum web adapter for repodeck.
//!
//! Exposes the REST API over the core stores and refresh coordinator,
//! with cookie-based session authentication. Construction happens in
//! [`bootstrap`]; entry points call [`start_server`].

pub mod auth;
pub mod bootstrap;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use bootstrap::{AxumContext, CorsConfig, ServerConfig, bootstrap, start_server};
pub use error::HttpError;
pub use routes::{create_router, create_spa_router};
