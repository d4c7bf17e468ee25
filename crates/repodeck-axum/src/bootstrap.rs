//! Axum server bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the Axum web adapter. All concrete implementations are
//! instantiated here.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use repodeck_core::{RefreshConfig, RefreshCoordinator, SourceClient, Stores};
use repodeck_db::{StoreFactory, setup_database};
use repodeck_github::{DefaultGithubClient, GithubClientConfig};

use crate::auth::AuthKeys;

/// CORS configuration for the web server.
#[derive(Debug, Clone, Default)]
pub enum CorsConfig {
    /// Allow all origins (development mode, no credentials).
    #[default]
    AllowAll,
    /// Allow specific origins with credentials (production mode).
    AllowOrigins(Vec<String>),
}

/// Server configuration for the Axum adapter.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port for the HTTP server.
    pub port: u16,
    /// Path to the SQLite database file.
    pub database_path: PathBuf,
    /// Secret for signing session tokens.
    pub jwt_secret: String,
    /// Optional GitHub API token for a higher rate limit.
    pub github_token: Option<String>,
    /// GitHub API base URL. Overridable for tests and GitHub Enterprise.
    pub github_api_base: String,
    /// Optional path to static assets for SPA serving.
    pub static_dir: Option<PathBuf>,
    /// CORS configuration.
    pub cors: CorsConfig,
}

impl ServerConfig {
    /// Create a config with defaults for everything but the secret.
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            port: 9880,
            database_path: PathBuf::from("repodeck.db"),
            jwt_secret: jwt_secret.into(),
            github_token: None,
            github_api_base: "https://api.github.com".to_string(),
            static_dir: None,
            cors: CorsConfig::default(),
        }
    }

    /// Set the static directory for SPA serving.
    #[must_use]
    pub fn with_static_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(path.into());
        self
    }

    /// Set CORS to allow specific origins.
    #[must_use]
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.cors = CorsConfig::AllowOrigins(origins);
        self
    }
}

/// Application context for the Axum adapter.
///
/// This struct holds all initialized services for the web server.
pub struct AxumContext {
    /// Store container over the SQLite backend.
    pub stores: Stores,
    /// Background refresh coordinator.
    pub coordinator: Arc<RefreshCoordinator>,
    /// Session signing keys.
    pub auth: AuthKeys,
}

impl AxumContext {
    /// Assemble a context from already-built parts.
    ///
    /// Tests use this to swap in fake stores or a fake source.
    pub fn new(stores: Stores, source: Arc<dyn SourceClient>, auth: AuthKeys) -> Self {
        let coordinator = Arc::new(RefreshCoordinator::new(
            stores.repos.clone(),
            source,
            RefreshConfig::default(),
        ));
        Self {
            stores,
            coordinator,
            auth,
        }
    }
}

/// Bootstrap the Axum server with all services.
pub async fn bootstrap(config: &ServerConfig) -> Result<AxumContext> {
    tracing::info!(
        database_path = %config.database_path.display(),
        github_api_base = %config.github_api_base,
        authenticated_source = config.github_token.is_some(),
        "Axum bootstrap"
    );

    let pool = setup_database(&config.database_path).await?;
    let stores = StoreFactory::build_stores(pool);

    let github_config = GithubClientConfig {
        base_url: config.github_api_base.clone(),
        token: config.github_token.clone(),
        ..GithubClientConfig::default()
    };
    let source: Arc<dyn SourceClient> = Arc::new(DefaultGithubClient::new(github_config)?);

    let auth = AuthKeys::from_secret(&config.jwt_secret);

    Ok(AxumContext::new(stores, source, auth))
}

/// Start the web server on the configured port.
///
/// If `config.static_dir` is set, serves static assets with SPA fallback.
/// Otherwise, serves only the API endpoints.
pub async fn start_server(config: ServerConfig) -> Result<()> {
    use tokio::net::TcpListener;
    use tracing::info;

    let ctx = bootstrap(&config).await?;

    let app = if let Some(ref static_dir) = config.static_dir {
        info!("Serving static assets from: {}", static_dir.display());
        crate::routes::create_spa_router(ctx, static_dir, &config.cors)
    } else {
        crate::routes::create_router(ctx, &config.cors)
    };

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;

    if config.static_dir.is_some() {
        info!("repodeck server (with UI) listening on http://{addr}");
    } else {
        info!("repodeck server (API only) listening on http://{addr}");
    }

    axum::serve(listener, app).await?;
    Ok(())
}
