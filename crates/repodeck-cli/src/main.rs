//! CLI entry point - the composition root.
//!
//! Parses flags and environment into a `ServerConfig` and starts the
//! Axum server. All infrastructure wiring happens in the axum crate's
//! bootstrap; this binary only resolves configuration.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use repodeck_axum::{ServerConfig, start_server};

/// Track GitHub repositories and keep their metadata fresh.
#[derive(Parser, Debug)]
#[command(name = "repodeck", version, about)]
struct Cli {
    /// Port for the HTTP server
    #[arg(long, env = "REPODECK_PORT", default_value_t = 9880)]
    port: u16,

    /// Path to the SQLite database file
    #[arg(long, env = "DATABASE_PATH", default_value = "repodeck.db")]
    database: PathBuf,

    /// Secret for signing session tokens
    #[arg(long, env = "JWT_SECRET")]
    jwt_secret: String,

    /// GitHub API token for a higher rate limit
    #[arg(long, env = "GITHUB_TOKEN")]
    github_token: Option<String>,

    /// GitHub API base URL
    #[arg(long, env = "GITHUB_API_BASE", default_value = "https://api.github.com")]
    github_api_base: String,

    /// Frontend origin allowed to make credentialed requests
    #[arg(long, env = "FRONTEND_URL")]
    frontend_url: Option<String>,

    /// Directory of built frontend assets to serve with SPA fallback
    #[arg(long, env = "REPODECK_STATIC_DIR")]
    static_dir: Option<PathBuf>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

impl Cli {
    fn into_server_config(self) -> ServerConfig {
        let mut config = ServerConfig::new(self.jwt_secret);
        config.port = self.port;
        config.database_path = self.database;
        config.github_token = self.github_token;
        config.github_api_base = self.github_api_base;
        if let Some(origin) = self.frontend_url {
            config = config.with_allowed_origins(vec![origin]);
        }
        if let Some(dir) = self.static_dir {
            config = config.with_static_dir(dir);
        }
        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables before clap reads them
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "repodeck=debug,tower_http=debug"
    } else {
        "repodeck=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    start_server(cli.into_server_config()).await
}
