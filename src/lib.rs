pub mod browser;
pub mod config;
pub mod middleware;
pub mod movies;
pub mod server;
pub mod tmdb;
pub mod util;

use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Server error: {0}")]
    Server(String),
}

pub async fn run(config_path: Option<&str>, debug_logs: bool) -> Result<(), ServerError> {
    let mut config = config::Config::load(config_path)?;
    config.debug_logs = debug_logs;

    match config_path {
        Some(path) => info!("Using config file: {}", path),
        None => info!("No config file given, using defaults"),
    }
    if debug_logs {
        info!("Debug logging enabled");
    }
    if config.tmdb.api_key().is_none() {
        warn!(
            "{} is not set; /api/movies will answer with 500",
            config::API_KEY_ENV
        );
    }

    let tmdb = Arc::new(
        tmdb::TmdbClient::new(&config.tmdb)
            .map_err(|e| ServerError::Server(format!("Failed to create TMDB client: {}", e)))?,
    );

    let addr: SocketAddr = config
        .listen_addr()
        .parse()
        .map_err(|e| ServerError::Server(format!("Invalid address: {}", e)))?;

    let state = server::AppState::new(config, tmdb);
    let app = server::build_router(state);

    info!("Serving HTTP on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::Server(format!("Failed to bind: {}", e)))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(format!("Server error: {}", e)))?;

    Ok(())
}
