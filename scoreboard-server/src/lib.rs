//! Scoreboard Server - HTTP API for the tournament frontend
//!
//! This crate provides the web backend:
//! - REST API for participant and score commands
//! - Standings, match list and opponent queries
//! - Best-effort persistence of the state blob
//! - Static file serving for the single-page frontend

mod error;
mod routes;
mod state;

use axum::{
    routing::{delete, get},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tower_http::services::ServeDir;

use scoreboard_core::{default_catalog, Tournament};

pub use error::ApiError;
pub use state::ServerState;

/// Server configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerConfig {
    pub port: u16,
    pub static_dir: String,
    /// Where the state blob is persisted; in-memory only when unset
    pub state_file: Option<PathBuf>,
    pub tournaments: Vec<Tournament>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8002,
            static_dir: "frontend/dist".to_string(),
            state_file: None,
            tournaments: default_catalog(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a JSON file. Missing keys take their defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        use anyhow::Context;

        let data = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        serde_json::from_str(&data).with_context(|| format!("parse config {}", path.display()))
    }
}

/// Create the router with all routes
pub fn create_router(config: &ServerConfig, state: Arc<ServerState>) -> Router {
    let static_service = ServeDir::new(&config.static_dir);

    Router::new()
        // Status endpoint
        .route("/api/status", get(routes::status::status_handler))
        // Tournament catalog
        .route("/api/tournaments", get(routes::tournaments::list_tournaments))
        .route(
            "/api/tournaments/:id/poll",
            get(routes::tournaments::poll_tournament),
        )
        // Participants API
        .route(
            "/api/tournaments/:id/participants",
            get(routes::participants::list_participants)
                .post(routes::participants::add_participant)
                .delete(routes::participants::clear_tournament),
        )
        // Matches API
        .route(
            "/api/tournaments/:id/matches",
            get(routes::matches::list_matches)
                .post(routes::matches::add_match)
                .delete(routes::matches::remove_tournament_matches),
        )
        .route(
            "/api/tournaments/:id/opponents",
            get(routes::matches::available_opponents),
        )
        .route(
            "/api/matches/:id",
            delete(routes::matches::remove_match).patch(routes::matches::update_match),
        )
        // Standings API
        .route(
            "/api/tournaments/:id/standings",
            get(routes::standings::get_standings),
        )
        // Shared state
        .with_state(state)
        // Static file serving (must be last)
        .fallback_service(static_service)
}

/// Start the HTTP server
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = Arc::new(ServerState::from_config(&config)?);
    let router = create_router(&config, state);

    tracing::info!("Scoreboard server starting on http://0.0.0.0:{}", config.port);
    tracing::info!("Static files served from: {}", config.static_dir);
    match &config.state_file {
        Some(path) => tracing::info!("State persisted to: {}", path.display()),
        None => tracing::info!("No state file configured, running in memory"),
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
