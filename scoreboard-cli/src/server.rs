//! Server command - start the API server for the frontend
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: configure_server(), start_server()
//! - Level 3: (delegated to scoreboard-server crate)
//! - Level 4: configuration validation

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;

use scoreboard_server::{run_server, ServerConfig};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct ServerArgs {
    /// Port number to listen on (overrides the config file)
    #[arg(long)]
    pub port: Option<u16>,

    /// Directory containing the built frontend (overrides the config file)
    #[arg(long)]
    pub static_dir: Option<PathBuf>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run server command
///
/// 1. Merge arguments into the loaded configuration
/// 2. Start server (blocking)
pub fn run(args: ServerArgs, base: ServerConfig) -> Result<()> {
    let config = configure_server(&args, base)?;

    tracing::info!("Starting scoreboard server on port {}", config.port);

    start_server(config)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Apply command arguments on top of the configuration
fn configure_server(args: &ServerArgs, mut config: ServerConfig) -> Result<ServerConfig> {
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(dir) = &args.static_dir {
        config.static_dir = dir.to_string_lossy().to_string();
    }
    validate_static_dir(Path::new(&config.static_dir))?;
    validate_catalog(&config)?;

    Ok(config)
}

/// Start the server (blocking)
fn start_server(config: ServerConfig) -> Result<()> {
    // Create tokio runtime for async server
    let runtime = tokio::runtime::Runtime::new()?;

    runtime.block_on(async { run_server(config).await })
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Validate that static directory exists
fn validate_static_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        tracing::warn!(
            "Static directory does not exist: {}. Server will start but only serve the API.",
            path.display()
        );
    } else if !path.is_dir() {
        anyhow::bail!(
            "Static path exists but is not a directory: {}",
            path.display()
        );
    }

    Ok(())
}

/// Tournament ids must be unique and non-empty
fn validate_catalog(config: &ServerConfig) -> Result<()> {
    let mut seen = std::collections::HashSet::new();
    for tournament in &config.tournaments {
        if tournament.id.trim().is_empty() {
            anyhow::bail!("Tournament \"{}\" has an empty id", tournament.title);
        }
        if !seen.insert(tournament.id.as_str()) {
            anyhow::bail!("Tournament id \"{}\" is configured twice", tournament.id);
        }
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use scoreboard_core::Tournament;

    #[test]
    fn test_configure_server_overrides() {
        let args = ServerArgs {
            port: Some(9000),
            static_dir: Some(PathBuf::from("test_static")),
        };

        let config = configure_server(&args, ServerConfig::default()).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.static_dir, "test_static");
    }

    #[test]
    fn test_configure_server_keeps_config_values() {
        let args = ServerArgs {
            port: None,
            static_dir: None,
        };

        let config = configure_server(&args, ServerConfig::default()).unwrap();
        assert_eq!(config.port, 8002);
        assert_eq!(config.tournaments.len(), 3);
    }

    #[test]
    fn test_validate_static_dir_nonexistent() {
        // Should not error, just warn
        let result = validate_static_dir(Path::new("/nonexistent/path"));
        assert!(result.is_ok());
    }

    #[test]
    fn test_duplicate_tournament_ids_rejected() {
        let config = ServerConfig {
            tournaments: vec![Tournament::new("cup", "Cup"), Tournament::new("cup", "Other Cup")],
            ..Default::default()
        };
        assert!(validate_catalog(&config).is_err());
    }
}
