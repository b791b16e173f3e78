//! Scoreboard CLI - Command-line interface
//!
//! Commands:
//! - serve: Start the API server for the frontend
//! - participants: Add or list a tournament's participants
//! - matches: Record, list or remove match results
//! - standings: Print a tournament's standings table
//! - clear: Remove a tournament's participants and matches

mod server;
mod store_cmd;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use scoreboard_server::ServerConfig;

/// File used by offline commands when no state file is configured
const DEFAULT_STATE_FILE: &str = "scoreboard-state.json";

#[derive(Parser)]
#[command(name = "scoreboard")]
#[command(about = "Round-robin tournament scoreboard")]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// State file holding participants and scores
    #[arg(long, global = true)]
    state_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve(server::ServerArgs),
    /// Manage participants
    #[command(subcommand)]
    Participants(store_cmd::ParticipantCommand),
    /// Manage match results
    #[command(subcommand)]
    Matches(store_cmd::MatchCommand),
    /// Print the standings table
    Standings {
        /// Tournament id
        tournament: String,
    },
    /// Remove all participants and matches of a tournament
    Clear {
        /// Tournament id
        tournament: String,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };
    if let Some(path) = cli.state_file {
        config.state_file = Some(path);
    }

    match cli.command {
        Commands::Serve(args) => server::run(args, config),
        Commands::Participants(cmd) => open_session(config)?.participants(cmd),
        Commands::Matches(cmd) => open_session(config)?.matches(cmd),
        Commands::Standings { tournament } => open_session(config)?.standings(&tournament),
        Commands::Clear { tournament } => open_session(config)?.clear(&tournament),
    }
}

/// Load the state file for an offline command
fn open_session(config: ServerConfig) -> Result<store_cmd::Session> {
    let state_file = config
        .state_file
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_FILE));
    store_cmd::Session::open(state_file, config.tournaments)
}
