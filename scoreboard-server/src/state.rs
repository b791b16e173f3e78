//! Server state management
//!
//! One store shared by every handler. Commands run under the write lock and
//! the state file is rewritten before the lock is released, so saves land in
//! the same order as the mutations they capture.
//!
//! The save is a synchronous write plus rename of a small JSON file. It blocks
//! the calling tokio worker, and every reader and writer waiting on the lock,
//! for the length of one disk write.

use std::path::PathBuf;
use std::sync::RwLock;

use anyhow::Context;
use scoreboard_core::{default_catalog, load_state, save_state, Tournament, TournamentStore};

use crate::error::ApiError;
use crate::ServerConfig;

/// Server-wide shared state
pub struct ServerState {
    store: RwLock<TournamentStore>,
    tournaments: Vec<Tournament>,
    state_file: Option<PathBuf>,
}

impl ServerState {
    /// In-memory state for the given catalog
    pub fn new(tournaments: Vec<Tournament>) -> Self {
        Self::with_store(tournaments, TournamentStore::new(), None)
    }

    pub fn with_store(
        tournaments: Vec<Tournament>,
        store: TournamentStore,
        state_file: Option<PathBuf>,
    ) -> Self {
        Self {
            store: RwLock::new(store),
            tournaments,
            state_file,
        }
    }

    /// Build the state for a configuration, rehydrating the state file if present
    pub fn from_config(config: &ServerConfig) -> anyhow::Result<Self> {
        let store = match &config.state_file {
            Some(path) => {
                let state = load_state(path)
                    .with_context(|| format!("load state {}", path.display()))?;
                tracing::info!(
                    participants = state.participants.len(),
                    scores = state.scores.len(),
                    "state restored"
                );
                TournamentStore::from_state(state)
            }
            None => TournamentStore::new(),
        };
        Ok(Self::with_store(
            config.tournaments.clone(),
            store,
            config.state_file.clone(),
        ))
    }

    pub fn tournaments(&self) -> &[Tournament] {
        &self.tournaments
    }

    /// Look up a catalog entry
    pub fn tournament(&self, id: &str) -> Result<&Tournament, ApiError> {
        self.tournaments
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| ApiError::TournamentNotFound(id.to_string()))
    }

    /// Run a query against the store
    pub fn read<R>(&self, query: impl FnOnce(&TournamentStore) -> R) -> R {
        let store = self.store.read().unwrap_or_else(|e| e.into_inner());
        query(&*store)
    }

    /// Run a command against the store and persist the result if it changed anything
    pub fn write<R>(
        &self,
        command: impl FnOnce(&mut TournamentStore) -> Result<R, ApiError>,
    ) -> Result<R, ApiError> {
        let mut store = self.store.write().unwrap_or_else(|e| e.into_inner());
        let before = store.revision();
        let result = command(&mut *store)?;
        if store.revision() != before {
            self.persist(&store);
        }
        Ok(result)
    }

    pub fn revision(&self) -> u64 {
        self.read(TournamentStore::revision)
    }

    /// Best effort: a failed save is logged and the in-memory state is kept
    fn persist(&self, store: &TournamentStore) {
        let Some(path) = &self.state_file else {
            return;
        };
        if let Err(e) = save_state(path, &store.to_state()) {
            tracing::warn!("failed to persist state: {e}");
        }
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new(default_catalog())
    }
}
