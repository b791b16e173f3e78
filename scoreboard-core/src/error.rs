//! Error types for store commands and state persistence

use std::path::PathBuf;

/// Why a store command was rejected. A rejected command never changes the store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("participant name is required")]
    NameRequired,

    #[error("participant name must be at least {min} characters")]
    NameTooShort { min: usize },

    #[error("participant \"{name}\" already exists in tournament {tournament_id}")]
    DuplicateParticipant { tournament_id: String, name: String },

    #[error("a participant cannot play against itself ({participant_id})")]
    SelfMatch { participant_id: String },

    #[error("{home_id} and {away_id} have already played in tournament {tournament_id}")]
    DuplicatePair {
        tournament_id: String,
        home_id: String,
        away_id: String,
    },

    #[error("match not found: {0}")]
    MatchNotFound(String),
}

impl StoreError {
    /// Stable machine-readable name of the rejection
    pub fn kind(&self) -> &'static str {
        match self {
            StoreError::NameRequired => "name_required",
            StoreError::NameTooShort { .. } => "name_too_short",
            StoreError::DuplicateParticipant { .. } => "duplicate_participant",
            StoreError::SelfMatch { .. } => "self_match",
            StoreError::DuplicatePair { .. } => "duplicate_pair",
            StoreError::MatchNotFound(_) => "match_not_found",
        }
    }
}

/// Failure reading or writing the persisted state file
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize state: {0}")]
    Serialize(#[from] serde_json::Error),
}
