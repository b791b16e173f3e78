//! Persisted state blob
//!
//! The whole store is saved as one JSON object with two collections,
//! `participants` and `scores`, and rehydrated verbatim at startup. The
//! store revision is saved alongside so it keeps counting up across restarts.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PersistError;
use crate::matches::Match;
use crate::participant::Participant;

/// On-disk layout of the store
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default)]
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub scores: Vec<Match>,
    /// Store revision at save time; absent in older files
    #[serde(default)]
    pub revision: u64,
}

/// Load state from `path`. A missing file is an empty state.
pub fn load_state(path: &Path) -> Result<PersistedState, PersistError> {
    if !path.is_file() {
        debug!(path = %path.display(), "no state file, starting empty");
        return Ok(PersistedState::default());
    }
    let data = fs::read_to_string(path).map_err(|source| PersistError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&data).map_err(|source| PersistError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Save state to `path`, replacing the previous file in one step
pub fn save_state(path: &Path, state: &PersistedState) -> Result<(), PersistError> {
    let payload = serde_json::to_string_pretty(state)?;
    let write_err = |source: std::io::Error| PersistError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, payload).map_err(write_err)?;
    fs::rename(&tmp, path).map_err(write_err)?;
    debug!(
        path = %path.display(),
        participants = state.participants.len(),
        scores = state.scores.len(),
        "state saved"
    );
    Ok(())
}
