//! Scoreboard Core - Round-robin tournament bookkeeping
//!
//! This crate provides the core logic for the scoreboard:
//! - Participant and match store, partitioned by tournament
//! - Rematch and self-match guards (order-independent pair keys)
//! - Score form validation built on the played-pairs lookup
//! - Standings derivation (3 points per win, 1 per draw)
//! - Tournament catalog and the persisted state blob

pub mod error;
pub mod id;
pub mod matches;
pub mod pairs;
pub mod participant;
pub mod persist;
pub mod score_form;
pub mod standings;
pub mod store;
pub mod tournament;

// Re-exports for convenient access
pub use error::{PersistError, StoreError};
pub use id::make_id;
pub use matches::{Match, NewMatch};
pub use pairs::{available_opponents, PairKey, PlayedPairs};
pub use participant::{Participant, MIN_NAME_LEN};
pub use persist::{load_state, save_state, PersistedState};
pub use score_form::{FieldError, FormField, ScoreForm};
pub use standings::{
    compute_standings, render_match_list, render_standings, StandingsRow, DRAW_POINTS, WIN_POINTS,
};
pub use store::TournamentStore;
pub use tournament::{default_catalog, ParticipantKind, ParticipantOption, Tournament};
