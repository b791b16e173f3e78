//! Participant and match store
//!
//! The single source of truth for rosters and results. Every command is
//! validated before anything is written, so a rejected command leaves the
//! store exactly as it was.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::error::StoreError;
use crate::id::make_id;
use crate::matches::{Match, NewMatch};
use crate::pairs::{PairKey, PlayedPairs};
use crate::participant::{validate_name, Participant};
use crate::persist::PersistedState;
use crate::standings::{compute_standings, StandingsRow};

/// Store of participants and matches for every tournament
#[derive(Clone, Debug, Default)]
pub struct TournamentStore {
    /// All participants, in insertion order
    participants: Vec<Participant>,
    /// All matches, in insertion order
    matches: Vec<Match>,
    /// Pair keys of every stored match, for the rematch check
    pair_index: HashSet<PairKey>,
    /// Bumped by every successful mutation
    revision: u64,
}

impl TournamentStore {
    pub fn new() -> Self {
        TournamentStore::default()
    }

    /// Rehydrate a store from persisted state, keeping entries verbatim.
    /// The revision continues from the saved one.
    pub fn from_state(state: PersistedState) -> Self {
        let mut store = Self {
            participants: state.participants,
            matches: state.scores,
            pair_index: HashSet::new(),
            revision: state.revision,
        };
        store.reindex();
        store
    }

    /// Snapshot of the store in its persisted layout
    pub fn to_state(&self) -> PersistedState {
        PersistedState {
            participants: self.participants.clone(),
            scores: self.matches.clone(),
            revision: self.revision,
        }
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    // ========================================================================
    // Participant commands
    // ========================================================================

    /// Register a participant. Names are unique per tournament, ignoring case
    /// and surrounding whitespace.
    pub fn add_participant(
        &mut self,
        name: &str,
        tournament_id: &str,
    ) -> Result<Participant, StoreError> {
        let name = validate_name(name)?;

        if self.find_participant_by_name(tournament_id, name).is_some() {
            debug!(tournament_id, name, "rejected duplicate participant");
            return Err(StoreError::DuplicateParticipant {
                tournament_id: tournament_id.to_string(),
                name: name.to_string(),
            });
        }

        let participant = Participant::new(make_id(), name, tournament_id);
        info!(tournament_id, name, id = %participant.id, "participant added");
        self.participants.push(participant.clone());
        self.revision += 1;
        Ok(participant)
    }

    /// Remove the whole roster of a tournament. Matches are left in place.
    pub fn remove_participants_by_tournament_id(&mut self, tournament_id: &str) -> usize {
        let before = self.participants.len();
        self.participants.retain(|p| p.tournament_id != tournament_id);
        let removed = before - self.participants.len();
        if removed > 0 {
            info!(tournament_id, removed, "participants removed");
            self.revision += 1;
        }
        removed
    }

    // ========================================================================
    // Match commands
    // ========================================================================

    /// Record a match result.
    ///
    /// Rejected when both sides are the same participant, or when the two
    /// participants already met in this tournament (in either orientation).
    pub fn add_match(&mut self, new_match: NewMatch) -> Result<Match, StoreError> {
        if new_match.home_participant_id == new_match.away_participant_id {
            debug!(
                tournament_id = %new_match.tournament_id,
                participant_id = %new_match.home_participant_id,
                "rejected self match"
            );
            return Err(StoreError::SelfMatch {
                participant_id: new_match.home_participant_id,
            });
        }

        let key = PairKey::new(
            &new_match.tournament_id,
            &new_match.home_participant_id,
            &new_match.away_participant_id,
        );
        if self.pair_index.contains(&key) {
            debug!(%key, "rejected rematch");
            return Err(StoreError::DuplicatePair {
                tournament_id: new_match.tournament_id,
                home_id: new_match.home_participant_id,
                away_id: new_match.away_participant_id,
            });
        }

        let recorded = new_match.into_match(make_id());
        info!(
            tournament_id = %recorded.tournament_id,
            id = %recorded.id,
            home_score = recorded.home_participant_score,
            away_score = recorded.away_participant_score,
            "match recorded"
        );
        self.pair_index.insert(key);
        self.matches.push(recorded.clone());
        self.revision += 1;
        Ok(recorded)
    }

    /// Replace the scores of a recorded match
    pub fn update_match(
        &mut self,
        match_id: &str,
        home_score: u32,
        away_score: u32,
    ) -> Result<Match, StoreError> {
        let recorded = self
            .matches
            .iter_mut()
            .find(|m| m.id == match_id)
            .ok_or_else(|| StoreError::MatchNotFound(match_id.to_string()))?;

        recorded.home_participant_score = home_score;
        recorded.away_participant_score = away_score;
        let updated = recorded.clone();
        info!(id = match_id, home_score, away_score, "match updated");
        self.revision += 1;
        Ok(updated)
    }

    /// Remove a single match
    pub fn remove_match(&mut self, match_id: &str) -> Result<Match, StoreError> {
        let index = self
            .matches
            .iter()
            .position(|m| m.id == match_id)
            .ok_or_else(|| StoreError::MatchNotFound(match_id.to_string()))?;

        let removed = self.matches.remove(index);
        self.reindex();
        info!(id = match_id, "match removed");
        self.revision += 1;
        Ok(removed)
    }

    /// Remove every match of a tournament
    pub fn remove_matches_by_tournament_id(&mut self, tournament_id: &str) -> usize {
        let before = self.matches.len();
        self.matches.retain(|m| m.tournament_id != tournament_id);
        let removed = before - self.matches.len();
        if removed > 0 {
            self.reindex();
            info!(tournament_id, removed, "matches removed");
            self.revision += 1;
        }
        removed
    }

    /// Remove roster and matches of a tournament.
    /// Returns `(participants_removed, matches_removed)`.
    pub fn clear_tournament(&mut self, tournament_id: &str) -> (usize, usize) {
        let matches = self.remove_matches_by_tournament_id(tournament_id);
        let participants = self.remove_participants_by_tournament_id(tournament_id);
        (participants, matches)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn list_participants(&self, tournament_id: &str) -> Vec<Participant> {
        self.participants
            .iter()
            .filter(|p| p.tournament_id == tournament_id)
            .cloned()
            .collect()
    }

    pub fn list_matches(&self, tournament_id: &str) -> Vec<Match> {
        self.matches
            .iter()
            .filter(|m| m.tournament_id == tournament_id)
            .cloned()
            .collect()
    }

    pub fn get_match(&self, match_id: &str) -> Option<&Match> {
        self.matches.iter().find(|m| m.id == match_id)
    }

    pub fn get_participant(&self, participant_id: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == participant_id)
    }

    /// Look up a participant by name, ignoring case and surrounding whitespace
    pub fn find_participant_by_name(
        &self,
        tournament_id: &str,
        name: &str,
    ) -> Option<&Participant> {
        self.participants
            .iter()
            .find(|p| p.tournament_id == tournament_id && p.has_name(name))
    }

    /// Played-pairs lookup for one tournament's score form
    pub fn played_pairs(&self, tournament_id: &str) -> PlayedPairs {
        PlayedPairs::from_matches(self.matches.iter().filter(|m| m.tournament_id == tournament_id))
    }

    /// Current standings of a tournament
    pub fn standings(&self, tournament_id: &str) -> Vec<StandingsRow> {
        compute_standings(
            &self.list_participants(tournament_id),
            &self.list_matches(tournament_id),
        )
    }

    fn reindex(&mut self) {
        self.pair_index = self.matches.iter().map(Match::pair_key).collect();
    }
}
