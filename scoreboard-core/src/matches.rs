//! Recorded match results

use serde::{Deserialize, Serialize};

use crate::pairs::PairKey;

/// A recorded result between two participants of one tournament
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: String,
    pub tournament_id: String,
    pub home_participant_id: String,
    pub away_participant_id: String,
    pub home_participant_score: u32,
    pub away_participant_score: u32,
}

impl Match {
    /// Order-independent key of the two participants, scoped by tournament
    pub fn pair_key(&self) -> PairKey {
        PairKey::new(
            &self.tournament_id,
            &self.home_participant_id,
            &self.away_participant_id,
        )
    }

    /// Whether `participant_id` played in this match
    pub fn involves(&self, participant_id: &str) -> bool {
        self.home_participant_id == participant_id || self.away_participant_id == participant_id
    }
}

/// A match submission before the store assigns it an id
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMatch {
    pub tournament_id: String,
    pub home_participant_id: String,
    pub away_participant_id: String,
    pub home_participant_score: u32,
    pub away_participant_score: u32,
}

impl NewMatch {
    pub fn new(
        tournament_id: impl Into<String>,
        home_id: impl Into<String>,
        away_id: impl Into<String>,
        home_score: u32,
        away_score: u32,
    ) -> Self {
        Self {
            tournament_id: tournament_id.into(),
            home_participant_id: home_id.into(),
            away_participant_id: away_id.into(),
            home_participant_score: home_score,
            away_participant_score: away_score,
        }
    }

    pub(crate) fn into_match(self, id: String) -> Match {
        Match {
            id,
            tournament_id: self.tournament_id,
            home_participant_id: self.home_participant_id,
            away_participant_id: self.away_participant_id,
            home_participant_score: self.home_participant_score,
            away_participant_score: self.away_participant_score,
        }
    }
}
