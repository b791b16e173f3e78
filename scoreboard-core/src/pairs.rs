//! Order-independent pair keys and the played-pairs lookup
//!
//! Two participants may meet at most once per tournament. The store guards
//! this with [`PairKey`]; forms use [`PlayedPairs`] to filter opponents
//! before a submission ever reaches the store.

use std::collections::HashSet;
use std::fmt;

use crate::matches::Match;
use crate::participant::Participant;

/// Unordered pair of participant ids, scoped by tournament.
///
/// `PairKey::new(t, a, b) == PairKey::new(t, b, a)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PairKey {
    tournament_id: String,
    low: String,
    high: String,
}

impl PairKey {
    pub fn new(tournament_id: &str, a: &str, b: &str) -> Self {
        let (low, high) = sorted_pair(a, b);
        Self {
            tournament_id: tournament_id.to_string(),
            low: low.to_string(),
            high: high.to_string(),
        }
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.tournament_id, self.low, self.high)
    }
}

fn sorted_pair<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Set of pairs that already met, built from one tournament's match list.
///
/// Rebuild it whenever the match list changes.
#[derive(Clone, Debug, Default)]
pub struct PlayedPairs {
    pairs: HashSet<(String, String)>,
}

impl PlayedPairs {
    pub fn from_matches<'a>(matches: impl IntoIterator<Item = &'a Match>) -> Self {
        let pairs = matches
            .into_iter()
            .map(|m| {
                let (low, high) = sorted_pair(&m.home_participant_id, &m.away_participant_id);
                (low.to_string(), high.to_string())
            })
            .collect();
        Self { pairs }
    }

    /// Whether `a` and `b` already played. False when either side is missing.
    pub fn has_played(&self, a: Option<&str>, b: Option<&str>) -> bool {
        let (Some(a), Some(b)) = (a, b) else {
            return false;
        };
        if a.is_empty() || b.is_empty() {
            return false;
        }
        let (low, high) = sorted_pair(a, b);
        self.pairs.contains(&(low.to_string(), high.to_string()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Participants that may still be chosen as the away side against `home_id`
pub fn available_opponents<'a>(
    participants: &'a [Participant],
    played: &PlayedPairs,
    home_id: Option<&str>,
) -> Vec<&'a Participant> {
    participants
        .iter()
        .filter(|p| Some(p.id.as_str()) != home_id)
        .filter(|p| !played.has_played(home_id, Some(&p.id)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn played(home: &str, away: &str) -> Match {
        Match {
            id: format!("{home}-{away}"),
            tournament_id: "t1".to_string(),
            home_participant_id: home.to_string(),
            away_participant_id: away.to_string(),
            home_participant_score: 1,
            away_participant_score: 0,
        }
    }

    #[test]
    fn test_pair_key_is_order_independent() {
        assert_eq!(PairKey::new("t1", "a", "b"), PairKey::new("t1", "b", "a"));
        assert_eq!(PairKey::new("t1", "b", "a").to_string(), "t1:a:b");
    }

    #[test]
    fn test_pair_key_is_scoped_by_tournament() {
        assert_ne!(PairKey::new("t1", "a", "b"), PairKey::new("t2", "a", "b"));
    }

    #[test]
    fn test_has_played() {
        let lookup = PlayedPairs::from_matches(&[played("a", "b")]);
        assert!(lookup.has_played(Some("a"), Some("b")));
        assert!(lookup.has_played(Some("b"), Some("a")));
        assert!(!lookup.has_played(Some("a"), Some("c")));
        assert!(!lookup.has_played(None, Some("b")));
        assert!(!lookup.has_played(Some("a"), None));
        assert!(!lookup.has_played(Some(""), Some("b")));
    }

    #[test]
    fn test_available_opponents() {
        let roster = vec![
            Participant::new("a", "Alpha", "t1"),
            Participant::new("b", "Beta", "t1"),
            Participant::new("c", "Gamma", "t1"),
        ];
        let lookup = PlayedPairs::from_matches(&[played("b", "a")]);

        let ids: Vec<&str> = available_opponents(&roster, &lookup, Some("a"))
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["c"]);

        // Without a home selection everyone is available
        assert_eq!(available_opponents(&roster, &lookup, None).len(), 3);
    }
}
