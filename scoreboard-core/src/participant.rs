//! Participants (teams or players) registered under a tournament

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Minimum length of a participant name, in characters, after trimming
pub const MIN_NAME_LEN: usize = 2;

/// An entrant registered under one tournament
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: String,
    pub name: String,
    pub tournament_id: String,
}

impl Participant {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        tournament_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            tournament_id: tournament_id.into(),
        }
    }

    /// Whether `name` collides with this participant's name
    pub fn has_name(&self, name: &str) -> bool {
        normalize_name(&self.name) == normalize_name(name)
    }
}

/// Key used for name uniqueness: trimmed and lowercased
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Validate a submitted name and return it trimmed
pub fn validate_name(name: &str) -> Result<&str, StoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(StoreError::NameRequired);
    }
    if trimmed.chars().count() < MIN_NAME_LEN {
        return Err(StoreError::NameTooShort { min: MIN_NAME_LEN });
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_name_ignores_case_and_whitespace() {
        let p = Participant::new("p1", "Lithuania", "eurobasket");
        assert!(p.has_name("lithuania"));
        assert!(p.has_name("  LITHUANIA "));
        assert!(!p.has_name("Latvia"));
    }

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("  Serbia "), Ok("Serbia"));
        assert_eq!(validate_name("   "), Err(StoreError::NameRequired));
        assert_eq!(
            validate_name(" x "),
            Err(StoreError::NameTooShort { min: MIN_NAME_LEN })
        );
        // Counted in characters, not bytes
        assert!(validate_name("Öö").is_ok());
    }

    #[test]
    fn test_serialized_field_names() {
        let p = Participant::new("p1", "Alpha", "t1");
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["tournamentId"], "t1");
        assert_eq!(json["name"], "Alpha");
    }
}
