//! Tournament catalog

use serde::{Deserialize, Serialize};

/// What a tournament's participants are called
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantKind {
    #[default]
    Team,
    Player,
}

/// Suggested entry for the participant input
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantOption {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag: Option<String>,
}

/// A tournament the application tracks
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    pub id: String,
    pub title: String,
    #[serde(default = "default_draw_allowed")]
    pub draw_allowed: bool,
    #[serde(default)]
    pub participant_kind: ParticipantKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub participant_options: Vec<ParticipantOption>,
}

fn default_draw_allowed() -> bool {
    true
}

impl Tournament {
    pub fn new(id: &str, title: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            draw_allowed: true,
            participant_kind: ParticipantKind::Team,
            participant_options: Vec::new(),
        }
    }

    pub fn without_draws(mut self) -> Self {
        self.draw_allowed = false;
        self
    }

    pub fn with_kind(mut self, kind: ParticipantKind) -> Self {
        self.participant_kind = kind;
        self
    }

    pub fn with_options(mut self, options: Vec<ParticipantOption>) -> Self {
        self.participant_options = options;
        self
    }
}

/// The tournaments shipped out of the box
pub fn default_catalog() -> Vec<Tournament> {
    vec![
        Tournament::new("tournament", "Premier League"),
        Tournament::new("eurobasket", "Eurobasket")
            .without_draws()
            .with_options(eurobasket_2025_countries()),
        Tournament::new("wimbledon", "Wimbledon")
            .without_draws()
            .with_kind(ParticipantKind::Player),
    ]
}

const EUROBASKET_2025: &[(&str, &str, &str)] = &[
    ("Belgium", "BEL", "🇧🇪"),
    ("Bosnia and Herzegovina", "BIH", "🇧🇦"),
    ("Cyprus", "CYP", "🇨🇾"),
    ("Czechia", "CZE", "🇨🇿"),
    ("Estonia", "EST", "🇪🇪"),
    ("Finland", "FIN", "🇫🇮"),
    ("France", "FRA", "🇫🇷"),
    ("Georgia", "GEO", "🇬🇪"),
    ("Germany", "GER", "🇩🇪"),
    ("Great Britain", "GBR", "🇬🇧"),
    ("Greece", "GRE", "🇬🇷"),
    ("Iceland", "ISL", "🇮🇸"),
    ("Israel", "ISR", "🇮🇱"),
    ("Italy", "ITA", "🇮🇹"),
    ("Latvia", "LAT", "🇱🇻"),
    ("Lithuania", "LTU", "🇱🇹"),
    ("Montenegro", "MNE", "🇲🇪"),
    ("Poland", "POL", "🇵🇱"),
    ("Portugal", "POR", "🇵🇹"),
    ("Serbia", "SRB", "🇷🇸"),
    ("Slovenia", "SLO", "🇸🇮"),
    ("Spain", "ESP", "🇪🇸"),
    ("Sweden", "SWE", "🇸🇪"),
    ("Türkiye", "TUR", "🇹🇷"),
];

fn eurobasket_2025_countries() -> Vec<ParticipantOption> {
    EUROBASKET_2025
        .iter()
        .map(|(name, code, flag)| ParticipantOption {
            name: name.to_string(),
            code: Some(code.to_string()),
            flag: Some(flag.to_string()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog() {
        let catalog = default_catalog();
        let ids: Vec<&str> = catalog.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["tournament", "eurobasket", "wimbledon"]);

        assert!(catalog[0].draw_allowed);
        assert!(!catalog[1].draw_allowed);
        assert_eq!(catalog[1].participant_options.len(), 24);
        assert_eq!(catalog[2].participant_kind, ParticipantKind::Player);
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let t: Tournament = serde_json::from_str(r#"{"id":"cup","title":"Cup"}"#).unwrap();
        assert!(t.draw_allowed);
        assert_eq!(t.participant_kind, ParticipantKind::Team);
        assert!(t.participant_options.is_empty());

        let json = r#"{"id":"open","title":"Open","drawAllowed":false,"participantKind":"player"}"#;
        let t: Tournament = serde_json::from_str(json).unwrap();
        assert!(!t.draw_allowed);
        assert_eq!(t.participant_kind, ParticipantKind::Player);
    }
}
