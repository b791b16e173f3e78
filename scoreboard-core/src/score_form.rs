//! Score entry form rules
//!
//! The form checks a submission against the played-pairs lookup before it
//! reaches the store, so users get a field error instead of a rejected
//! command. Opponents that already met the home side are filtered out, and
//! changing the home side clears an away selection it has already played.

use std::fmt;

use crate::matches::NewMatch;
use crate::pairs::PlayedPairs;
use crate::tournament::Tournament;

/// Fields of the score form
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormField {
    Home,
    Away,
    HomeScore,
    AwayScore,
}

impl FormField {
    /// Field name as used in request and response bodies
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Home => "home",
            FormField::Away => "away",
            FormField::HomeScore => "homeScore",
            FormField::AwayScore => "awayScore",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FormField::Home => "home participant",
            FormField::Away => "away participant",
            FormField::HomeScore => "home score",
            FormField::AwayScore => "away score",
        };
        f.write_str(label)
    }
}

/// Validation message attached to one form field
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("{0} is required")]
    Required(FormField),

    #[error("{0} must be a whole number of zero or more")]
    InvalidScore(FormField),

    #[error("{0} is not registered in this tournament")]
    UnknownParticipant(FormField),

    #[error("home and away must be different participants")]
    SameParticipant,

    #[error("these participants have already played")]
    AlreadyPlayed,

    #[error("draws are not allowed in this tournament")]
    DrawNotAllowed,
}

/// State of a score entry form for one tournament
#[derive(Clone, Debug, Default)]
pub struct ScoreForm {
    tournament_id: String,
    draw_allowed: bool,
    home: Option<String>,
    away: Option<String>,
    home_score: Option<u32>,
    away_score: Option<u32>,
}

impl ScoreForm {
    pub fn new(tournament_id: impl Into<String>, draw_allowed: bool) -> Self {
        Self {
            tournament_id: tournament_id.into(),
            draw_allowed,
            ..Default::default()
        }
    }

    pub fn for_tournament(tournament: &Tournament) -> Self {
        Self::new(tournament.id.clone(), tournament.draw_allowed)
    }

    pub fn home(&self) -> Option<&str> {
        self.home.as_deref()
    }

    pub fn away(&self) -> Option<&str> {
        self.away.as_deref()
    }

    /// Choose the home side.
    ///
    /// If the current away selection is no longer a valid opponent it is
    /// cleared and the reason is returned for display on the away field.
    pub fn select_home(
        &mut self,
        home_id: Option<&str>,
        played: &PlayedPairs,
    ) -> Option<FieldError> {
        self.home = home_id.filter(|id| !id.is_empty()).map(str::to_string);

        let problem = opponent_problem(self.home(), self.away(), played)?;
        self.away = None;
        Some(problem)
    }

    /// Choose the away side. An invalid choice leaves the selection unchanged.
    pub fn select_away(
        &mut self,
        away_id: Option<&str>,
        played: &PlayedPairs,
    ) -> Result<(), FieldError> {
        let away_id = away_id.filter(|id| !id.is_empty());
        if let Some(problem) = opponent_problem(self.home(), away_id, played) {
            return Err(problem);
        }
        self.away = away_id.map(str::to_string);
        Ok(())
    }

    pub fn set_scores(&mut self, home_score: Option<u32>, away_score: Option<u32>) {
        self.home_score = home_score;
        self.away_score = away_score;
    }

    /// Set scores from raw text input
    pub fn enter_scores(&mut self, home: &str, away: &str) -> Vec<(FormField, FieldError)> {
        let mut errors = Vec::new();
        self.home_score = parse_score(home, FormField::HomeScore).unwrap_or_else(|e| {
            errors.push((FormField::HomeScore, e));
            None
        });
        self.away_score = parse_score(away, FormField::AwayScore).unwrap_or_else(|e| {
            errors.push((FormField::AwayScore, e));
            None
        });
        errors
    }

    /// Validate the whole form and produce the store command.
    ///
    /// Every field is checked, so all errors are reported at once. The
    /// played-pairs check runs again here since the match list may have
    /// changed after the selections were made.
    pub fn submit(&self, played: &PlayedPairs) -> Result<NewMatch, Vec<(FormField, FieldError)>> {
        let mut errors = Vec::new();

        if self.home.is_none() {
            errors.push((FormField::Home, FieldError::Required(FormField::Home)));
        }
        if self.away.is_none() {
            errors.push((FormField::Away, FieldError::Required(FormField::Away)));
        }
        if self.home_score.is_none() {
            errors.push((FormField::HomeScore, FieldError::Required(FormField::HomeScore)));
        }
        if self.away_score.is_none() {
            errors.push((FormField::AwayScore, FieldError::Required(FormField::AwayScore)));
        }
        if let Some(problem) = opponent_problem(self.home(), self.away(), played) {
            errors.push((FormField::Away, problem));
        }
        if !self.draw_allowed && self.home_score.is_some() && self.home_score == self.away_score {
            errors.push((FormField::AwayScore, FieldError::DrawNotAllowed));
        }

        match (&self.home, &self.away, self.home_score, self.away_score) {
            (Some(home), Some(away), Some(home_score), Some(away_score)) if errors.is_empty() => {
                Ok(NewMatch::new(
                    self.tournament_id.clone(),
                    home.clone(),
                    away.clone(),
                    home_score,
                    away_score,
                ))
            }
            _ => Err(errors),
        }
    }

    /// Clear selections and scores after a successful submission
    pub fn reset(&mut self) {
        self.home = None;
        self.away = None;
        self.home_score = None;
        self.away_score = None;
    }
}

fn opponent_problem(
    home: Option<&str>,
    away: Option<&str>,
    played: &PlayedPairs,
) -> Option<FieldError> {
    match (home, away) {
        (Some(home), Some(away)) if home == away => Some(FieldError::SameParticipant),
        _ if played.has_played(home, away) => Some(FieldError::AlreadyPlayed),
        _ => None,
    }
}

fn parse_score(raw: &str, field: FormField) -> Result<Option<u32>, FieldError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<u32>()
        .map(Some)
        .map_err(|_| FieldError::InvalidScore(field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matches::Match;

    fn lookup(pairs: &[(&str, &str)]) -> PlayedPairs {
        let matches: Vec<Match> = pairs
            .iter()
            .map(|(home, away)| Match {
                id: format!("{home}-{away}"),
                tournament_id: "t1".to_string(),
                home_participant_id: home.to_string(),
                away_participant_id: away.to_string(),
                home_participant_score: 1,
                away_participant_score: 0,
            })
            .collect();
        PlayedPairs::from_matches(&matches)
    }

    #[test]
    fn test_valid_submission() {
        let played = lookup(&[]);
        let mut form = ScoreForm::new("t1", true);
        assert_eq!(form.select_home(Some("a"), &played), None);
        form.select_away(Some("b"), &played).unwrap();
        form.set_scores(Some(2), Some(2));

        let command = form.submit(&played).unwrap();
        assert_eq!(command, NewMatch::new("t1", "a", "b", 2, 2));
    }

    #[test]
    fn test_changing_home_clears_played_away() {
        let played = lookup(&[("b", "c")]);
        let mut form = ScoreForm::new("t1", true);
        form.select_home(Some("a"), &played);
        form.select_away(Some("c"), &played).unwrap();

        let problem = form.select_home(Some("b"), &played);
        assert_eq!(problem, Some(FieldError::AlreadyPlayed));
        assert_eq!(form.home(), Some("b"));
        assert_eq!(form.away(), None);
    }

    #[test]
    fn test_changing_home_to_away_clears_away() {
        let played = lookup(&[]);
        let mut form = ScoreForm::new("t1", true);
        form.select_home(Some("a"), &played);
        form.select_away(Some("b"), &played).unwrap();

        assert_eq!(form.select_home(Some("b"), &played), Some(FieldError::SameParticipant));
        assert_eq!(form.away(), None);
    }

    #[test]
    fn test_select_away_rejects_played_opponent() {
        let played = lookup(&[("a", "b")]);
        let mut form = ScoreForm::new("t1", true);
        form.select_home(Some("a"), &played);

        assert_eq!(form.select_away(Some("b"), &played), Err(FieldError::AlreadyPlayed));
        assert_eq!(form.away(), None);
        assert_eq!(form.select_away(Some("a"), &played), Err(FieldError::SameParticipant));
    }

    #[test]
    fn test_submit_rechecks_played_pairs() {
        let mut form = ScoreForm::new("t1", true);
        form.select_home(Some("a"), &lookup(&[]));
        form.select_away(Some("b"), &lookup(&[])).unwrap();
        form.set_scores(Some(1), Some(0));

        // Someone else recorded the pair in the meantime
        let errors = form.submit(&lookup(&[("b", "a")])).unwrap_err();
        assert_eq!(errors, vec![(FormField::Away, FieldError::AlreadyPlayed)]);
    }

    #[test]
    fn test_missing_fields_reported_together() {
        let form = ScoreForm::new("t1", true);
        let errors = form.submit(&lookup(&[])).unwrap_err();
        let fields: Vec<FormField> = errors.iter().map(|(field, _)| *field).collect();
        assert_eq!(
            fields,
            vec![FormField::Home, FormField::Away, FormField::HomeScore, FormField::AwayScore]
        );
    }

    #[test]
    fn test_draw_not_allowed() {
        let played = lookup(&[]);
        let mut form = ScoreForm::new("wimbledon", false);
        form.select_home(Some("a"), &played);
        form.select_away(Some("b"), &played).unwrap();
        form.set_scores(Some(3), Some(3));

        let errors = form.submit(&played).unwrap_err();
        assert_eq!(errors, vec![(FormField::AwayScore, FieldError::DrawNotAllowed)]);

        form.set_scores(Some(3), Some(1));
        assert!(form.submit(&played).is_ok());
    }

    #[test]
    fn test_enter_scores_parses_text() {
        let mut form = ScoreForm::new("t1", true);
        assert!(form.enter_scores(" 3 ", "0").is_empty());

        let errors = form.enter_scores("-1", "x");
        assert_eq!(
            errors,
            vec![
                (FormField::HomeScore, FieldError::InvalidScore(FormField::HomeScore)),
                (FormField::AwayScore, FieldError::InvalidScore(FormField::AwayScore)),
            ]
        );
    }

    #[test]
    fn test_reset() {
        let played = lookup(&[]);
        let mut form = ScoreForm::new("t1", true);
        form.select_home(Some("a"), &played);
        form.reset();
        assert_eq!(form.home(), None);
        assert!(form.submit(&played).is_err());
    }

    #[test]
    fn test_field_error_messages() {
        assert_eq!(
            FieldError::Required(FormField::HomeScore).to_string(),
            "home score is required"
        );
        assert_eq!(FieldError::AlreadyPlayed.to_string(), "these participants have already played");
        assert_eq!(
            FieldError::UnknownParticipant(FormField::Away).to_string(),
            "away participant is not registered in this tournament"
        );
    }
}
