//! Offline store commands - edit the state file without a running server
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: Session::participants(), matches(), standings(), clear()
//! - Level 2: Session::open(), Session::save()
//! - Level 3: name resolution, score form submission
//! - Level 4: output formatting

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Subcommand;

use scoreboard_core::{
    load_state, render_match_list, render_standings, save_state, FormField, Participant, ScoreForm,
    Tournament, TournamentStore,
};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Subcommand)]
pub enum ParticipantCommand {
    /// Register a participant
    Add {
        /// Tournament id
        tournament: String,
        /// Participant name
        name: String,
    },
    /// List a tournament's participants
    List {
        /// Tournament id
        tournament: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum MatchCommand {
    /// Record a match result, naming both participants
    Add {
        /// Tournament id
        tournament: String,
        /// Home participant name
        home: String,
        /// Away participant name
        away: String,
        /// Home score
        home_score: String,
        /// Away score
        away_score: String,
    },
    /// List a tournament's matches
    List {
        /// Tournament id
        tournament: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove a match by id
    Remove {
        /// Match id
        id: String,
    },
}

/// Store loaded from a state file, saved back after each command
pub struct Session {
    path: PathBuf,
    store: TournamentStore,
    /// Revision read from the state file
    loaded_revision: u64,
    tournaments: Vec<Tournament>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

impl Session {
    /// Run a participant command
    pub fn participants(mut self, command: ParticipantCommand) -> Result<()> {
        match command {
            ParticipantCommand::Add { tournament, name } => {
                self.tournament(&tournament)?;
                let participant = self.store.add_participant(&name, &tournament)?;
                self.save()?;
                println!("Added {} ({})", participant.name, participant.id);
            }
            ParticipantCommand::List { tournament, json } => {
                self.tournament(&tournament)?;
                let roster = self.store.list_participants(&tournament);
                if json {
                    println!("{}", serde_json::to_string_pretty(&roster)?);
                } else if roster.is_empty() {
                    println!("No participants yet.");
                } else {
                    for participant in &roster {
                        println!("{}  {}", participant.id, participant.name);
                    }
                }
            }
        }
        Ok(())
    }

    /// Run a match command
    pub fn matches(mut self, command: MatchCommand) -> Result<()> {
        match command {
            MatchCommand::Add {
                tournament,
                home,
                away,
                home_score,
                away_score,
            } => {
                let recorded =
                    self.record_match(&tournament, &home, &away, &home_score, &away_score)?;
                self.save()?;
                println!(
                    "Recorded {} {} - {} {} ({})",
                    home,
                    recorded.home_participant_score,
                    recorded.away_participant_score,
                    away,
                    recorded.id
                );
            }
            MatchCommand::List { tournament, json } => {
                self.tournament(&tournament)?;
                let matches = self.store.list_matches(&tournament);
                if json {
                    println!("{}", serde_json::to_string_pretty(&matches)?);
                } else {
                    let roster = self.store.list_participants(&tournament);
                    print!("{}", render_match_list(&roster, &matches));
                }
            }
            MatchCommand::Remove { id } => {
                let removed = self.store.remove_match(&id)?;
                self.save()?;
                println!("Removed match {}", removed.id);
            }
        }
        Ok(())
    }

    /// Print the standings table
    pub fn standings(self, tournament: &str) -> Result<()> {
        let title = &self.tournament(tournament)?.title;
        println!("{title}");
        print!("{}", render_standings(&self.store.standings(tournament)));
        Ok(())
    }

    /// Remove a tournament's participants and matches
    pub fn clear(mut self, tournament: &str) -> Result<()> {
        self.tournament(tournament)?;
        let (participants, matches) = self.store.clear_tournament(tournament);
        self.save()?;
        println!("Removed {participants} participants and {matches} matches");
        Ok(())
    }
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

impl Session {
    /// Load the state file; a missing file starts an empty store
    pub fn open(path: PathBuf, tournaments: Vec<Tournament>) -> Result<Self> {
        let state = load_state(&path)
            .with_context(|| format!("Failed to load state file: {}", path.display()))?;
        tracing::debug!(
            "Loaded {} participants and {} matches from {}",
            state.participants.len(),
            state.scores.len(),
            path.display()
        );

        let store = TournamentStore::from_state(state);
        Ok(Self {
            path,
            loaded_revision: store.revision(),
            store,
            tournaments,
        })
    }

    /// Write the store back if a command changed it
    fn save(&self) -> Result<()> {
        if self.store.revision() == self.loaded_revision {
            return Ok(());
        }
        save_state(&self.path, &self.store.to_state())
            .with_context(|| format!("Failed to save state file: {}", self.path.display()))
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

impl Session {
    fn tournament(&self, id: &str) -> Result<&Tournament> {
        self.tournaments
            .iter()
            .find(|t| t.id == id)
            .with_context(|| format!("Unknown tournament: {id}"))
    }

    fn participant_by_name(&self, tournament: &str, name: &str) -> Result<Participant> {
        self.store
            .find_participant_by_name(tournament, name)
            .cloned()
            .with_context(|| format!("No participant named \"{name}\" in {tournament}"))
    }

    /// Fill in a score form the way the frontend does and submit it
    fn record_match(
        &mut self,
        tournament: &str,
        home: &str,
        away: &str,
        home_score: &str,
        away_score: &str,
    ) -> Result<scoreboard_core::Match> {
        let mut form = ScoreForm::for_tournament(self.tournament(tournament)?);
        let home = self.participant_by_name(tournament, home)?;
        let away = self.participant_by_name(tournament, away)?;
        let played = self.store.played_pairs(tournament);

        let mut errors = form.enter_scores(home_score, away_score);
        form.select_home(Some(&home.id), &played);
        if let Err(e) = form.select_away(Some(&away.id), &played) {
            errors.push((FormField::Away, e));
        }
        if !errors.is_empty() {
            anyhow::bail!(format_field_errors(&errors));
        }

        let new_match = form
            .submit(&played)
            .map_err(|errors| anyhow::anyhow!(format_field_errors(&errors)))?;
        Ok(self.store.add_match(new_match)?)
    }
}

// ============================================================================
// LEVEL 4 - FORMATTING
// ============================================================================

fn format_field_errors(errors: &[(FormField, scoreboard_core::FieldError)]) -> String {
    errors
        .iter()
        .map(|(field, error)| format!("{}: {}", field.as_str(), error))
        .collect::<Vec<_>>()
        .join("; ")
}

// ============================================================================
// TESTS
// ============================================================================
