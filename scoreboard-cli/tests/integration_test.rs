//! Integration tests for the scoreboard
//!
//! Tests the full stack: store commands, score form, standings, persistence
//! and the server state shared by the API handlers

use scoreboard_core::{
    default_catalog, load_state, render_standings, save_state, FieldError, FormField, ScoreForm,
    StoreError, TournamentStore,
};
use scoreboard_server::{ServerConfig, ServerState};
use std::path::PathBuf;

// ============================================================================
// TEST FIXTURES
// ============================================================================

fn temp_state_file() -> PathBuf {
    std::env::temp_dir()
        .join(format!("scoreboard-it-{}", uuid::Uuid::new_v4()))
        .join("state.json")
}

/// Four-team league with every pairing still open
fn league() -> (TournamentStore, Vec<String>) {
    let mut store = TournamentStore::new();
    let ids = ["Arsenal", "Chelsea", "Liverpool", "Everton"]
        .iter()
        .map(|name| store.add_participant(name, "tournament").unwrap().id)
        .collect();
    (store, ids)
}

/// Submit a result through the score form, as the frontend does
fn submit(
    store: &mut TournamentStore,
    home: &str,
    away: &str,
    scores: (u32, u32),
) -> Result<(), Vec<(FormField, FieldError)>> {
    let catalog = default_catalog();
    let played = store.played_pairs("tournament");
    let mut form = ScoreForm::for_tournament(&catalog[0]);
    form.select_home(Some(home), &played);
    form.select_away(Some(away), &played)
        .map_err(|e| vec![(FormField::Away, e)])?;
    form.set_scores(Some(scores.0), Some(scores.1));
    let new_match = form.submit(&played)?;
    store.add_match(new_match).unwrap();
    Ok(())
}

// ============================================================================
// ROUND ROBIN
// ============================================================================

#[test]
fn test_full_round_robin() {
    let (mut store, ids) = league();

    // Every unordered pair exactly once
    let mut played = 0;
    for i in 0..ids.len() {
        for j in (i + 1)..ids.len() {
            submit(&mut store, &ids[i], &ids[j], ((i + j) as u32 % 3, 1)).unwrap();
            played += 1;
        }
    }
    assert_eq!(played, 6);

    // Nothing left to schedule
    for i in 0..ids.len() {
        for j in 0..ids.len() {
            if i != j {
                assert!(submit(&mut store, &ids[i], &ids[j], (1, 0)).is_err());
            }
        }
    }

    let standings = store.standings("tournament");
    assert_eq!(standings.len(), 4);
    for row in &standings {
        assert_eq!(row.games, 3);
        assert_eq!(row.wins + row.losses + row.draws, row.games);
    }
    let total_points: u32 = standings.iter().map(|r| r.points).sum();
    let draws: u32 = standings.iter().map(|r| r.draws).sum::<u32>() / 2;
    assert_eq!(total_points, 3 * (6 - draws) + 2 * draws);

    for pair in standings.windows(2) {
        assert!(pair[0].points >= pair[1].points);
    }
}

#[test]
fn test_reverse_fixture_blocked_at_both_layers() {
    let (mut store, ids) = league();
    submit(&mut store, &ids[0], &ids[1], (2, 0)).unwrap();

    let errors = submit(&mut store, &ids[1], &ids[0], (0, 1)).unwrap_err();
    assert_eq!(errors, vec![(FormField::Away, FieldError::AlreadyPlayed)]);

    // The store refuses even when the form is bypassed
    let bypass = scoreboard_core::NewMatch::new("tournament", ids[1].clone(), ids[0].clone(), 0, 1);
    assert!(matches!(store.add_match(bypass), Err(StoreError::DuplicatePair { .. })));
    assert_eq!(store.list_matches("tournament").len(), 1);
}

// ============================================================================
// PERSISTENCE
// ============================================================================

#[test]
fn test_state_file_round_trip_keeps_standings() {
    let path = temp_state_file();
    let (mut store, ids) = league();
    submit(&mut store, &ids[0], &ids[1], (1, 1)).unwrap();
    submit(&mut store, &ids[2], &ids[3], (4, 0)).unwrap();

    save_state(&path, &store.to_state()).unwrap();
    let restored = TournamentStore::from_state(load_state(&path).unwrap());

    assert_eq!(restored.standings("tournament"), store.standings("tournament"));
    assert_eq!(
        render_standings(&restored.standings("tournament")),
        render_standings(&store.standings("tournament"))
    );

    // The pair index is rebuilt on load
    let mut restored = restored;
    assert!(submit(&mut restored, &ids[1], &ids[0], (0, 0)).is_err());

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn test_server_state_persists_commands() {
    let path = temp_state_file();
    let config = ServerConfig {
        state_file: Some(path.clone()),
        ..Default::default()
    };

    let state = ServerState::from_config(&config).unwrap();
    state
        .write(|store| Ok(store.add_participant("Alcaraz", "wimbledon")?))
        .unwrap();
    assert!(state.write(|store| Ok(store.add_participant("alcaraz", "wimbledon")?)).is_err());
    assert_eq!(state.revision(), 1);

    let restarted = ServerState::from_config(&config).unwrap();
    let roster = restarted.read(|store| store.list_participants("wimbledon"));
    assert_eq!(roster.len(), 1);
    assert_eq!(roster[0].name, "Alcaraz");

    // Revisions keep counting from the saved one
    assert_eq!(restarted.revision(), 1);
    restarted
        .write(|store| Ok(store.add_participant("Sinner", "wimbledon")?))
        .unwrap();
    assert_eq!(restarted.revision(), 2);

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}
