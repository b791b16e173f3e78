//! Tournament catalog and change polling

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use scoreboard_core::Tournament;

use crate::error::ApiError;
use crate::state::ServerState;

/// Get the tournament catalog
pub async fn list_tournaments(State(state): State<Arc<ServerState>>) -> Json<Vec<Tournament>> {
    Json(state.tournaments().to_vec())
}

/// Poll query params
#[derive(Deserialize)]
pub struct PollParams {
    pub revision: Option<u64>,
}

/// Long-poll for store changes.
///
/// Returns as soon as the store revision differs from the client's, with the
/// tournament's current roster, matches and standings.
pub async fn poll_tournament(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
    Query(params): Query<PollParams>,
) -> Result<Json<Value>, ApiError> {
    state.tournament(&id)?;
    let client_revision = params.revision.unwrap_or(0);

    // Check up to 50 times (5 seconds) for updates
    for _ in 0..50 {
        if let Some(body) = state.read(|store| {
            (store.revision() != client_revision).then(|| {
                json!({
                    "reload": true,
                    "revision": store.revision(),
                    "participants": store.list_participants(&id),
                    "matches": store.list_matches(&id),
                    "standings": store.standings(&id),
                })
            })
        }) {
            return Ok(Json(body));
        }
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    }

    Ok(Json(json!({
        "reload": false,
        "revision": state.revision(),
    })))
}
