//! Participant API endpoints

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use scoreboard_core::Participant;

use crate::error::ApiError;
use crate::state::ServerState;

/// List a tournament's roster in registration order
pub async fn list_participants(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Participant>>, ApiError> {
    state.tournament(&id)?;
    Ok(Json(state.read(|store| store.list_participants(&id))))
}

/// Add participant request
#[derive(Deserialize)]
pub struct AddParticipantRequest {
    pub name: String,
}

/// Register a participant
pub async fn add_participant(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
    body: Result<Json<AddParticipantRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Participant>), ApiError> {
    state.tournament(&id)?;
    let Json(req) = body?;
    let participant = state.write(|store| Ok(store.add_participant(&req.name, &id)?))?;
    Ok((StatusCode::CREATED, Json(participant)))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearResponse {
    pub removed_participants: usize,
    pub removed_matches: usize,
}

/// Clear a tournament: roster and matches
pub async fn clear_tournament(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> Result<Json<ClearResponse>, ApiError> {
    state.tournament(&id)?;
    let (removed_participants, removed_matches) =
        state.write(|store| Ok(store.clear_tournament(&id)))?;
    Ok(Json(ClearResponse {
        removed_participants,
        removed_matches,
    }))
}
