//! Standings endpoint

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use scoreboard_core::StandingsRow;

use crate::error::ApiError;
use crate::state::ServerState;

/// Current standings, best first
pub async fn get_standings(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<StandingsRow>>, ApiError> {
    state.tournament(&id)?;
    Ok(Json(state.read(|store| store.standings(&id))))
}
