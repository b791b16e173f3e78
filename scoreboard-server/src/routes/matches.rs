//! Match API endpoints
//!
//! Submissions go through the score form rules first, so a rematch or a
//! draw in a no-draw tournament comes back as a field error. The store
//! repeats the pair check on write.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use scoreboard_core::{
    available_opponents as opponents_of, FieldError, FormField, Match, Participant, ScoreForm,
    StoreError,
};

use crate::error::ApiError;
use crate::state::ServerState;

/// List a tournament's matches in recording order
pub async fn list_matches(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Match>>, ApiError> {
    state.tournament(&id)?;
    Ok(Json(state.read(|store| store.list_matches(&id))))
}

/// Score submission
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMatchRequest {
    pub home_participant_id: String,
    pub away_participant_id: String,
    pub home_participant_score: u32,
    pub away_participant_score: u32,
}

/// Record a match result
pub async fn add_match(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
    body: Result<Json<AddMatchRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Match>), ApiError> {
    let tournament = state.tournament(&id)?;
    let Json(req) = body?;

    let recorded = state.write(|store| {
        let unknown: Vec<(FormField, FieldError)> = [
            (FormField::Home, &req.home_participant_id),
            (FormField::Away, &req.away_participant_id),
        ]
        .into_iter()
        .filter(|(_, pid)| !store.get_participant(pid).is_some_and(|p| p.tournament_id == id))
        .map(|(field, _)| (field, FieldError::UnknownParticipant(field)))
        .collect();
        if !unknown.is_empty() {
            return Err(ApiError::Form(unknown));
        }

        let played = store.played_pairs(&id);
        let mut form = ScoreForm::for_tournament(tournament);
        form.select_home(Some(&req.home_participant_id), &played);
        form.select_away(Some(&req.away_participant_id), &played)
            .map_err(|e| ApiError::Form(vec![(FormField::Away, e)]))?;
        form.set_scores(Some(req.home_participant_score), Some(req.away_participant_score));

        let new_match = form.submit(&played).map_err(ApiError::Form)?;
        Ok(store.add_match(new_match)?)
    })?;

    Ok((StatusCode::CREATED, Json(recorded)))
}

#[derive(Serialize)]
pub struct RemovedResponse {
    pub removed: usize,
}

/// Remove every match of a tournament
pub async fn remove_tournament_matches(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> Result<Json<RemovedResponse>, ApiError> {
    state.tournament(&id)?;
    let removed = state.write(|store| Ok(store.remove_matches_by_tournament_id(&id)))?;
    Ok(Json(RemovedResponse { removed }))
}

/// Opponent query params
#[derive(Deserialize)]
pub struct OpponentParams {
    pub home: Option<String>,
}

/// Participants still selectable as the away side against `home`
pub async fn available_opponents(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
    Query(params): Query<OpponentParams>,
) -> Result<Json<Vec<Participant>>, ApiError> {
    state.tournament(&id)?;
    let opponents: Vec<Participant> = state.read(|store| {
        let roster = store.list_participants(&id);
        let played = store.played_pairs(&id);
        opponents_of(&roster, &played, params.home.as_deref())
            .into_iter()
            .cloned()
            .collect()
    });
    Ok(Json(opponents))
}

/// Score correction
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMatchRequest {
    pub home_participant_score: u32,
    pub away_participant_score: u32,
}

/// Replace the scores of a recorded match. The tournament's draw rule still applies.
pub async fn update_match(
    State(state): State<Arc<ServerState>>,
    Path(match_id): Path<String>,
    body: Result<Json<UpdateMatchRequest>, JsonRejection>,
) -> Result<Json<Match>, ApiError> {
    let Json(req) = body?;
    let updated = state.write(|store| {
        let recorded = store
            .get_match(&match_id)
            .ok_or_else(|| StoreError::MatchNotFound(match_id.clone()))?;
        let draw_allowed = state
            .tournament(&recorded.tournament_id)
            .map_or(true, |t| t.draw_allowed);
        if !draw_allowed && req.home_participant_score == req.away_participant_score {
            return Err(ApiError::Form(vec![(FormField::AwayScore, FieldError::DrawNotAllowed)]));
        }

        Ok(store.update_match(
            &match_id,
            req.home_participant_score,
            req.away_participant_score,
        )?)
    })?;
    Ok(Json(updated))
}

/// Remove a single match
pub async fn remove_match(
    State(state): State<Arc<ServerState>>,
    Path(match_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.write(|store| Ok(store.remove_match(&match_id)?))?;
    Ok(StatusCode::NO_CONTENT)
}
