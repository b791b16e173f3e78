//! API error responses

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Map, Value};

use scoreboard_core::{FieldError, FormField, StoreError};

/// Error returned by a route handler
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("invalid score submission")]
    Form(Vec<(FormField, FieldError)>),

    #[error("tournament not found: {0}")]
    TournamentNotFound(String),

    #[error("invalid request body: {}", .0.body_text())]
    Body(#[from] JsonRejection),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Store(
                StoreError::DuplicateParticipant { .. } | StoreError::DuplicatePair { .. },
            ) => StatusCode::CONFLICT,
            ApiError::Store(StoreError::MatchNotFound(_)) | ApiError::TournamentNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            ApiError::Store(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Form(errors) if has_error(errors, &FieldError::AlreadyPlayed) => {
                StatusCode::CONFLICT
            }
            ApiError::Form(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Body(rejection) => rejection.status(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Store(err) => err.kind(),
            ApiError::TournamentNotFound(_) => "tournament_not_found",
            ApiError::Form(errors) if has_error(errors, &FieldError::AlreadyPlayed) => {
                "duplicate_pair"
            }
            ApiError::Form(errors) if has_error(errors, &FieldError::SameParticipant) => {
                "self_match"
            }
            ApiError::Form(errors) if has_error(errors, &FieldError::DrawNotAllowed) => {
                "draw_not_allowed"
            }
            ApiError::Form(_) => "invalid_form",
            ApiError::Body(_) => "invalid_body",
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::Form(errors) => errors
                .first()
                .map(|(_, err)| err.to_string())
                .unwrap_or_else(|| self.to_string()),
            ApiError::Body(rejection) => rejection.body_text(),
            _ => self.to_string(),
        }
    }
}

fn has_error(errors: &[(FormField, FieldError)], wanted: &FieldError) -> bool {
    errors.iter().any(|(_, err)| err == wanted)
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = json!({
            "error": self.kind(),
            "message": self.message(),
        });

        if let ApiError::Form(errors) = &self {
            let mut fields = Map::new();
            for (field, err) in errors {
                fields
                    .entry(field.as_str())
                    .or_insert_with(|| Value::String(err.to_string()));
            }
            body["fields"] = Value::Object(fields);
        }

        tracing::debug!(status = %self.status(), kind = self.kind(), "request rejected");
        (self.status(), Json(body)).into_response()
    }
}
