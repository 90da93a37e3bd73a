use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::error;
use std::sync::Arc;

use crate::api::models::{AssignBody, RespondBody};
use crate::domain::{AssignmentId, EngineError, MatchId};
use crate::engine::AssignRequest;

use super::{AppState, error_status};

fn engine_error_response(err: EngineError) -> axum::response::Response {
    if let EngineError::Store(ref e) = err {
        error!("Store failure: {e:#}");
    }
    (error_status(&err), err.to_string()).into_response()
}

pub async fn create_assignment(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AssignBody>,
) -> impl IntoResponse {
    let request = AssignRequest {
        match_id: body.match_id,
        referee_id: body.referee_id,
        role: body.role,
        notes: body.notes,
        assigned_by: body.assigned_by,
    };

    match state.engine.assign(request) {
        Ok(assignment) => (StatusCode::CREATED, Json(assignment)).into_response(),
        Err(e) => engine_error_response(e),
    }
}

pub async fn respond_assignment(
    State(state): State<Arc<AppState>>,
    Path(assignment_id): Path<AssignmentId>,
    Json(body): Json<RespondBody>,
) -> impl IntoResponse {
    match state
        .engine
        .respond(assignment_id, body.referee_id, body.decision)
    {
        Ok(assignment) => Json(assignment).into_response(),
        Err(e) => engine_error_response(e),
    }
}

pub async fn complete_assignment(
    State(state): State<Arc<AppState>>,
    Path(assignment_id): Path<AssignmentId>,
) -> impl IntoResponse {
    match state.engine.mark_completed(assignment_id) {
        Ok(assignment) => Json(assignment).into_response(),
        Err(e) => engine_error_response(e),
    }
}

pub async fn delete_match(
    State(state): State<Arc<AppState>>,
    Path(match_id): Path<MatchId>,
) -> impl IntoResponse {
    match state.engine.soft_delete_match(match_id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => engine_error_response(e),
    }
}
