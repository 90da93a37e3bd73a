use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::NaiveTime;
use std::sync::Arc;

use crate::api::models::AvailabilityBody;
use crate::database;
use crate::domain::{AvailabilityKind, AvailabilityRule, BusinessError, RefereeId};

use super::AppState;

/// Upserts the referee's one availability rule. Window bounds are validated
/// here, at the boundary: a SPECIFIC_WINDOW rule needs both bounds with
/// start strictly before end.
pub async fn put_availability(
    State(state): State<Arc<AppState>>,
    Path(referee_id): Path<RefereeId>,
    Json(body): Json<AvailabilityBody>,
) -> impl IntoResponse {
    let kind = match AvailabilityKind::parse(&body.kind) {
        Ok(kind) => kind,
        Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    };

    let rule = match build_rule(referee_id, kind, body.start.as_deref(), body.end.as_deref()) {
        Ok(rule) => rule,
        Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    };

    let mut conn = match database::get_connection(&state.pool) {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    match database::referees::find_by_id(&mut conn, referee_id) {
        Ok(Some(_)) => {}
        Ok(None) => return (StatusCode::NOT_FOUND, "Referee not found").into_response(),
        Err(e) => {
            return (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {e}"))
                .into_response();
        }
    }

    match database::availability::upsert_rule(&mut conn, &rule) {
        Ok(saved) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "refereeId": saved.referee_id,
                "kind": saved.kind.as_str(),
                "start": saved.window_start.map(|t| t.format("%H:%M").to_string()),
                "end": saved.window_end.map(|t| t.format("%H:%M").to_string()),
            })),
        )
            .into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {e}")).into_response(),
    }
}

fn build_rule(
    referee_id: RefereeId,
    kind: AvailabilityKind,
    start: Option<&str>,
    end: Option<&str>,
) -> Result<AvailabilityRule, BusinessError> {
    if kind != AvailabilityKind::SpecificWindow {
        return Ok(AvailabilityRule {
            referee_id,
            kind,
            window_start: None,
            window_end: None,
        });
    }

    let (Some(start), Some(end)) = (start, end) else {
        return Err(BusinessError::InvalidWindow);
    };
    let start = parse_time(start)?;
    let end = parse_time(end)?;
    if start >= end {
        return Err(BusinessError::InvalidWindow);
    }

    Ok(AvailabilityRule {
        referee_id,
        kind,
        window_start: Some(start),
        window_end: Some(end),
    })
}

fn parse_time(s: &str) -> Result<NaiveTime, BusinessError> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|_| BusinessError::InvalidWindow)
}
