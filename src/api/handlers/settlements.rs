use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::{NaiveDate, NaiveDateTime};
use log::error;
use std::sync::Arc;

use crate::api::models::PeriodParams;
use crate::domain::{BusinessError, EngineError, RefereeId};
use crate::engine::settlement;

use super::{AppState, error_status};

pub async fn get_settlement(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PeriodParams>,
) -> impl IntoResponse {
    let (start, end) = match parse_period(&params) {
        Ok(range) => range,
        Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    };

    match settlement::generate(state.engine.stores(), start, end) {
        Ok(report) => Json(report).into_response(),
        Err(e) => {
            if let EngineError::Store(ref inner) = e {
                error!("Settlement query failed: {inner:#}");
            }
            (error_status(&e), e.to_string()).into_response()
        }
    }
}

pub async fn get_referee_settlement(
    State(state): State<Arc<AppState>>,
    Path(referee_id): Path<RefereeId>,
    Query(params): Query<PeriodParams>,
) -> impl IntoResponse {
    let (start, end) = match parse_period(&params) {
        Ok(range) => range,
        Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    };

    match settlement::generate_for_referee(state.engine.stores(), referee_id, start, end) {
        // JSON null: a referee with nothing to settle is not a 404.
        Ok(report) => Json(report).into_response(),
        Err(e) => {
            if let EngineError::Store(ref inner) = e {
                error!("Settlement query failed: {inner:#}");
            }
            (error_status(&e), e.to_string()).into_response()
        }
    }
}

/// Expands date params to an inclusive datetime range covering both whole
/// days, and enforces ordering.
pub fn parse_period(params: &PeriodParams) -> Result<(NaiveDateTime, NaiveDateTime), BusinessError> {
    let start = parse_date(&params.start)?
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| BusinessError::InvalidDate(params.start.clone()))?;
    let end = parse_date(&params.end)?
        .and_hms_opt(23, 59, 59)
        .ok_or_else(|| BusinessError::InvalidDate(params.end.clone()))?;

    settlement::validate_period(start, end)?;
    Ok((start, end))
}

fn parse_date(s: &str) -> Result<NaiveDate, BusinessError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| BusinessError::InvalidDate(s.to_string()))
}
