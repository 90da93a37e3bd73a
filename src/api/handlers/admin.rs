use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::NaiveDateTime;
use std::sync::Arc;

use crate::api::models::{MatchStatusBody, NewMatchBody, NewRefereeBody, TariffBody};
use crate::database;
use crate::domain::{BusinessError, MatchId, MatchStatus, Rank, RefereeId};

use super::AppState;

pub async fn create_referee(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewRefereeBody>,
) -> impl IntoResponse {
    let rank = match Rank::parse(&body.rank) {
        Ok(rank) => rank,
        Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    };

    let mut conn = match database::get_connection(&state.pool) {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    match database::referees::insert_referee(&mut conn, &body.name, rank) {
        Ok(referee) => (StatusCode::CREATED, Json(referee)).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {e}")).into_response(),
    }
}

pub async fn deactivate_referee(
    State(state): State<Arc<AppState>>,
    Path(referee_id): Path<RefereeId>,
) -> impl IntoResponse {
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

    match database::referees::set_active(&mut conn, referee_id, false) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {e}")).into_response(),
    }
}

pub async fn create_match(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewMatchBody>,
) -> impl IntoResponse {
    let scheduled_at = match parse_datetime(&body.scheduled_at) {
        Ok(dt) => dt,
        Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    };

    let mut conn = match database::get_connection(&state.pool) {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    match database::matches::insert_match(
        &mut conn,
        body.tournament_name.as_deref(),
        &body.venue,
        &body.home_team,
        &body.away_team,
        scheduled_at,
    ) {
        Ok(game) => (StatusCode::CREATED, Json(game)).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {e}")).into_response(),
    }
}

pub async fn update_match_status(
    State(state): State<Arc<AppState>>,
    Path(match_id): Path<MatchId>,
    Json(body): Json<MatchStatusBody>,
) -> impl IntoResponse {
    let status = match MatchStatus::parse(&body.status) {
        Ok(status) => status,
        Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    };

    let mut conn = match database::get_connection(&state.pool) {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    match database::matches::find_active_by_id(&mut conn, match_id) {
        Ok(Some(_)) => {}
        Ok(None) => return (StatusCode::NOT_FOUND, "Match not found").into_response(),
        Err(e) => {
            return (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {e}"))
                .into_response();
        }
    }

    match database::matches::set_status(&mut conn, match_id, status) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {e}")).into_response(),
    }
}

pub async fn put_tariff(
    State(state): State<Arc<AppState>>,
    Json(body): Json<TariffBody>,
) -> impl IntoResponse {
    let rank = match Rank::parse(&body.rank) {
        Ok(rank) => rank,
        Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    };

    let mut conn = match database::get_connection(&state.pool) {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    match database::tariffs::set_tariff(&mut conn, rank, body.amount) {
        Ok(tariff) => Json(tariff).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {e}")).into_response(),
    }
}

fn parse_datetime(s: &str) -> Result<NaiveDateTime, BusinessError> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|_| BusinessError::InvalidDate(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_both_datetime_formats() {
        assert!(parse_datetime("2025-03-01 18:00").is_ok());
        assert!(parse_datetime("2025-03-01T18:00:00").is_ok());
        assert_eq!(
            parse_datetime("01/03/2025").unwrap_err(),
            BusinessError::InvalidDate("01/03/2025".to_string())
        );
    }
}
