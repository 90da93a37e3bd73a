use axum::http::StatusCode;

use crate::database::{DbPool, SqliteStore};
use crate::domain::{BusinessError, EngineError};
use crate::engine::AssignmentEngine;

pub mod admin;
pub mod assignments;
pub mod availability;
pub mod settlements;

pub struct AppState {
    pub engine: AssignmentEngine<SqliteStore>,
    pub pool: DbPool,
}

/// Business outcomes map to 4xx; store faults stay 500 and are logged
/// where they surface.
pub fn error_status(err: &EngineError) -> StatusCode {
    match err {
        EngineError::Business(e) => business_status(e),
        EngineError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn business_status(err: &BusinessError) -> StatusCode {
    match err {
        BusinessError::MatchNotFound(_)
        | BusinessError::RefereeNotFound(_)
        | BusinessError::AssignmentNotFound(_) => StatusCode::NOT_FOUND,
        BusinessError::Forbidden => StatusCode::FORBIDDEN,
        BusinessError::Conflict(_)
        | BusinessError::AlreadyResponded(_)
        | BusinessError::InvalidTransition(_) => StatusCode::CONFLICT,
        BusinessError::RefereeUnavailable { .. } | BusinessError::RankNotConfigured(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        BusinessError::InvalidRange { .. }
        | BusinessError::InvalidWindow
        | BusinessError::InvalidDate(_)
        | BusinessError::UnknownRank(_)
        | BusinessError::UnknownStatus(_) => StatusCode::BAD_REQUEST,
    }
}
