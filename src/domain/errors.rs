use chrono::NaiveDateTime;
use thiserror::Error;

use super::models::{AssignmentId, AssignmentStatus, MatchId, Rank, RefereeId};

/// Why the conflict checker refused an assignment. One variant per check,
/// in the order the checks run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConflictReason {
    #[error("match is cancelled")]
    MatchCancelled,
    #[error("referee is inactive")]
    RefereeInactive,
    #[error("referee is already assigned to this match")]
    RefereeAlreadyAssigned,
    #[error("role is already filled on this match")]
    RoleTaken,
    #[error("referee already has an assignment on that day")]
    SameDayAssignment,
}

/// Expected, recoverable business failures. The boundary layer translates
/// these into status codes; they are never logged-and-swallowed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BusinessError {
    #[error("match {0} not found")]
    MatchNotFound(MatchId),
    #[error("referee {0} not found")]
    RefereeNotFound(RefereeId),
    #[error("assignment {0} not found")]
    AssignmentNotFound(AssignmentId),
    #[error("assignment conflict: {0}")]
    Conflict(#[from] ConflictReason),
    #[error("referee {referee_id} is not available at {at}")]
    RefereeUnavailable {
        referee_id: RefereeId,
        at: NaiveDateTime,
    },
    #[error("no active tariff configured for rank {}", .0.as_str())]
    RankNotConfigured(Rank),
    #[error("referee does not own this assignment")]
    Forbidden,
    #[error("assignment was already responded to (status {})", .0.as_str())]
    AlreadyResponded(AssignmentStatus),
    #[error("cannot complete an assignment in status {}", .0.as_str())]
    InvalidTransition(AssignmentStatus),
    #[error("period start {start} is after period end {end}")]
    InvalidRange {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
    #[error("availability window start must be before its end")]
    InvalidWindow,
    #[error("invalid date: {0}")]
    InvalidDate(String),
    #[error("unknown rank: {0}")]
    UnknownRank(String),
    #[error("unknown status value: {0}")]
    UnknownStatus(String),
}

/// Engine results separate business outcomes from store failures so the
/// boundary can map the former to 4xx and let the latter stay fatal.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Business(#[from] BusinessError),
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl From<ConflictReason> for EngineError {
    fn from(reason: ConflictReason) -> Self {
        EngineError::Business(BusinessError::Conflict(reason))
    }
}
