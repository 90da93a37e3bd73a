use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::errors::BusinessError;

/// Monetary amounts are whole currency units (no decimals in the tariff table).
pub type Money = i64;

pub type RefereeId = i64;
pub type MatchId = i64;
pub type AssignmentId = i64;

/// Referee certification tier. Determines the pay tariff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Rank {
    Fiba,
    Primera,
    Segunda,
    Aspirante,
}

impl Rank {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rank::Fiba => "FIBA",
            Rank::Primera => "PRIMERA",
            Rank::Segunda => "SEGUNDA",
            Rank::Aspirante => "ASPIRANTE",
        }
    }

    pub fn parse(s: &str) -> Result<Self, BusinessError> {
        match s {
            "FIBA" => Ok(Rank::Fiba),
            "PRIMERA" => Ok(Rank::Primera),
            "SEGUNDA" => Ok(Rank::Segunda),
            "ASPIRANTE" => Ok(Rank::Aspirante),
            _ => Err(BusinessError::UnknownRank(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Referee {
    pub id: RefereeId,
    pub name: String,
    pub rank: Rank,
    pub active: bool,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    Scheduled,
    InProgress,
    Finished,
    Cancelled,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Scheduled => "SCHEDULED",
            MatchStatus::InProgress => "IN_PROGRESS",
            MatchStatus::Finished => "FINISHED",
            MatchStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn parse(s: &str) -> Result<Self, BusinessError> {
        match s {
            "SCHEDULED" => Ok(MatchStatus::Scheduled),
            "IN_PROGRESS" => Ok(MatchStatus::InProgress),
            "FINISHED" => Ok(MatchStatus::Finished),
            "CANCELLED" => Ok(MatchStatus::Cancelled),
            _ => Err(BusinessError::UnknownStatus(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: MatchId,
    pub tournament_name: Option<String>,
    pub venue: String,
    pub home_team: String,
    pub away_team: String,
    pub scheduled_at: NaiveDateTime,
    pub status: MatchStatus,
    pub active: bool,
    pub created_at: Option<NaiveDateTime>,
}

impl Match {
    /// "Home vs Away" label used on settlement lines.
    pub fn label(&self) -> String {
        format!("{} vs {}", self.home_team, self.away_team)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssignmentStatus {
    Pending,
    Accepted,
    Rejected,
    Completed,
}

impl AssignmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentStatus::Pending => "PENDING",
            AssignmentStatus::Accepted => "ACCEPTED",
            AssignmentStatus::Rejected => "REJECTED",
            AssignmentStatus::Completed => "COMPLETED",
        }
    }

    pub fn parse(s: &str) -> Result<Self, BusinessError> {
        match s {
            "PENDING" => Ok(AssignmentStatus::Pending),
            "ACCEPTED" => Ok(AssignmentStatus::Accepted),
            "REJECTED" => Ok(AssignmentStatus::Rejected),
            "COMPLETED" => Ok(AssignmentStatus::Completed),
            _ => Err(BusinessError::UnknownStatus(s.to_string())),
        }
    }

    /// Rejected and Completed accept no further responses or transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AssignmentStatus::Rejected | AssignmentStatus::Completed
        )
    }
}

/// A referee's accept/reject answer to a pending assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Accept,
    Reject,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: AssignmentId,
    pub match_id: MatchId,
    pub referee_id: RefereeId,
    pub role: String,
    pub status: AssignmentStatus,
    /// Locked at creation from the referee's rank tariff. Later tariff or
    /// rank changes never touch it.
    pub amount: Money,
    pub notes: Option<String>,
    /// Administrator who offered the assignment; notification target.
    pub assigned_by: Option<String>,
    pub active: bool,
    pub created_at: NaiveDateTime,
    pub responded_at: Option<NaiveDateTime>,
}

/// Everything needed to persist a new assignment. The store assigns the id.
#[derive(Debug, Clone)]
pub struct NewAssignment {
    pub match_id: MatchId,
    pub referee_id: RefereeId,
    pub role: String,
    pub amount: Money,
    pub notes: Option<String>,
    pub assigned_by: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AvailabilityKind {
    Always,
    Never,
    SpecificWindow,
}

impl AvailabilityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AvailabilityKind::Always => "ALWAYS",
            AvailabilityKind::Never => "NEVER",
            AvailabilityKind::SpecificWindow => "SPECIFIC_WINDOW",
        }
    }

    pub fn parse(s: &str) -> Result<Self, BusinessError> {
        match s {
            "ALWAYS" => Ok(AvailabilityKind::Always),
            "NEVER" => Ok(AvailabilityKind::Never),
            "SPECIFIC_WINDOW" => Ok(AvailabilityKind::SpecificWindow),
            _ => Err(BusinessError::UnknownStatus(s.to_string())),
        }
    }
}

/// One rule per referee. Absence of a rule means always available.
#[derive(Debug, Clone)]
pub struct AvailabilityRule {
    pub referee_id: RefereeId,
    pub kind: AvailabilityKind,
    pub window_start: Option<NaiveTime>,
    pub window_end: Option<NaiveTime>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tariff {
    pub id: i64,
    pub rank: Rank,
    pub amount: Money,
    pub active: bool,
    pub created_at: Option<NaiveDateTime>,
}

/// Row shape returned by the completed-assignment queries: one assignment
/// joined with its match and referee, everything a settlement line needs.
#[derive(Debug, Clone)]
pub struct CompletedAssignmentRow {
    pub assignment_id: AssignmentId,
    pub referee_id: RefereeId,
    pub referee_name: String,
    pub rank: Rank,
    pub match_id: MatchId,
    pub match_label: String,
    pub tournament_name: Option<String>,
    pub match_date: NaiveDateTime,
    pub role: String,
    pub amount: Money,
    pub status: AssignmentStatus,
}

// --- Settlement report (derived, never persisted) ---

pub const NO_TOURNAMENT_LABEL: &str = "(no tournament)";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementLine {
    pub assignment_id: AssignmentId,
    pub match_id: MatchId,
    pub match_label: String,
    pub tournament_name: String,
    pub match_date: NaiveDateTime,
    pub role: String,
    pub amount: Money,
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefereeSettlement {
    pub referee_id: RefereeId,
    pub referee_name: String,
    pub rank: Rank,
    pub lines: Vec<SettlementLine>,
    pub total: Money,
    pub assignment_count: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementReport {
    pub period_start: NaiveDateTime,
    pub period_end: NaiveDateTime,
    pub referees: Vec<RefereeSettlement>,
    pub grand_total: Money,
    /// Distinct matches across all selected assignments, not line-item count.
    pub total_matches: usize,
    pub total_assignments: usize,
}
