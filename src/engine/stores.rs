use anyhow::Result;
use chrono::NaiveDateTime;

use crate::domain::{
    Assignment, AssignmentId, AssignmentStatus, AvailabilityRule, CompletedAssignmentRow, Match,
    MatchId, Money, NewAssignment, Rank, Referee, RefereeId,
};

/// Backing-store seams for the engine. Production uses the sqlite adapters
/// in `crate::database`; tests use the in-memory store in `super::testing`.
/// Store failures are infrastructure errors, never business outcomes.
pub trait MatchStore {
    /// Returns the match only if it exists and is not soft-deleted.
    fn get_active_by_id(&self, id: MatchId) -> Result<Option<Match>>;

    /// Soft delete. Historical assignments stay queryable; conflict checks
    /// stop seeing the match because this method removes it from the active
    /// set.
    fn set_inactive(&self, id: MatchId) -> Result<()>;
}

pub trait RefereeStore {
    fn get_referee(&self, id: RefereeId) -> Result<Option<Referee>>;
}

pub trait AssignmentStore {
    fn exists_active(&self, match_id: MatchId, referee_id: RefereeId) -> Result<bool>;

    fn exists_active_role(&self, match_id: MatchId, role: &str) -> Result<bool>;

    /// Any active assignment for this referee whose match falls in
    /// `[day_start, day_end)`.
    fn exists_active_on_day(
        &self,
        referee_id: RefereeId,
        day_start: NaiveDateTime,
        day_end: NaiveDateTime,
    ) -> Result<bool>;

    fn insert(&self, new: NewAssignment) -> Result<Assignment>;

    fn get_assignment(&self, id: AssignmentId) -> Result<Option<Assignment>>;

    fn set_status(
        &self,
        id: AssignmentId,
        status: AssignmentStatus,
        responded_at: Option<NaiveDateTime>,
    ) -> Result<Assignment>;

    /// Completed, active assignments whose match datetime lies in
    /// `[start, end]` inclusive, joined with match and referee data.
    /// Ordering must be stable across calls on unchanged data.
    fn find_completed_in_range(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<CompletedAssignmentRow>>;

    fn find_completed_for_referee_in_range(
        &self,
        referee_id: RefereeId,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<CompletedAssignmentRow>>;
}

pub trait AvailabilityStore {
    fn get_by_referee(&self, referee_id: RefereeId) -> Result<Option<AvailabilityRule>>;
}

pub trait TariffStore {
    /// The active tariff amount for a rank, if one is configured.
    fn get_active_by_rank(&self, rank: Rank) -> Result<Option<Money>>;
}

/// Bundle trait: anything that implements all five store seams.
pub trait Stores:
    MatchStore + RefereeStore + AssignmentStore + AvailabilityStore + TariffStore + Send + Sync
{
}

impl<T> Stores for T where
    T: MatchStore + RefereeStore + AssignmentStore + AvailabilityStore + TariffStore + Send + Sync
{
}

/// Best-effort sink informing the assigning administrator that a referee
/// answered. Errors are logged by the engine and never surfaced to the
/// caller of `respond`.
pub trait NotificationSink: Send + Sync {
    fn assignment_responded(&self, admin: Option<&str>, assignment: &Assignment) -> Result<()>;
}
