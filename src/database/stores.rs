use anyhow::Result;
use chrono::NaiveDateTime;

use crate::domain::{
    Assignment, AssignmentId, AssignmentStatus, AvailabilityRule, CompletedAssignmentRow, Match,
    MatchId, Money, NewAssignment, Rank, Referee, RefereeId,
};
use crate::engine::stores::{
    AssignmentStore, AvailabilityStore, MatchStore, RefereeStore, TariffStore,
};

use super::connection::{DbConn, DbPool, get_connection};
use super::{assignments, availability, matches, referees, tariffs};

/// Production store bundle: the engine seams backed by the sqlite pool.
#[derive(Clone)]
pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<DbConn> {
        get_connection(&self.pool)
    }
}

impl MatchStore for SqliteStore {
    fn get_active_by_id(&self, id: MatchId) -> Result<Option<Match>> {
        matches::find_active_by_id(&mut self.conn()?, id)
    }

    fn set_inactive(&self, id: MatchId) -> Result<()> {
        matches::set_inactive(&mut self.conn()?, id)
    }
}

impl RefereeStore for SqliteStore {
    fn get_referee(&self, id: RefereeId) -> Result<Option<Referee>> {
        referees::find_by_id(&mut self.conn()?, id)
    }
}

impl AssignmentStore for SqliteStore {
    fn exists_active(&self, match_id: MatchId, referee_id: RefereeId) -> Result<bool> {
        assignments::exists_active(&mut self.conn()?, match_id, referee_id)
    }

    fn exists_active_role(&self, match_id: MatchId, role: &str) -> Result<bool> {
        assignments::exists_active_role(&mut self.conn()?, match_id, role)
    }

    fn exists_active_on_day(
        &self,
        referee_id: RefereeId,
        day_start: NaiveDateTime,
        day_end: NaiveDateTime,
    ) -> Result<bool> {
        assignments::exists_active_on_day(&mut self.conn()?, referee_id, day_start, day_end)
    }

    fn insert(&self, new: NewAssignment) -> Result<Assignment> {
        assignments::insert_assignment(&mut self.conn()?, &new)
    }

    fn get_assignment(&self, id: AssignmentId) -> Result<Option<Assignment>> {
        assignments::find_by_id(&mut self.conn()?, id)
    }

    fn set_status(
        &self,
        id: AssignmentId,
        status: AssignmentStatus,
        responded_at: Option<NaiveDateTime>,
    ) -> Result<Assignment> {
        assignments::update_status(&mut self.conn()?, id, status, responded_at)
    }

    fn find_completed_in_range(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<CompletedAssignmentRow>> {
        assignments::find_completed_in_range(&mut self.conn()?, start, end)
    }

    fn find_completed_for_referee_in_range(
        &self,
        referee_id: RefereeId,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<CompletedAssignmentRow>> {
        assignments::find_completed_for_referee_in_range(&mut self.conn()?, referee_id, start, end)
    }
}

impl AvailabilityStore for SqliteStore {
    fn get_by_referee(&self, referee_id: RefereeId) -> Result<Option<AvailabilityRule>> {
        availability::find_by_referee(&mut self.conn()?, referee_id)
    }
}

impl TariffStore for SqliteStore {
    fn get_active_by_rank(&self, rank: Rank) -> Result<Option<Money>> {
        tariffs::find_active_amount(&mut self.conn()?, rank)
    }
}
