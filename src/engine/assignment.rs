use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use log::{info, warn};

use crate::domain::{
    Assignment, AssignmentId, AssignmentStatus, BusinessError, Decision, EngineError, MatchId,
    NewAssignment, RefereeId,
};

use super::availability::is_available;
use super::conflicts::check_assignable;
use super::stores::{NotificationSink, Stores};

#[derive(Debug, Clone)]
pub struct AssignRequest {
    pub match_id: MatchId,
    pub referee_id: RefereeId,
    pub role: String,
    pub notes: Option<String>,
    /// Administrator offering the assignment; later notification target.
    pub assigned_by: Option<String>,
}

/// Lazily-populated table of per-id mutexes. The inner `Arc` lets a caller
/// hold an entry's guard without keeping the table locked.
#[derive(Default)]
struct LockTable {
    entries: Mutex<HashMap<i64, Arc<Mutex<()>>>>,
}

impl LockTable {
    fn entry(&self, id: i64) -> Arc<Mutex<()>> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.entry(id).or_default().clone()
    }
}

/// Orchestrates conflict checking, availability and tariff pricing into a
/// validated assignment, and owns the assignment lifecycle. Stateless apart
/// from the lock tables; the backing store is the source of truth.
pub struct AssignmentEngine<S> {
    stores: Arc<S>,
    notifier: Arc<dyn NotificationSink>,
    match_locks: LockTable,
    referee_locks: LockTable,
    assignment_locks: LockTable,
}

impl<S: Stores> AssignmentEngine<S> {
    pub fn new(stores: Arc<S>, notifier: Arc<dyn NotificationSink>) -> Self {
        Self {
            stores,
            notifier,
            match_locks: LockTable::default(),
            referee_locks: LockTable::default(),
            assignment_locks: LockTable::default(),
        }
    }

    pub fn stores(&self) -> &S {
        &self.stores
    }

    /// Creates a pending assignment with the amount locked in from the
    /// referee's current rank tariff.
    ///
    /// The conflict checks plus the insert form one read-modify-write unit,
    /// serialized with a per-match lock and a per-referee lock (match first,
    /// always in that order) so concurrent requests cannot double-book a
    /// role or a referee's day.
    pub fn assign(&self, req: AssignRequest) -> Result<Assignment, EngineError> {
        let match_lock = self.match_locks.entry(req.match_id);
        let _match_guard = match_lock.lock().unwrap_or_else(|e| e.into_inner());
        let referee_lock = self.referee_locks.entry(req.referee_id);
        let _referee_guard = referee_lock.lock().unwrap_or_else(|e| e.into_inner());

        let target = self
            .stores
            .get_active_by_id(req.match_id)?
            .ok_or(BusinessError::MatchNotFound(req.match_id))?;
        let referee = self
            .stores
            .get_referee(req.referee_id)?
            .ok_or(BusinessError::RefereeNotFound(req.referee_id))?;

        check_assignable(self.stores.as_ref(), &target, &referee, &req.role)?;

        let rule = self.stores.get_by_referee(referee.id)?;
        if !is_available(rule.as_ref(), target.scheduled_at) {
            return Err(BusinessError::RefereeUnavailable {
                referee_id: referee.id,
                at: target.scheduled_at,
            }
            .into());
        }

        let amount = self
            .stores
            .get_active_by_rank(referee.rank)?
            .ok_or(BusinessError::RankNotConfigured(referee.rank))?;

        let assignment = self.stores.insert(NewAssignment {
            match_id: target.id,
            referee_id: referee.id,
            role: req.role,
            amount,
            notes: req.notes,
            assigned_by: req.assigned_by,
            created_at: Utc::now().naive_utc(),
        })?;

        info!(
            "Assigned referee {} to match {} as {} for {}",
            assignment.referee_id, assignment.match_id, assignment.role, assignment.amount
        );
        Ok(assignment)
    }

    /// Records the referee's accept/reject answer, stamping the response
    /// timestamp. Only the owning referee may respond, and only once.
    /// The assigning administrator is notified best-effort afterwards.
    ///
    /// The status check and the write are one read-modify-write unit,
    /// serialized by a per-assignment lock shared with `mark_completed`.
    pub fn respond(
        &self,
        assignment_id: AssignmentId,
        referee_id: RefereeId,
        decision: Decision,
    ) -> Result<Assignment, EngineError> {
        let assignment_lock = self.assignment_locks.entry(assignment_id);
        let _guard = assignment_lock.lock().unwrap_or_else(|e| e.into_inner());

        let assignment = self
            .stores
            .get_assignment(assignment_id)?
            .ok_or(BusinessError::AssignmentNotFound(assignment_id))?;

        if assignment.referee_id != referee_id {
            return Err(BusinessError::Forbidden.into());
        }
        if assignment.status != AssignmentStatus::Pending {
            return Err(BusinessError::AlreadyResponded(assignment.status).into());
        }

        let status = match decision {
            Decision::Accept => AssignmentStatus::Accepted,
            Decision::Reject => AssignmentStatus::Rejected,
        };
        let updated =
            self.stores
                .set_status(assignment_id, status, Some(Utc::now().naive_utc()))?;

        self.notify_response(&updated);
        Ok(updated)
    }

    /// External completion step, typically run once the match date has
    /// passed. Only an accepted assignment can complete. Takes the same
    /// per-assignment lock as `respond` so a completion cannot race a
    /// rejection.
    pub fn mark_completed(&self, assignment_id: AssignmentId) -> Result<Assignment, EngineError> {
        let assignment_lock = self.assignment_locks.entry(assignment_id);
        let _guard = assignment_lock.lock().unwrap_or_else(|e| e.into_inner());

        let assignment = self
            .stores
            .get_assignment(assignment_id)?
            .ok_or(BusinessError::AssignmentNotFound(assignment_id))?;

        if assignment.status != AssignmentStatus::Accepted {
            return Err(BusinessError::InvalidTransition(assignment.status).into());
        }

        Ok(self
            .stores
            .set_status(assignment_id, AssignmentStatus::Completed, None)?)
    }

    /// Soft-deletes a match. Its assignments remain queryable historically;
    /// conflict checks no longer see them because inactive matches are
    /// filtered out upstream.
    pub fn soft_delete_match(&self, match_id: MatchId) -> Result<(), EngineError> {
        let match_lock = self.match_locks.entry(match_id);
        let _guard = match_lock.lock().unwrap_or_else(|e| e.into_inner());

        self.stores
            .get_active_by_id(match_id)?
            .ok_or(BusinessError::MatchNotFound(match_id))?;
        self.stores.set_inactive(match_id)?;
        info!("Match {match_id} soft-deleted");
        Ok(())
    }

    fn notify_response(&self, assignment: &Assignment) {
        let Some(admin) = assignment.assigned_by.as_deref() else {
            warn!(
                "Assignment {} has no recorded administrator, skipping notification",
                assignment.id
            );
            return;
        };
        if let Err(e) = self.notifier.assignment_responded(Some(admin), assignment) {
            warn!(
                "Failed to notify {admin} about assignment {}: {e:#}",
                assignment.id
            );
        }
    }
}
