//! In-memory store and fixture builders for engine tests.

use std::sync::Mutex;

use anyhow::Result;
use chrono::NaiveDateTime;

use crate::domain::{
    Assignment, AssignmentId, AssignmentStatus, AvailabilityRule, CompletedAssignmentRow, Match,
    MatchId, MatchStatus, Money, NewAssignment, Rank, Referee, RefereeId,
};

use super::stores::{
    AssignmentStore, AvailabilityStore, MatchStore, NotificationSink, RefereeStore, TariffStore,
};

#[derive(Default)]
struct Inner {
    referees: Vec<Referee>,
    matches: Vec<Match>,
    assignments: Vec<Assignment>,
    rules: Vec<AvailabilityRule>,
    tariffs: Vec<(Rank, Money)>,
    next_id: i64,
}

impl Inner {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
        }
    }

    pub fn add_referee(&self, mut referee: Referee) -> Referee {
        let mut inner = self.inner.lock().unwrap();
        referee.id = inner.next_id();
        inner.referees.push(referee.clone());
        referee
    }

    pub fn add_match(&self, mut m: Match) -> Match {
        let mut inner = self.inner.lock().unwrap();
        m.id = inner.next_id();
        inner.matches.push(m.clone());
        m
    }

    pub fn set_tariff(&self, rank: Rank, amount: Money) {
        let mut inner = self.inner.lock().unwrap();
        inner.tariffs.retain(|(r, _)| *r != rank);
        inner.tariffs.push((rank, amount));
    }

    pub fn set_rule(&self, rule: AvailabilityRule) {
        let mut inner = self.inner.lock().unwrap();
        inner.rules.retain(|r| r.referee_id != rule.referee_id);
        inner.rules.push(rule);
    }

    /// Directly plants an active pending assignment, bypassing the engine.
    pub fn seed_assignment(&self, match_id: MatchId, referee_id: RefereeId, role: &str) -> Assignment {
        self.seed_assignment_with_status(match_id, referee_id, role, AssignmentStatus::Pending, 0)
    }

    pub fn seed_assignment_with_status(
        &self,
        match_id: MatchId,
        referee_id: RefereeId,
        role: &str,
        status: AssignmentStatus,
        amount: Money,
    ) -> Assignment {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_id();
        let created_at = fixtures::datetime("2025-01-01 00:00");
        let assignment = Assignment {
            id,
            match_id,
            referee_id,
            role: role.to_string(),
            status,
            amount,
            notes: None,
            assigned_by: None,
            active: true,
            created_at,
            responded_at: None,
        };
        inner.assignments.push(assignment.clone());
        assignment
    }

    fn completed_rows(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        referee_id: Option<RefereeId>,
    ) -> Vec<CompletedAssignmentRow> {
        let inner = self.inner.lock().unwrap();
        let mut rows: Vec<CompletedAssignmentRow> = inner
            .assignments
            .iter()
            .filter(|a| a.active && a.status == AssignmentStatus::Completed)
            .filter(|a| referee_id.is_none_or(|id| a.referee_id == id))
            .filter_map(|a| {
                let m = inner.matches.iter().find(|m| m.id == a.match_id)?;
                let r = inner.referees.iter().find(|r| r.id == a.referee_id)?;
                if m.scheduled_at < start || m.scheduled_at > end {
                    return None;
                }
                Some(CompletedAssignmentRow {
                    assignment_id: a.id,
                    referee_id: r.id,
                    referee_name: r.name.clone(),
                    rank: r.rank,
                    match_id: m.id,
                    match_label: m.label(),
                    tournament_name: m.tournament_name.clone(),
                    match_date: m.scheduled_at,
                    role: a.role.clone(),
                    amount: a.amount,
                    status: a.status,
                })
            })
            .collect();
        rows.sort_by(|a, b| (a.match_date, a.assignment_id).cmp(&(b.match_date, b.assignment_id)));
        rows
    }
}

impl MatchStore for MemoryStore {
    fn get_active_by_id(&self, id: MatchId) -> Result<Option<Match>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.matches.iter().find(|m| m.id == id && m.active).cloned())
    }

    fn set_inactive(&self, id: MatchId) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(m) = inner.matches.iter_mut().find(|m| m.id == id) {
            m.active = false;
        }
        Ok(())
    }
}

impl RefereeStore for MemoryStore {
    fn get_referee(&self, id: RefereeId) -> Result<Option<Referee>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.referees.iter().find(|r| r.id == id).cloned())
    }
}

impl AssignmentStore for MemoryStore {
    fn exists_active(&self, match_id: MatchId, referee_id: RefereeId) -> Result<bool> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .assignments
            .iter()
            .any(|a| a.active && a.match_id == match_id && a.referee_id == referee_id))
    }

    fn exists_active_role(&self, match_id: MatchId, role: &str) -> Result<bool> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .assignments
            .iter()
            .any(|a| a.active && a.match_id == match_id && a.role == role))
    }

    fn exists_active_on_day(
        &self,
        referee_id: RefereeId,
        day_start: NaiveDateTime,
        day_end: NaiveDateTime,
    ) -> Result<bool> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.assignments.iter().any(|a| {
            a.active
                && a.referee_id == referee_id
                && inner
                    .matches
                    .iter()
                    .find(|m| m.id == a.match_id)
                    .is_some_and(|m| {
                        m.active && m.scheduled_at >= day_start && m.scheduled_at < day_end
                    })
        }))
    }

    fn insert(&self, new: NewAssignment) -> Result<Assignment> {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_id();
        let assignment = Assignment {
            id,
            match_id: new.match_id,
            referee_id: new.referee_id,
            role: new.role,
            status: AssignmentStatus::Pending,
            amount: new.amount,
            notes: new.notes,
            assigned_by: new.assigned_by,
            active: true,
            created_at: new.created_at,
            responded_at: None,
        };
        inner.assignments.push(assignment.clone());
        Ok(assignment)
    }

    fn get_assignment(&self, id: AssignmentId) -> Result<Option<Assignment>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.assignments.iter().find(|a| a.id == id).cloned())
    }

    fn set_status(
        &self,
        id: AssignmentId,
        status: AssignmentStatus,
        responded_at: Option<NaiveDateTime>,
    ) -> Result<Assignment> {
        let mut inner = self.inner.lock().unwrap();
        let assignment = inner
            .assignments
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| anyhow::anyhow!("assignment {id} missing from store"))?;
        assignment.status = status;
        if responded_at.is_some() {
            assignment.responded_at = responded_at;
        }
        Ok(assignment.clone())
    }

    fn find_completed_in_range(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<CompletedAssignmentRow>> {
        Ok(self.completed_rows(start, end, None))
    }

    fn find_completed_for_referee_in_range(
        &self,
        referee_id: RefereeId,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<CompletedAssignmentRow>> {
        Ok(self.completed_rows(start, end, Some(referee_id)))
    }
}

impl AvailabilityStore for MemoryStore {
    fn get_by_referee(&self, referee_id: RefereeId) -> Result<Option<AvailabilityRule>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.rules.iter().find(|r| r.referee_id == referee_id).cloned())
    }
}

impl TariffStore for MemoryStore {
    fn get_active_by_rank(&self, rank: Rank) -> Result<Option<Money>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .tariffs
            .iter()
            .find(|(r, _)| *r == rank)
            .map(|(_, amount)| *amount))
    }
}

/// Sink that remembers every notification it was handed.
#[derive(Default)]
pub struct RecordingSink {
    pub seen: Mutex<Vec<(Option<String>, AssignmentId)>>,
}

impl NotificationSink for RecordingSink {
    fn assignment_responded(&self, admin: Option<&str>, assignment: &Assignment) -> Result<()> {
        self.seen
            .lock()
            .unwrap()
            .push((admin.map(str::to_string), assignment.id));
        Ok(())
    }
}

/// Sink that always fails, for checking that respond() never propagates
/// notification errors.
pub struct FailingSink;

impl NotificationSink for FailingSink {
    fn assignment_responded(&self, _admin: Option<&str>, _assignment: &Assignment) -> Result<()> {
        anyhow::bail!("notification channel down")
    }
}

pub mod fixtures {
    use super::*;

    pub fn datetime(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M")
            .unwrap_or_else(|e| panic!("bad fixture datetime {s}: {e}"))
    }

    pub fn referee(name: &str) -> Referee {
        Referee {
            id: 0,
            name: name.to_string(),
            rank: Rank::Primera,
            active: true,
            created_at: None,
        }
    }

    pub fn referee_of_rank(name: &str, rank: Rank) -> Referee {
        Referee {
            rank,
            ..referee(name)
        }
    }

    pub fn match_at(when: &str) -> Match {
        Match {
            id: 0,
            tournament_name: None,
            venue: "Polideportivo Central".to_string(),
            home_team: "Olimpia".to_string(),
            away_team: "Libertad".to_string(),
            scheduled_at: datetime(when),
            status: MatchStatus::Scheduled,
            active: true,
            created_at: None,
        }
    }

    pub fn tournament_match_at(tournament: &str, when: &str) -> Match {
        Match {
            tournament_name: Some(tournament.to_string()),
            ..match_at(when)
        }
    }
}
