use chrono::{Days, NaiveDateTime};

use crate::domain::{ConflictReason, EngineError, Match, MatchStatus, Referee};

use super::stores::Stores;

/// Checks whether `referee` may take `role` on `target`, running the five
/// predicates in order and stopping at the first failure. Each failure maps
/// to its own `ConflictReason` so the boundary can report precisely.
///
/// Callers must hold the engine's per-match and per-referee locks: these are
/// read-then-act checks with no transactional guarantee of their own.
pub fn check_assignable<S: Stores>(
    stores: &S,
    target: &Match,
    referee: &Referee,
    role: &str,
) -> Result<(), EngineError> {
    if target.status == MatchStatus::Cancelled {
        return Err(ConflictReason::MatchCancelled.into());
    }

    if !referee.active {
        return Err(ConflictReason::RefereeInactive.into());
    }

    if stores.exists_active(target.id, referee.id)? {
        return Err(ConflictReason::RefereeAlreadyAssigned.into());
    }

    if stores.exists_active_role(target.id, role)? {
        return Err(ConflictReason::RoleTaken.into());
    }

    let (day_start, day_end) = day_window(target.scheduled_at);
    if stores.exists_active_on_day(referee.id, day_start, day_end)? {
        return Err(ConflictReason::SameDayAssignment.into());
    }

    Ok(())
}

/// Calendar day containing `at`: [midnight, next midnight).
pub fn day_window(at: NaiveDateTime) -> (NaiveDateTime, NaiveDateTime) {
    let start = at.date().and_hms_opt(0, 0, 0).unwrap_or(at);
    let end = start
        .checked_add_days(Days::new(1))
        .unwrap_or(NaiveDateTime::MAX);
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BusinessError;
    use crate::engine::testing::{fixtures, MemoryStore};

    fn expect_conflict(result: Result<(), EngineError>, reason: ConflictReason) {
        match result {
            Err(EngineError::Business(BusinessError::Conflict(r))) => assert_eq!(r, reason),
            other => panic!("expected conflict {reason:?}, got {other:?}"),
        }
    }

    #[test]
    fn day_window_spans_midnight_to_midnight() {
        let (start, end) = day_window(fixtures::datetime("2025-03-01 18:00"));
        assert_eq!(start, fixtures::datetime("2025-03-01 00:00"));
        assert_eq!(end, fixtures::datetime("2025-03-02 00:00"));
    }

    #[test]
    fn passes_on_a_clean_slate() {
        let store = MemoryStore::new();
        let referee = store.add_referee(fixtures::referee("R. Vera"));
        let target = store.add_match(fixtures::match_at("2025-03-01 18:00"));
        assert!(check_assignable(&store, &target, &referee, "Principal").is_ok());
    }

    #[test]
    fn cancelled_match_is_refused_first() {
        let store = MemoryStore::new();
        let referee = store.add_referee(fixtures::referee("R. Vera"));
        let mut m = fixtures::match_at("2025-03-01 18:00");
        m.status = MatchStatus::Cancelled;
        let target = store.add_match(m);
        expect_conflict(
            check_assignable(&store, &target, &referee, "Principal"),
            ConflictReason::MatchCancelled,
        );
    }

    #[test]
    fn inactive_referee_is_refused() {
        let store = MemoryStore::new();
        let mut r = fixtures::referee("R. Vera");
        r.active = false;
        let referee = store.add_referee(r);
        let target = store.add_match(fixtures::match_at("2025-03-01 18:00"));
        expect_conflict(
            check_assignable(&store, &target, &referee, "Principal"),
            ConflictReason::RefereeInactive,
        );
    }

    #[test]
    fn referee_cannot_appear_twice_on_one_match() {
        let store = MemoryStore::new();
        let referee = store.add_referee(fixtures::referee("R. Vera"));
        let target = store.add_match(fixtures::match_at("2025-03-01 18:00"));
        store.seed_assignment(target.id, referee.id, "Principal");
        expect_conflict(
            check_assignable(&store, &target, &referee, "Auxiliary-1"),
            ConflictReason::RefereeAlreadyAssigned,
        );
    }

    #[test]
    fn filled_role_is_refused() {
        let store = MemoryStore::new();
        let first = store.add_referee(fixtures::referee("R. Vera"));
        let second = store.add_referee(fixtures::referee("L. Duarte"));
        let target = store.add_match(fixtures::match_at("2025-03-01 18:00"));
        store.seed_assignment(target.id, first.id, "Principal");
        expect_conflict(
            check_assignable(&store, &target, &second, "Principal"),
            ConflictReason::RoleTaken,
        );
    }

    #[test]
    fn same_day_double_booking_is_refused() {
        let store = MemoryStore::new();
        let referee = store.add_referee(fixtures::referee("R. Vera"));
        let morning = store.add_match(fixtures::match_at("2025-03-01 10:00"));
        let evening = store.add_match(fixtures::match_at("2025-03-01 20:00"));
        store.seed_assignment(morning.id, referee.id, "Principal");
        expect_conflict(
            check_assignable(&store, &evening, &referee, "Principal"),
            ConflictReason::SameDayAssignment,
        );
    }

    #[test]
    fn next_day_match_is_fine() {
        let store = MemoryStore::new();
        let referee = store.add_referee(fixtures::referee("R. Vera"));
        let saturday = store.add_match(fixtures::match_at("2025-03-01 23:00"));
        let sunday = store.add_match(fixtures::match_at("2025-03-02 00:30"));
        store.seed_assignment(saturday.id, referee.id, "Principal");
        assert!(check_assignable(&store, &sunday, &referee, "Principal").is_ok());
    }
}
