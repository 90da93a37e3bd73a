use std::collections::{HashMap, HashSet};

use chrono::NaiveDateTime;

use crate::domain::{
    BusinessError, CompletedAssignmentRow, EngineError, RefereeId, RefereeSettlement,
    SettlementLine, SettlementReport, NO_TOURNAMENT_LABEL,
};

use super::stores::Stores;

/// Boundary-layer guard: settlement periods must be ordered. Both the CLI and
/// the HTTP handlers call this before invoking the calculator, which itself
/// assumes a valid range.
pub fn validate_period(start: NaiveDateTime, end: NaiveDateTime) -> Result<(), BusinessError> {
    if start > end {
        return Err(BusinessError::InvalidRange { start, end });
    }
    Ok(())
}

/// Settlement over all referees with completed work in `[start, end]`
/// inclusive. Read-only snapshot; takes no locks.
///
/// Subreports appear in order of first appearance in the store's scan (the
/// sqlite adapter orders by match date, then assignment id), so repeated
/// calls on unchanged data produce identical reports.
pub fn generate<S: Stores>(
    stores: &S,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Result<SettlementReport, EngineError> {
    let rows = stores.find_completed_in_range(start, end)?;
    Ok(build_report(rows, start, end))
}

/// Settlement for a single referee. `None` means nothing to settle in the
/// period, which is a valid outcome and not a lookup failure.
pub fn generate_for_referee<S: Stores>(
    stores: &S,
    referee_id: RefereeId,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Result<Option<RefereeSettlement>, EngineError> {
    let rows = stores.find_completed_for_referee_in_range(referee_id, start, end)?;
    if rows.is_empty() {
        return Ok(None);
    }
    let report = build_report(rows, start, end);
    Ok(report.referees.into_iter().next())
}

fn build_report(
    rows: Vec<CompletedAssignmentRow>,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> SettlementReport {
    let mut referees: Vec<RefereeSettlement> = Vec::new();
    let mut index_of: HashMap<RefereeId, usize> = HashMap::new();
    let mut distinct_matches: HashSet<i64> = HashSet::new();
    let mut total_assignments = 0usize;

    for row in rows {
        distinct_matches.insert(row.match_id);
        total_assignments += 1;

        let idx = *index_of.entry(row.referee_id).or_insert_with(|| {
            referees.push(RefereeSettlement {
                referee_id: row.referee_id,
                referee_name: row.referee_name.clone(),
                rank: row.rank,
                lines: Vec::new(),
                total: 0,
                assignment_count: 0,
            });
            referees.len() - 1
        });

        let sub = &mut referees[idx];
        sub.total += row.amount;
        sub.assignment_count += 1;
        sub.lines.push(SettlementLine {
            assignment_id: row.assignment_id,
            match_id: row.match_id,
            match_label: row.match_label,
            tournament_name: row
                .tournament_name
                .unwrap_or_else(|| NO_TOURNAMENT_LABEL.to_string()),
            match_date: row.match_date,
            role: row.role,
            amount: row.amount,
            status: row.status.as_str().to_string(),
        });
    }

    let grand_total = referees.iter().map(|r| r.total).sum();
    SettlementReport {
        period_start: start,
        period_end: end,
        referees,
        grand_total,
        total_matches: distinct_matches.len(),
        total_assignments,
    }
}
