use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use rusqlite::{OptionalExtension, params};

use crate::domain::{
    Assignment, AssignmentId, AssignmentStatus, CompletedAssignmentRow, MatchId, NewAssignment,
    RefereeId,
};

use super::connection::DbConn;
use super::referees::parse_rank;

const COLUMNS: &str = "id, match_id, referee_id, role, status, amount, notes, assigned_by, \
                       active, created_at, responded_at";

pub fn insert_assignment(conn: &mut DbConn, new: &NewAssignment) -> Result<Assignment> {
    let sql = format!(
        "INSERT INTO assignments (match_id, referee_id, role, amount, notes, assigned_by, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7) RETURNING {COLUMNS}"
    );

    conn.query_row(
        &sql,
        params![
            new.match_id,
            new.referee_id,
            new.role,
            new.amount,
            new.notes,
            new.assigned_by,
            new.created_at
        ],
        parse_assignment_row,
    )
    .context("Failed to insert new assignment")
}

pub fn find_by_id(conn: &mut DbConn, id: AssignmentId) -> Result<Option<Assignment>> {
    let sql = format!("SELECT {COLUMNS} FROM assignments WHERE id = ?1");

    conn.query_row(&sql, params![id], parse_assignment_row)
        .optional()
        .context("Failed to query assignment by id")
}

pub fn update_status(
    conn: &mut DbConn,
    id: AssignmentId,
    status: AssignmentStatus,
    responded_at: Option<NaiveDateTime>,
) -> Result<Assignment> {
    // responded_at is stamped once; a later completion keeps the original.
    let sql = format!(
        "UPDATE assignments SET status = ?1, responded_at = COALESCE(responded_at, ?2) \
         WHERE id = ?3 RETURNING {COLUMNS}"
    );

    conn.query_row(
        &sql,
        params![status.as_str(), responded_at, id],
        parse_assignment_row,
    )
    .context("Failed to update assignment status")
}

pub fn exists_active(conn: &mut DbConn, match_id: MatchId, referee_id: RefereeId) -> Result<bool> {
    let sql = "SELECT EXISTS(SELECT 1 FROM assignments WHERE match_id = ?1 AND referee_id = ?2 AND active = 1)";

    conn.query_row(sql, params![match_id, referee_id], |row| row.get(0))
        .context("Failed to check for existing assignment")
}

pub fn exists_active_role(conn: &mut DbConn, match_id: MatchId, role: &str) -> Result<bool> {
    let sql =
        "SELECT EXISTS(SELECT 1 FROM assignments WHERE match_id = ?1 AND role = ?2 AND active = 1)";

    conn.query_row(sql, params![match_id, role], |row| row.get(0))
        .context("Failed to check for filled role")
}

pub fn exists_active_on_day(
    conn: &mut DbConn,
    referee_id: RefereeId,
    day_start: NaiveDateTime,
    day_end: NaiveDateTime,
) -> Result<bool> {
    let sql = "
        SELECT EXISTS(
            SELECT 1 FROM assignments a
            JOIN matches m ON m.id = a.match_id
            WHERE a.referee_id = ?1
              AND a.active = 1
              AND m.active = 1
              AND m.scheduled_at >= ?2
              AND m.scheduled_at < ?3
        )";

    conn.query_row(sql, params![referee_id, day_start, day_end], |row| {
        row.get(0)
    })
    .context("Failed to check for same-day assignment")
}

const COMPLETED_SQL: &str = "
    SELECT
        a.id,
        r.id,
        r.name,
        r.rank,
        m.id,
        m.home_team || ' vs ' || m.away_team,
        m.tournament_name,
        m.scheduled_at,
        a.role,
        a.amount,
        a.status
    FROM assignments a
    JOIN matches m ON m.id = a.match_id
    JOIN referees r ON r.id = a.referee_id
    WHERE a.status = 'COMPLETED'
      AND a.active = 1
      AND m.scheduled_at >= ?1
      AND m.scheduled_at <= ?2";

// Settlement grouping preserves first-appearance order, so the scan order
// must be deterministic.
const COMPLETED_ORDER: &str = " ORDER BY m.scheduled_at, a.id";

pub fn find_completed_in_range(
    conn: &mut DbConn,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Result<Vec<CompletedAssignmentRow>> {
    let sql = format!("{COMPLETED_SQL}{COMPLETED_ORDER}");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![start, end], parse_completed_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn find_completed_for_referee_in_range(
    conn: &mut DbConn,
    referee_id: RefereeId,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Result<Vec<CompletedAssignmentRow>> {
    let sql = format!("{COMPLETED_SQL} AND a.referee_id = ?3{COMPLETED_ORDER}");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![start, end, referee_id], parse_completed_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

fn parse_assignment_row(row: &rusqlite::Row) -> rusqlite::Result<Assignment> {
    let status: String = row.get(4)?;
    Ok(Assignment {
        id: row.get(0)?,
        match_id: row.get(1)?,
        referee_id: row.get(2)?,
        role: row.get(3)?,
        status: parse_status(4, &status)?,
        amount: row.get(5)?,
        notes: row.get(6)?,
        assigned_by: row.get(7)?,
        active: row.get(8)?,
        created_at: row.get(9)?,
        responded_at: row.get(10)?,
    })
}

fn parse_completed_row(row: &rusqlite::Row) -> rusqlite::Result<CompletedAssignmentRow> {
    let rank: String = row.get(3)?;
    let status: String = row.get(10)?;
    Ok(CompletedAssignmentRow {
        assignment_id: row.get(0)?,
        referee_id: row.get(1)?,
        referee_name: row.get(2)?,
        rank: parse_rank(3, &rank)?,
        match_id: row.get(4)?,
        match_label: row.get(5)?,
        tournament_name: row.get(6)?,
        match_date: row.get(7)?,
        role: row.get(8)?,
        amount: row.get(9)?,
        status: parse_status(10, &status)?,
    })
}

fn parse_status(column: usize, value: &str) -> rusqlite::Result<AssignmentStatus> {
    AssignmentStatus::parse(value).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(e))
    })
}
