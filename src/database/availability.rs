use anyhow::{Context, Result};
use rusqlite::{OptionalExtension, params};

use crate::domain::{AvailabilityKind, AvailabilityRule, RefereeId};

use super::connection::DbConn;

pub fn upsert_rule(conn: &mut DbConn, rule: &AvailabilityRule) -> Result<AvailabilityRule> {
    let sql = "
        INSERT INTO availability_rules (referee_id, kind, window_start, window_end)
        VALUES (?1, ?2, ?3, ?4)
        ON CONFLICT(referee_id) DO UPDATE
            SET kind = excluded.kind,
                window_start = excluded.window_start,
                window_end = excluded.window_end
        RETURNING referee_id, kind, window_start, window_end";

    conn.query_row(
        sql,
        params![
            rule.referee_id,
            rule.kind.as_str(),
            rule.window_start,
            rule.window_end
        ],
        parse_rule_row,
    )
    .context("Failed to upsert availability rule")
}

pub fn find_by_referee(
    conn: &mut DbConn,
    referee_id: RefereeId,
) -> Result<Option<AvailabilityRule>> {
    let sql = "SELECT referee_id, kind, window_start, window_end FROM availability_rules WHERE referee_id = ?1";

    conn.query_row(sql, params![referee_id], parse_rule_row)
        .optional()
        .context("Failed to query availability rule")
}

fn parse_rule_row(row: &rusqlite::Row) -> rusqlite::Result<AvailabilityRule> {
    let kind: String = row.get(1)?;
    let kind = AvailabilityKind::parse(&kind).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(AvailabilityRule {
        referee_id: row.get(0)?,
        kind,
        window_start: row.get(2)?,
        window_end: row.get(3)?,
    })
}
