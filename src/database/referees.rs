use anyhow::{Context, Result};
use rusqlite::{OptionalExtension, params};

use crate::domain::{Rank, Referee, RefereeId};

use super::connection::DbConn;

const COLUMNS: &str = "id, name, rank, active, created_at";

pub fn insert_referee(conn: &mut DbConn, name: &str, rank: Rank) -> Result<Referee> {
    let sql = format!("INSERT INTO referees (name, rank) VALUES (?1, ?2) RETURNING {COLUMNS}");

    conn.query_row(&sql, params![name, rank.as_str()], parse_referee_row)
        .context("Failed to insert new referee")
}

pub fn find_by_id(conn: &mut DbConn, id: RefereeId) -> Result<Option<Referee>> {
    let sql = format!("SELECT {COLUMNS} FROM referees WHERE id = ?1");

    conn.query_row(&sql, params![id], parse_referee_row)
        .optional()
        .context("Failed to query referee by id")
}

pub fn set_active(conn: &mut DbConn, id: RefereeId, active: bool) -> Result<()> {
    conn.execute(
        "UPDATE referees SET active = ?1 WHERE id = ?2",
        params![active, id],
    )
    .context("Failed to update referee active flag")
    .map(|_| ())
}

fn parse_referee_row(row: &rusqlite::Row) -> rusqlite::Result<Referee> {
    let rank: String = row.get(2)?;
    Ok(Referee {
        id: row.get(0)?,
        name: row.get(1)?,
        rank: parse_rank(2, &rank)?,
        active: row.get(3)?,
        created_at: row.get(4)?,
    })
}

/// Maps an unparseable rank column onto a rusqlite conversion error so it
/// surfaces as a store fault, not a silent default.
pub(super) fn parse_rank(column: usize, value: &str) -> rusqlite::Result<Rank> {
    Rank::parse(value).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(e))
    })
}
