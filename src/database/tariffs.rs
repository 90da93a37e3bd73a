use anyhow::{Context, Result};
use rusqlite::{OptionalExtension, params};

use crate::domain::{Money, Rank, Tariff};

use super::connection::DbConn;
use super::referees::parse_rank;

/// Deactivates any previous tariff for the rank and inserts the new one, so
/// at most one active row per rank ever exists. Already-priced assignments
/// keep their locked amounts.
pub fn set_tariff(conn: &mut DbConn, rank: Rank, amount: Money) -> Result<Tariff> {
    conn.execute(
        "UPDATE tariffs SET active = 0 WHERE rank = ?1 AND active = 1",
        params![rank.as_str()],
    )
    .context("Failed to retire previous tariff")?;

    let sql = "INSERT INTO tariffs (rank, amount) VALUES (?1, ?2) \
               RETURNING id, rank, amount, active, created_at";
    conn.query_row(sql, params![rank.as_str(), amount], parse_tariff_row)
        .context("Failed to insert new tariff")
}

pub fn find_active_amount(conn: &mut DbConn, rank: Rank) -> Result<Option<Money>> {
    let sql = "SELECT amount FROM tariffs WHERE rank = ?1 AND active = 1";

    conn.query_row(sql, params![rank.as_str()], |row| row.get(0))
        .optional()
        .context("Failed to query active tariff")
}

fn parse_tariff_row(row: &rusqlite::Row) -> rusqlite::Result<Tariff> {
    let rank: String = row.get(1)?;
    Ok(Tariff {
        id: row.get(0)?,
        rank: parse_rank(1, &rank)?,
        amount: row.get(2)?,
        active: row.get(3)?,
        created_at: row.get(4)?,
    })
}
