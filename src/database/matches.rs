use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use rusqlite::{OptionalExtension, params};

use crate::domain::{Match, MatchId, MatchStatus};

use super::connection::DbConn;

const COLUMNS: &str =
    "id, tournament_name, venue, home_team, away_team, scheduled_at, status, active, created_at";

pub fn insert_match(
    conn: &mut DbConn,
    tournament_name: Option<&str>,
    venue: &str,
    home_team: &str,
    away_team: &str,
    scheduled_at: NaiveDateTime,
) -> Result<Match> {
    let sql = format!(
        "INSERT INTO matches (tournament_name, venue, home_team, away_team, scheduled_at) \
         VALUES (?1, ?2, ?3, ?4, ?5) RETURNING {COLUMNS}"
    );

    conn.query_row(
        &sql,
        params![tournament_name, venue, home_team, away_team, scheduled_at],
        parse_match_row,
    )
    .context("Failed to insert new match")
}

pub fn find_active_by_id(conn: &mut DbConn, id: MatchId) -> Result<Option<Match>> {
    let sql = format!("SELECT {COLUMNS} FROM matches WHERE id = ?1 AND active = 1");

    conn.query_row(&sql, params![id], parse_match_row)
        .optional()
        .context("Failed to query active match by id")
}

pub fn set_inactive(conn: &mut DbConn, id: MatchId) -> Result<()> {
    conn.execute("UPDATE matches SET active = 0 WHERE id = ?1", params![id])
        .context("Failed to soft-delete match")
        .map(|_| ())
}

pub fn set_status(conn: &mut DbConn, id: MatchId, status: MatchStatus) -> Result<()> {
    conn.execute(
        "UPDATE matches SET status = ?1 WHERE id = ?2",
        params![status.as_str(), id],
    )
    .context("Failed to update match status")
    .map(|_| ())
}

fn parse_match_row(row: &rusqlite::Row) -> rusqlite::Result<Match> {
    let status: String = row.get(6)?;
    let status = MatchStatus::parse(&status).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(6, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(Match {
        id: row.get(0)?,
        tournament_name: row.get(1)?,
        venue: row.get(2)?,
        home_team: row.get(3)?,
        away_team: row.get(4)?,
        scheduled_at: row.get(5)?,
        status,
        active: row.get(7)?,
        created_at: row.get(8)?,
    })
}
