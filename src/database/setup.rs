use anyhow::{Context, Result};

use super::connection::DbConn;

/// Drops and recreates the whole schema from the embedded SQL.
pub fn reset_database(conn: &DbConn) -> Result<()> {
    let schema_sql = include_str!("schema.sql");
    conn.execute_batch(schema_sql)
        .context("Failed to apply database schema")?;

    log::info!("Database schema reset successfully");
    Ok(())
}
