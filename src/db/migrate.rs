//! Schema management for the `check_records` table.
//!
//! The schema version lives in `PRAGMA user_version`; every step below is
//! idempotent so running the whole chain on an up-to-date file is a no-op.

use rusqlite::{Connection, OptionalExtension, Result};
use tracing::{debug, info};

/// Latest schema version known to this build.
pub const SCHEMA_VERSION: i64 = 2;

/// Schema version recorded in the file.
pub fn user_version(conn: &Connection) -> Result<i64> {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
}

fn set_user_version(conn: &Connection, v: i64) -> Result<()> {
    // PRAGMA does not accept bound parameters.
    conn.execute_batch(&format!("PRAGMA user_version = {v};"))
}

/// Check if the `check_records` table exists.
fn check_records_table_exists(conn: &Connection) -> Result<bool> {
    let mut stmt = conn.prepare(
        "SELECT name FROM sqlite_master WHERE type='table' AND name='check_records'",
    )?;
    let exists: Option<String> = stmt.query_row([], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// v1: the table itself plus the timestamp index used by every listing.
fn create_check_records_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS check_records (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            timestamp   DATETIME NOT NULL,
            outcome     TEXT NOT NULL,
            notes       TEXT DEFAULT '',
            created_at  DATETIME NOT NULL DEFAULT (datetime('now', 'localtime'))
        );

        CREATE INDEX IF NOT EXISTS idx_check_records_timestamp
            ON check_records(timestamp);
        "#,
    )
}

/// v2: normalize rows written by older front-ends.
///
/// Those stored timestamps with microseconds or a `T` separator and left
/// `notes` as NULL; every query here expects `YYYY-MM-DD HH:MM:SS` text.
fn normalize_legacy_rows(conn: &Connection) -> Result<usize> {
    conn.execute(
        r#"
        UPDATE check_records
           SET timestamp  = replace(substr(timestamp, 1, 19), 'T', ' '),
               created_at = replace(substr(created_at, 1, 19), 'T', ' '),
               notes      = COALESCE(notes, '')
         WHERE length(timestamp) <> 19
            OR instr(timestamp, 'T') > 0
            OR length(created_at) <> 19
            OR instr(created_at, 'T') > 0
            OR notes IS NULL
        "#,
        [],
    )
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    let current = user_version(conn)?;
    debug!(current, target = SCHEMA_VERSION, "checking schema version");

    let existed = check_records_table_exists(conn)?;
    if current >= SCHEMA_VERSION && existed {
        return Ok(());
    }

    // Also adds the index to tables created before versioning.
    create_check_records_table(conn)?;
    if !existed {
        info!("created check_records table");
    }

    if current < 2 {
        let fixed = normalize_legacy_rows(conn)?;
        if fixed > 0 {
            info!(rows = fixed, "normalized legacy check records");
        }
    }

    set_user_version(conn, SCHEMA_VERSION)?;
    Ok(())
}
