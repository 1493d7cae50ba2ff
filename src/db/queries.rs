use crate::errors::{AppError, AppResult};
use crate::models::check_record::CheckRecord;
use crate::utils::date::format_timestamp;
use chrono::NaiveDateTime;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const SELECT_COLUMNS: &str = "SELECT id, timestamp, outcome, notes, created_at FROM check_records";

/// Most recent first; equal timestamps keep insertion order.
const ORDER_RECENT_FIRST: &str = "ORDER BY timestamp DESC, id ASC";

fn sql_limit(limit: Option<usize>) -> i64 {
    // SQLite treats a negative LIMIT as "no limit".
    limit.map_or(-1, |l| i64::try_from(l).unwrap_or(i64::MAX))
}

fn parse_stored_timestamp(raw: &str, col: usize) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
        .map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                col,
                rusqlite::types::Type::Text,
                Box::new(AppError::InvalidDate(raw.to_string())),
            )
        })
}

pub fn map_row(row: &Row) -> Result<CheckRecord> {
    let ts_str: String = row.get("timestamp")?;
    let created_str: String = row.get("created_at")?;

    Ok(CheckRecord {
        id: row.get("id")?,
        timestamp: parse_stored_timestamp(&ts_str, 1)?,
        outcome: row.get("outcome")?,
        notes: row.get::<_, Option<String>>("notes")?.unwrap_or_default(),
        created_at: parse_stored_timestamp(&created_str, 4)?,
    })
}

fn collect(rows: impl Iterator<Item = Result<CheckRecord>>) -> AppResult<Vec<CheckRecord>> {
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Insert a row and return the id assigned by SQLite.
pub fn insert_record(
    conn: &Connection,
    outcome: &str,
    notes: &str,
    timestamp: &NaiveDateTime,
    created_at: &NaiveDateTime,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO check_records (timestamp, outcome, notes, created_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            format_timestamp(timestamp),
            outcome,
            notes,
            format_timestamp(created_at),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn load_record(conn: &Connection, id: i64) -> AppResult<Option<CheckRecord>> {
    let mut stmt = conn.prepare_cached(&format!("{SELECT_COLUMNS} WHERE id = ?1"))?;
    Ok(stmt.query_row([id], map_row).optional()?)
}

pub fn load_records(
    conn: &Connection,
    limit: Option<usize>,
    offset: usize,
) -> AppResult<Vec<CheckRecord>> {
    let mut stmt = conn.prepare_cached(&format!(
        "{SELECT_COLUMNS} {ORDER_RECENT_FIRST} LIMIT ?1 OFFSET ?2"
    ))?;
    let offset = i64::try_from(offset).unwrap_or(i64::MAX);
    let rows = stmt.query_map(params![sql_limit(limit), offset], map_row)?;
    collect(rows)
}

/// Records with `timestamp >= cutoff`.
pub fn load_since(conn: &Connection, cutoff: &NaiveDateTime) -> AppResult<Vec<CheckRecord>> {
    let mut stmt = conn.prepare_cached(&format!(
        "{SELECT_COLUMNS} WHERE timestamp >= ?1 {ORDER_RECENT_FIRST}"
    ))?;
    let rows = stmt.query_map([format_timestamp(cutoff)], map_row)?;
    collect(rows)
}

/// Records with `from <= timestamp <= to`.
pub fn load_between(
    conn: &Connection,
    from: &NaiveDateTime,
    to: &NaiveDateTime,
    limit: Option<usize>,
) -> AppResult<Vec<CheckRecord>> {
    let mut stmt = conn.prepare_cached(&format!(
        "{SELECT_COLUMNS} WHERE timestamp BETWEEN ?1 AND ?2 {ORDER_RECENT_FIRST} LIMIT ?3"
    ))?;
    let rows = stmt.query_map(
        params![format_timestamp(from), format_timestamp(to), sql_limit(limit)],
        map_row,
    )?;
    collect(rows)
}

/// Replace the mutable fields of a row. Returns the number of affected rows.
pub fn update_record(
    conn: &Connection,
    id: i64,
    outcome: &str,
    notes: &str,
    timestamp: &NaiveDateTime,
) -> AppResult<usize> {
    let n = conn.execute(
        "UPDATE check_records
            SET timestamp = ?1, outcome = ?2, notes = ?3
          WHERE id = ?4",
        params![format_timestamp(timestamp), outcome, notes, id],
    )?;
    Ok(n)
}

pub fn delete_record(conn: &Connection, id: i64) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM check_records WHERE id = ?1", [id])?)
}

/// Delete every row with `timestamp < cutoff`.
pub fn delete_before(conn: &Connection, cutoff: &NaiveDateTime) -> AppResult<usize> {
    Ok(conn.execute(
        "DELETE FROM check_records WHERE timestamp < ?1",
        [format_timestamp(cutoff)],
    )?)
}

pub fn count_records(conn: &Connection) -> AppResult<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM check_records", [], |row| row.get(0))?)
}

/// Totals per outcome label, most frequent first.
pub fn outcome_counts(conn: &Connection) -> AppResult<Vec<(String, i64)>> {
    let mut stmt = conn.prepare(
        "SELECT outcome, COUNT(*) AS n
           FROM check_records
          GROUP BY outcome
          ORDER BY n DESC, outcome ASC",
    )?;
    let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Oldest and newest covered timestamp, if any record exists.
pub fn timestamp_bounds(conn: &Connection) -> AppResult<Option<(String, String)>> {
    let bounds: (Option<String>, Option<String>) = conn.query_row(
        "SELECT MIN(timestamp), MAX(timestamp) FROM check_records",
        [],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;

    Ok(match bounds {
        (Some(first), Some(last)) => Some((first, last)),
        _ => None,
    })
}
