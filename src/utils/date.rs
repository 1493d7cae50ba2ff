//! Date/time utilities: current local time, timestamp parsing and formatting.

use crate::errors::{AppError, AppResult};
use chrono::{Duration, Local, NaiveDate, NaiveDateTime, Timelike};

/// Storage and display format for every timestamp column.
pub const TIMESTAMP_FMT: &str = "%Y-%m-%d %H:%M:%S";

/// Accepted input layouts, tried in order.
const INPUT_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Local wall-clock time truncated to whole seconds, matching what is stored.
pub fn now() -> NaiveDateTime {
    to_storage_precision(Local::now().naive_local())
}

/// Drop fractional seconds; the database keeps `YYYY-MM-DD HH:MM:SS`.
pub fn to_storage_precision(ts: NaiveDateTime) -> NaiveDateTime {
    ts.with_nanosecond(0).unwrap_or(ts)
}

pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FMT).to_string()
}

/// Parse a user supplied timestamp.
///
/// Supports `YYYY-MM-DD HH:MM[:SS]`, the `T` separated variants,
/// a bare `YYYY-MM-DD` (midnight) and the keyword `now`.
pub fn parse_timestamp(s: &str) -> AppResult<NaiveDateTime> {
    let s = s.trim();

    if s.eq_ignore_ascii_case("now") {
        return Ok(now());
    }

    for fmt in INPUT_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(ts);
        }
    }

    if let Some(d) = parse_date(s) {
        return Ok(d.and_time(chrono::NaiveTime::MIN));
    }

    Err(AppError::InvalidDate(format!(
        "'{s}' (use YYYY-MM-DD HH:MM:SS, YYYY-MM-DD HH:MM, YYYY-MM-DD or 'now')"
    )))
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Cutoff for "the last `days` days": now minus `days` whole days.
pub fn days_ago(days: u32) -> NaiveDateTime {
    now() - Duration::days(i64::from(days))
}
