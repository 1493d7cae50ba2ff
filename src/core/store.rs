//! Record Store: CRUD and query surface over [`CheckRecord`].
//!
//! Owns the single SQLite connection used by a front-end. Unknown ids are
//! reported through `Option`/`bool`, never as errors; SQLite and filesystem
//! failures come back as storage-class [`AppError`]s.

use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::export;
use crate::models::check_record::CheckRecord;
use crate::utils::date::{days_ago, now, to_storage_precision};
use chrono::NaiveDateTime;
use rusqlite::Connection;
use std::path::Path;
use tracing::debug;

pub struct RecordStore {
    pool: DbPool,
}

impl RecordStore {
    /// Open (or create) the database file and make sure the schema exists.
    pub fn open<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let pool = DbPool::new(path.as_ref())?;
        debug!(path = %path.as_ref().display(), "opened record store");
        Self::from_pool(pool)
    }

    pub fn open_in_memory() -> AppResult<Self> {
        Self::from_pool(DbPool::in_memory()?)
    }

    pub fn from_pool(pool: DbPool) -> AppResult<Self> {
        init_db(&pool.conn)?;
        Ok(Self { pool })
    }

    pub fn conn(&self) -> &Connection {
        &self.pool.conn
    }

    /// Insert a new check. `timestamp` defaults to now; `created_at` is
    /// always now. Returns the assigned id.
    ///
    /// Timestamps are kept to whole seconds: fractional seconds are
    /// dropped here, so `get` returns exactly what was stored.
    pub fn add(
        &self,
        outcome: &str,
        notes: &str,
        timestamp: Option<NaiveDateTime>,
    ) -> AppResult<i64> {
        require_outcome(outcome)?;
        let created_at = now();
        let ts = timestamp.map_or(created_at, to_storage_precision);

        let id = queries::insert_record(self.conn(), outcome, notes, &ts, &created_at)?;
        debug!(id, outcome, "check record added");
        Ok(id)
    }

    pub fn get(&self, id: i64) -> AppResult<Option<CheckRecord>> {
        queries::load_record(self.conn(), id)
    }

    /// Most recent first, paginated.
    pub fn list(&self, limit: usize, offset: usize) -> AppResult<Vec<CheckRecord>> {
        queries::load_records(self.conn(), Some(limit), offset)
    }

    pub fn list_all(&self) -> AppResult<Vec<CheckRecord>> {
        queries::load_records(self.conn(), None, 0)
    }

    /// Overwrite timestamp, outcome and notes. `false` when `id` is unknown.
    pub fn update(
        &self,
        id: i64,
        outcome: &str,
        notes: &str,
        timestamp: Option<NaiveDateTime>,
    ) -> AppResult<bool> {
        require_outcome(outcome)?;
        let ts = timestamp.map_or_else(now, to_storage_precision);
        let changed = queries::update_record(self.conn(), id, outcome, notes, &ts)? > 0;
        debug!(id, changed, "check record update");
        Ok(changed)
    }

    pub fn delete(&self, id: i64) -> AppResult<bool> {
        let deleted = queries::delete_record(self.conn(), id)? > 0;
        debug!(id, deleted, "check record delete");
        Ok(deleted)
    }

    pub fn count(&self) -> AppResult<i64> {
        queries::count_records(self.conn())
    }

    /// Records whose timestamp falls within the last `days` days.
    pub fn list_recent(&self, days: u32) -> AppResult<Vec<CheckRecord>> {
        queries::load_since(self.conn(), &days_ago(days))
    }

    pub fn list_between(
        &self,
        from: &NaiveDateTime,
        to: &NaiveDateTime,
        limit: Option<usize>,
    ) -> AppResult<Vec<CheckRecord>> {
        queries::load_between(self.conn(), from, to, limit)
    }

    /// Delete every record with `timestamp < cutoff`. No undo.
    pub fn prune_before(&self, cutoff: &NaiveDateTime) -> AppResult<usize> {
        let n = queries::delete_before(self.conn(), cutoff)?;
        debug!(deleted = n, cutoff = %cutoff, "pruned check records");
        Ok(n)
    }

    pub fn outcome_counts(&self) -> AppResult<Vec<(String, i64)>> {
        queries::outcome_counts(self.conn())
    }

    /// Write records (most recent first, optionally capped) as CSV with the
    /// header `ID,Timestamp,Outcome,Notes,Created At`. Returns rows written.
    pub fn export<P: AsRef<Path>>(&self, path: P, limit: Option<usize>) -> AppResult<usize> {
        let records = queries::load_records(self.conn(), limit, 0)?;
        export::write_csv(&records, path.as_ref())?;
        Ok(records.len())
    }
}

fn require_outcome(outcome: &str) -> AppResult<()> {
    if outcome.trim().is_empty() {
        return Err(AppError::Validation("outcome must not be empty".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn store() -> RecordStore {
        RecordStore::open_in_memory().unwrap()
    }

    #[test]
    fn sub_second_timestamps_are_truncated_on_write() {
        let s = store();
        let day = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        let precise = day.and_hms_milli_opt(10, 0, 0, 500).unwrap();

        let id = s.add("All Good", "", Some(precise)).unwrap();
        let r = s.get(id).unwrap().unwrap();
        assert_eq!(r.timestamp, day.and_hms_opt(10, 0, 0).unwrap());

        let whole = at(2025, 9, 1, 11, 15);
        let id2 = s.add("All Good", "", Some(whole)).unwrap();
        assert_eq!(s.get(id2).unwrap().unwrap().timestamp, whole);

        let later = day.and_hms_micro_opt(12, 30, 5, 999_999).unwrap();
        assert!(s.update(id, "Issues Found", "", Some(later)).unwrap());
        assert_eq!(
            s.get(id).unwrap().unwrap().timestamp,
            day.and_hms_opt(12, 30, 5).unwrap()
        );
    }

    #[test]
    fn add_then_get_round_trips_fields() {
        let s = store();
        let before = now();
        let ts = at(2025, 9, 1, 10, 0);

        let id = s.add("All Good", "CloudTrail clean", Some(ts)).unwrap();
        let r = s.get(id).unwrap().expect("record exists");

        assert_eq!(r.id, id);
        assert_eq!(r.timestamp, ts);
        assert_eq!(r.outcome, "All Good");
        assert_eq!(r.notes, "CloudTrail clean");
        assert!(r.created_at >= before && r.created_at <= now());
    }

    #[test]
    fn add_defaults_timestamp_to_now() {
        let s = store();
        let before = now();
        let id = s.add("No Access", "", None).unwrap();
        let r = s.get(id).unwrap().unwrap();
        assert!(r.timestamp >= before && r.timestamp <= now());
        assert_eq!(r.notes, "");
    }

    #[test]
    fn get_unknown_id_is_none() {
        assert!(store().get(42).unwrap().is_none());
    }

    #[test]
    fn blank_outcome_is_rejected() {
        let s = store();
        let err = s.add("  ", "", None).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(s.count().unwrap(), 0);
    }

    #[test]
    fn update_replaces_all_mutable_fields() {
        let s = store();
        let id = s.add("All Good", "first", Some(at(2025, 1, 1, 8, 0))).unwrap();
        let created = s.get(id).unwrap().unwrap().created_at;

        let new_ts = at(2024, 12, 31, 23, 59);
        assert!(s.update(id, "Issues Found", "second", Some(new_ts)).unwrap());

        let r = s.get(id).unwrap().unwrap();
        assert_eq!(r.outcome, "Issues Found");
        assert_eq!(r.notes, "second");
        assert_eq!(r.timestamp, new_ts);
        assert_eq!(r.created_at, created);
    }

    #[test]
    fn update_unknown_id_changes_nothing() {
        let s = store();
        let id = s.add("All Good", "keep", Some(at(2025, 1, 1, 8, 0))).unwrap();
        let before = s.get(id).unwrap();

        assert!(!s.update(id + 1, "Issues Found", "x", None).unwrap());
        assert_eq!(s.get(id).unwrap(), before);
        assert_eq!(s.count().unwrap(), 1);
    }

    #[test]
    fn delete_reports_whether_a_row_went_away() {
        let s = store();
        let id = s.add("All Good", "", None).unwrap();
        assert!(s.delete(id).unwrap());
        assert!(s.get(id).unwrap().is_none());
        assert!(!s.delete(id).unwrap());
    }

    #[test]
    fn list_is_recent_first_and_bounded() {
        let s = store();
        for day in 1..=5 {
            s.add("All Good", "", Some(at(2025, 3, day, 12, 0))).unwrap();
        }

        let page = s.list(3, 0).unwrap();
        assert_eq!(page.len(), 3);
        assert_eq!(page[0].timestamp, at(2025, 3, 5, 12, 0));
        assert!(page.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));

        let rest = s.list(3, 3).unwrap();
        assert_eq!(rest.len(), 2);
        assert_eq!(rest[1].timestamp, at(2025, 3, 1, 12, 0));
    }

    #[test]
    fn equal_timestamps_keep_insertion_order() {
        let s = store();
        let ts = at(2025, 3, 1, 12, 0);
        let a = s.add("All Good", "a", Some(ts)).unwrap();
        let b = s.add("All Good", "b", Some(ts)).unwrap();
        let ids: Vec<i64> = s.list(10, 0).unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![a, b]);
    }

    #[test]
    fn list_recent_returns_only_the_window() {
        let s = store();
        let n = now();
        s.add("All Good", "1d", Some(n - Duration::days(1))).unwrap();
        s.add("All Good", "3d", Some(n - Duration::days(3))).unwrap();
        s.add("All Good", "10d", Some(n - Duration::days(10))).unwrap();
        s.add("All Good", "future", Some(n + Duration::days(2))).unwrap();

        let notes: Vec<String> = s
            .list_recent(7)
            .unwrap()
            .into_iter()
            .map(|r| r.notes)
            .collect();
        assert_eq!(notes, vec!["future", "1d", "3d"]);
    }

    #[test]
    fn prune_before_deletes_strictly_older_records() {
        let s = store();
        let cutoff = at(2025, 6, 1, 0, 0);
        s.add("All Good", "older", Some(cutoff - Duration::seconds(1))).unwrap();
        s.add("All Good", "much older", Some(at(2024, 1, 1, 0, 0))).unwrap();
        s.add("All Good", "on cutoff", Some(cutoff)).unwrap();
        s.add("All Good", "newer", Some(cutoff + Duration::hours(1))).unwrap();

        assert_eq!(s.prune_before(&cutoff).unwrap(), 2);
        let left: Vec<String> = s.list_all().unwrap().into_iter().map(|r| r.notes).collect();
        assert_eq!(left, vec!["newer", "on cutoff"]);
        assert_eq!(s.prune_before(&cutoff).unwrap(), 0);
    }

    #[test]
    fn list_between_is_inclusive() {
        let s = store();
        for day in 1..=4 {
            s.add("All Good", "", Some(at(2025, 4, day, 0, 0))).unwrap();
        }
        let r = s
            .list_between(&at(2025, 4, 2, 0, 0), &at(2025, 4, 3, 0, 0), None)
            .unwrap();
        assert_eq!(r.len(), 2);
    }

    #[test]
    fn newer_and_older_checks_are_listed_by_covered_time() {
        let s = store();
        let t1 = at(2025, 9, 2, 9, 0);
        let t0 = at(2025, 9, 1, 9, 0);

        s.add("All Good", "ok", Some(t1)).unwrap();
        assert_eq!(s.count().unwrap(), 1);
        s.add("Issues Found", "x", Some(t0)).unwrap();

        let listed = s.list(10, 0).unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!((listed[0].timestamp, listed[0].outcome.as_str()), (t1, "All Good"));
        assert_eq!((listed[1].timestamp, listed[1].outcome.as_str()), (t0, "Issues Found"));
    }

    #[test]
    fn ids_are_sequential_and_not_reused() {
        let s = store();
        assert_eq!(s.add("All Good", "", None).unwrap(), 1);
        assert_eq!(s.add("All Good", "", None).unwrap(), 2);
        assert!(s.delete(1).unwrap());

        let ids: Vec<i64> = s.list(100, 0).unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2]);
        assert_eq!(s.add("All Good", "", None).unwrap(), 3);
    }

    #[test]
    fn outcome_counts_group_by_label() {
        let s = store();
        s.add("All Good", "", None).unwrap();
        s.add("All Good", "", None).unwrap();
        s.add("No Access", "", None).unwrap();
        assert_eq!(
            s.outcome_counts().unwrap(),
            vec![("All Good".to_string(), 2), ("No Access".to_string(), 1)]
        );
    }
}
