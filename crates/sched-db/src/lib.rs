//! Storage layer for the program scheduler.
//!
//! Persists the proposal catalog and per-day schedule documents using
//! `rusqlite`.
//!
//! # Thread Safety
//!
//! The [`Database`] type wraps a `rusqlite::Connection`, which is `Send` but
//! not `Sync`. For multi-threaded access, serialize with a `Mutex` or use
//! separate instances per thread.
//!
//! # Schema
//!
//! Proposals are stored one row each; schedule days are stored as one JSON
//! document per date and replaced wholesale on save. There is no partial
//! update: the last full save for a date wins, which is the contract the
//! editing session is built around.
//!
//! Timestamps are stored as TEXT in ISO 8601 format; dates as `YYYY-MM-DD`.

use std::path::Path;

use chrono::{NaiveDate, SecondsFormat, Utc};
use rusqlite::{Connection, params};
use thiserror::Error;

use sched_core::{
    DaySchedule, EditSession, EditWindow, Proposal, ProposalCatalog, ProposalId, ScheduleSet,
    ScheduleStore,
};

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A schedule document failed to encode or decode.
    #[error("invalid schedule document for {date}")]
    Document {
        date: String,
        #[source]
        source: serde_json::Error,
    },

    /// A proposal row held an invalid value.
    #[error("invalid proposal row {id}: {message}")]
    ProposalRow { id: String, message: String },
}

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The database schema is automatically initialized on first open.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection closes.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initializes the database schema.
    ///
    /// This is idempotent - safe to call on an already-initialized database.
    fn init(&self) -> Result<(), DbError> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS proposals (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                format TEXT NOT NULL,
                status TEXT NOT NULL
            );

            -- Days table: one JSON schedule document per conference date
            -- date: 'YYYY-MM-DD'
            -- document: the full day schedule (tracks and entries)
            CREATE TABLE IF NOT EXISTS days (
                date TEXT PRIMARY KEY,
                document TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            ",
        )?;
        Ok(())
    }

    /// Imports proposals, replacing rows with matching ids.
    pub fn import_proposals(&mut self, proposals: &[Proposal]) -> Result<usize, DbError> {
        if proposals.is_empty() {
            return Ok(0);
        }
        let tx = self.conn.transaction()?;
        let mut written = 0;
        {
            let mut stmt = tx.prepare(
                "
                INSERT OR REPLACE INTO proposals (id, title, format, status)
                VALUES (?, ?, ?, ?)
                ",
            )?;
            for proposal in proposals {
                written += stmt.execute(params![
                    proposal.id.as_str(),
                    proposal.title,
                    proposal.format.as_str(),
                    proposal.status.as_str(),
                ])?;
            }
        }
        tx.commit()?;
        tracing::debug!(count = written, "proposals imported");
        Ok(written)
    }

    /// Lists the proposal catalog in id order.
    pub fn list_proposals(&self) -> Result<Vec<Proposal>, DbError> {
        let mut stmt = self.conn.prepare(
            "
            SELECT id, title, format, status
            FROM proposals
            ORDER BY id ASC
            ",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
            ))
        })?;

        let mut proposals = Vec::new();
        for row in rows {
            let (id, title, format, status) = row?;
            let proposal = Proposal {
                id: ProposalId::new(&id).map_err(|e| DbError::ProposalRow {
                    id: id.clone(),
                    message: e.to_string(),
                })?,
                title,
                format: format.parse().map_err(|e: sched_core::ValidationError| {
                    DbError::ProposalRow {
                        id: id.clone(),
                        message: e.to_string(),
                    }
                })?,
                status: status.parse().map_err(|e: sched_core::ValidationError| {
                    DbError::ProposalRow {
                        id: id.clone(),
                        message: e.to_string(),
                    }
                })?,
            };
            proposals.push(proposal);
        }
        Ok(proposals)
    }

    /// Creates an empty schedule document for a date if none exists.
    ///
    /// Returns whether a new day was created.
    pub fn create_day(&mut self, date: NaiveDate) -> Result<bool, DbError> {
        let day = DaySchedule::new(date);
        let document = encode_document(&day)?;
        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO days (date, document, updated_at) VALUES (?, ?, ?)",
            params![date.to_string(), document, now_timestamp()],
        )?;
        Ok(inserted > 0)
    }

    /// Replaces one day's schedule document wholesale.
    pub fn replace_day(&mut self, day: &DaySchedule) -> Result<(), DbError> {
        let document = encode_document(day)?;
        self.conn.execute(
            "INSERT OR REPLACE INTO days (date, document, updated_at) VALUES (?, ?, ?)",
            params![day.date.to_string(), document, now_timestamp()],
        )?;
        tracing::debug!(date = %day.date, "day schedule saved");
        Ok(())
    }

    /// Loads one day's schedule, if stored.
    pub fn load_day(&self, date: NaiveDate) -> Result<Option<DaySchedule>, DbError> {
        let mut stmt = self
            .conn
            .prepare("SELECT document FROM days WHERE date = ?")?;
        let mut rows = stmt.query(params![date.to_string()])?;
        match rows.next()? {
            Some(row) => {
                let document: String = row.get(0)?;
                Ok(Some(decode_document(&date.to_string(), &document)?))
            }
            None => Ok(None),
        }
    }

    /// Loads every stored day in date order.
    pub fn load_days(&self) -> Result<Vec<DaySchedule>, DbError> {
        let mut stmt = self
            .conn
            .prepare("SELECT date, document FROM days ORDER BY date ASC")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut days = Vec::new();
        for row in rows {
            let (date, document) = row?;
            days.push(decode_document(&date, &document)?);
        }
        Ok(days)
    }

    /// Assembles an editing session from everything stored.
    ///
    /// The unassigned pool is derived: every catalog proposal not placed on
    /// any stored day.
    pub fn load_session(&self, window: EditWindow) -> Result<EditSession, DbError> {
        let catalog = ProposalCatalog::new(self.list_proposals()?);
        let set = ScheduleSet::from_catalog(self.load_days()?, &catalog);
        Ok(EditSession::new(set, catalog, window))
    }
}

impl ScheduleStore for Database {
    type Error = DbError;

    /// Whole-day replace; echoes the canonical re-parse of what was written.
    fn save_day(&mut self, day: &DaySchedule) -> Result<Option<DaySchedule>, Self::Error> {
        self.replace_day(day)?;
        self.load_day(day.date)
    }
}

fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn encode_document(day: &DaySchedule) -> Result<String, DbError> {
    serde_json::to_string(day).map_err(|source| DbError::Document {
        date: day.date.to_string(),
        source,
    })
}

fn decode_document(date: &str, document: &str) -> Result<DaySchedule, DbError> {
    serde_json::from_str(document).map_err(|source| DbError::Document {
        date: date.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sched_core::{
        Interval, ProposalStatus, ScheduledEntry, TalkFormat, TimeOfDay, Track, TrackId,
    };

    fn t(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    fn iv(start: &str, end: &str) -> Interval {
        Interval::new(t(start), t(end)).unwrap()
    }

    fn pid(id: &str) -> ProposalId {
        ProposalId::new(id).unwrap()
    }

    fn proposal(id: &str, format: TalkFormat) -> Proposal {
        Proposal {
            id: pid(id),
            title: format!("Talk {id}"),
            format,
            status: ProposalStatus::Confirmed,
        }
    }

    fn sample_day() -> DaySchedule {
        let mut day = DaySchedule::new(NaiveDate::from_ymd_opt(2026, 9, 14).unwrap());
        let mut track = Track::new(TrackId::new("main").unwrap(), "Main Hall", "Ground floor");
        track.insert_sorted(ScheduledEntry::talk(pid("p1"), iv("09:00", "09:45")));
        track.insert_sorted(ScheduledEntry::service("Coffee".into(), iv("09:45", "10:00")));
        day.tracks.push(track);
        day
    }

    #[test]
    fn open_database_on_disk() {
        let temp = tempfile::tempdir().unwrap();
        let db = Database::open(&temp.path().join("sched.db"));
        assert!(db.is_ok());
    }

    #[test]
    fn day_document_roundtrip() {
        let mut db = Database::open_in_memory().unwrap();
        let day = sample_day();
        db.replace_day(&day).unwrap();

        let loaded = db.load_day(day.date).unwrap().unwrap();
        assert_eq!(loaded, day);
        assert!(db
            .load_day(NaiveDate::from_ymd_opt(2026, 9, 15).unwrap())
            .unwrap()
            .is_none());
    }

    #[test]
    fn replace_day_is_last_write_wins() {
        let mut db = Database::open_in_memory().unwrap();
        let mut day = sample_day();
        db.replace_day(&day).unwrap();

        day.tracks[0].entries.clear();
        db.replace_day(&day).unwrap();

        let loaded = db.load_day(day.date).unwrap().unwrap();
        assert!(loaded.tracks[0].entries.is_empty());
    }

    #[test]
    fn create_day_is_idempotent() {
        let mut db = Database::open_in_memory().unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 9, 14).unwrap();
        assert!(db.create_day(date).unwrap());
        assert!(!db.create_day(date).unwrap());
        assert_eq!(db.load_days().unwrap().len(), 1);
    }

    #[test]
    fn create_day_does_not_clobber_a_saved_schedule() {
        let mut db = Database::open_in_memory().unwrap();
        let day = sample_day();
        db.replace_day(&day).unwrap();
        assert!(!db.create_day(day.date).unwrap());
        assert_eq!(db.load_day(day.date).unwrap().unwrap(), day);
    }

    #[test]
    fn import_replaces_matching_proposals() {
        let mut db = Database::open_in_memory().unwrap();
        db.import_proposals(&[proposal("p1", TalkFormat::Short)])
            .unwrap();
        db.import_proposals(&[proposal("p1", TalkFormat::Standard)])
            .unwrap();

        let listed = db.list_proposals().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].format, TalkFormat::Standard);
    }

    #[test]
    fn load_days_orders_by_date() {
        let mut db = Database::open_in_memory().unwrap();
        db.create_day(NaiveDate::from_ymd_opt(2026, 9, 15).unwrap())
            .unwrap();
        db.create_day(NaiveDate::from_ymd_opt(2026, 9, 14).unwrap())
            .unwrap();

        let dates: Vec<String> = db
            .load_days()
            .unwrap()
            .iter()
            .map(|d| d.date.to_string())
            .collect();
        assert_eq!(dates, ["2026-09-14", "2026-09-15"]);
    }

    #[test]
    fn load_session_derives_the_pool() {
        let mut db = Database::open_in_memory().unwrap();
        db.import_proposals(&[
            proposal("p1", TalkFormat::Standard),
            proposal("p2", TalkFormat::Short),
        ])
        .unwrap();
        db.replace_day(&sample_day()).unwrap();

        let session = db.load_session(EditWindow::default()).unwrap();
        assert_eq!(session.unassigned(), [pid("p2")]);
        assert_eq!(
            session.current_day().unwrap().find_talk(&pid("p1")),
            Some((0, 0))
        );
    }

    #[test]
    fn schedule_store_echoes_the_canonical_document() {
        let mut db = Database::open_in_memory().unwrap();
        let day = sample_day();
        let echo = ScheduleStore::save_day(&mut db, &day).unwrap();
        assert_eq!(echo, Some(day));
    }

    #[test]
    fn corrupt_document_is_reported() {
        let mut db = Database::open_in_memory().unwrap();
        db.conn
            .execute(
                "INSERT INTO days (date, document, updated_at) VALUES (?, ?, ?)",
                params!["2026-09-14", "{not json", now_timestamp()],
            )
            .unwrap();
        assert!(matches!(
            db.load_days().unwrap_err(),
            DbError::Document { .. }
        ));
    }
}
