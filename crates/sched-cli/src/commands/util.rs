//! Shared helpers for subcommands.

use anyhow::{Context, Result};
use chrono::NaiveDate;

use sched_core::{EditCommand, EditReport, EditSession, SyncState};
use sched_db::Database;

use crate::Config;

/// Opens the configured database, creating its parent directory.
pub fn open_database(config: &Config) -> Result<Database> {
    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }
    Database::open(&config.database_path)
        .with_context(|| format!("failed to open {}", config.database_path.display()))
}

/// Loads the editing session from everything stored.
pub fn load_session(db: &Database, config: &Config) -> Result<EditSession> {
    let window = config
        .window()
        .context("invalid day window in configuration")?;
    db.load_session(window)
        .context("failed to load schedule state")
}

/// Applies one edit to the given day and saves that day back.
pub fn apply_and_save(
    db: &mut Database,
    config: &Config,
    date: NaiveDate,
    command: EditCommand,
) -> Result<EditReport> {
    let mut session = load_session(db, config)?;
    let index = session
        .days()
        .position(|d| d.date == date)
        .with_context(|| format!("no schedule for {date}; run `sched day add {date}` first"))?;
    session.select_day(index)?;
    let report = session.apply(command)?;

    // A cross-day talk move dirties the day it left as well; persist every
    // dirty day so the store never holds a duplicate placement.
    let day_count = session.days().count();
    for index in 0..day_count {
        if session.sync_state(index) == Some(SyncState::Dirty) {
            session.select_day(index)?;
            session.save_with(db)?;
        }
    }
    Ok(report)
}
