//! Slot command for querying the nearest available start.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use sched_core::{TimeOfDay, find_available_slot};

use crate::Config;
use crate::commands::util;

pub fn run<W: Write>(
    writer: &mut W,
    config: &Config,
    date: NaiveDate,
    track: usize,
    duration: u16,
    near: TimeOfDay,
) -> Result<()> {
    let db = util::open_database(config)?;
    let session = util::load_session(&db, config)?;
    let day = session
        .days()
        .find(|d| d.date == date)
        .with_context(|| format!("no schedule for {date}"))?;
    let timeline = day
        .track(track)
        .with_context(|| format!("no track at index {track}"))?;

    match find_available_slot(timeline, duration, near, None, session.window()) {
        Some(start) => writeln!(writer, "Nearest available start: {start}")?,
        None => writeln!(writer, "No slot available for {duration} minutes")?,
    }
    Ok(())
}
