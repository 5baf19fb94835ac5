//! Day management commands.

use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;

use crate::Config;
use crate::commands::util;

pub fn add<W: Write>(writer: &mut W, config: &Config, date: NaiveDate) -> Result<()> {
    let mut db = util::open_database(config)?;
    if db.create_day(date)? {
        writeln!(writer, "Added day {date}")?;
    } else {
        writeln!(writer, "Day {date} already exists")?;
    }
    Ok(())
}

pub fn list<W: Write>(writer: &mut W, config: &Config) -> Result<()> {
    let db = util::open_database(config)?;
    let days = db.load_days()?;

    if days.is_empty() {
        writeln!(writer, "No days stored.")?;
        return Ok(());
    }

    for day in days {
        let entries: usize = day.tracks.iter().map(|t| t.entries.len()).sum();
        writeln!(
            writer,
            "- {}: {} tracks, {} entries",
            day.date,
            day.tracks.len(),
            entries
        )?;
    }
    Ok(())
}
