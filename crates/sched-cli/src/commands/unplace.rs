//! Unplace command for removing an entry from a track.

use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;

use sched_core::EditCommand;

use crate::Config;
use crate::commands::util;

pub fn run<W: Write>(
    writer: &mut W,
    config: &Config,
    date: NaiveDate,
    track: usize,
    entry: usize,
) -> Result<()> {
    let mut db = util::open_database(config)?;
    util::apply_and_save(&mut db, config, date, EditCommand::RemoveEntry { track, entry })?;
    writeln!(writer, "Removed entry {entry} from track {track} on {date}")?;
    Ok(())
}
