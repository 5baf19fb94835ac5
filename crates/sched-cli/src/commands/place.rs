//! Place command for scheduling a talk at an exact start.

use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;

use sched_core::{EditCommand, ProposalId, TimeOfDay};

use crate::Config;
use crate::commands::util;

pub fn run<W: Write>(
    writer: &mut W,
    config: &Config,
    proposal: &str,
    date: NaiveDate,
    track: usize,
    at: TimeOfDay,
) -> Result<()> {
    let id = ProposalId::new(proposal)?;
    let mut db = util::open_database(config)?;
    util::apply_and_save(
        &mut db,
        config,
        date,
        EditCommand::PlaceTalk {
            proposal: id,
            track,
            start: at,
        },
    )?;
    writeln!(writer, "Placed {proposal} at {at} on {date} (track {track})")?;
    Ok(())
}
