//! Proposals command for listing the catalog.

use std::io::Write;

use anyhow::Result;

use crate::Config;
use crate::commands::util;

pub fn run<W: Write>(writer: &mut W, config: &Config) -> Result<()> {
    let db = util::open_database(config)?;
    let session = util::load_session(&db, config)?;

    if session.catalog().is_empty() {
        writeln!(writer, "No proposals imported.")?;
        return Ok(());
    }

    let set = session.to_schedule_set();
    for proposal in session.catalog() {
        let placement = match set.find_talk(&proposal.id) {
            Some((day, _, _)) => format!("day {}", set.days[day].date),
            None => "unassigned".to_string(),
        };
        writeln!(
            writer,
            "- {} [{} min, {}] {} ({placement})",
            proposal.id,
            proposal.duration_minutes(),
            proposal.status,
            proposal.title,
        )?;
    }
    Ok(())
}
