//! Validate command for checking schedule invariants.

use std::io::Write;

use anyhow::Result;

use sched_core::validate::check_set;

use crate::Config;
use crate::commands::util;

pub fn run<W: Write>(writer: &mut W, config: &Config) -> Result<()> {
    let db = util::open_database(config)?;
    let session = util::load_session(&db, config)?;
    let set = session.to_schedule_set();

    match check_set(&set, session.catalog(), session.window()) {
        Ok(()) => {
            writeln!(
                writer,
                "OK: {} days, {} proposals, {} unassigned",
                set.days.len(),
                session.catalog().len(),
                set.unassigned.len()
            )?;
            Ok(())
        }
        Err(violations) => {
            for violation in &violations {
                writeln!(writer, "- {}", violation.message)?;
            }
            anyhow::bail!("{} invariant violation(s)", violations.len())
        }
    }
}
