//! Import command for loading the proposal catalog.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use sched_core::Proposal;

use crate::Config;
use crate::commands::util;

pub fn run<W: Write>(writer: &mut W, config: &Config, file: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let proposals: Vec<Proposal> = serde_json::from_str(&raw)
        .with_context(|| format!("invalid proposal catalog in {}", file.display()))?;

    let mut db = util::open_database(config)?;
    let written = db.import_proposals(&proposals)?;
    writeln!(writer, "Imported {written} proposals")?;
    Ok(())
}
