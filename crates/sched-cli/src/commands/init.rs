//! Init command for creating the database.

use std::io::Write;

use anyhow::Result;

use crate::Config;
use crate::commands::util;

pub fn run<W: Write>(writer: &mut W, config: &Config) -> Result<()> {
    let _db = util::open_database(config)?;
    writeln!(
        writer,
        "Initialized database at {}",
        config.database_path.display()
    )?;
    Ok(())
}
