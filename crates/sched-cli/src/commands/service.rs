//! Service session commands.

use std::io::Write;

use anyhow::Result;

use sched_core::{EditCommand, ServiceDuration};

use crate::Config;
use crate::cli::ServiceAction;
use crate::commands::util;

pub fn run<W: Write>(writer: &mut W, config: &Config, action: &ServiceAction) -> Result<()> {
    let mut db = util::open_database(config)?;
    match action {
        ServiceAction::Add {
            date,
            track,
            label,
            at,
            duration,
        } => {
            let duration = ServiceDuration::new(*duration)?;
            util::apply_and_save(
                &mut db,
                config,
                *date,
                EditCommand::CreateService {
                    track: *track,
                    label: label.clone(),
                    duration,
                    start: *at,
                },
            )?;
            writeln!(writer, "Added \"{label}\" at {at} on {date} (track {track})")?;
        }
        ServiceAction::Move {
            date,
            track,
            entry,
            to_track,
            at,
        } => {
            util::apply_and_save(
                &mut db,
                config,
                *date,
                EditCommand::MoveService {
                    source_track: *track,
                    entry: *entry,
                    target_track: *to_track,
                    start: *at,
                },
            )?;
            writeln!(writer, "Moved entry {entry} to {at} on {date} (track {to_track})")?;
        }
        ServiceAction::Resize {
            date,
            track,
            entry,
            minutes,
        } => {
            util::apply_and_save(
                &mut db,
                config,
                *date,
                EditCommand::ResizeService {
                    track: *track,
                    entry: *entry,
                    minutes: *minutes,
                },
            )?;
            writeln!(writer, "Resized entry {entry} on {date} (track {track})")?;
        }
        ServiceAction::Rename {
            date,
            track,
            entry,
            label,
        } => {
            util::apply_and_save(
                &mut db,
                config,
                *date,
                EditCommand::RenameService {
                    track: *track,
                    entry: *entry,
                    label: label.clone(),
                },
            )?;
            writeln!(writer, "Renamed entry {entry} to \"{label}\" on {date}")?;
        }
        ServiceAction::Duplicate { date, track, entry } => {
            let report = util::apply_and_save(
                &mut db,
                config,
                *date,
                EditCommand::DuplicateService {
                    track: *track,
                    entry: *entry,
                },
            )?;
            writeln!(writer, "Copied entry {entry} to all other tracks on {date}")?;
            for skipped in &report.skipped_tracks {
                writeln!(writer, "  skipped track {skipped}: conflict")?;
            }
        }
    }
    Ok(())
}
