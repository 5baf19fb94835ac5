//! Track management commands.

use std::io::Write;

use anyhow::Result;
use uuid::Uuid;

use sched_core::{EditCommand, Track, TrackId};

use crate::cli::TrackAction;
use crate::commands::util;
use crate::Config;

pub fn run<W: Write>(writer: &mut W, config: &Config, action: &TrackAction) -> Result<()> {
    let mut db = util::open_database(config)?;
    match action {
        TrackAction::Add {
            date,
            title,
            description,
        } => {
            let id = TrackId::new(Uuid::new_v4().to_string())?;
            let track = Track::new(id, title.clone(), description.clone());
            util::apply_and_save(&mut db, config, *date, EditCommand::AddTrack { track })?;
            writeln!(writer, "Added track \"{title}\" to {date}")?;
        }
        TrackAction::Rename {
            date,
            track,
            title,
            description,
        } => {
            util::apply_and_save(
                &mut db,
                config,
                *date,
                EditCommand::RenameTrack {
                    track: *track,
                    title: title.clone(),
                    description: description.clone(),
                },
            )?;
            writeln!(writer, "Renamed track {track} on {date} to \"{title}\"")?;
        }
        TrackAction::Remove { date, track } => {
            util::apply_and_save(
                &mut db,
                config,
                *date,
                EditCommand::RemoveTrack { track: *track },
            )?;
            writeln!(writer, "Removed track {track} from {date}")?;
        }
    }
    Ok(())
}
