//! Show command for printing a day's schedule.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use sched_core::SlotItem;

use crate::Config;
use crate::commands::util;

pub fn run<W: Write>(writer: &mut W, config: &Config, date: NaiveDate) -> Result<()> {
    let db = util::open_database(config)?;
    let session = util::load_session(&db, config)?;
    let day = session
        .days()
        .find(|d| d.date == date)
        .with_context(|| format!("no schedule for {date}"))?;

    writeln!(writer, "{date}")?;
    if day.tracks.is_empty() {
        writeln!(writer, "  (no tracks)")?;
    }
    for track in &day.tracks {
        if track.description.is_empty() {
            writeln!(writer, "  {}", track.title)?;
        } else {
            writeln!(writer, "  {} ({})", track.title, track.description)?;
        }
        if track.entries.is_empty() {
            writeln!(writer, "    (empty)")?;
        }
        for entry in &track.entries {
            let text = match &entry.item {
                SlotItem::Talk { talk } => session
                    .catalog()
                    .get(talk)
                    .map_or_else(|| talk.to_string(), |p| p.title.clone()),
                SlotItem::Service { label } => label.clone(),
            };
            writeln!(writer, "    {}  {text}", entry.interval)?;
        }
    }

    if !session.unassigned().is_empty() {
        writeln!(writer, "Unassigned:")?;
        for id in session.unassigned() {
            let title = session
                .catalog()
                .get(id)
                .map_or_else(|| id.to_string(), |p| p.title.clone());
            writeln!(writer, "  - {title}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sched_core::{
        DaySchedule, EditWindow, Interval, Proposal, ProposalId, ProposalStatus, ScheduledEntry,
        TalkFormat, Track, TrackId,
    };
    use sched_db::Database;

    #[test]
    fn renders_tracks_and_pool() {
        let temp = tempfile::tempdir().unwrap();
        let db_path = temp.path().join("sched.db");
        let mut db = Database::open(&db_path).unwrap();

        db.import_proposals(&[
            Proposal {
                id: ProposalId::new("p1").unwrap(),
                title: "Borrowed Time".into(),
                format: TalkFormat::Standard,
                status: ProposalStatus::Confirmed,
            },
            Proposal {
                id: ProposalId::new("p2").unwrap(),
                title: "Lifetimes in Anger".into(),
                format: TalkFormat::Short,
                status: ProposalStatus::Accepted,
            },
        ])
        .unwrap();

        let date = chrono::NaiveDate::from_ymd_opt(2026, 9, 14).unwrap();
        let mut day = DaySchedule::new(date);
        let mut track = Track::new(TrackId::new("main").unwrap(), "Main Hall", "");
        track.insert_sorted(ScheduledEntry::talk(
            ProposalId::new("p1").unwrap(),
            Interval::new("09:00".parse().unwrap(), "09:45".parse().unwrap()).unwrap(),
        ));
        day.tracks.push(track);
        db.replace_day(&day).unwrap();

        let window = EditWindow::default();
        let config = Config {
            database_path: db_path,
            day_start: window.start(),
            day_end: window.end(),
        };

        let mut output = Vec::new();
        run(&mut output, &config, date).unwrap();
        let output = String::from_utf8(output).unwrap();

        assert!(output.contains("Main Hall"));
        assert!(output.contains("09:00-09:45  Borrowed Time"));
        assert!(output.contains("Unassigned:"));
        assert!(output.contains("Lifetimes in Anger"));
    }
}
