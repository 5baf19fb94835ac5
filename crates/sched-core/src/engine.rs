//! Mutation operations over a day schedule.
//!
//! Every operation takes the current [`DaySchedule`] by reference and
//! returns either a new schedule value or an [`EditError`]. Failures never
//! leave a partially mutated schedule; callers treat them as no-ops.
//!
//! Placements validate the *exact* requested start. A conflicting exact
//! placement is reported as [`EditError::SlotConflict`], never silently
//! relocated; nearest-slot search is the caller's decision via
//! [`crate::slot::find_available_slot`].

use thiserror::Error;

use crate::entry::{ScheduledEntry, ServiceDuration, SlotItem};
use crate::proposal::Proposal;
use crate::schedule::{DaySchedule, Track};
use crate::slot::has_conflict;
use crate::time::{EditWindow, Interval, TimeOfDay};
use crate::types::{ProposalId, TrackId};

/// Why an edit was rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EditError {
    /// The requested slot overlaps an existing entry.
    #[error("the requested slot conflicts with an existing entry")]
    SlotConflict,

    /// The requested interval does not fit inside the editing window.
    #[error("the requested slot does not fit inside the editing window")]
    OutsideWindow,

    /// No track at the given index.
    #[error("no track at index {index}")]
    UnknownTrack { index: usize },

    /// No entry at the given index.
    #[error("no entry at index {index}")]
    UnknownEntry { index: usize },

    /// A service-session operation was aimed at a talk entry.
    #[error("entry at index {index} is not a service session")]
    NotAService { index: usize },

    /// Empty service label or track title.
    #[error("{field} cannot be empty")]
    EmptyField { field: &'static str },

    /// A track with this id already exists on the day.
    #[error("track {id} already exists")]
    DuplicateTrack { id: TrackId },

    /// The proposal is not in the catalog.
    #[error("unknown proposal {id}")]
    UnknownProposal { id: ProposalId },
}

/// Result of the best-effort service-session fan-out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FanOut {
    /// The schedule with the copies inserted.
    pub schedule: DaySchedule,
    /// Tracks skipped because the interval conflicted there.
    pub skipped: Vec<TrackId>,
}

fn track_at(schedule: &DaySchedule, index: usize) -> Result<&Track, EditError> {
    schedule
        .track(index)
        .ok_or(EditError::UnknownTrack { index })
}

/// Builds and window-checks the interval for an exact placement.
fn exact_interval(
    start: TimeOfDay,
    duration_minutes: u16,
    window: EditWindow,
) -> Result<Interval, EditError> {
    let candidate =
        Interval::with_duration(start, duration_minutes).ok_or(EditError::OutsideWindow)?;
    if !window.contains(candidate) {
        return Err(EditError::OutsideWindow);
    }
    Ok(candidate)
}

/// Places `proposal` at exactly `start` in the target track.
///
/// Any prior entry for the same proposal on this day is removed first, which
/// is also what makes a same-track move self-excluding: the talk cannot
/// conflict with the slot it is leaving. On failure the input schedule is
/// untouched and the talk stays wherever it was.
pub fn place_talk(
    schedule: &DaySchedule,
    proposal: &Proposal,
    track: usize,
    start: TimeOfDay,
    window: EditWindow,
) -> Result<DaySchedule, EditError> {
    track_at(schedule, track)?;
    let candidate = exact_interval(start, proposal.duration_minutes(), window)?;

    let mut next = schedule.clone();
    if let Some((ti, ei)) = next.find_talk(&proposal.id) {
        next.tracks[ti].entries.remove(ei);
    }
    if has_conflict(&next.tracks[track], candidate, None) {
        return Err(EditError::SlotConflict);
    }
    next.tracks[track].insert_sorted(ScheduledEntry::talk(proposal.id.clone(), candidate));
    Ok(next)
}

/// Moves an existing service session to a new track/start.
pub fn move_service(
    schedule: &DaySchedule,
    source_track: usize,
    entry: usize,
    target_track: usize,
    start: TimeOfDay,
    window: EditWindow,
) -> Result<DaySchedule, EditError> {
    let source = track_at(schedule, source_track)?;
    track_at(schedule, target_track)?;
    let current = source
        .entry(entry)
        .ok_or(EditError::UnknownEntry { index: entry })?;
    if !current.is_service() {
        return Err(EditError::NotAService { index: entry });
    }
    let candidate = exact_interval(start, current.interval.duration_minutes(), window)?;

    let mut next = schedule.clone();
    let moved = next.tracks[source_track].entries.remove(entry);
    if has_conflict(&next.tracks[target_track], candidate, None) {
        return Err(EditError::SlotConflict);
    }
    next.tracks[target_track].insert_sorted(ScheduledEntry {
        item: moved.item,
        interval: candidate,
    });
    Ok(next)
}

/// Creates a new service session at exactly `start`.
pub fn create_service(
    schedule: &DaySchedule,
    track: usize,
    label: &str,
    duration: ServiceDuration,
    start: TimeOfDay,
    window: EditWindow,
) -> Result<DaySchedule, EditError> {
    if label.trim().is_empty() {
        return Err(EditError::EmptyField { field: "label" });
    }
    let target = track_at(schedule, track)?;
    let candidate = exact_interval(start, duration.minutes(), window)?;
    if has_conflict(target, candidate, None) {
        return Err(EditError::SlotConflict);
    }

    let mut next = schedule.clone();
    next.tracks[track].insert_sorted(ScheduledEntry::service(label.to_string(), candidate));
    Ok(next)
}

/// Resizes a service session to a new requested duration.
///
/// The duration is clamped to 5-180 minutes, rounded to the nearest 5-minute
/// step, and capped so the entry stays inside the window. Neighbor conflicts
/// are not re-checked: the interactive caller clamps the input, matching the
/// editor's resize behavior.
pub fn resize_service(
    schedule: &DaySchedule,
    track: usize,
    entry: usize,
    requested_minutes: u16,
    window: EditWindow,
) -> Result<DaySchedule, EditError> {
    let current = track_at(schedule, track)?
        .entry(entry)
        .ok_or(EditError::UnknownEntry { index: entry })?;
    if !current.is_service() {
        return Err(EditError::NotAService { index: entry });
    }

    let start = current.interval.start();
    let clamped = ServiceDuration::clamped(requested_minutes).minutes();
    let room = start.minutes_until(window.end());
    let fitted = clamped.min(u16::try_from(room).unwrap_or(0));
    let interval = Interval::with_duration(start, fitted).ok_or(EditError::OutsideWindow)?;

    let mut next = schedule.clone();
    next.tracks[track].entries[entry].interval = interval;
    next.tracks[track].sort_entries();
    Ok(next)
}

/// Replaces a service session's label.
pub fn rename_service(
    schedule: &DaySchedule,
    track: usize,
    entry: usize,
    label: &str,
) -> Result<DaySchedule, EditError> {
    if label.trim().is_empty() {
        return Err(EditError::EmptyField { field: "label" });
    }
    let current = track_at(schedule, track)?
        .entry(entry)
        .ok_or(EditError::UnknownEntry { index: entry })?;
    if !current.is_service() {
        return Err(EditError::NotAService { index: entry });
    }

    let mut next = schedule.clone();
    next.tracks[track].entries[entry].item = SlotItem::Service {
        label: label.to_string(),
    };
    Ok(next)
}

/// Removes an entry by position.
///
/// Returns the evicted proposal id when the entry was a talk, so the caller
/// can put it back in the unassigned pool.
pub fn remove_entry(
    schedule: &DaySchedule,
    track: usize,
    entry: usize,
) -> Result<(DaySchedule, Option<ProposalId>), EditError> {
    track_at(schedule, track)?
        .entry(entry)
        .ok_or(EditError::UnknownEntry { index: entry })?;

    let mut next = schedule.clone();
    let removed = next.tracks[track].entries.remove(entry);
    Ok((next, removed.proposal_id().cloned()))
}

/// Copies a service session into every *other* track of the day.
///
/// Best-effort fan-out: each target track is tried independently, and a
/// track whose timeline conflicts with the interval is skipped rather than
/// failing the operation. The skipped track ids are reported.
pub fn duplicate_service_to_all(
    schedule: &DaySchedule,
    track: usize,
    entry: usize,
) -> Result<FanOut, EditError> {
    let source = track_at(schedule, track)?
        .entry(entry)
        .ok_or(EditError::UnknownEntry { index: entry })?;
    if !source.is_service() {
        return Err(EditError::NotAService { index: entry });
    }
    let copy = source.clone();

    let mut next = schedule.clone();
    let mut skipped = Vec::new();
    for (ti, target) in next.tracks.iter_mut().enumerate() {
        if ti == track {
            continue;
        }
        if has_conflict(target, copy.interval, None) {
            skipped.push(target.id.clone());
        } else {
            target.insert_sorted(copy.clone());
        }
    }
    Ok(FanOut {
        schedule: next,
        skipped,
    })
}

/// Appends a track to the day.
pub fn add_track(schedule: &DaySchedule, track: Track) -> Result<DaySchedule, EditError> {
    if track.title.trim().is_empty() {
        return Err(EditError::EmptyField { field: "title" });
    }
    if schedule.track_index(&track.id).is_some() {
        return Err(EditError::DuplicateTrack { id: track.id });
    }
    let mut next = schedule.clone();
    next.tracks.push(track);
    Ok(next)
}

/// Removes a track, returning the talks it held for pool return.
pub fn remove_track(
    schedule: &DaySchedule,
    track: usize,
) -> Result<(DaySchedule, Vec<ProposalId>), EditError> {
    track_at(schedule, track)?;
    let mut next = schedule.clone();
    let removed = next.tracks.remove(track);
    let evicted = removed
        .entries
        .iter()
        .filter_map(|e| e.proposal_id().cloned())
        .collect();
    Ok((next, evicted))
}

/// Replaces a track's title and description.
pub fn rename_track(
    schedule: &DaySchedule,
    track: usize,
    title: &str,
    description: &str,
) -> Result<DaySchedule, EditError> {
    if title.trim().is_empty() {
        return Err(EditError::EmptyField { field: "title" });
    }
    track_at(schedule, track)?;
    let mut next = schedule.clone();
    next.tracks[track].title = title.to_string();
    next.tracks[track].description = description.to_string();
    Ok(next)
}
