//! Invariant checks over schedules and the conference set.
//!
//! Detects:
//! - Overlapping entries within a track
//! - Entries outside the editing window
//! - Duplicate track ids within a day
//! - A proposal placed more than once across the conference
//! - Placement/pool exclusivity breaks against the catalog
//!
//! All violations are collected, not just the first.

use std::collections::HashSet;

use crate::proposal::ProposalCatalog;
use crate::schedule::{DaySchedule, ScheduleSet};
use crate::time::EditWindow;

/// Validation result.
pub type CheckResult = Result<(), Vec<Violation>>;

/// A detected invariant violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Violation category.
    pub kind: ViolationKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of invariant violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    /// Two entries on one track overlap in time.
    OverlappingEntries,
    /// An entry lies outside the editing window.
    OutsideWindow,
    /// Two tracks in one day share an id.
    DuplicateTrackId,
    /// A proposal is placed in more than one entry.
    DuplicatePlacement,
    /// A placed proposal also sits in the unassigned pool.
    PlacedAndPooled,
    /// A catalog proposal is neither placed nor pooled.
    MissingProposal,
    /// A pooled or placed proposal is not in the catalog.
    UnknownProposal,
}

impl Violation {
    fn new(kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Checks one day's structural invariants.
pub fn check_day(day: &DaySchedule, window: EditWindow) -> CheckResult {
    let mut violations = Vec::new();
    collect_day(day, window, &mut violations);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

/// Checks the whole conference set against the catalog.
///
/// Runs every per-day check plus the cross-day placement/pool invariants.
pub fn check_set(set: &ScheduleSet, catalog: &ProposalCatalog, window: EditWindow) -> CheckResult {
    let mut violations = Vec::new();

    for day in &set.days {
        collect_day(day, window, &mut violations);
    }

    // A proposal may appear in at most one entry across the conference
    let mut placed = HashSet::new();
    for day in &set.days {
        for id in day.placed_proposals() {
            if !placed.insert(id.clone()) {
                violations.push(Violation::new(
                    ViolationKind::DuplicatePlacement,
                    format!("proposal {id} is placed more than once"),
                ));
            }
            if !catalog.contains(id) {
                violations.push(Violation::new(
                    ViolationKind::UnknownProposal,
                    format!("placed proposal {id} is not in the catalog"),
                ));
            }
        }
    }

    for id in &set.unassigned {
        if placed.contains(id) {
            violations.push(Violation::new(
                ViolationKind::PlacedAndPooled,
                format!("proposal {id} is both placed and unassigned"),
            ));
        }
        if !catalog.contains(id) {
            violations.push(Violation::new(
                ViolationKind::UnknownProposal,
                format!("unassigned proposal {id} is not in the catalog"),
            ));
        }
    }

    let pooled: HashSet<_> = set.unassigned.iter().cloned().collect();
    for proposal in catalog {
        if !placed.contains(&proposal.id) && !pooled.contains(&proposal.id) {
            violations.push(Violation::new(
                ViolationKind::MissingProposal,
                format!("proposal {} is neither placed nor unassigned", proposal.id),
            ));
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

fn collect_day(day: &DaySchedule, window: EditWindow, violations: &mut Vec<Violation>) {
    let mut track_ids = HashSet::new();
    for track in &day.tracks {
        if !track_ids.insert(track.id.clone()) {
            violations.push(Violation::new(
                ViolationKind::DuplicateTrackId,
                format!("{}: duplicate track id {}", day.date, track.id),
            ));
        }

        for (i, entry) in track.entries.iter().enumerate() {
            if !window.contains(entry.interval) {
                violations.push(Violation::new(
                    ViolationKind::OutsideWindow,
                    format!(
                        "{} track {}: entry {} is outside the editing window",
                        day.date, track.id, entry.interval
                    ),
                ));
            }
            for other in &track.entries[i + 1..] {
                if entry.interval.overlaps(other.interval) {
                    violations.push(Violation::new(
                        ViolationKind::OverlappingEntries,
                        format!(
                            "{} track {}: {} overlaps {}",
                            day.date, track.id, entry.interval, other.interval
                        ),
                    ));
                }
            }
        }
    }
}
