//! The editing session: authoritative in-memory state for one operator.
//!
//! One aggregate owns every day's schedule, the unassigned pool, and the
//! per-day sync state, with explicit transition methods. Keeping the pieces
//! together removes the class of bugs where one state slice is updated and
//! a sibling slice is forgotten.
//!
//! The save transport stays outside the core: [`EditSession::begin_save`]
//! hands out a snapshot and marks the day saving, [`EditSession::finish_save`]
//! applies the transport's outcome. Edits to the same day are still accepted
//! while a save is in flight; a second save for that day is refused until
//! the first resolves.

use thiserror::Error;

use crate::engine::{self, EditError};
use crate::entry::ServiceDuration;
use crate::proposal::ProposalCatalog;
use crate::schedule::{DaySchedule, ScheduleSet, Track};
use crate::time::{EditWindow, TimeOfDay};
use crate::types::{ProposalId, TrackId};

/// Per-day synchronization state with the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncState {
    /// In-memory value matches the last loaded/saved document.
    #[default]
    Clean,
    /// Unsaved edits exist.
    Dirty,
    /// A save is in flight; `dirtied` records edits accepted meanwhile.
    Saving { dirtied: bool },
}

/// Session-level failures.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No day is selected (the session holds no days).
    #[error("no day selected")]
    NoDaySelected,

    /// No day at the given index.
    #[error("no day at index {index}")]
    UnknownDay { index: usize },

    /// A save for this day is already in flight.
    #[error("a save for this day is already in flight")]
    SaveInFlight,

    /// `finish_save` was called for a day that was not saving.
    #[error("no save in flight for day {index}")]
    NoSaveInFlight { index: usize },

    /// The store rejected the save; in-memory edits are preserved.
    #[error("save failed: {message}")]
    SaveFailed { message: String },

    /// An edit was rejected by the mutation engine.
    #[error(transparent)]
    Edit(#[from] EditError),
}

/// One user-issued edit, targeting the currently shown day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    /// Place (or move) a talk at an exact start in a track.
    PlaceTalk {
        proposal: ProposalId,
        track: usize,
        start: TimeOfDay,
    },
    /// Move an existing service session to a track/start.
    MoveService {
        source_track: usize,
        entry: usize,
        target_track: usize,
        start: TimeOfDay,
    },
    /// Create a new service session.
    CreateService {
        track: usize,
        label: String,
        duration: ServiceDuration,
        start: TimeOfDay,
    },
    /// Resize a service session to a requested duration in minutes.
    ResizeService {
        track: usize,
        entry: usize,
        minutes: u16,
    },
    /// Replace a service session's label.
    RenameService {
        track: usize,
        entry: usize,
        label: String,
    },
    /// Remove an entry; talks return to the unassigned pool.
    RemoveEntry { track: usize, entry: usize },
    /// Copy a service session into every other track (best-effort).
    DuplicateService { track: usize, entry: usize },
    /// Append a track.
    AddTrack { track: Track },
    /// Remove a track; its talks return to the unassigned pool.
    RemoveTrack { track: usize },
    /// Replace a track's title and description.
    RenameTrack {
        track: usize,
        title: String,
        description: String,
    },
}

/// What a successful edit reported back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditReport {
    /// Tracks skipped by a service-session fan-out.
    pub skipped_tracks: Vec<TrackId>,
}

/// Ticket identifying an in-flight save.
#[derive(Debug)]
pub struct PendingSave {
    day: usize,
}

/// Outcome of the external save transport.
#[derive(Debug, Clone)]
pub enum SaveOutcome {
    /// The store accepted the day, optionally echoing the canonical value.
    Success { canonical: Option<DaySchedule> },
    /// The store rejected the day; edits must survive.
    Failure,
}

/// The save boundary: a whole-day replace, last write wins.
pub trait ScheduleStore {
    type Error: std::error::Error;

    /// Atomically replaces one day's schedule document.
    ///
    /// May return a canonical echo of the saved value for the session to
    /// reconcile server-assigned fields.
    fn save_day(&mut self, day: &DaySchedule) -> Result<Option<DaySchedule>, Self::Error>;
}

struct DayState {
    schedule: DaySchedule,
    sync: SyncState,
}

/// In-memory editing state for one operator session.
pub struct EditSession {
    catalog: ProposalCatalog,
    days: Vec<DayState>,
    unassigned: Vec<ProposalId>,
    current: usize,
    window: EditWindow,
}

impl EditSession {
    /// Creates a session over a loaded schedule set.
    #[must_use]
    pub fn new(set: ScheduleSet, catalog: ProposalCatalog, window: EditWindow) -> Self {
        let days = set
            .days
            .into_iter()
            .map(|schedule| DayState {
                schedule,
                sync: SyncState::Clean,
            })
            .collect();
        Self {
            catalog,
            days,
            unassigned: set.unassigned,
            current: 0,
            window,
        }
    }

    /// The schedule currently shown, if any day exists.
    #[must_use]
    pub fn current_day(&self) -> Option<&DaySchedule> {
        self.days.get(self.current).map(|d| &d.schedule)
    }

    /// Index of the day currently shown.
    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.current
    }

    /// All day schedules in conference order.
    pub fn days(&self) -> impl Iterator<Item = &DaySchedule> {
        self.days.iter().map(|d| &d.schedule)
    }

    /// Proposals not placed in any track of any day.
    #[must_use]
    pub fn unassigned(&self) -> &[ProposalId] {
        &self.unassigned
    }

    #[must_use]
    pub const fn catalog(&self) -> &ProposalCatalog {
        &self.catalog
    }

    #[must_use]
    pub const fn window(&self) -> EditWindow {
        self.window
    }

    /// Sync state for the day at `index`.
    #[must_use]
    pub fn sync_state(&self, index: usize) -> Option<SyncState> {
        self.days.get(index).map(|d| d.sync)
    }

    /// Switches the shown day. Edits on the day being left are retained.
    pub fn select_day(&mut self, index: usize) -> Result<(), SessionError> {
        if index >= self.days.len() {
            return Err(SessionError::UnknownDay { index });
        }
        self.current = index;
        Ok(())
    }

    /// A copy of the full schedule set, for validation or export.
    #[must_use]
    pub fn to_schedule_set(&self) -> ScheduleSet {
        ScheduleSet::new(
            self.days.iter().map(|d| d.schedule.clone()).collect(),
            self.unassigned.clone(),
        )
    }

    /// Applies exactly one edit to the shown day.
    ///
    /// On success the held schedule is replaced and the unassigned pool
    /// reconciled; on failure nothing changes.
    pub fn apply(&mut self, command: EditCommand) -> Result<EditReport, SessionError> {
        if self.days.get(self.current).is_none() {
            return Err(SessionError::NoDaySelected);
        }
        let schedule = &self.days[self.current].schedule;

        let mut report = EditReport::default();
        let (next, pool_returns, placed) = match command {
            EditCommand::PlaceTalk {
                proposal,
                track,
                start,
            } => {
                let p = self
                    .catalog
                    .get(&proposal)
                    .ok_or_else(|| EditError::UnknownProposal {
                        id: proposal.clone(),
                    })?
                    .clone();
                let next = engine::place_talk(schedule, &p, track, start, self.window)?;
                (next, Vec::new(), Some(proposal))
            }
            EditCommand::MoveService {
                source_track,
                entry,
                target_track,
                start,
            } => {
                let next = engine::move_service(
                    schedule,
                    source_track,
                    entry,
                    target_track,
                    start,
                    self.window,
                )?;
                (next, Vec::new(), None)
            }
            EditCommand::CreateService {
                track,
                label,
                duration,
                start,
            } => {
                let next =
                    engine::create_service(schedule, track, &label, duration, start, self.window)?;
                (next, Vec::new(), None)
            }
            EditCommand::ResizeService {
                track,
                entry,
                minutes,
            } => {
                let next = engine::resize_service(schedule, track, entry, minutes, self.window)?;
                (next, Vec::new(), None)
            }
            EditCommand::RenameService {
                track,
                entry,
                label,
            } => {
                let next = engine::rename_service(schedule, track, entry, &label)?;
                (next, Vec::new(), None)
            }
            EditCommand::RemoveEntry { track, entry } => {
                let (next, evicted) = engine::remove_entry(schedule, track, entry)?;
                (next, evicted.into_iter().collect(), None)
            }
            EditCommand::DuplicateService { track, entry } => {
                let fan_out = engine::duplicate_service_to_all(schedule, track, entry)?;
                report.skipped_tracks = fan_out.skipped;
                (fan_out.schedule, Vec::new(), None)
            }
            EditCommand::AddTrack { track } => {
                (engine::add_track(schedule, track)?, Vec::new(), None)
            }
            EditCommand::RemoveTrack { track } => {
                let (next, evicted) = engine::remove_track(schedule, track)?;
                (next, evicted, None)
            }
            EditCommand::RenameTrack {
                track,
                title,
                description,
            } => (
                engine::rename_track(schedule, track, &title, &description)?,
                Vec::new(),
                None,
            ),
        };

        self.commit_current(next);
        for id in pool_returns {
            self.return_to_pool(id);
        }
        if let Some(id) = placed {
            self.note_placed(&id);
        }
        tracing::debug!(day = self.current, "edit applied");
        Ok(report)
    }

    /// Snapshots the shown day for the save transport.
    pub fn begin_save(&mut self) -> Result<(PendingSave, DaySchedule), SessionError> {
        let day = self.current;
        let state = self
            .days
            .get_mut(day)
            .ok_or(SessionError::NoDaySelected)?;
        if matches!(state.sync, SyncState::Saving { .. }) {
            return Err(SessionError::SaveInFlight);
        }
        state.sync = SyncState::Saving { dirtied: false };
        Ok((PendingSave { day }, state.schedule.clone()))
    }

    /// Applies the transport's outcome for a pending save.
    ///
    /// On success the day becomes clean, adopting the canonical echo unless
    /// edits arrived while the save was in flight (those win and the day
    /// stays dirty). On failure the day returns to dirty with every edit
    /// intact.
    pub fn finish_save(
        &mut self,
        pending: PendingSave,
        outcome: SaveOutcome,
    ) -> Result<(), SessionError> {
        let index = pending.day;
        let state = self
            .days
            .get_mut(index)
            .ok_or(SessionError::UnknownDay { index })?;
        let SyncState::Saving { dirtied } = state.sync else {
            return Err(SessionError::NoSaveInFlight { index });
        };

        state.sync = match outcome {
            SaveOutcome::Success { canonical } => {
                if dirtied {
                    SyncState::Dirty
                } else {
                    if let Some(canonical) = canonical {
                        state.schedule = canonical;
                    }
                    SyncState::Clean
                }
            }
            SaveOutcome::Failure => SyncState::Dirty,
        };
        tracing::debug!(day = index, state = ?state.sync, "save finished");
        Ok(())
    }

    /// Runs a full save cycle against a synchronous store.
    pub fn save_with<S: ScheduleStore>(&mut self, store: &mut S) -> Result<(), SessionError> {
        let (pending, snapshot) = self.begin_save()?;
        match store.save_day(&snapshot) {
            Ok(canonical) => self.finish_save(pending, SaveOutcome::Success { canonical }),
            Err(e) => {
                let message = e.to_string();
                self.finish_save(pending, SaveOutcome::Failure)?;
                Err(SessionError::SaveFailed { message })
            }
        }
    }

    fn commit_current(&mut self, next: DaySchedule) {
        let state = &mut self.days[self.current];
        state.schedule = next;
        state.sync = match state.sync {
            SyncState::Clean | SyncState::Dirty => SyncState::Dirty,
            SyncState::Saving { .. } => SyncState::Saving { dirtied: true },
        };
    }

    /// Puts a talk back in the pool, keeping the pool duplicate-free.
    fn return_to_pool(&mut self, id: ProposalId) {
        if self.catalog.contains(&id) && !self.unassigned.contains(&id) {
            self.unassigned.push(id);
        }
    }

    /// Reconciles state after a talk placement: drops the talk from the
    /// pool and from any *other* day it was placed on (a cross-day move).
    fn note_placed(&mut self, id: &ProposalId) {
        self.unassigned.retain(|p| p != id);
        let current = self.current;
        for (di, state) in self.days.iter_mut().enumerate() {
            if di == current {
                continue;
            }
            if let Some((ti, ei)) = state.schedule.find_talk(id) {
                state.schedule.tracks[ti].entries.remove(ei);
                state.sync = match state.sync {
                    SyncState::Clean | SyncState::Dirty => SyncState::Dirty,
                    SyncState::Saving { .. } => SyncState::Saving { dirtied: true },
                };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::ScheduledEntry;
    use crate::proposal::{Proposal, ProposalStatus, TalkFormat};
    use crate::time::Interval;
    use chrono::NaiveDate;

    fn t(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    fn iv(start: &str, end: &str) -> Interval {
        Interval::new(t(start), t(end)).unwrap()
    }

    fn pid(id: &str) -> ProposalId {
        ProposalId::new(id).unwrap()
    }

    fn catalog() -> ProposalCatalog {
        ProposalCatalog::new(vec![
            Proposal {
                id: pid("p1"),
                title: "First".into(),
                format: TalkFormat::Standard,
                status: ProposalStatus::Confirmed,
            },
            Proposal {
                id: pid("p2"),
                title: "Second".into(),
                format: TalkFormat::Short,
                status: ProposalStatus::Accepted,
            },
        ])
    }

    fn day(date: (i32, u32, u32), tracks: usize) -> DaySchedule {
        let mut day = DaySchedule::new(NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap());
        for i in 0..tracks {
            day.tracks.push(Track::new(
                TrackId::new(format!("track-{i}")).unwrap(),
                format!("Track {i}"),
                "",
            ));
        }
        day
    }

    fn session() -> EditSession {
        let days = vec![day((2026, 9, 14), 2), day((2026, 9, 15), 2)];
        let set = ScheduleSet::from_catalog(days, &catalog());
        EditSession::new(set, catalog(), EditWindow::default())
    }

    fn place(session: &mut EditSession, proposal: &str, track: usize, start: &str) {
        session
            .apply(EditCommand::PlaceTalk {
                proposal: pid(proposal),
                track,
                start: t(start),
            })
            .unwrap();
    }

    #[test]
    fn successful_edit_marks_day_dirty() {
        let mut s = session();
        assert_eq!(s.sync_state(0), Some(SyncState::Clean));
        place(&mut s, "p1", 0, "09:00");
        assert_eq!(s.sync_state(0), Some(SyncState::Dirty));
        assert_eq!(s.sync_state(1), Some(SyncState::Clean));
    }

    #[test]
    fn failed_edit_changes_nothing() {
        let mut s = session();
        place(&mut s, "p1", 0, "09:00");
        let before = s.to_schedule_set();
        let pool_before = s.unassigned().to_vec();

        let err = s.apply(EditCommand::PlaceTalk {
            proposal: pid("p2"),
            track: 0,
            start: t("09:30"),
        });
        assert!(matches!(
            err,
            Err(SessionError::Edit(EditError::SlotConflict))
        ));
        assert_eq!(s.to_schedule_set(), before);
        assert_eq!(s.unassigned(), pool_before);
    }

    #[test]
    fn placement_and_pool_are_exclusive() {
        let mut s = session();
        assert_eq!(s.unassigned().len(), 2);

        place(&mut s, "p1", 0, "09:00");
        assert_eq!(s.unassigned(), [pid("p2")]);

        s.apply(EditCommand::RemoveEntry { track: 0, entry: 0 }).unwrap();
        let mut pool = s.unassigned().to_vec();
        pool.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        assert_eq!(pool, [pid("p1"), pid("p2")]);
    }

    #[test]
    fn unknown_proposal_is_rejected() {
        let mut s = session();
        let err = s.apply(EditCommand::PlaceTalk {
            proposal: pid("ghost"),
            track: 0,
            start: t("09:00"),
        });
        assert!(matches!(
            err,
            Err(SessionError::Edit(EditError::UnknownProposal { .. }))
        ));
    }

    #[test]
    fn day_navigation_retains_edits() {
        let mut s = session();
        place(&mut s, "p1", 0, "09:00");

        s.select_day(1).unwrap();
        place(&mut s, "p2", 1, "14:00");

        s.select_day(0).unwrap();
        let shown = s.current_day().unwrap();
        assert_eq!(shown.find_talk(&pid("p1")), Some((0, 0)));
        assert_eq!(s.sync_state(0), Some(SyncState::Dirty));
        assert_eq!(s.sync_state(1), Some(SyncState::Dirty));
    }

    #[test]
    fn cross_day_placement_moves_the_talk() {
        let mut s = session();
        place(&mut s, "p1", 0, "09:00");

        s.select_day(1).unwrap();
        place(&mut s, "p1", 0, "10:00");

        let set = s.to_schedule_set();
        assert_eq!(set.find_talk(&pid("p1")), Some((1, 0, 0)));
        assert_eq!(set.days[0].find_talk(&pid("p1")), None);
    }

    #[test]
    fn save_lifecycle_clean_path() {
        let mut s = session();
        place(&mut s, "p1", 0, "09:00");

        let (pending, snapshot) = s.begin_save().unwrap();
        assert_eq!(snapshot.find_talk(&pid("p1")), Some((0, 0)));
        assert_eq!(s.sync_state(0), Some(SyncState::Saving { dirtied: false }));

        s.finish_save(pending, SaveOutcome::Success { canonical: None })
            .unwrap();
        assert_eq!(s.sync_state(0), Some(SyncState::Clean));
    }

    #[test]
    fn concurrent_save_for_same_day_is_refused() {
        let mut s = session();
        place(&mut s, "p1", 0, "09:00");
        let (_pending, _) = s.begin_save().unwrap();
        assert!(matches!(s.begin_save(), Err(SessionError::SaveInFlight)));
    }

    #[test]
    fn save_failure_preserves_edits() {
        let mut s = session();
        place(&mut s, "p1", 0, "09:00");
        let before = s.to_schedule_set();

        let (pending, _) = s.begin_save().unwrap();
        s.finish_save(pending, SaveOutcome::Failure).unwrap();

        assert_eq!(s.sync_state(0), Some(SyncState::Dirty));
        assert_eq!(s.to_schedule_set(), before);
    }

    #[test]
    fn edits_during_flight_keep_day_dirty_and_win_over_echo() {
        let mut s = session();
        place(&mut s, "p1", 0, "09:00");

        let (pending, snapshot) = s.begin_save().unwrap();
        place(&mut s, "p2", 1, "11:00");
        assert_eq!(s.sync_state(0), Some(SyncState::Saving { dirtied: true }));

        s.finish_save(
            pending,
            SaveOutcome::Success {
                canonical: Some(snapshot),
            },
        )
        .unwrap();

        // The echo is stale; the in-flight edit survives and the day stays dirty
        assert_eq!(s.sync_state(0), Some(SyncState::Dirty));
        assert_eq!(s.current_day().unwrap().find_talk(&pid("p2")), Some((1, 0)));
    }

    #[test]
    fn canonical_echo_is_adopted_when_undisturbed() {
        let mut s = session();
        place(&mut s, "p1", 0, "09:00");

        let (pending, mut snapshot) = s.begin_save().unwrap();
        snapshot.tracks[0].entries[0] =
            ScheduledEntry::talk(pid("p1"), iv("09:05", "09:50"));
        s.finish_save(
            pending,
            SaveOutcome::Success {
                canonical: Some(snapshot),
            },
        )
        .unwrap();

        assert_eq!(
            s.current_day().unwrap().tracks[0].entries[0].interval,
            iv("09:05", "09:50")
        );
        assert_eq!(s.sync_state(0), Some(SyncState::Clean));
    }

    #[test]
    fn save_with_reports_store_failure() {
        #[derive(Debug, thiserror::Error)]
        #[error("store offline")]
        struct Offline;

        struct FailingStore;
        impl ScheduleStore for FailingStore {
            type Error = Offline;

            fn save_day(
                &mut self,
                _day: &DaySchedule,
            ) -> Result<Option<DaySchedule>, Self::Error> {
                Err(Offline)
            }
        }

        let mut s = session();
        place(&mut s, "p1", 0, "09:00");
        let err = s.save_with(&mut FailingStore).unwrap_err();
        assert!(matches!(err, SessionError::SaveFailed { .. }));
        assert_eq!(s.sync_state(0), Some(SyncState::Dirty));
        // Retry is possible once the first save resolved
        assert!(s.begin_save().is_ok());
    }

    #[test]
    fn fan_out_report_surfaces_skipped_tracks() {
        let mut s = session();
        s.apply(EditCommand::CreateService {
            track: 0,
            label: "Break".into(),
            duration: ServiceDuration::new(15).unwrap(),
            start: t("09:45"),
        })
        .unwrap();
        place(&mut s, "p2", 1, "09:50");

        let report = s
            .apply(EditCommand::DuplicateService { track: 0, entry: 0 })
            .unwrap();
        assert_eq!(report.skipped_tracks, vec![TrackId::new("track-1").unwrap()]);
    }

    #[test]
    fn remove_track_returns_talks_to_pool() {
        let mut s = session();
        place(&mut s, "p1", 1, "09:00");
        s.apply(EditCommand::RemoveTrack { track: 1 }).unwrap();

        assert!(s.unassigned().contains(&pid("p1")));
        assert_eq!(s.current_day().unwrap().tracks.len(), 1);
    }

    #[test]
    fn select_day_validates_index() {
        let mut s = session();
        assert!(matches!(
            s.select_day(9),
            Err(SessionError::UnknownDay { index: 9 })
        ));
    }
}
