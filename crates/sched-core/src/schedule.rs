//! The schedule data model: tracks, day schedules, and the conference set.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entry::ScheduledEntry;
use crate::types::{ProposalId, TrackId};

/// An independent timeline (conceptually a room) for one day.
///
/// Entry order is insertion order; the engine keeps it sorted by start time
/// after every edit, but timeline position always derives from each entry's
/// interval, never from vector order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Stable identifier, unchanged by renames.
    pub id: TrackId,
    /// Display title (e.g. "Main Hall").
    pub title: String,
    /// Display description.
    #[serde(default)]
    pub description: String,
    /// The entries scheduled on this track.
    #[serde(default)]
    pub entries: Vec<ScheduledEntry>,
}

impl Track {
    /// Creates an empty track.
    pub fn new(id: TrackId, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            entries: Vec::new(),
        }
    }

    /// The entry at `index`, if any.
    #[must_use]
    pub fn entry(&self, index: usize) -> Option<&ScheduledEntry> {
        self.entries.get(index)
    }

    /// The index of the entry presenting `proposal`, if placed here.
    #[must_use]
    pub fn position_of_talk(&self, proposal: &ProposalId) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.proposal_id() == Some(proposal))
    }

    /// Inserts an entry keeping the vector sorted by start time.
    pub fn insert_sorted(&mut self, entry: ScheduledEntry) {
        let at = self
            .entries
            .partition_point(|e| e.interval.start() <= entry.interval.start());
        self.entries.insert(at, entry);
    }

    /// Re-sorts entries by start time (stable).
    pub fn sort_entries(&mut self) {
        self.entries.sort_by_key(|e| e.interval.start());
    }
}

/// All tracks for one calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    /// The conference day this schedule covers.
    pub date: NaiveDate,
    /// Ordered tracks (rooms).
    #[serde(default)]
    pub tracks: Vec<Track>,
}

impl DaySchedule {
    /// Creates a day with no tracks.
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self {
            date,
            tracks: Vec::new(),
        }
    }

    /// The track at `index`, if any.
    #[must_use]
    pub fn track(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// The index of the track with the given id.
    #[must_use]
    pub fn track_index(&self, id: &TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| &t.id == id)
    }

    /// Where `proposal` is placed on this day, as (track, entry) indices.
    #[must_use]
    pub fn find_talk(&self, proposal: &ProposalId) -> Option<(usize, usize)> {
        self.tracks.iter().enumerate().find_map(|(ti, track)| {
            track.position_of_talk(proposal).map(|ei| (ti, ei))
        })
    }

    /// All proposals placed somewhere on this day.
    pub fn placed_proposals(&self) -> impl Iterator<Item = &ProposalId> {
        self.tracks
            .iter()
            .flat_map(|t| t.entries.iter())
            .filter_map(ScheduledEntry::proposal_id)
    }
}

/// The whole conference: one schedule per day plus the unassigned pool.
///
/// Invariant: a proposal appears in at most one entry across all days; if it
/// is in no track it sits in `unassigned`, and vice versa.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSet {
    /// One schedule per conference day, in conference order.
    pub days: Vec<DaySchedule>,
    /// Proposals not placed in any track of any day.
    pub unassigned: Vec<ProposalId>,
}

impl ScheduleSet {
    #[must_use]
    pub const fn new(days: Vec<DaySchedule>, unassigned: Vec<ProposalId>) -> Self {
        Self { days, unassigned }
    }

    /// Builds a set from stored days, deriving the pool from a catalog:
    /// every catalog proposal not placed on any day is unassigned.
    #[must_use]
    pub fn from_catalog(days: Vec<DaySchedule>, catalog: &crate::proposal::ProposalCatalog) -> Self {
        let unassigned = catalog
            .iter()
            .filter(|p| !days.iter().any(|d| d.find_talk(&p.id).is_some()))
            .map(|p| p.id.clone())
            .collect();
        Self { days, unassigned }
    }

    /// The day schedule for `date`, if present.
    #[must_use]
    pub fn day_for_date(&self, date: NaiveDate) -> Option<&DaySchedule> {
        self.days.iter().find(|d| d.date == date)
    }

    /// Where `proposal` is placed, as (day, track, entry) indices.
    #[must_use]
    pub fn find_talk(&self, proposal: &ProposalId) -> Option<(usize, usize, usize)> {
        self.days.iter().enumerate().find_map(|(di, day)| {
            day.find_talk(proposal).map(|(ti, ei)| (di, ti, ei))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proposal::{Proposal, ProposalCatalog, ProposalStatus, TalkFormat};
    use crate::time::Interval;

    fn iv(start: &str, end: &str) -> Interval {
        Interval::new(start.parse().unwrap(), end.parse().unwrap()).unwrap()
    }

    fn track(id: &str) -> Track {
        Track::new(TrackId::new(id).unwrap(), format!("Track {id}"), "")
    }

    fn pid(id: &str) -> ProposalId {
        ProposalId::new(id).unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 9, 14).unwrap()
    }

    #[test]
    fn insert_sorted_keeps_start_order() {
        let mut t = track("a");
        t.insert_sorted(ScheduledEntry::service("Lunch".into(), iv("12:00", "13:00")));
        t.insert_sorted(ScheduledEntry::talk(pid("p1"), iv("09:00", "09:45")));
        t.insert_sorted(ScheduledEntry::talk(pid("p2"), iv("10:00", "10:25")));

        let starts: Vec<String> = t
            .entries
            .iter()
            .map(|e| e.interval.start().to_string())
            .collect();
        assert_eq!(starts, ["09:00", "10:00", "12:00"]);
    }

    #[test]
    fn find_talk_across_tracks() {
        let mut day = DaySchedule::new(date());
        day.tracks.push(track("a"));
        day.tracks.push(track("b"));
        day.tracks[1].insert_sorted(ScheduledEntry::talk(pid("p1"), iv("09:00", "09:45")));

        assert_eq!(day.find_talk(&pid("p1")), Some((1, 0)));
        assert_eq!(day.find_talk(&pid("p2")), None);
    }

    #[test]
    fn from_catalog_derives_unassigned_pool() {
        let catalog = ProposalCatalog::new(vec![
            Proposal {
                id: pid("p1"),
                title: "Placed".into(),
                format: TalkFormat::Standard,
                status: ProposalStatus::Confirmed,
            },
            Proposal {
                id: pid("p2"),
                title: "Floating".into(),
                format: TalkFormat::Short,
                status: ProposalStatus::Accepted,
            },
        ]);

        let mut day = DaySchedule::new(date());
        day.tracks.push(track("a"));
        day.tracks[0].insert_sorted(ScheduledEntry::talk(pid("p1"), iv("09:00", "09:45")));

        let set = ScheduleSet::from_catalog(vec![day], &catalog);
        assert_eq!(set.unassigned, vec![pid("p2")]);
        assert_eq!(set.find_talk(&pid("p1")), Some((0, 0, 0)));
    }

    #[test]
    fn day_document_roundtrip() {
        let mut day = DaySchedule::new(date());
        let mut a = track("a");
        a.insert_sorted(ScheduledEntry::talk(pid("p1"), iv("09:00", "09:45")));
        a.insert_sorted(ScheduledEntry::service("Coffee".into(), iv("09:45", "10:00")));
        day.tracks.push(a);
        day.tracks.push(track("b"));

        let json = serde_json::to_string(&day).unwrap();
        let parsed: DaySchedule = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, day);
    }

    #[test]
    fn day_document_wire_shape() {
        let mut day = DaySchedule::new(date());
        let mut a = track("a");
        a.insert_sorted(ScheduledEntry::talk(pid("p1"), iv("09:00", "09:45")));
        day.tracks.push(a);

        let json = serde_json::to_value(&day).unwrap();
        assert_eq!(json["date"], "2026-09-14");
        assert_eq!(json["tracks"][0]["entries"][0]["talk"], "p1");
        assert_eq!(json["tracks"][0]["entries"][0]["start"], "09:00");
    }
}
