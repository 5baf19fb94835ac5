//! Slot availability: conflict tests and the nearest-free-start search.
//!
//! Everything here is pure and cheap. The renderer calls [`fits_at`]
//! repeatedly while a drag is in progress to highlight drop targets, so no
//! function allocates or keeps hidden state.

use crate::schedule::Track;
use crate::time::{EditWindow, GRID_MINUTES, Interval, TimeOfDay};

/// Whether `candidate` overlaps any entry of `track`.
///
/// The entry at index `exclude` is ignored, so an item being moved within
/// its own track does not conflict with the slot it currently occupies.
#[must_use]
pub fn has_conflict(track: &Track, candidate: Interval, exclude: Option<usize>) -> bool {
    track
        .entries
        .iter()
        .enumerate()
        .filter(|(i, _)| Some(*i) != exclude)
        .any(|(_, e)| e.interval.overlaps(candidate))
}

/// Whether an item of `duration_minutes` can sit at `start` in `track`.
///
/// True only when the whole interval fits inside the window and conflicts
/// with no non-excluded entry. This is the read-only "can drop here" probe.
#[must_use]
pub fn fits_at(
    track: &Track,
    duration_minutes: u16,
    start: TimeOfDay,
    exclude: Option<usize>,
    window: EditWindow,
) -> bool {
    Interval::with_duration(start, duration_minutes)
        .is_some_and(|candidate| {
            window.contains(candidate) && !has_conflict(track, candidate, exclude)
        })
}

/// Finds the nearest valid start for an item of `duration_minutes` in
/// `track`, beginning at `desired`.
///
/// If `desired` itself is valid it is returned unchanged. Otherwise the
/// search expands outward in both directions at grid granularity, staying
/// inside `window`; at equal distance the earlier candidate is checked
/// first and therefore wins. Returns `None` when the window is exhausted.
#[must_use]
pub fn find_available_slot(
    track: &Track,
    duration_minutes: u16,
    desired: TimeOfDay,
    exclude: Option<usize>,
    window: EditWindow,
) -> Option<TimeOfDay> {
    if duration_minutes == 0 {
        return None;
    }
    if fits_at(track, duration_minutes, desired, exclude, window) {
        return Some(desired);
    }

    let origin = i32::from(desired.minutes_from_midnight());
    let duration = i32::from(duration_minutes);
    let lo_bound = i32::from(window.start().minutes_from_midnight());
    let hi_bound = i32::from(window.end().minutes_from_midnight());

    let in_window = |start: i32| start >= lo_bound && start + duration <= hi_bound;

    let mut offset = i32::from(GRID_MINUTES);
    loop {
        let earlier = origin - offset;
        let later = origin + offset;

        // Both exhaustion conditions are monotone in the offset, so once
        // they hold together no further candidate can exist.
        if earlier < lo_bound && later + duration > hi_bound {
            return None;
        }

        for candidate in [earlier, later] {
            if !in_window(candidate) {
                continue;
            }
            let Some(start) = grid_time(candidate) else {
                continue;
            };
            if fits_at(track, duration_minutes, start, exclude, window) {
                return Some(start);
            }
        }

        offset += i32::from(GRID_MINUTES);
    }
}

/// Converts a minutes-since-midnight value back to a grid time.
fn grid_time(minutes: i32) -> Option<TimeOfDay> {
    u16::try_from(minutes)
        .ok()
        .and_then(|m| TimeOfDay::from_minutes(m).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::ScheduledEntry;
    use crate::types::{ProposalId, TrackId};

    fn t(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    fn iv(start: &str, end: &str) -> Interval {
        Interval::new(t(start), t(end)).unwrap()
    }

    fn track_with(entries: &[(&str, &str)]) -> Track {
        let mut track = Track::new(TrackId::new("t").unwrap(), "Track", "");
        for (i, (start, end)) in entries.iter().enumerate() {
            track.insert_sorted(ScheduledEntry::talk(
                ProposalId::new(format!("p{i}")).unwrap(),
                iv(start, end),
            ));
        }
        track
    }

    fn window() -> EditWindow {
        EditWindow::default()
    }

    #[test]
    fn free_desired_start_is_returned_unchanged() {
        let track = track_with(&[("09:00", "09:45")]);
        assert_eq!(
            find_available_slot(&track, 25, t("10:00"), None, window()),
            Some(t("10:00"))
        );
    }

    #[test]
    fn touching_endpoints_are_free() {
        let track = track_with(&[("09:00", "09:45")]);
        assert!(fits_at(&track, 15, t("09:45"), None, window()));
        assert!(fits_at(&track, 45, t("08:15"), None, window()));
    }

    #[test]
    fn self_exclusion_makes_own_slot_available() {
        let track = track_with(&[("09:00", "09:45")]);
        // Without exclusion the occupied slot conflicts with itself
        assert!(!fits_at(&track, 45, t("09:00"), None, window()));
        // Excluding the entry being moved, the same start is valid
        assert!(fits_at(&track, 45, t("09:00"), Some(0), window()));
        assert_eq!(
            find_available_slot(&track, 45, t("09:05"), Some(0), window()),
            Some(t("09:05"))
        );
    }

    #[test]
    fn exclusion_of_other_entries_does_not_mask_conflicts() {
        let track = track_with(&[("09:00", "09:45"), ("10:00", "10:25")]);
        assert!(!fits_at(&track, 45, t("09:00"), Some(1), window()));
    }

    #[test]
    fn search_expands_to_nearest_free_start() {
        // Single 30-minute entry; a 30-minute item dropped on top of it has
        // equally near free slots on both sides; the earlier one wins.
        let track = track_with(&[("10:00", "10:30")]);
        assert_eq!(
            find_available_slot(&track, 30, t("10:00"), None, window()),
            Some(t("09:30"))
        );
    }

    #[test]
    fn search_between_two_entries_prefers_earlier_on_tie() {
        let track = track_with(&[("09:00", "09:45"), ("10:00", "10:25")]);
        // A 25-minute item at 09:30 conflicts; the gap 09:45-10:00 is too
        // short, so the search walks out to the first free start on either
        // side. Both 08:35 and 10:25 are 55 minutes away; earlier wins.
        assert_eq!(
            find_available_slot(&track, 25, t("09:30"), None, window()),
            Some(t("08:35"))
        );
    }

    #[test]
    fn search_uses_a_gap_that_fits_exactly() {
        let track = track_with(&[("09:00", "09:45"), ("10:00", "10:25")]);
        // A 15-minute item fits exactly into the 09:45-10:00 gap
        assert_eq!(
            find_available_slot(&track, 15, t("09:40"), None, window()),
            Some(t("09:45"))
        );
    }

    #[test]
    fn search_never_leaves_the_window() {
        let track = track_with(&[]);
        // 45 minutes requested at 20:30 cannot end by 21:00; the nearest
        // valid start is pulled back inside the window.
        assert_eq!(
            find_available_slot(&track, 45, t("20:30"), None, window()),
            Some(t("20:15"))
        );
        // Start before the window opens is pushed forward
        assert_eq!(
            find_available_slot(&track, 45, t("07:30"), None, window()),
            Some(t("08:00"))
        );
    }

    #[test]
    fn exhausted_window_returns_none() {
        let window = EditWindow::new(t("08:00"), t("09:00")).unwrap();
        let track = track_with(&[("08:00", "09:00")]);
        assert_eq!(find_available_slot(&track, 10, t("08:30"), None, window), None);
    }

    #[test]
    fn duration_longer_than_window_is_never_valid() {
        let window = EditWindow::new(t("08:00"), t("09:00")).unwrap();
        let track = track_with(&[]);
        assert!(!fits_at(&track, 120, t("08:00"), None, window));
        assert_eq!(find_available_slot(&track, 120, t("08:00"), None, window), None);
    }

    #[test]
    fn zero_duration_is_rejected() {
        let track = track_with(&[]);
        assert_eq!(find_available_slot(&track, 0, t("09:00"), None, window()), None);
    }
}
