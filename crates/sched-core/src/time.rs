//! Wall-clock arithmetic on the editing grid.
//!
//! All schedule times live on a 5-minute grid within a single operating day.
//! There is no timezone handling and no midnight wraparound; times are the
//! conference's local wall clock, serialized as `HH:MM`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Grid granularity in minutes. Every time and duration is a multiple of this.
pub const GRID_MINUTES: u16 = 5;

const DAY_MINUTES: u16 = 24 * 60;

/// Errors from parsing or combining wall-clock times.
///
/// These indicate a data or integration bug, not a user-recoverable
/// condition, so callers are expected to fail fast on them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimeFormatError {
    /// The string was not of the form `HH:MM`.
    #[error("malformed time {value:?}, expected HH:MM")]
    Malformed { value: String },

    /// The time fell outside a single operating day.
    #[error("time {value:?} is outside a single day")]
    OutOfDay { value: String },

    /// The time was not aligned to the 5-minute grid.
    #[error("time {value:?} is not on the 5-minute grid")]
    OffGrid { value: String },

    /// An interval's end did not come after its start.
    #[error("interval end {end} must be after start {start}")]
    InvertedInterval { start: TimeOfDay, end: TimeOfDay },
}

/// A wall-clock time at 5-minute granularity.
///
/// Stored as minutes since midnight. Ordering and equality follow the clock.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// Creates a time from minutes since midnight.
    pub fn from_minutes(total: u16) -> Result<Self, TimeFormatError> {
        if total >= DAY_MINUTES {
            return Err(TimeFormatError::OutOfDay {
                value: total.to_string(),
            });
        }
        if total % GRID_MINUTES != 0 {
            return Err(TimeFormatError::OffGrid {
                value: total.to_string(),
            });
        }
        Ok(Self(total))
    }

    /// Creates a time from an hour/minute pair.
    pub fn new(hour: u16, minute: u16) -> Result<Self, TimeFormatError> {
        if minute >= 60 {
            return Err(TimeFormatError::Malformed {
                value: format!("{hour:02}:{minute:02}"),
            });
        }
        Self::from_minutes(hour * 60 + minute)
    }

    /// Minutes since midnight.
    #[must_use]
    pub const fn minutes_from_midnight(self) -> u16 {
        self.0
    }

    /// Adds `minutes` without crossing midnight.
    ///
    /// Returns `None` if the result would leave the operating day. The
    /// argument is expected to be a multiple of [`GRID_MINUTES`], which keeps
    /// the result on the grid.
    #[must_use]
    pub fn checked_add_minutes(self, minutes: u16) -> Option<Self> {
        let total = self.0.checked_add(minutes)?;
        if total >= DAY_MINUTES {
            return None;
        }
        Some(Self(total))
    }

    /// Subtracts `minutes` without crossing midnight backwards.
    #[must_use]
    pub fn checked_sub_minutes(self, minutes: u16) -> Option<Self> {
        self.0.checked_sub(minutes).map(Self)
    }

    /// Signed distance in minutes from `self` to `other`.
    #[must_use]
    pub fn minutes_until(self, other: Self) -> i32 {
        i32::from(other.0) - i32::from(self.0)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl FromStr for TimeOfDay {
    type Err = TimeFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || TimeFormatError::Malformed {
            value: s.to_string(),
        };
        let (hh, mm) = s.split_once(':').ok_or_else(malformed)?;
        if hh.len() != 2 || mm.len() != 2 {
            return Err(malformed());
        }
        let hour: u16 = hh.parse().map_err(|_| malformed())?;
        let minute: u16 = mm.parse().map_err(|_| malformed())?;
        if minute >= 60 {
            return Err(malformed());
        }
        if hour >= 24 {
            return Err(TimeFormatError::OutOfDay {
                value: s.to_string(),
            });
        }
        let total = hour * 60 + minute;
        if total % GRID_MINUTES != 0 {
            return Err(TimeFormatError::OffGrid {
                value: s.to_string(),
            });
        }
        Ok(Self(total))
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = TimeFormatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(t: TimeOfDay) -> Self {
        t.to_string()
    }
}

/// Wire shape for [`Interval`]; validated on the way in.
#[derive(Serialize, Deserialize)]
struct IntervalSpan {
    start: TimeOfDay,
    end: TimeOfDay,
}

/// A half-open time range `[start, end)`.
///
/// Touching endpoints do not overlap: `[09:00, 09:45)` and `[09:45, 10:00)`
/// can coexist on one track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "IntervalSpan", into = "IntervalSpan")]
pub struct Interval {
    start: TimeOfDay,
    end: TimeOfDay,
}

impl Interval {
    /// Creates an interval, requiring `end > start`.
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Result<Self, TimeFormatError> {
        if end <= start {
            return Err(TimeFormatError::InvertedInterval { start, end });
        }
        Ok(Self { start, end })
    }

    /// Creates an interval from a start and a duration in minutes.
    ///
    /// Returns `None` when the end would leave the operating day or the
    /// duration is zero.
    #[must_use]
    pub fn with_duration(start: TimeOfDay, minutes: u16) -> Option<Self> {
        if minutes == 0 {
            return None;
        }
        let end = start.checked_add_minutes(minutes)?;
        Some(Self { start, end })
    }

    #[must_use]
    pub const fn start(self) -> TimeOfDay {
        self.start
    }

    #[must_use]
    pub const fn end(self) -> TimeOfDay {
        self.end
    }

    /// Duration in minutes.
    #[must_use]
    pub fn duration_minutes(self) -> u16 {
        self.end.0 - self.start.0
    }

    /// Half-open overlap test: `start1 < end2 && start2 < end1`.
    #[must_use]
    pub fn overlaps(self, other: Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl TryFrom<IntervalSpan> for Interval {
    type Error = TimeFormatError;

    fn try_from(span: IntervalSpan) -> Result<Self, Self::Error> {
        Self::new(span.start, span.end)
    }
}

impl From<Interval> for IntervalSpan {
    fn from(i: Interval) -> Self {
        Self {
            start: i.start,
            end: i.end,
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// The visible editing window of a day.
///
/// Every placement and every resolver search is bounded by this window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditWindow {
    start: TimeOfDay,
    end: TimeOfDay,
}

impl EditWindow {
    /// Creates a window, requiring `end > start`.
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Result<Self, TimeFormatError> {
        if end <= start {
            return Err(TimeFormatError::InvertedInterval { start, end });
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub const fn start(self) -> TimeOfDay {
        self.start
    }

    #[must_use]
    pub const fn end(self) -> TimeOfDay {
        self.end
    }

    /// Whether the interval lies fully inside the window.
    #[must_use]
    pub fn contains(self, interval: Interval) -> bool {
        interval.start() >= self.start && interval.end() <= self.end
    }
}

impl Default for EditWindow {
    /// The editor's visible day: 08:00-21:00.
    fn default() -> Self {
        Self {
            start: TimeOfDay(8 * 60),
            end: TimeOfDay(21 * 60),
        }
    }
}
