//! Entries placed on a track: talks and service sessions.

use serde::{Deserialize, Serialize};

use crate::time::{GRID_MINUTES, Interval};
use crate::types::{ProposalId, ValidationError};

/// An operator-editable service session duration in minutes.
///
/// Valid values are 5-180 in 5-minute steps. [`ServiceDuration::new`]
/// validates; [`ServiceDuration::clamped`] coerces interactive input by
/// rounding to the nearest step and clamping into range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct ServiceDuration(u16);

impl ServiceDuration {
    /// The shortest service session (5 minutes).
    pub const MIN: Self = Self(5);

    /// The longest service session (180 minutes).
    pub const MAX: Self = Self(180);

    /// Creates a duration after validation.
    pub fn new(minutes: u16) -> Result<Self, ValidationError> {
        if !(Self::MIN.0..=Self::MAX.0).contains(&minutes) || minutes % GRID_MINUTES != 0 {
            return Err(ValidationError::InvalidDuration { value: minutes });
        }
        Ok(Self(minutes))
    }

    /// Creates a duration from interactive input, rounding to the nearest
    /// 5-minute step and clamping into the 5-180 range.
    #[must_use]
    pub const fn clamped(minutes: u16) -> Self {
        let rounded = (minutes + GRID_MINUTES / 2) / GRID_MINUTES * GRID_MINUTES;
        if rounded < Self::MIN.0 {
            Self::MIN
        } else if rounded > Self::MAX.0 {
            Self::MAX
        } else {
            Self(rounded)
        }
    }

    /// The duration in minutes.
    #[must_use]
    pub const fn minutes(self) -> u16 {
        self.0
    }
}

impl TryFrom<u16> for ServiceDuration {
    type Error = ValidationError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ServiceDuration> for u16 {
    fn from(d: ServiceDuration) -> Self {
        d.0
    }
}

/// What occupies a slot: a talk from the catalog or a service session.
///
/// The wire shape is untagged; the discriminating key is `talk` vs `label`,
/// matching the persisted schedule documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SlotItem {
    /// A talk, referring to an externally owned proposal.
    Talk {
        /// The proposal being presented.
        talk: ProposalId,
    },
    /// A service session (break, lunch, registration).
    Service {
        /// Operator-provided free-text label.
        label: String,
    },
}

/// An item placed at a specific interval within one track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledEntry {
    #[serde(flatten)]
    pub item: SlotItem,
    #[serde(flatten)]
    pub interval: Interval,
}

impl ScheduledEntry {
    /// Creates a talk entry.
    #[must_use]
    pub fn talk(proposal: ProposalId, interval: Interval) -> Self {
        Self {
            item: SlotItem::Talk { talk: proposal },
            interval,
        }
    }

    /// Creates a service session entry.
    #[must_use]
    pub fn service(label: String, interval: Interval) -> Self {
        Self {
            item: SlotItem::Service { label },
            interval,
        }
    }

    /// The proposal this entry presents, if it is a talk.
    #[must_use]
    pub fn proposal_id(&self) -> Option<&ProposalId> {
        match &self.item {
            SlotItem::Talk { talk } => Some(talk),
            SlotItem::Service { .. } => None,
        }
    }

    /// The service label, if this entry is a service session.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        match &self.item {
            SlotItem::Service { label } => Some(label),
            SlotItem::Talk { .. } => None,
        }
    }

    #[must_use]
    pub fn is_service(&self) -> bool {
        matches!(self.item, SlotItem::Service { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::TimeOfDay;

    fn iv(start: &str, end: &str) -> Interval {
        Interval::new(start.parse().unwrap(), end.parse().unwrap()).unwrap()
    }

    #[test]
    fn duration_validates_range_and_step() {
        assert!(ServiceDuration::new(5).is_ok());
        assert!(ServiceDuration::new(180).is_ok());
        assert!(ServiceDuration::new(0).is_err());
        assert!(ServiceDuration::new(3).is_err());
        assert!(ServiceDuration::new(185).is_err());
        assert!(ServiceDuration::new(12).is_err());
    }

    #[test]
    fn duration_clamps_interactive_input() {
        assert_eq!(ServiceDuration::clamped(3).minutes(), 5);
        assert_eq!(ServiceDuration::clamped(200).minutes(), 180);
        assert_eq!(ServiceDuration::clamped(0).minutes(), 5);
        assert_eq!(ServiceDuration::clamped(12).minutes(), 10);
        assert_eq!(ServiceDuration::clamped(13).minutes(), 15);
        assert_eq!(ServiceDuration::clamped(60).minutes(), 60);
    }

    #[test]
    fn talk_entry_wire_shape() {
        let entry = ScheduledEntry::talk(
            ProposalId::new("prop-1").unwrap(),
            iv("09:00", "09:45"),
        );
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"talk": "prop-1", "start": "09:00", "end": "09:45"})
        );
        let parsed: ScheduledEntry = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, entry);
    }

    #[test]
    fn service_entry_wire_shape() {
        let entry = ScheduledEntry::service("Coffee Break".to_string(), iv("10:00", "10:15"));
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"label": "Coffee Break", "start": "10:00", "end": "10:15"})
        );
        let parsed: ScheduledEntry = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, entry);
        assert!(parsed.is_service());
        assert_eq!(parsed.label(), Some("Coffee Break"));
    }

    #[test]
    fn entry_accessors() {
        let talk = ScheduledEntry::talk(ProposalId::new("p").unwrap(), iv("09:00", "09:10"));
        assert!(!talk.is_service());
        assert_eq!(talk.proposal_id().unwrap().as_str(), "p");
        assert_eq!(talk.label(), None);
    }

    #[test]
    fn time_of_day_display_in_entries() {
        let entry = ScheduledEntry::service("Lunch".to_string(), iv("12:00", "13:00"));
        assert_eq!(entry.interval.start(), "12:00".parse::<TimeOfDay>().unwrap());
        assert_eq!(entry.interval.duration_minutes(), 60);
    }
}
