//! The proposal catalog consumed from the call-for-papers system.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{ProposalId, ValidationError};

/// Talk format, which fixes the talk's duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TalkFormat {
    /// 10-minute lightning talk.
    Lightning,
    /// 25-minute short talk.
    Short,
    /// 45-minute standard slot.
    Standard,
    /// 120-minute workshop.
    Workshop,
}

impl TalkFormat {
    /// The fixed duration this format schedules at.
    #[must_use]
    pub const fn duration_minutes(self) -> u16 {
        match self {
            Self::Lightning => 10,
            Self::Short => 25,
            Self::Standard => 45,
            Self::Workshop => 120,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lightning => "lightning",
            Self::Short => "short",
            Self::Standard => "standard",
            Self::Workshop => "workshop",
        }
    }
}

impl fmt::Display for TalkFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TalkFormat {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lightning" => Ok(Self::Lightning),
            "short" => Ok(Self::Short),
            "standard" => Ok(Self::Standard),
            "workshop" => Ok(Self::Workshop),
            _ => Err(ValidationError::InvalidFormat {
                value: s.to_string(),
            }),
        }
    }
}

/// Delivery/approval status of a proposal.
///
/// Display-only: the status is carried through unchanged and never affects
/// placement validity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProposalStatus {
    /// Speaker has confirmed attendance.
    Confirmed,
    /// Accepted but not yet confirmed by the speaker.
    Accepted,
    /// Withdrawn by the speaker.
    Withdrawn,
    /// Rejected by the committee.
    Rejected,
}

impl ProposalStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
            Self::Accepted => "accepted",
            Self::Withdrawn => "withdrawn",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProposalStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "confirmed" => Ok(Self::Confirmed),
            "accepted" => Ok(Self::Accepted),
            "withdrawn" => Ok(Self::Withdrawn),
            "rejected" => Ok(Self::Rejected),
            _ => Err(ValidationError::InvalidStatus {
                value: s.to_string(),
            }),
        }
    }
}

/// A talk proposal, externally owned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    /// Identifier assigned by the call-for-papers system.
    pub id: ProposalId,
    /// Talk title.
    pub title: String,
    /// Format, fixing the scheduled duration.
    pub format: TalkFormat,
    /// Approval status, display-only.
    pub status: ProposalStatus,
}

impl Proposal {
    /// The duration this proposal schedules at, derived from its format.
    #[must_use]
    pub const fn duration_minutes(&self) -> u16 {
        self.format.duration_minutes()
    }
}

/// The full set of proposals known to an editing session.
///
/// Order is the import order; lookups are linear, the catalog is small.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProposalCatalog {
    proposals: Vec<Proposal>,
}

impl ProposalCatalog {
    #[must_use]
    pub const fn new(proposals: Vec<Proposal>) -> Self {
        Self { proposals }
    }

    /// Finds a proposal by ID.
    #[must_use]
    pub fn get(&self, id: &ProposalId) -> Option<&Proposal> {
        self.proposals.iter().find(|p| &p.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &ProposalId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Proposal> {
        self.proposals.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.proposals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.proposals.is_empty()
    }
}

impl<'a> IntoIterator for &'a ProposalCatalog {
    type Item = &'a Proposal;
    type IntoIter = std::slice::Iter<'a, Proposal>;

    fn into_iter(self) -> Self::IntoIter {
        self.proposals.iter()
    }
}
