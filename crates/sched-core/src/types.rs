//! Core identifier types with validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// Invalid proposal status value.
    #[error("invalid proposal status: {value}")]
    InvalidStatus { value: String },

    /// Invalid talk format value.
    #[error("invalid talk format: {value}")]
    InvalidFormat { value: String },

    /// Service duration outside the allowed range or off the grid.
    #[error("service duration must be 5-180 minutes in 5-minute steps, got {value}")]
    InvalidDuration { value: u16 },
}

/// Generates a validated string ID newtype with common trait implementations.
macro_rules! define_string_id {
    (
        $(#[$meta:meta])*
        $name:ident, $field_name:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new ID after validation.
            pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
                let id = id.into();
                if id.is_empty() {
                    return Err(ValidationError::Empty { field: $field_name });
                }
                Ok(Self(id))
            }

            /// Returns the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_string_id!(
    /// A validated proposal identifier.
    ///
    /// Proposal IDs must be non-empty strings. They are assigned by the
    /// call-for-papers system and carried through unchanged.
    ProposalId, "proposal ID"
);

define_string_id!(
    /// A validated track identifier.
    ///
    /// Track IDs must be non-empty strings. They identify one room timeline
    /// within a day schedule and stay stable across renames.
    TrackId, "track ID"
);
