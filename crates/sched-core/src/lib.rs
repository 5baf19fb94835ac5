//! Core domain logic for the program scheduler.
//!
//! This crate contains the fundamental types and logic for:
//! - Time-interval arithmetic on the 5-minute editing grid
//! - The schedule data model: tracks, days, and the conference set
//! - Slot availability: conflict tests and nearest-free-start search
//! - The mutation engine: pure edits over a day schedule
//! - The edit session: multi-day state, the pool, and the save boundary

pub mod engine;
pub mod entry;
pub mod proposal;
pub mod schedule;
pub mod session;
pub mod slot;
pub mod time;
pub mod types;
pub mod validate;

pub use engine::{EditError, FanOut};
pub use entry::{ScheduledEntry, ServiceDuration, SlotItem};
pub use proposal::{Proposal, ProposalCatalog, ProposalStatus, TalkFormat};
pub use schedule::{DaySchedule, ScheduleSet, Track};
pub use session::{
    EditCommand, EditReport, EditSession, PendingSave, SaveOutcome, ScheduleStore, SessionError,
    SyncState,
};
pub use slot::{find_available_slot, fits_at, has_conflict};
pub use time::{EditWindow, GRID_MINUTES, Interval, TimeFormatError, TimeOfDay};
pub use types::{ProposalId, TrackId, ValidationError};
