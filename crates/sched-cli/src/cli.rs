//! Command-line argument definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use sched_core::TimeOfDay;

/// Conference program scheduler.
///
/// Edits per-day schedules of talks and service sessions across parallel
/// tracks, validating every placement against the timeline.
#[derive(Debug, Parser)]
#[command(name = "sched", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create the database.
    Init,

    /// Import the proposal catalog from a JSON file.
    Import {
        /// Path to a JSON array of proposals.
        #[arg(long)]
        file: PathBuf,
    },

    /// List the proposal catalog.
    Proposals,

    /// Manage conference days.
    Day {
        #[command(subcommand)]
        action: DayAction,
    },

    /// Manage tracks of a day.
    Track {
        #[command(subcommand)]
        action: TrackAction,
    },

    /// Place (or move) a talk at an exact start time.
    Place {
        /// The proposal to place.
        proposal: String,

        /// The conference day (YYYY-MM-DD).
        #[arg(long)]
        date: NaiveDate,

        /// Target track index.
        #[arg(long)]
        track: usize,

        /// Exact start time (HH:MM).
        #[arg(long)]
        at: TimeOfDay,
    },

    /// Remove an entry; talks return to the unassigned pool.
    Unplace {
        /// The conference day (YYYY-MM-DD).
        #[arg(long)]
        date: NaiveDate,

        /// Track index.
        #[arg(long)]
        track: usize,

        /// Entry index within the track.
        #[arg(long)]
        entry: usize,
    },

    /// Manage service sessions (breaks, lunch, registration).
    Service {
        #[command(subcommand)]
        action: ServiceAction,
    },

    /// Find the nearest available start time in a track.
    Slot {
        /// The conference day (YYYY-MM-DD).
        #[arg(long)]
        date: NaiveDate,

        /// Track index.
        #[arg(long)]
        track: usize,

        /// Item duration in minutes.
        #[arg(long)]
        duration: u16,

        /// Desired start time (HH:MM).
        #[arg(long)]
        near: TimeOfDay,
    },

    /// Print a day's schedule per track.
    Show {
        /// The conference day (YYYY-MM-DD).
        date: NaiveDate,
    },

    /// Check schedule invariants across all stored days.
    Validate,
}

/// Day management actions.
#[derive(Debug, Subcommand)]
pub enum DayAction {
    /// Add an empty schedule for a date.
    Add {
        /// The conference day (YYYY-MM-DD).
        date: NaiveDate,
    },

    /// List stored days.
    List,
}

/// Track management actions.
#[derive(Debug, Subcommand)]
pub enum TrackAction {
    /// Add a track to a day.
    Add {
        /// The conference day (YYYY-MM-DD).
        #[arg(long)]
        date: NaiveDate,

        /// Track title.
        #[arg(long)]
        title: String,

        /// Track description.
        #[arg(long, default_value = "")]
        description: String,
    },

    /// Replace a track's title and description.
    Rename {
        /// The conference day (YYYY-MM-DD).
        #[arg(long)]
        date: NaiveDate,

        /// Track index.
        #[arg(long)]
        track: usize,

        /// New title.
        #[arg(long)]
        title: String,

        /// New description.
        #[arg(long, default_value = "")]
        description: String,
    },

    /// Remove a track; its talks return to the unassigned pool.
    Remove {
        /// The conference day (YYYY-MM-DD).
        #[arg(long)]
        date: NaiveDate,

        /// Track index.
        #[arg(long)]
        track: usize,
    },
}

/// Service session actions.
#[derive(Debug, Subcommand)]
pub enum ServiceAction {
    /// Create a service session.
    Add {
        /// The conference day (YYYY-MM-DD).
        #[arg(long)]
        date: NaiveDate,

        /// Track index.
        #[arg(long)]
        track: usize,

        /// Session label (e.g. "Coffee Break").
        #[arg(long)]
        label: String,

        /// Exact start time (HH:MM).
        #[arg(long)]
        at: TimeOfDay,

        /// Duration in minutes (5-180, 5-minute steps).
        #[arg(long)]
        duration: u16,
    },

    /// Move a service session to a track/start.
    Move {
        /// The conference day (YYYY-MM-DD).
        #[arg(long)]
        date: NaiveDate,

        /// Source track index.
        #[arg(long)]
        track: usize,

        /// Entry index within the source track.
        #[arg(long)]
        entry: usize,

        /// Target track index.
        #[arg(long)]
        to_track: usize,

        /// Exact start time (HH:MM).
        #[arg(long)]
        at: TimeOfDay,
    },

    /// Resize a service session (clamped to 5-180 minutes).
    Resize {
        /// The conference day (YYYY-MM-DD).
        #[arg(long)]
        date: NaiveDate,

        /// Track index.
        #[arg(long)]
        track: usize,

        /// Entry index within the track.
        #[arg(long)]
        entry: usize,

        /// Requested duration in minutes.
        #[arg(long)]
        minutes: u16,
    },

    /// Replace a service session's label.
    Rename {
        /// The conference day (YYYY-MM-DD).
        #[arg(long)]
        date: NaiveDate,

        /// Track index.
        #[arg(long)]
        track: usize,

        /// Entry index within the track.
        #[arg(long)]
        entry: usize,

        /// New label.
        #[arg(long)]
        label: String,
    },

    /// Copy a service session into every other track (best-effort).
    Duplicate {
        /// The conference day (YYYY-MM-DD).
        #[arg(long)]
        date: NaiveDate,

        /// Track index.
        #[arg(long)]
        track: usize,

        /// Entry index within the track.
        #[arg(long)]
        entry: usize,
    },
}
