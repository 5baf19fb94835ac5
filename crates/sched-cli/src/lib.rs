//! Program scheduler CLI library.
//!
//! This crate provides the CLI interface for the program scheduler.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands, DayAction, ServiceAction, TrackAction};
pub use config::Config;
