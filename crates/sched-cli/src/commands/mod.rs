//! CLI subcommand implementations.

pub mod day;
pub mod import;
pub mod init;
pub mod place;
pub mod proposals;
pub mod service;
pub mod show;
pub mod slot;
pub mod track;
pub mod unplace;
pub mod util;
pub mod validate;
