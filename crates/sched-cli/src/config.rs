//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use sched_core::{EditWindow, TimeFormatError, TimeOfDay};

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the database file.
    pub database_path: PathBuf,

    /// Start of the visible editing window.
    pub day_start: TimeOfDay,

    /// End of the visible editing window.
    pub day_end: TimeOfDay,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_path", &self.database_path)
            .field("day_start", &self.day_start)
            .field("day_end", &self.day_end)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        let window = EditWindow::default();
        Self {
            database_path: data_dir.join("sched.db"),
            day_start: window.start(),
            day_end: window.end(),
        }
    }
}

impl Config {
    /// Loads configuration from default locations.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load() -> Result<Self, figment::Error> {
        Self::load_from(None)
    }

    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (SCHED_*)
        figment = figment.merge(Env::prefixed("SCHED_"));

        figment.extract()
    }

    /// The editing window the configured day bounds describe.
    pub fn window(&self) -> Result<EditWindow, TimeFormatError> {
        EditWindow::new(self.day_start, self.day_end)
    }
}

/// Returns the platform-specific config directory for sched.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("sched"))
}

/// Returns the platform-specific data directory for sched.
///
/// On Linux: `~/.local/share/sched`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("sched"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_data_dir_for_db() {
        let config = Config::default();
        let data_dir = dirs_data_path().unwrap();
        assert_eq!(config.database_path, data_dir.join("sched.db"));
    }

    #[test]
    fn default_window_is_valid() {
        let config = Config::default();
        let window = config.window().unwrap();
        assert_eq!(window, EditWindow::default());
    }
}
