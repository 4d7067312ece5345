//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Start of the working day, as a time-of-day string.
    pub start_time: String,
    /// End of the working day, as a time-of-day string.
    pub end_time: String,
    /// Gaps shorter than this are not reported.
    pub minimum_slot_minutes: u32,
    /// IANA zone to report in; the system zone when unset.
    pub timezone: Option<String>,
    /// Path to the exported calendar events.
    pub events_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            start_time: "08:00".to_string(),
            end_time: "17:00".to_string(),
            minimum_slot_minutes: 30,
            timezone: None,
            events_path: data_dir.join("events.json"),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    ///
    /// Layers, later ones winning: built-in defaults, `config.toml` in the
    /// platform config directory, the given file, then `AVAIL_*` variables.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed("AVAIL_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for avail.
///
/// On Linux: `~/.config/avail`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("avail"))
}

/// Returns the platform-specific data directory for avail.
///
/// On Linux: `~/.local/share/avail`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("avail"))
}
