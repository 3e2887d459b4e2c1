//! User settings loaded from `rewind.toml`.

use derive_getters::Getters;
use derive_more::{Display, Error};
use rewind_tictactoe::MoveOrder;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Settings file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_PATH: &str = "rewind.toml";

/// Preferences for the terminal game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Settings {
    /// Order of the move list when the game opens.
    #[serde(default)]
    move_order: MoveOrder,

    /// Where the TUI writes its log.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,

    /// Whether the move list shows where each mark landed.
    #[serde(default = "default_show_locations")]
    show_locations: bool,
}

fn default_log_file() -> PathBuf {
    PathBuf::from("rewind.log")
}

fn default_show_locations() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            move_order: MoveOrder::default(),
            log_file: default_log_file(),
            show_locations: default_show_locations(),
        }
    }
}

impl Settings {
    /// Loads settings from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading settings from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let settings: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(order = settings.move_order.label(), "Settings loaded");
        Ok(settings)
    }

    /// Loads settings from `path`, or from [`DEFAULT_CONFIG_PATH`] if it exists.
    ///
    /// An explicit path must exist. A missing default file yields defaults.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => Self::from_file(DEFAULT_CONFIG_PATH),
            None => {
                debug!("No settings file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Applies command-line overrides.
    #[must_use]
    pub fn with_overrides(mut self, order: Option<MoveOrder>, log_file: Option<PathBuf>) -> Self {
        if let Some(order) = order {
            self.move_order = order;
        }
        if let Some(log_file) = log_file {
            self.log_file = log_file;
        }
        self
    }

    /// Logs the settings in effect.
    ///
    /// Settings are loaded before a subscriber exists, so callers report
    /// them again once logging is up.
    pub fn log_summary(&self) {
        info!(
            order = self.move_order.label(),
            log_file = %self.log_file.display(),
            show_locations = self.show_locations,
            "Settings in effect"
        );
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
