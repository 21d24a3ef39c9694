//! Front-end configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use strictly_sodas::DEFAULT_GAME_SIZE;
use tracing::{debug, info, instrument};

/// Settings for a play session.
///
/// Every field has a default, so an empty file (or no file at all) is a
/// valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// SQLite file holding progress and records.
    #[serde(default = "default_db_path")]
    db_path: PathBuf,

    /// File receiving trace output.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,

    /// Level to start at, if unlocked.
    #[serde(default = "default_starting_level")]
    starting_level: usize,

    /// Fixed seed for reproducible deals.
    #[serde(default)]
    seed: Option<u64>,

    /// Show the how-to-play screen on launch.
    #[serde(default = "default_show_instructions")]
    show_instructions: bool,
}

#[instrument]
fn default_db_path() -> PathBuf {
    PathBuf::from("strictly_sodas.db")
}

#[instrument]
fn default_log_file() -> PathBuf {
    PathBuf::from("strictly_sodas.log")
}

#[instrument]
fn default_starting_level() -> usize {
    DEFAULT_GAME_SIZE
}

#[instrument]
fn default_show_instructions() -> bool {
    true
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            log_file: default_log_file(),
            starting_level: default_starting_level(),
            seed: None,
            show_instructions: default_show_instructions(),
        }
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(db_path = %config.db_path.display(), "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Loads `path` if it exists, otherwise returns defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            debug!("No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Applies command-line overrides.
    #[instrument(skip(self))]
    pub fn with_overrides(
        mut self,
        db_path: Option<PathBuf>,
        log_file: Option<PathBuf>,
        seed: Option<u64>,
    ) -> Self {
        if let Some(db_path) = db_path {
            self.db_path = db_path;
        }
        if let Some(log_file) = log_file {
            self.log_file = log_file;
        }
        if seed.is_some() {
            self.seed = seed;
        }
        self
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
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
