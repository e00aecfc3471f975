//! Driver configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Settings captured by [`crate::TurnDriver`] at construction.
///
/// Every field has a default, so a TOML file only needs the keys it
/// changes:
///
/// ```toml
/// use_display = false
/// pause_between_turns_ms = 250
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct DriverConfig {
    /// Attach a display observer and show the game-over summary.
    #[serde(default = "default_use_display")]
    use_display: bool,

    /// Write per-turn debug lines to the report and tell players to be verbose.
    #[serde(default = "default_print_debug")]
    print_debug: bool,

    /// Abort the run when any action is rejected.
    #[serde(default = "default_strict_failures")]
    strict_failures: bool,

    /// Delay after each turn, in milliseconds. Zero disables the pause.
    #[serde(default)]
    pause_between_turns_ms: u64,

    /// Round cap handed to the game factory.
    #[serde(default = "default_maximum_rounds")]
    maximum_rounds: usize,
}

fn default_use_display() -> bool {
    true
}

fn default_print_debug() -> bool {
    true
}

fn default_strict_failures() -> bool {
    true
}

fn default_maximum_rounds() -> usize {
    1000
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            use_display: default_use_display(),
            print_debug: default_print_debug(),
            strict_failures: default_strict_failures(),
            pause_between_turns_ms: 0,
            maximum_rounds: default_maximum_rounds(),
        }
    }
}

impl DriverConfig {
    /// Creates a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration for unattended runs: no display, no debug output.
    pub fn headless() -> Self {
        Self::default().with_display(false).with_debug(false)
    }

    /// Enables or disables the display observer.
    pub fn with_display(mut self, enabled: bool) -> Self {
        self.use_display = enabled;
        self
    }

    /// Enables or disables debug printing.
    pub fn with_debug(mut self, enabled: bool) -> Self {
        self.print_debug = enabled;
        self
    }

    /// Enables or disables strict-failure mode.
    pub fn with_strict_failures(mut self, enabled: bool) -> Self {
        self.strict_failures = enabled;
        self
    }

    /// Sets the pause between turns.
    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause_between_turns_ms = pause.as_millis().try_into().unwrap_or(u64::MAX);
        self
    }

    /// Sets the round cap.
    pub fn with_maximum_rounds(mut self, rounds: usize) -> Self {
        self.maximum_rounds = rounds;
        self
    }

    /// Pause between turns as a [`Duration`].
    pub fn pause(&self) -> Duration {
        Duration::from_millis(self.pause_between_turns_ms)
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading driver config from file");
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::new(ConfigErrorKind::Read {
                path: path.display().to_string(),
                message: e.to_string(),
            })
        })?;

        let config = Self::from_toml(&content)?;
        info!(
            display = config.use_display,
            debug = config.print_debug,
            strict = config.strict_failures,
            max_rounds = config.maximum_rounds,
            "Driver config loaded"
        );
        Ok(config)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Renders this configuration as TOML.
    #[instrument(skip(self))]
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// What went wrong with a configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ConfigErrorKind {
    /// The file could not be read.
    #[display("Failed to read config file {}: {}", path, message)]
    Read {
        /// Path that was requested.
        path: String,
        /// Underlying I/O error.
        message: String,
    },
    /// The TOML was malformed or had a wrongly typed key.
    #[display("Failed to parse config: {}", _0)]
    Parse(String),
    /// The configuration could not be rendered as TOML.
    #[display("Failed to serialize config: {}", _0)]
    Serialize(String),
}

/// Configuration error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", kind, file, line)]
pub struct ConfigError {
    /// Error kind.
    pub kind: ConfigErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: ConfigErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Returns the error kind.
    pub fn kind(&self) -> &ConfigErrorKind {
        &self.kind
    }
}

impl From<toml::de::Error> for ConfigError {
    #[track_caller]
    fn from(err: toml::de::Error) -> Self {
        Self::new(ConfigErrorKind::Parse(err.to_string()))
    }
}

impl From<toml::ser::Error> for ConfigError {
    #[track_caller]
    fn from(err: toml::ser::Error) -> Self {
        Self::new(ConfigErrorKind::Serialize(err.to_string()))
    }
}
