//! Application configuration.
//!
//! Settings are read from a JSON file (`~/.clockdeck/config.json` unless a
//! path is given). Every field is optional; a missing file means defaults.
//!
//! # Example
//!
//! ```
//! use clockdeck::config::AppConfig;
//!
//! let config: AppConfig = serde_json::from_str(r#"{"countdown_tick_ms": 500}"#).unwrap();
//! assert_eq!(config.countdown_tick_ms, 500);
//! assert_eq!(config.refresh_ms, 10);
//! assert!(config.validate().is_ok());
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Tab, Theme};

/// Directory under the home directory holding the socket and config file.
pub const APP_DIR: &str = ".clockdeck";

/// Config file name inside [`APP_DIR`].
pub const CONFIG_FILE: &str = "config.json";

/// Socket file name inside [`APP_DIR`].
pub const SOCKET_FILE: &str = "clockdeck.sock";

fn default_refresh_ms() -> u64 {
    10
}

fn default_countdown_tick_ms() -> u64 {
    1000
}

fn default_notification_ttl_ms() -> u64 {
    3000
}

// ============================================================================
// ConfigError
// ============================================================================

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The home directory could not be determined.
    #[error("could not determine the home directory")]
    NoHomeDir,

    /// The config file exists but could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// File path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON for [`AppConfig`].
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        /// File path
        path: PathBuf,
        /// Underlying parse error
        #[source]
        source: serde_json::Error,
    },

    /// A value is out of its allowed range.
    #[error("{field} must be between {min} and {max} (got {value})")]
    OutOfRange {
        /// Field name
        field: &'static str,
        /// Lower bound
        min: u64,
        /// Upper bound
        max: u64,
        /// Rejected value
        value: u64,
    },
}

// ============================================================================
// AppConfig
// ============================================================================

/// Runtime settings for the daemon and the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Socket path; `~/.clockdeck/clockdeck.sock` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub socket_path: Option<PathBuf>,

    /// Display refresh interval for `watch` (1-1000 ms).
    #[serde(default = "default_refresh_ms")]
    pub refresh_ms: u64,

    /// Countdown tick period (10-60000 ms). One tick removes one second.
    #[serde(default = "default_countdown_tick_ms")]
    pub countdown_tick_ms: u64,

    /// How long a notification stays visible (100-60000 ms).
    #[serde(default = "default_notification_ttl_ms")]
    pub notification_ttl_ms: u64,

    /// Theme at daemon start.
    #[serde(default)]
    pub theme: Theme,

    /// Tab at daemon start.
    #[serde(default)]
    pub tab: Tab,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            socket_path: None,
            refresh_ms: default_refresh_ms(),
            countdown_tick_ms: default_countdown_tick_ms(),
            notification_ttl_ms: default_notification_ttl_ms(),
            theme: Theme::default(),
            tab: Tab::default(),
        }
    }
}

impl AppConfig {
    /// Loads the config from `path`, or from the default location when `None`.
    ///
    /// A missing file yields the defaults. The loaded config is validated.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::default_path()?,
        };

        if !path.exists() {
            tracing::debug!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let config: Self = serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;
        config.validate()?;

        tracing::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Default config file path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoHomeDir`] if the home directory is unknown.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        Ok(app_dir()?.join(CONFIG_FILE))
    }

    /// Socket path to use: the configured one or the default.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoHomeDir`] if no path is configured and the
    /// home directory is unknown.
    pub fn resolved_socket_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.socket_path {
            Some(path) => Ok(path.clone()),
            None => Ok(app_dir()?.join(SOCKET_FILE)),
        }
    }

    /// Overrides the socket path.
    #[must_use]
    pub fn with_socket_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.socket_path = Some(path.into());
        self
    }

    /// Overrides the countdown tick period.
    #[must_use]
    pub fn with_countdown_tick_ms(mut self, ms: u64) -> Self {
        self.countdown_tick_ms = ms;
        self
    }

    /// Validates value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::OutOfRange`] for the first field out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("refresh_ms", self.refresh_ms, 1, 1000)?;
        check_range("countdown_tick_ms", self.countdown_tick_ms, 10, 60_000)?;
        check_range("notification_ttl_ms", self.notification_ttl_ms, 100, 60_000)?;
        Ok(())
    }
}

fn app_dir() -> Result<PathBuf, ConfigError> {
    dirs::home_dir()
        .map(|home| home.join(APP_DIR))
        .ok_or(ConfigError::NoHomeDir)
}

fn check_range(field: &'static str, value: u64, min: u64, max: u64) -> Result<(), ConfigError> {
    if value < min || value > max {
        return Err(ConfigError::OutOfRange {
            field,
            min,
            max,
            value,
        });
    }
    Ok(())
}
