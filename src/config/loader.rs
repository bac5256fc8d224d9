use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::config::types::Config;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/bones/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("bones").join("config.toml")
    }

    /// Loads configuration from the default config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - If the file exists, parses it as TOML and validates.
    /// - Returns an error if reading, parsing, or validation fails.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - `blank_timeout` is a representable, non-negative duration
    /// - at least one fade step
    /// - `fade_interval` is a representable, positive duration
    /// - `poll_interval_ms` is positive
    pub fn validate(&self) -> Result<(), ConfigError> {
        let writer = &self.writer;
        if Duration::try_from_secs_f64(writer.blank_timeout).is_err() {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "blank_timeout must be a non-negative number of seconds, got {}",
                    writer.blank_timeout
                ),
            });
        }

        if writer.fade_steps == 0 {
            return Err(ConfigError::ValidationError {
                message: "fade_steps must be at least 1".to_string(),
            });
        }

        if writer.fade_interval <= 0.0 || Duration::try_from_secs_f64(writer.fade_interval).is_err() {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "fade_interval must be a positive number of seconds, got {}",
                    writer.fade_interval
                ),
            });
        }

        if writer.poll_interval_ms == 0 {
            return Err(ConfigError::ValidationError {
                message: "poll_interval_ms must be positive".to_string(),
            });
        }

        Ok(())
    }
}
