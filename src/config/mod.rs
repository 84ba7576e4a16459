//! Application configuration loading and validation.
//!
//! Configuration is a TOML file with three optional sections:
//!
//! ```toml
//! [logging]
//! level = "info"
//! format = "pretty"   # or "json"
//!
//! [storage]
//! data_dir = "/home/me/.tradebook"
//! default_backend = "keyvalue"   # or "spreadsheet"
//! timeout_ms = 5000
//!
//! [dashboard]
//! ranking_size = 5
//! streak_order = "storage"       # or "chronological"
//! ```
//!
//! ```no_run
//! use tradebook::config::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.logging.init();
//!     Ok(())
//! }
//! ```

pub mod dashboard;
pub mod logging;
pub mod paths;
pub mod storage;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

pub use dashboard::DashboardConfig;
pub use logging::LoggingConfig;
pub use storage::StorageConfig;

const LOG_FORMATS: &[&str] = &["pretty", "json"];

/// Main application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub storage: StorageConfig,
    pub dashboard: DashboardConfig,
}

impl Config {
    /// Parse and validate configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or a value is out of range.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is malformed, or fails
    /// validation.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load `path` if it exists, defaults otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file is unreadable or invalid.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Check that all values are within acceptable ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first bad field.
    pub fn validate(&self) -> Result<()> {
        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: format!("must be one of {}", LOG_FORMATS.join(", ")),
            }
            .into());
        }
        if self.storage.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "storage.timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.storage.database_file.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "storage.database_file",
                reason: "must not be empty".to_string(),
            }
            .into());
        }
        if self.storage.spreadsheet_file.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "storage.spreadsheet_file",
                reason: "must not be empty".to_string(),
            }
            .into());
        }
        if self.dashboard.ranking_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "dashboard.ranking_size",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Effective configuration rendered back to TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| {
            ConfigError::InvalidValue {
                field: "config",
                reason: e.to_string(),
            }
            .into()
        })
    }
}
