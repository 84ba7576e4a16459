//! Storage backend configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::BackendKind;

use super::paths;

/// Where and how trades are persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Data directory. Defaults to `~/.tradebook`; `TRADEBOOK_DATA_DIR`
    /// overrides both.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// Backend used when no preference has been saved yet.
    pub default_backend: BackendKind,

    /// Upper bound for a single load or save, in milliseconds.
    pub timeout_ms: u64,

    /// SQLite file name, relative to the data directory.
    pub database_file: String,

    /// CSV file name, relative to the data directory.
    pub spreadsheet_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            default_backend: BackendKind::KeyValue,
            timeout_ms: 5_000,
            database_file: "tradebook.db".into(),
            spreadsheet_file: "trades.csv".into(),
        }
    }
}

impl StorageConfig {
    /// Effective data directory.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        if let Some(dir) = std::env::var_os(paths::DATA_DIR_ENV).filter(|d| !d.is_empty()) {
            return PathBuf::from(dir);
        }
        self.data_dir.clone().unwrap_or_else(paths::home_dir)
    }

    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.data_dir().join(&self.database_file)
    }

    #[must_use]
    pub fn spreadsheet_path(&self) -> PathBuf {
        self.data_dir().join(&self.spreadsheet_file)
    }

    #[must_use]
    pub fn preferences_path(&self) -> PathBuf {
        self.data_dir().join(paths::PREFERENCES_FILE)
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
