//! Path utilities for tradebook.
//!
//! All data lives under `~/.tradebook/` unless configured otherwise:
//! - `~/.tradebook/config.toml` - main configuration
//! - `~/.tradebook/tradebook.db` - key-value backend
//! - `~/.tradebook/trades.csv` - spreadsheet backend
//! - `~/.tradebook/preferences.json` - user preferences

use std::path::PathBuf;

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "TRADEBOOK_DATA_DIR";

/// Preferences file name inside the data directory.
pub const PREFERENCES_FILE: &str = "preferences.json";

/// Returns the tradebook home directory (`~/.tradebook/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".tradebook")
}

/// Returns the default config file path (`~/.tradebook/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_under_tradebook_home() {
        assert!(home_dir().to_string_lossy().contains(".tradebook"));
        assert!(default_config().to_string_lossy().ends_with("config.toml"));
    }
}
