//! User preferences.
//!
//! Preferences are user-editable settings persisted next to the trade data.
//! Only [`Preferences::backend`] drives behavior (backend selection); the
//! rest are opaque to the core and consumed by the presentation layer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Storage backend that holds the trade collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// SQLite key-value table.
    #[default]
    #[serde(alias = "kv")]
    KeyValue,
    /// CSV spreadsheet file.
    #[serde(alias = "csv")]
    Spreadsheet,
}

impl BackendKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::KeyValue => "keyvalue",
            Self::Spreadsheet => "spreadsheet",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keyvalue" | "kv" | "key-value" | "sqlite" => Ok(Self::KeyValue),
            "spreadsheet" | "csv" => Ok(Self::Spreadsheet),
            _ => Err(DomainError::malformed("backend", s)),
        }
    }
}

/// Color theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

/// View opened on startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefaultView {
    #[default]
    Dashboard,
    Trades,
    Calendar,
    Analytics,
}

/// Periodic backup settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoBackup {
    pub enabled: bool,
    pub interval_days: u32,
}

impl Default for AutoBackup {
    fn default() -> Self {
        Self {
            enabled: false,
            interval_days: 7,
        }
    }
}

/// Persisted user preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub backend: BackendKind,
    pub theme: Theme,
    pub default_view: DefaultView,
    /// chrono format string used when printing trade dates.
    pub date_format: String,
    pub auto_backup: AutoBackup,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            theme: Theme::default(),
            default_view: DefaultView::default(),
            date_format: "%Y-%m-%d %H:%M".to_string(),
            auto_backup: AutoBackup::default(),
        }
    }
}

impl Preferences {
    /// Set a preference by its key.
    ///
    /// Keys: `backend`, `theme`, `defaultView`, `dateFormat`,
    /// `autoBackup.enabled`, `autoBackup.intervalDays`.
    ///
    /// # Errors
    /// Returns [`DomainError::MalformedInput`] for unknown keys or values.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), DomainError> {
        match key {
            "backend" => self.backend = value.parse()?,
            "theme" => self.theme = parse_enum("theme", value)?,
            "defaultView" | "default_view" => {
                self.default_view = parse_enum("defaultView", value)?;
            }
            "dateFormat" | "date_format" => {
                if value.trim().is_empty() {
                    return Err(DomainError::malformed("dateFormat", value));
                }
                self.date_format = value.to_string();
            }
            "autoBackup.enabled" => {
                self.auto_backup.enabled = value
                    .trim()
                    .parse::<bool>()
                    .map_err(|_| DomainError::malformed("autoBackup.enabled", value))?;
            }
            "autoBackup.intervalDays" => {
                self.auto_backup.interval_days = value
                    .trim()
                    .parse::<u32>()
                    .ok()
                    .filter(|days| *days > 0)
                    .ok_or_else(|| DomainError::malformed("autoBackup.intervalDays", value))?;
            }
            _ => return Err(DomainError::malformed("preference key", key)),
        }
        Ok(())
    }
}

fn parse_enum<T: serde::de::DeserializeOwned>(
    field: &'static str,
    value: &str,
) -> Result<T, DomainError> {
    serde_json::from_value(serde_json::Value::String(value.trim().to_ascii_lowercase()))
        .map_err(|_| DomainError::malformed(field, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_key_value_backend() {
        let prefs = Preferences::default();
        assert_eq!(prefs.backend, BackendKind::KeyValue);
        assert!(!prefs.auto_backup.enabled);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let prefs: Preferences = serde_json::from_str(r#"{"theme":"dark"}"#).unwrap();
        assert_eq!(prefs.theme, Theme::Dark);
        assert_eq!(prefs.backend, BackendKind::KeyValue);
        assert_eq!(prefs.date_format, "%Y-%m-%d %H:%M");
    }

    #[test]
    fn backend_accepts_aliases() {
        assert_eq!("csv".parse::<BackendKind>().unwrap(), BackendKind::Spreadsheet);
        assert_eq!("kv".parse::<BackendKind>().unwrap(), BackendKind::KeyValue);
        let kind: BackendKind = serde_json::from_str("\"csv\"").unwrap();
        assert_eq!(kind, BackendKind::Spreadsheet);
    }

    #[test]
    fn set_updates_known_keys() {
        let mut prefs = Preferences::default();
        prefs.set("theme", "Light").unwrap();
        prefs.set("defaultView", "calendar").unwrap();
        prefs.set("autoBackup.enabled", "true").unwrap();
        prefs.set("autoBackup.intervalDays", "3").unwrap();

        assert_eq!(prefs.theme, Theme::Light);
        assert_eq!(prefs.default_view, DefaultView::Calendar);
        assert_eq!(prefs.auto_backup, AutoBackup { enabled: true, interval_days: 3 });
    }

    #[test]
    fn set_rejects_unknown_keys_and_values() {
        let mut prefs = Preferences::default();
        assert!(prefs.set("fontSize", "12").is_err());
        assert!(prefs.set("theme", "neon").is_err());
        assert!(prefs.set("autoBackup.intervalDays", "0").is_err());
    }
}
