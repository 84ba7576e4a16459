//! Preferences persisted as a JSON file in the data directory.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::Preferences;
use crate::error::Result;
use crate::port::PreferenceStore;

pub struct JsonPreferenceStore {
    path: PathBuf,
    defaults: Preferences,
}

impl JsonPreferenceStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            defaults: Preferences::default(),
        }
    }

    /// Preferences reported while no file has been saved.
    #[must_use]
    pub fn with_defaults(mut self, defaults: Preferences) -> Self {
        self.defaults = defaults;
        self
    }
}

#[async_trait]
impl PreferenceStore for JsonPreferenceStore {
    async fn load(&self) -> Result<Preferences> {
        if !self.path.exists() {
            return Ok(self.defaults.clone());
        }
        let content = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    async fn save(&self, preferences: &Preferences) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(preferences)?)?;
        debug!(path = %self.path.display(), "saved preferences");
        Ok(())
    }
}
