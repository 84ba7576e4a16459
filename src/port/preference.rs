//! Persistence port for user preferences.

use async_trait::async_trait;

use crate::domain::Preferences;
use crate::error::Result;

#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Stored preferences, or defaults when none were saved yet.
    async fn load(&self) -> Result<Preferences>;

    async fn save(&self, preferences: &Preferences) -> Result<()>;
}
