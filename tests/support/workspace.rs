use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;
use tradebook::adapter::outbound::{FileStoreFactory, JsonPreferenceStore};
use tradebook::application::TradeManager;
use tradebook::config::StorageConfig;

/// Temporary data directory with file-backed stores.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn join(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn storage(&self) -> StorageConfig {
        StorageConfig {
            data_dir: Some(self.dir.path().to_path_buf()),
            ..StorageConfig::default()
        }
    }

    /// Open and load a manager over this directory, the way the binary does.
    pub async fn manager(&self) -> TradeManager {
        let storage = self.storage();
        let factory = Arc::new(FileStoreFactory::new(storage.clone()));
        let preferences = Arc::new(JsonPreferenceStore::new(storage.preferences_path()));
        let manager = TradeManager::open(factory, preferences, Duration::from_secs(5))
            .await
            .expect("open manager");
        manager.load().await.expect("load trades");
        manager
    }
}
