//! Opens the configured storage backends.

use std::sync::Arc;

use tracing::debug;

use crate::config::StorageConfig;
use crate::domain::BackendKind;
use crate::error::Result;
use crate::port::{StoreFactory, TradeStore};

use super::sqlite::SqliteTradeStore;
use super::spreadsheet::SpreadsheetTradeStore;

/// File-backed store factory rooted at the configured data directory.
pub struct FileStoreFactory {
    config: StorageConfig,
}

impl FileStoreFactory {
    #[must_use]
    pub fn new(config: StorageConfig) -> Self {
        Self { config }
    }
}

impl StoreFactory for FileStoreFactory {
    fn open(&self, kind: BackendKind) -> Result<Arc<dyn TradeStore>> {
        debug!(backend = %kind, "opening trade store");
        match kind {
            BackendKind::KeyValue => Ok(Arc::new(SqliteTradeStore::open(
                &self.config.database_path(),
            )?)),
            BackendKind::Spreadsheet => Ok(Arc::new(SpreadsheetTradeStore::new(
                self.config.spreadsheet_path(),
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opens_each_backend_under_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let factory = FileStoreFactory::new(StorageConfig {
            data_dir: Some(dir.path().to_path_buf()),
            ..Default::default()
        });

        assert_eq!(factory.open(BackendKind::KeyValue).unwrap().kind(), BackendKind::KeyValue);
        assert!(dir.path().join("tradebook.db").exists());
        assert_eq!(
            factory.open(BackendKind::Spreadsheet).unwrap().kind(),
            BackendKind::Spreadsheet
        );
    }
}
