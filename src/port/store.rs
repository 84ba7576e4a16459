//! Persistence port for the trade collection.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{BackendKind, Trade};
use crate::error::Result;

/// Whole-collection trade persistence.
///
/// Backends always read and write the complete collection; there is no
/// per-trade update.
#[async_trait]
pub trait TradeStore: Send + Sync {
    /// Backend this store writes to.
    fn kind(&self) -> BackendKind;

    /// Read every stored trade, in stored order.
    ///
    /// A backend with nothing stored yet returns an empty collection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StorageUnavailable`](crate::error::Error::StorageUnavailable)
    /// when the backend cannot be read. That means the collection is
    /// unknown, not empty.
    async fn load_all(&self) -> Result<Vec<Trade>>;

    /// Replace the stored collection with `trades`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StorageUnavailable`](crate::error::Error::StorageUnavailable)
    /// when the write fails.
    async fn save_all(&self, trades: &[Trade]) -> Result<()>;
}

/// Opens trade stores by backend kind.
pub trait StoreFactory: Send + Sync {
    /// Open (creating if needed) the store for `kind`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be initialized.
    fn open(&self, kind: BackendKind) -> Result<Arc<dyn TradeStore>>;
}
