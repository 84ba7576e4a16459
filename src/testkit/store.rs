//! In-memory stores with failure injection.
//!
//! [`MemoryTradeStore`] keeps the "persisted" collection in a mutex and can
//! be told to fail loads or saves, or to stall, so manager tests can cover
//! storage outages and timeouts without touching disk.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::{BackendKind, Preferences, Trade};
use crate::error::{Error, Result};
use crate::port::{PreferenceStore, StoreFactory, TradeStore};

/// Trade store backed by a `Vec` in memory.
#[derive(Debug)]
pub struct MemoryTradeStore {
    kind: BackendKind,
    trades: Mutex<Vec<Trade>>,
    fail_load: AtomicBool,
    fail_save: AtomicBool,
    delay: Mutex<Option<Duration>>,
    saves: AtomicUsize,
}

impl MemoryTradeStore {
    pub fn new(kind: BackendKind) -> Self {
        Self::with_trades(kind, Vec::new())
    }

    pub fn with_trades(kind: BackendKind, trades: Vec<Trade>) -> Self {
        Self {
            kind,
            trades: Mutex::new(trades),
            fail_load: AtomicBool::new(false),
            fail_save: AtomicBool::new(false),
            delay: Mutex::new(None),
            saves: AtomicUsize::new(0),
        }
    }

    /// Make subsequent loads fail.
    pub fn fail_loads(&self, fail: bool) {
        self.fail_load.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent saves fail.
    pub fn fail_saves(&self, fail: bool) {
        self.fail_save.store(fail, Ordering::SeqCst);
    }

    /// Sleep this long inside every load and save.
    pub fn set_delay(&self, delay: Option<Duration>) {
        *self.delay.lock() = delay;
    }

    /// Currently persisted trades.
    pub fn stored(&self) -> Vec<Trade> {
        self.trades.lock().clone()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    async fn stall(&self) {
        let delay = *self.delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl TradeStore for MemoryTradeStore {
    fn kind(&self) -> BackendKind {
        self.kind
    }

    async fn load_all(&self) -> Result<Vec<Trade>> {
        self.stall().await;
        if self.fail_load.load(Ordering::SeqCst) {
            return Err(Error::storage(self.kind, "injected load failure"));
        }
        Ok(self.stored())
    }

    async fn save_all(&self, trades: &[Trade]) -> Result<()> {
        self.stall().await;
        if self.fail_save.load(Ordering::SeqCst) {
            return Err(Error::storage(self.kind, "injected save failure"));
        }
        *self.trades.lock() = trades.to_vec();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Factory handing out one shared [`MemoryTradeStore`] per backend kind.
#[derive(Debug, Default)]
pub struct MemoryStoreFactory {
    stores: Mutex<HashMap<BackendKind, Arc<MemoryTradeStore>>>,
}

impl MemoryStoreFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// The store for `kind`, created empty on first use.
    pub fn store(&self, kind: BackendKind) -> Arc<MemoryTradeStore> {
        Arc::clone(
            self.stores
                .lock()
                .entry(kind)
                .or_insert_with(|| Arc::new(MemoryTradeStore::new(kind))),
        )
    }
}

impl StoreFactory for MemoryStoreFactory {
    fn open(&self, kind: BackendKind) -> Result<Arc<dyn TradeStore>> {
        let store: Arc<dyn TradeStore> = self.store(kind);
        Ok(store)
    }
}

/// Preference store backed by memory.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    preferences: Mutex<Option<Preferences>>,
    fail_load: AtomicBool,
    fail_save: AtomicBool,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(preferences: Preferences) -> Self {
        Self {
            preferences: Mutex::new(Some(preferences)),
            fail_load: AtomicBool::new(false),
            fail_save: AtomicBool::new(false),
        }
    }

    pub fn fail_loads(&self, fail: bool) {
        self.fail_load.store(fail, Ordering::SeqCst);
    }

    pub fn fail_saves(&self, fail: bool) {
        self.fail_save.store(fail, Ordering::SeqCst);
    }

    /// Last saved preferences, `None` if never saved.
    pub fn saved(&self) -> Option<Preferences> {
        self.preferences.lock().clone()
    }
}

#[async_trait]
impl PreferenceStore for MemoryPreferenceStore {
    async fn load(&self) -> Result<Preferences> {
        if self.fail_load.load(Ordering::SeqCst) {
            return Err(Error::Io(std::io::Error::other("injected preference failure")));
        }
        Ok(self.saved().unwrap_or_default())
    }

    async fn save(&self, preferences: &Preferences) -> Result<()> {
        if self.fail_save.load(Ordering::SeqCst) {
            return Err(Error::Io(std::io::Error::other("injected preference failure")));
        }
        *self.preferences.lock() = Some(preferences.clone());
        Ok(())
    }
}
