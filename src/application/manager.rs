//! Trade collection manager.
//!
//! [`TradeManager`] owns the in-memory working set and runs the
//! load → mutate → persist → notify cycle:
//!
//! - State moves `Uninitialized → Loading → Ready`. A failed load goes back
//!   to `Uninitialized`; mutations before `Ready` fail with
//!   [`Error::NotReady`].
//! - Every mutation saves the whole collection through the active
//!   [`TradeStore`], bounded by the configured timeout. The working set
//!   lock is held across the save, so concurrent mutations are serialized
//!   and the stored collection matches memory once they all return.
//! - A failed save keeps the mutation in memory and marks the manager
//!   dirty; [`TradeManager::flush`] retries.
//! - Subscribers receive a [`Snapshot`] after every change.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex};
use tracing::{info, warn};

use crate::domain::{BackendKind, Preferences, Trade, TradeId};
use crate::error::{Error, Result};
use crate::port::{PreferenceStore, StoreFactory, TradeStore};

/// Lifecycle of the working set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagerState {
    /// Nothing loaded; the collection is unknown.
    Uninitialized,
    Loading,
    Ready,
}

/// Immutable view of the collection at one revision.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Incremented on every load and mutation.
    pub revision: u64,
    pub trades: Arc<[Trade]>,
}

impl Snapshot {
    fn empty() -> Self {
        Self {
            revision: 0,
            trades: Arc::from(Vec::new()),
        }
    }
}

struct Inner {
    state: ManagerState,
    store: Arc<dyn TradeStore>,
    trades: Vec<Trade>,
    revision: u64,
    dirty: bool,
}

impl Inner {
    fn ensure_ready(&self) -> Result<()> {
        if self.state == ManagerState::Ready {
            Ok(())
        } else {
            Err(Error::NotReady)
        }
    }
}

/// Owner of the trade collection.
pub struct TradeManager {
    inner: Mutex<Inner>,
    factory: Arc<dyn StoreFactory>,
    preferences: Arc<dyn PreferenceStore>,
    timeout: Duration,
    notify: watch::Sender<Snapshot>,
}

impl TradeManager {
    /// Create a manager over `store`. Call [`load`](Self::load) before
    /// mutating.
    pub fn new(
        store: Arc<dyn TradeStore>,
        factory: Arc<dyn StoreFactory>,
        preferences: Arc<dyn PreferenceStore>,
        timeout: Duration,
    ) -> Self {
        let (notify, _) = watch::channel(Snapshot::empty());
        Self {
            inner: Mutex::new(Inner {
                state: ManagerState::Uninitialized,
                store,
                trades: Vec::new(),
                revision: 0,
                dirty: false,
            }),
            factory,
            preferences,
            timeout,
            notify,
        }
    }

    /// Open the backend named by the saved preferences.
    ///
    /// # Errors
    ///
    /// Returns an error if preferences cannot be read or the backend cannot
    /// be opened.
    pub async fn open(
        factory: Arc<dyn StoreFactory>,
        preferences: Arc<dyn PreferenceStore>,
        timeout: Duration,
    ) -> Result<Self> {
        let backend = preferences.load().await?.backend;
        let store = factory.open(backend)?;
        Ok(Self::new(store, factory, preferences, timeout))
    }

    pub async fn state(&self) -> ManagerState {
        self.inner.lock().await.state
    }

    /// Active backend.
    pub async fn backend(&self) -> BackendKind {
        self.inner.lock().await.store.kind()
    }

    /// True when the last save failed and memory is ahead of storage.
    pub async fn is_dirty(&self) -> bool {
        self.inner.lock().await.dirty
    }

    /// Load the collection from the active backend, replacing the working
    /// set.
    ///
    /// A dirty working set is flushed first so unsaved trades are not
    /// discarded.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StorageUnavailable`] if the backend cannot be read
    /// or a pending flush fails. After a failed read the manager is
    /// `Uninitialized`.
    pub async fn load(&self) -> Result<usize> {
        let mut inner = self.inner.lock().await;
        if inner.dirty {
            self.persist(&mut inner).await?;
        }

        inner.state = ManagerState::Loading;
        let backend = inner.store.kind();
        let loaded = match tokio::time::timeout(self.timeout, inner.store.load_all()).await {
            Ok(result) => result,
            Err(_) => Err(self.timed_out(backend)),
        };

        match loaded {
            Ok(trades) => {
                let count = trades.len();
                inner.trades = trades;
                inner.state = ManagerState::Ready;
                inner.revision += 1;
                self.publish(&inner);
                info!(backend = %backend, count, "trade collection loaded");
                Ok(count)
            }
            Err(e) => {
                inner.state = ManagerState::Uninitialized;
                warn!(backend = %backend, error = %e, "failed to load trade collection");
                Err(e)
            }
        }
    }

    /// Add a trade at the front of the collection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotReady`] before a successful load, or
    /// [`Error::StorageUnavailable`] if the save fails (the trade stays in
    /// memory).
    pub async fn add(&self, trade: Trade) -> Result<()> {
        self.mutate(|trades| {
            trades.insert(0, trade);
            Ok(())
        })
        .await
    }

    /// Replace the trade with the same id, keeping its position.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TradeNotFound`] if no trade has that id.
    pub async fn update(&self, trade: Trade) -> Result<()> {
        self.mutate(|trades| {
            let slot = trades
                .iter_mut()
                .find(|t| t.id() == trade.id())
                .ok_or_else(|| Error::TradeNotFound(trade.id().clone()))?;
            *slot = trade;
            Ok(())
        })
        .await
    }

    /// Remove a trade and return it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TradeNotFound`] if no trade has that id.
    pub async fn delete(&self, id: &TradeId) -> Result<Trade> {
        self.mutate(|trades| {
            let index = trades
                .iter()
                .position(|t| t.id() == id)
                .ok_or_else(|| Error::TradeNotFound(id.clone()))?;
            Ok(trades.remove(index))
        })
        .await
    }

    /// Prepend many trades at once, keeping their relative order, with a
    /// single save.
    ///
    /// # Errors
    ///
    /// Same as [`add`](Self::add).
    pub async fn import_bulk(&self, imported: Vec<Trade>) -> Result<usize> {
        let count = imported.len();
        self.mutate(|trades| {
            trades.splice(0..0, imported);
            Ok(count)
        })
        .await
    }

    /// Remove every trade. Returns how many were removed.
    ///
    /// # Errors
    ///
    /// Same as [`add`](Self::add).
    pub async fn clear(&self) -> Result<usize> {
        self.mutate(|trades| {
            let count = trades.len();
            trades.clear();
            Ok(count)
        })
        .await
    }

    /// Retry a failed save. No-op when nothing is pending.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StorageUnavailable`] if the save fails again.
    pub async fn flush(&self) -> Result<()> {
        let mut inner = self.inner.lock().await;
        if !inner.dirty {
            return Ok(());
        }
        self.persist(&mut inner).await
    }

    /// Move the collection to another backend and remember the choice.
    ///
    /// The collection is written to the new backend first. If that fails
    /// the old backend stays active and preferences are untouched. If the
    /// preferences cannot be read or saved afterwards, the manager still
    /// switches (the data is in both backends), the stored preferences are
    /// left as they were and the preference error is returned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotReady`] before a load, [`Error::BackendMigration`]
    /// if the new backend cannot be opened or written, or the preference
    /// store's error.
    pub async fn set_backend(&self, kind: BackendKind) -> Result<()> {
        let mut inner = self.inner.lock().await;
        inner.ensure_ready()?;
        let from = inner.store.kind();
        if from == kind {
            return Ok(());
        }

        let migration_error = |reason: String| Error::BackendMigration {
            from,
            to: kind,
            reason,
        };

        let target = self
            .factory
            .open(kind)
            .map_err(|e| migration_error(e.to_string()))?;
        match tokio::time::timeout(self.timeout, target.save_all(&inner.trades)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(migration_error(e.to_string())),
            Err(_) => return Err(migration_error(self.timed_out(kind).to_string())),
        }

        inner.store = target;
        inner.dirty = false;
        info!(from = %from, to = %kind, count = inner.trades.len(), "storage backend switched");

        let mut preferences = self.preferences.load().await?;
        preferences.backend = kind;
        self.preferences.save(&preferences).await
    }

    /// Current preferences.
    ///
    /// # Errors
    ///
    /// Returns the preference store's error.
    pub async fn preferences(&self) -> Result<Preferences> {
        self.preferences.load().await
    }

    /// Change one preference. `backend` migrates the collection through
    /// [`set_backend`](Self::set_backend).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Domain`] for unknown keys or values, otherwise as
    /// [`set_backend`](Self::set_backend) or the preference store.
    pub async fn set_preference(&self, key: &str, value: &str) -> Result<Preferences> {
        let mut preferences = self.preferences.load().await?;
        if key == "backend" {
            let kind: BackendKind = value.parse()?;
            self.set_backend(kind).await?;
            return self.preferences.load().await;
        }
        preferences.set(key, value)?;
        self.preferences.save(&preferences).await?;
        Ok(preferences)
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> Snapshot {
        self.notify.borrow().clone()
    }

    /// Receiver that observes every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.notify.subscribe()
    }

    /// Trade with `id` in the latest snapshot.
    pub fn find(&self, id: &TradeId) -> Option<Trade> {
        self.snapshot().trades.iter().find(|t| t.id() == id).cloned()
    }

    async fn mutate<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&mut Vec<Trade>) -> Result<T>,
    {
        let mut inner = self.inner.lock().await;
        inner.ensure_ready()?;
        let value = op(&mut inner.trades)?;
        inner.revision += 1;
        let saved = self.persist(&mut inner).await;
        self.publish(&inner);
        saved.map(|()| value)
    }

    async fn persist(&self, inner: &mut Inner) -> Result<()> {
        let backend = inner.store.kind();
        let result = match tokio::time::timeout(self.timeout, inner.store.save_all(&inner.trades))
            .await
        {
            Ok(result) => result,
            Err(_) => Err(self.timed_out(backend)),
        };

        match result {
            Ok(()) => {
                inner.dirty = false;
                Ok(())
            }
            Err(e) => {
                inner.dirty = true;
                warn!(backend = %backend, error = %e, "failed to persist trades, keeping them in memory");
                Err(match e {
                    Error::StorageUnavailable { .. } => e,
                    other => Error::storage(backend, other),
                })
            }
        }
    }

    fn publish(&self, inner: &Inner) {
        self.notify.send_replace(Snapshot {
            revision: inner.revision,
            trades: Arc::from(inner.trades.as_slice()),
        });
    }

    fn timed_out(&self, backend: BackendKind) -> Error {
        Error::storage(
            backend,
            format!("timed out after {} ms", self.timeout.as_millis()),
        )
    }
}
