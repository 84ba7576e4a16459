//! SQLite trade store.
//!
//! The whole collection lives as one JSON array under the `trades` key of
//! the `kv` table, so a save is a single `REPLACE`. Diesel calls block, so
//! loads and saves run on the blocking thread pool.

use std::path::Path;

use async_trait::async_trait;
use diesel::prelude::*;
use tracing::debug;

use super::database::model::KvRow;
use super::database::schema::kv;
use super::database::{create_pool, run_migrations, DbPool};
use crate::domain::{BackendKind, Trade, TradeRecord};
use crate::error::{Error, Result};
use crate::port::TradeStore;

const TRADES_KEY: &str = "trades";

fn unavailable(reason: impl ToString) -> Error {
    Error::storage(BackendKind::KeyValue, reason)
}

/// SQLite-backed key-value trade store.
#[derive(Clone)]
pub struct SqliteTradeStore {
    pool: DbPool,
}

impl SqliteTradeStore {
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Open (creating if needed) the database at `path` and migrate it.
    ///
    /// # Errors
    /// Returns [`Error::StorageUnavailable`] if the file cannot be opened.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(unavailable)?;
        }
        let pool = create_pool(&path.display().to_string())?;
        run_migrations(&pool)?;
        Ok(Self::new(pool))
    }

    fn read_value(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.pool.get().map_err(unavailable)?;
        let row: Option<KvRow> = kv::table
            .find(key)
            .select(KvRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(unavailable)?;
        Ok(row.map(|r| r.value))
    }

    fn write_value(&self, key: &str, value: String) -> Result<()> {
        let mut conn = self.pool.get().map_err(unavailable)?;
        let row = KvRow {
            key: key.to_string(),
            value,
        };
        diesel::replace_into(kv::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(unavailable)?;
        Ok(())
    }

    fn read_trades(&self) -> Result<Vec<Trade>> {
        let Some(json) = self.read_value(TRADES_KEY)? else {
            return Ok(Vec::new());
        };
        let records: Vec<TradeRecord> = serde_json::from_str(&json).map_err(unavailable)?;
        records
            .into_iter()
            .map(TradeRecord::into_trade)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(unavailable)
    }

    fn write_trades(&self, trades: &[Trade]) -> Result<()> {
        let records: Vec<TradeRecord> = trades.iter().map(TradeRecord::from).collect();
        let json = serde_json::to_string(&records).map_err(unavailable)?;
        self.write_value(TRADES_KEY, json)
    }
}

#[async_trait]
impl TradeStore for SqliteTradeStore {
    fn kind(&self) -> BackendKind {
        BackendKind::KeyValue
    }

    async fn load_all(&self) -> Result<Vec<Trade>> {
        let store = self.clone();
        let trades = tokio::task::spawn_blocking(move || store.read_trades())
            .await
            .map_err(unavailable)??;
        debug!(count = trades.len(), "loaded trades from sqlite");
        Ok(trades)
    }

    async fn save_all(&self, trades: &[Trade]) -> Result<()> {
        let store = self.clone();
        let owned = trades.to_vec();
        tokio::task::spawn_blocking(move || store.write_trades(&owned))
            .await
            .map_err(unavailable)??;
        debug!(count = trades.len(), "saved trades to sqlite");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::domain::TradeBuilder;
    use rust_decimal_macros::dec;

    fn open_temp() -> (tempfile::TempDir, SqliteTradeStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteTradeStore::open(&dir.path().join("nested").join("trades.db")).unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn empty_database_loads_empty_collection() {
        let (_dir, store) = open_temp();
        assert!(store.load_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn save_replaces_whole_collection() {
        let (_dir, store) = open_temp();
        let first = vec![
            TradeBuilder::with_pnl(dec!(10)).symbol("A").build(),
            TradeBuilder::with_pnl(dec!(-5)).symbol("B").build(),
        ];
        store.save_all(&first).await.unwrap();
        assert_eq!(store.load_all().await.unwrap(), first);

        let second = vec![TradeBuilder::with_pnl(dec!(1)).symbol("C").build()];
        store.save_all(&second).await.unwrap();
        assert_eq!(store.load_all().await.unwrap(), second);
    }

    #[tokio::test]
    async fn corrupt_value_is_unavailable_not_empty() {
        let (_dir, store) = open_temp();
        store.write_value(TRADES_KEY, "{not json".into()).unwrap();
        let err = store.load_all().await.unwrap_err();
        assert!(matches!(err, Error::StorageUnavailable { .. }));
    }
}
