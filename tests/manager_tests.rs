//! Trade manager integration tests over the file-backed stores.

mod support;

use std::sync::Arc;
use std::time::{Duration, Instant};

use diesel::prelude::*;

use rust_decimal_macros::dec;
use support::workspace::Workspace;
use tradebook::adapter::outbound::{FileStoreFactory, JsonPreferenceStore};
use tradebook::application::{transfer, ManagerState, TradeManager};
use tradebook::domain::BackendKind;
use tradebook::error::{Error, ErrorKind};
use tradebook::testkit::domain::TradeBuilder;

#[tokio::test]
async fn fresh_directory_starts_empty_on_key_value() {
    let ws = Workspace::new();
    let manager = ws.manager().await;

    assert_eq!(manager.state().await, ManagerState::Ready);
    assert_eq!(manager.backend().await, BackendKind::KeyValue);
    assert!(manager.snapshot().trades.is_empty());
}

#[tokio::test]
async fn trades_survive_a_restart() {
    let ws = Workspace::new();
    let trade = TradeBuilder::with_pnl(dec!(42.5)).symbol("NVDA").notes("breakout").build();
    {
        let manager = ws.manager().await;
        manager.add(trade.clone()).await.unwrap();
    }

    let reopened = ws.manager().await;
    assert_eq!(reopened.snapshot().trades.to_vec(), vec![trade]);
}

#[tokio::test]
async fn concurrent_adds_are_all_persisted() {
    let ws = Workspace::new();
    let manager = Arc::new(ws.manager().await);
    let a = TradeBuilder::new("AAA").build();
    let b = TradeBuilder::new("BBB").build();

    let (ra, rb) = tokio::join!(manager.add(a.clone()), manager.add(b.clone()));
    ra.unwrap();
    rb.unwrap();

    assert_eq!(manager.snapshot().trades.len(), 2);
    let reopened = ws.manager().await;
    let stored = reopened.snapshot().trades.to_vec();
    assert_eq!(stored.len(), 2);
    assert!(stored.contains(&a));
    assert!(stored.contains(&b));
}

#[tokio::test]
async fn switching_backend_moves_trades_and_is_remembered() {
    let ws = Workspace::new();
    let trades = vec![
        TradeBuilder::with_pnl(dec!(10)).symbol("A").build(),
        TradeBuilder::with_pnl(dec!(-4)).symbol("B").short().build(),
    ];
    {
        let manager = ws.manager().await;
        manager.import_bulk(trades.clone()).await.unwrap();
        manager.set_backend(BackendKind::Spreadsheet).await.unwrap();
        assert_eq!(manager.backend().await, BackendKind::Spreadsheet);
    }
    assert!(ws.join("trades.csv").exists());

    let reopened = ws.manager().await;
    assert_eq!(reopened.backend().await, BackendKind::Spreadsheet);
    assert_eq!(reopened.snapshot().trades.to_vec(), trades);
    assert_eq!(
        reopened.preferences().await.unwrap().backend,
        BackendKind::Spreadsheet
    );
}

#[tokio::test]
async fn corrupt_preferences_survive_a_backend_switch() {
    let ws = Workspace::new();
    let manager = ws.manager().await;
    let path = ws.join("preferences.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = manager.set_backend(BackendKind::Spreadsheet).await.unwrap_err();
    assert!(matches!(err, Error::Json(_)));
    assert_eq!(manager.backend().await, BackendKind::Spreadsheet);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ not json");
}

#[tokio::test]
async fn export_then_import_duplicates_with_new_ids() {
    let ws = Workspace::new();
    let manager = ws.manager().await;
    let original = TradeBuilder::new("MSFT")
        .entry(dec!(400))
        .exit(dec!(404.5))
        .quantity(dec!(3))
        .runup(dec!(20))
        .drawdown(dec!(-6))
        .notes("earnings")
        .build();
    manager.add(original.clone()).await.unwrap();

    let date = chrono::NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
    let path = transfer::export_to_dir(&manager.snapshot().trades, ws.path(), date).unwrap();
    assert!(path.ends_with("tradebook-export-2024-07-01.json"));

    let imported = transfer::import_file(&path).unwrap();
    assert_eq!(manager.import_bulk(imported).await.unwrap(), 1);

    let trades = manager.snapshot().trades.to_vec();
    assert_eq!(trades.len(), 2);
    assert_ne!(trades[0].id(), trades[1].id());
    assert_eq!(trades[0].params(), original.params());
    assert_eq!(trades[0].profit_loss(), dec!(13.5));
}

#[tokio::test]
async fn locked_database_times_out_instead_of_blocking() {
    let ws = Workspace::new();
    let storage = ws.storage();
    let factory = Arc::new(FileStoreFactory::new(storage.clone()));
    let preferences = Arc::new(JsonPreferenceStore::new(storage.preferences_path()));
    let manager = TradeManager::open(factory, preferences, Duration::from_millis(100))
        .await
        .unwrap();
    manager.load().await.unwrap();

    let url = storage.database_path().display().to_string();
    let mut lock = SqliteConnection::establish(&url).unwrap();
    diesel::sql_query("BEGIN EXCLUSIVE").execute(&mut lock).unwrap();

    let started = Instant::now();
    let err = manager.add(TradeBuilder::new("LOCK").build()).await.unwrap_err();
    // The pooled connection would wait seconds for the lock.
    assert!(started.elapsed() < Duration::from_secs(2));
    assert_eq!(err.kind(), ErrorKind::StorageUnavailable);
    assert!(err.to_string().contains("timed out"));
    assert!(manager.is_dirty().await);
    assert_eq!(manager.snapshot().trades.len(), 1);

    diesel::sql_query("COMMIT").execute(&mut lock).unwrap();
}

#[tokio::test]
async fn corrupt_spreadsheet_fails_the_load() {
    let ws = Workspace::new();
    {
        let manager = ws.manager().await;
        manager.set_backend(BackendKind::Spreadsheet).await.unwrap();
    }
    std::fs::write(
        ws.join("trades.csv"),
        "symbol,entryPrice,exitPrice,quantity,date\nX,abc,1,1,2024-01-01\n",
    )
    .unwrap();

    let storage = ws.storage();
    let factory = Arc::new(FileStoreFactory::new(storage.clone()));
    let preferences = Arc::new(JsonPreferenceStore::new(storage.preferences_path()));
    let manager = TradeManager::open(factory, preferences, storage.timeout())
        .await
        .unwrap();

    let err = manager.load().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::StorageUnavailable);
    assert_eq!(manager.state().await, ManagerState::Uninitialized);
}
