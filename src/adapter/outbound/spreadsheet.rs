//! Spreadsheet backend: the collection as a CSV file.
//!
//! The header row uses the wire field names (`entryPrice`, `profitLoss`,
//! ...) so the file opens cleanly in any spreadsheet application. Cells are
//! read as text and parsed field by field; `profitLoss` is written for
//! readers of the sheet and recomputed on load. File access runs on the
//! blocking thread pool.

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::parse::timestamp;
use crate::domain::{BackendKind, Trade, TradeId, TradeParams, TradeText};
use crate::error::{Error, Result};
use crate::port::TradeStore;

fn unavailable(reason: impl ToString) -> Error {
    Error::storage(BackendKind::Spreadsheet, reason)
}

/// One sheet row. Every cell is text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct SpreadsheetRow {
    id: String,
    symbol: String,
    market: String,
    entry_price: String,
    exit_price: String,
    quantity: String,
    date: String,
    notes: String,
    direction: String,
    profit_loss: String,
    max_runup: String,
    max_drawdown: String,
}

fn optional(value: Option<rust_decimal::Decimal>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl From<&Trade> for SpreadsheetRow {
    fn from(trade: &Trade) -> Self {
        Self {
            id: trade.id().to_string(),
            symbol: trade.symbol().to_string(),
            market: trade.market().to_string(),
            entry_price: trade.entry_price().to_string(),
            exit_price: trade.exit_price().to_string(),
            quantity: trade.quantity().to_string(),
            date: trade.date().format(timestamp::WIRE_FORMAT).to_string(),
            notes: trade.notes().unwrap_or_default().to_string(),
            direction: trade.direction().to_string(),
            profit_loss: trade.profit_loss().to_string(),
            max_runup: optional(trade.max_runup()),
            max_drawdown: optional(trade.max_drawdown()),
        }
    }
}

impl SpreadsheetRow {
    fn into_trade(self, line: usize) -> Result<Trade> {
        let text = TradeText {
            symbol: &self.symbol,
            market: &self.market,
            entry_price: &self.entry_price,
            exit_price: &self.exit_price,
            quantity: &self.quantity,
            date: &self.date,
            notes: &self.notes,
            direction: &self.direction,
            max_runup: &self.max_runup,
            max_drawdown: &self.max_drawdown,
        };
        let params =
            TradeParams::parse(&text).map_err(|e| unavailable(format!("row {line}: {e}")))?;
        let trade = if self.id.trim().is_empty() {
            params.build()
        } else {
            params.build_with_id(TradeId::from(self.id.trim()))
        };
        trade.map_err(|e| unavailable(format!("row {line}: {e}")))
    }
}

/// CSV-file trade store.
#[derive(Debug, Clone)]
pub struct SpreadsheetTradeStore {
    path: PathBuf,
}

impl SpreadsheetTradeStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn render(trades: &[Trade]) -> Result<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(vec![]);
        if trades.is_empty() {
            writer
                .serialize(SpreadsheetRow::default())
                .map_err(unavailable)?;
            // Header only: drop the blank row.
            let data = writer.into_inner().map_err(unavailable)?;
            let header_end = data.iter().position(|b| *b == b'\n').map_or(0, |i| i + 1);
            return Ok(data[..header_end].to_vec());
        }
        for trade in trades {
            writer
                .serialize(SpreadsheetRow::from(trade))
                .map_err(unavailable)?;
        }
        writer.into_inner().map_err(unavailable)
    }

    fn read_trades(&self) -> Result<Vec<Trade>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(&self.path)
            .map_err(unavailable)?;

        let mut trades = Vec::new();
        for (index, row) in reader.deserialize::<SpreadsheetRow>().enumerate() {
            let row = row.map_err(unavailable)?;
            // Header is line 1.
            trades.push(row.into_trade(index + 2)?);
        }
        Ok(trades)
    }

    fn write_trades(&self, trades: &[Trade]) -> Result<()> {
        let data = Self::render(trades)?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(unavailable)?;
        }
        let tmp = self.path.with_extension("csv.tmp");
        fs::write(&tmp, data).map_err(unavailable)?;
        fs::rename(&tmp, &self.path).map_err(unavailable)
    }
}

#[async_trait]
impl TradeStore for SpreadsheetTradeStore {
    fn kind(&self) -> BackendKind {
        BackendKind::Spreadsheet
    }

    async fn load_all(&self) -> Result<Vec<Trade>> {
        let store = self.clone();
        let trades = tokio::task::spawn_blocking(move || store.read_trades())
            .await
            .map_err(unavailable)??;
        debug!(count = trades.len(), path = %self.path.display(), "loaded trades from spreadsheet");
        Ok(trades)
    }

    async fn save_all(&self, trades: &[Trade]) -> Result<()> {
        let store = self.clone();
        let owned = trades.to_vec();
        tokio::task::spawn_blocking(move || store.write_trades(&owned))
            .await
            .map_err(unavailable)??;
        debug!(count = trades.len(), path = %self.path.display(), "saved trades to spreadsheet");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Direction;
    use crate::testkit::domain::TradeBuilder;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn missing_file_is_empty_collection() {
        let dir = tempfile::tempdir().unwrap();
        let store = SpreadsheetTradeStore::new(dir.path().join("trades.csv"));
        assert!(store.load_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn round_trips_through_csv() {
        let dir = tempfile::tempdir().unwrap();
        let store = SpreadsheetTradeStore::new(dir.path().join("trades.csv"));
        let trades = vec![
            TradeBuilder::new("AAPL")
                .entry(dec!(190.25))
                .exit(dec!(185))
                .quantity(dec!(3))
                .short()
                .notes("fade, gap \"up\"")
                .runup(dec!(20))
                .drawdown(dec!(-4.5))
                .build(),
            TradeBuilder::with_pnl(dec!(-12)).symbol("ES").market("futures").build(),
        ];
        store.save_all(&trades).await.unwrap();

        let loaded = store.load_all().await.unwrap();
        assert_eq!(loaded, trades);
        assert_eq!(loaded[0].direction(), Direction::Short);
        assert_eq!(loaded[0].notes(), Some("fade, gap \"up\""));
    }

    #[tokio::test]
    async fn sub_second_dates_survive_the_sheet() {
        let dir = tempfile::tempdir().unwrap();
        let store = SpreadsheetTradeStore::new(dir.path().join("trades.csv"));
        let at = chrono::NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_micro_opt(10, 0, 0, 750_125)
            .unwrap();
        let trades = vec![TradeBuilder::with_pnl(dec!(5)).at(at).build()];
        store.save_all(&trades).await.unwrap();

        let loaded = store.load_all().await.unwrap();
        assert_eq!(loaded[0].date(), at);
    }

    #[tokio::test]
    async fn header_uses_wire_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trades.csv");
        let store = SpreadsheetTradeStore::new(&path);
        store.save_all(&[]).await.unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content.trim_end(),
            "id,symbol,market,entryPrice,exitPrice,quantity,date,notes,direction,profitLoss,maxRunup,maxDrawdown"
        );
        assert!(store.load_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn bad_cell_is_unavailable_and_names_the_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trades.csv");
        fs::write(
            &path,
            "symbol,entryPrice,exitPrice,quantity,date\nX,10,11,1,2024-01-01\nY,ten,11,1,2024-01-01\n",
        )
        .unwrap();
        let err = SpreadsheetTradeStore::new(&path).load_all().await.unwrap_err();
        assert!(matches!(err, Error::StorageUnavailable { .. }));
        assert!(err.to_string().contains("row 3"));
    }

    #[tokio::test]
    async fn hand_edited_sheet_without_ids_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trades.csv");
        fs::write(
            &path,
            "symbol,entryPrice,exitPrice,quantity,date,direction\nmsft,$400,410,2,2024-05-01 10:00,long\n",
        )
        .unwrap();
        let trades = SpreadsheetTradeStore::new(&path).load_all().await.unwrap();
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].symbol(), "MSFT");
        assert_eq!(trades[0].profit_loss(), dec!(20));
    }
}
