//! Wire form of a trade.
//!
//! [`TradeRecord`] is what export files and storage backends contain. Field
//! names are camelCase (`entryPrice`, `profitLoss`, ...). `profitLoss` is
//! always written and never trusted on the way back in: it is recomputed
//! from the prices, size and direction.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::TradeId;
use super::parse::timestamp;
use super::trade::{Direction, Trade, TradeParams};

/// Serializable trade record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TradeId>,
    pub symbol: String,
    #[serde(default)]
    pub market: String,
    pub entry_price: Decimal,
    pub exit_price: Decimal,
    pub quantity: Decimal,
    #[serde(with = "timestamp")]
    pub date: NaiveDateTime,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub direction: Direction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profit_loss: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_runup: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_drawdown: Option<Decimal>,
}

impl TradeRecord {
    /// Constructor arguments carried by this record.
    #[must_use]
    pub fn params(&self) -> TradeParams {
        TradeParams {
            symbol: self.symbol.clone(),
            market: self.market.clone(),
            entry_price: self.entry_price,
            exit_price: self.exit_price,
            quantity: self.quantity,
            date: self.date,
            notes: self.notes.clone(),
            direction: self.direction,
            max_runup: self.max_runup,
            max_drawdown: self.max_drawdown,
        }
    }

    /// Rebuild the trade, keeping the stored id or generating one.
    ///
    /// # Errors
    /// Returns a [`DomainError`] if the record violates a trade invariant.
    pub fn into_trade(self) -> Result<Trade, DomainError> {
        let params = self.params();
        match self.id {
            Some(id) => params.build_with_id(id),
            None => params.build(),
        }
    }

    /// Rebuild the trade under a fresh id, ignoring the stored one.
    ///
    /// # Errors
    /// Returns a [`DomainError`] if the record violates a trade invariant.
    pub fn into_new_trade(self) -> Result<Trade, DomainError> {
        self.params().build()
    }
}

impl From<&Trade> for TradeRecord {
    fn from(trade: &Trade) -> Self {
        Self {
            id: Some(trade.id().clone()),
            symbol: trade.symbol().to_string(),
            market: trade.market().to_string(),
            entry_price: trade.entry_price(),
            exit_price: trade.exit_price(),
            quantity: trade.quantity(),
            date: trade.date(),
            notes: trade.notes().map(str::to_string),
            direction: trade.direction(),
            profit_loss: Some(trade.profit_loss()),
            max_runup: trade.max_runup(),
            max_drawdown: trade.max_drawdown(),
        }
    }
}
