//! Builders for trades used across tests.
//!
//! [`TradeBuilder::with_pnl`] picks prices that produce a given profit/loss
//! so tests can state outcomes directly instead of price arithmetic.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::{Direction, Pnl, Price, Quantity, Trade, TradeParams};

const DEFAULT_ENTRY: Decimal = dec!(1000);

/// Fluent trade constructor with sensible defaults.
#[derive(Debug, Clone)]
pub struct TradeBuilder {
    symbol: String,
    market: String,
    entry: Price,
    exit: Option<Price>,
    quantity: Quantity,
    pnl: Option<Pnl>,
    date: NaiveDateTime,
    notes: Option<String>,
    direction: Direction,
    runup: Option<Pnl>,
    drawdown: Option<Pnl>,
}

impl TradeBuilder {
    /// A one-unit long trade in `symbol`, flat unless prices are set.
    pub fn new(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            market: "stock".to_string(),
            entry: DEFAULT_ENTRY,
            exit: None,
            quantity: Decimal::ONE,
            pnl: None,
            date: day("2024-01-02"),
            notes: None,
            direction: Direction::Long,
            runup: None,
            drawdown: None,
        }
    }

    /// A one-unit trade entered at 1000 whose exit yields `pnl`, whatever
    /// the direction.
    pub fn with_pnl(pnl: Pnl) -> Self {
        Self {
            pnl: Some(pnl),
            ..Self::new("TEST")
        }
    }

    pub fn symbol(mut self, symbol: &str) -> Self {
        self.symbol = symbol.to_string();
        self
    }

    pub fn market(mut self, market: &str) -> Self {
        self.market = market.to_string();
        self
    }

    pub fn entry(mut self, price: Price) -> Self {
        self.entry = price;
        self
    }

    pub fn exit(mut self, price: Price) -> Self {
        self.exit = Some(price);
        self.pnl = None;
        self
    }

    pub fn quantity(mut self, quantity: Quantity) -> Self {
        self.quantity = quantity;
        self
    }

    /// Trade on `YYYY-MM-DD` at noon.
    pub fn on(mut self, date: &str) -> Self {
        self.date = day(date);
        self
    }

    pub fn at(mut self, date: NaiveDateTime) -> Self {
        self.date = date;
        self
    }

    pub fn long(mut self) -> Self {
        self.direction = Direction::Long;
        self
    }

    pub fn short(mut self) -> Self {
        self.direction = Direction::Short;
        self
    }

    pub fn notes(mut self, notes: &str) -> Self {
        self.notes = Some(notes.to_string());
        self
    }

    pub fn runup(mut self, amount: Pnl) -> Self {
        self.runup = Some(amount);
        self
    }

    pub fn drawdown(mut self, amount: Pnl) -> Self {
        self.drawdown = Some(amount);
        self
    }

    pub fn params(&self) -> TradeParams {
        let exit = match (self.exit, self.pnl) {
            (Some(exit), _) => exit,
            (None, Some(pnl)) => {
                let move_per_unit = pnl / self.quantity;
                match self.direction {
                    Direction::Long => self.entry + move_per_unit,
                    Direction::Short => self.entry - move_per_unit,
                }
            }
            (None, None) => self.entry,
        };
        TradeParams {
            symbol: self.symbol.clone(),
            market: self.market.clone(),
            entry_price: self.entry,
            exit_price: exit,
            quantity: self.quantity,
            date: self.date,
            notes: self.notes.clone(),
            direction: self.direction,
            max_runup: self.runup,
            max_drawdown: self.drawdown,
        }
    }

    /// Build the trade.
    ///
    /// # Panics
    /// Panics if the configured fields violate a trade invariant.
    pub fn build(self) -> Trade {
        self.params().build().expect("test trade must be valid")
    }
}

/// Parse `YYYY-MM-DD` into noon of that day.
///
/// # Panics
/// Panics on a malformed date.
pub fn day(date: &str) -> NaiveDateTime {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .expect("test date must be YYYY-MM-DD")
        .and_hms_opt(12, 0, 0)
        .expect("noon is a valid time")
}

/// Long trade with explicit prices.
pub fn long(symbol: &str, entry: Price, exit: Price, quantity: Quantity) -> Trade {
    TradeBuilder::new(symbol)
        .entry(entry)
        .exit(exit)
        .quantity(quantity)
        .build()
}

/// Short trade with explicit prices.
pub fn short(symbol: &str, entry: Price, exit: Price, quantity: Quantity) -> Trade {
    TradeBuilder::new(symbol)
        .entry(entry)
        .exit(exit)
        .quantity(quantity)
        .short()
        .build()
}
