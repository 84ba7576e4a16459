//! Trade records.
//!
//! A [`Trade`] is a closed, manually journaled position: one entry price, one
//! exit price, a size and a direction. Trades are immutable after creation.
//! Edits rebuild the trade from [`TradeParams`] and keep the original id:
//!
//! ```
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//! use tradebook::domain::trade::{Direction, TradeParams};
//!
//! let date = NaiveDate::from_ymd_opt(2024, 3, 1)
//!     .unwrap()
//!     .and_hms_opt(9, 30, 0)
//!     .unwrap();
//!
//! let trade = TradeParams {
//!     symbol: "aapl".into(),
//!     market: "stock".into(),
//!     entry_price: dec!(100),
//!     exit_price: dec!(110),
//!     quantity: dec!(10),
//!     date,
//!     notes: None,
//!     direction: Direction::Long,
//!     max_runup: None,
//!     max_drawdown: None,
//! }
//! .build()
//! .unwrap();
//!
//! assert_eq!(trade.symbol(), "AAPL");
//! assert_eq!(trade.profit_loss(), dec!(100));
//!
//! // Edit: same id, new exit price, P/L follows.
//! let mut params = trade.params();
//! params.exit_price = dec!(105);
//! let edited = params.build_with_id(trade.id().clone()).unwrap();
//! assert_eq!(edited.id(), trade.id());
//! assert_eq!(edited.profit_loss(), dec!(50));
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::TradeId;
use super::money::{Pnl, Price, Quantity};
use super::parse::{parse_decimal, parse_timestamp};

/// Stated direction of a trade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Profits when exit > entry.
    #[default]
    Long,
    /// Profits when exit < entry.
    Short,
}

impl Direction {
    /// Lowercase wire name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Long => "long",
            Self::Short => "short",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "long" | "buy" => Ok(Self::Long),
            "short" | "sell" => Ok(Self::Short),
            _ => Err(DomainError::malformed("direction", s)),
        }
    }
}

/// Constructor arguments for a [`Trade`].
#[derive(Debug, Clone, PartialEq)]
pub struct TradeParams {
    pub symbol: String,
    pub market: String,
    pub entry_price: Price,
    pub exit_price: Price,
    pub quantity: Quantity,
    pub date: NaiveDateTime,
    pub notes: Option<String>,
    pub direction: Direction,
    /// Best unrealised P/L reached while the trade was open.
    pub max_runup: Option<Pnl>,
    /// Worst unrealised P/L reached while the trade was open.
    pub max_drawdown: Option<Pnl>,
}

/// Unparsed trade fields, as typed on the command line or read from a
/// spreadsheet cell. Empty optional fields mean "absent".
#[derive(Debug, Clone, Copy, Default)]
pub struct TradeText<'a> {
    pub symbol: &'a str,
    pub market: &'a str,
    pub entry_price: &'a str,
    pub exit_price: &'a str,
    pub quantity: &'a str,
    pub date: &'a str,
    pub notes: &'a str,
    pub direction: &'a str,
    pub max_runup: &'a str,
    pub max_drawdown: &'a str,
}

fn optional_decimal(field: &'static str, raw: &str) -> Result<Option<Decimal>, DomainError> {
    if raw.trim().is_empty() {
        Ok(None)
    } else {
        parse_decimal(field, raw).map(Some)
    }
}

impl TradeParams {
    /// Parse text fields into constructor arguments.
    ///
    /// An empty direction means [`Direction::Long`].
    ///
    /// # Errors
    /// Returns [`DomainError::MalformedInput`] naming the first field that
    /// does not parse.
    pub fn parse(text: &TradeText<'_>) -> Result<Self, DomainError> {
        let direction = if text.direction.trim().is_empty() {
            Direction::default()
        } else {
            text.direction.parse()?
        };
        let notes = Some(text.notes.to_string()).filter(|n| !n.trim().is_empty());

        Ok(Self {
            symbol: text.symbol.to_string(),
            market: text.market.to_string(),
            entry_price: parse_decimal("entryPrice", text.entry_price)?,
            exit_price: parse_decimal("exitPrice", text.exit_price)?,
            quantity: parse_decimal("quantity", text.quantity)?,
            date: parse_timestamp(text.date)?,
            notes,
            direction,
            max_runup: optional_decimal("maxRunup", text.max_runup)?,
            max_drawdown: optional_decimal("maxDrawdown", text.max_drawdown)?,
        })
    }

    /// Validate and build a trade with a freshly generated id.
    ///
    /// # Errors
    /// Returns a [`DomainError`] if any field violates the trade invariants.
    pub fn build(self) -> Result<Trade, DomainError> {
        self.build_with_id(TradeId::generate())
    }

    /// Validate and build a trade that keeps an existing id.
    ///
    /// # Errors
    /// Returns a [`DomainError`] if any field violates the trade invariants.
    pub fn build_with_id(self, id: TradeId) -> Result<Trade, DomainError> {
        let symbol = self.symbol.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(DomainError::EmptySymbol);
        }
        if self.entry_price <= Decimal::ZERO {
            return Err(DomainError::NonPositivePrice {
                field: "entryPrice",
                value: self.entry_price,
            });
        }
        if self.exit_price <= Decimal::ZERO {
            return Err(DomainError::NonPositivePrice {
                field: "exitPrice",
                value: self.exit_price,
            });
        }
        if self.quantity <= Decimal::ZERO {
            return Err(DomainError::NonPositiveQuantity {
                quantity: self.quantity,
            });
        }
        if let Some(runup) = self.max_runup {
            if runup < Decimal::ZERO {
                return Err(DomainError::InvalidExcursion {
                    field: "maxRunup",
                    value: runup,
                });
            }
        }
        // Both prices are positive, so the difference itself cannot overflow.
        if (self.exit_price - self.entry_price)
            .checked_mul(self.quantity)
            .is_none()
        {
            return Err(DomainError::OutOfRange { field: "profitLoss" });
        }
        if self.entry_price.checked_mul(self.quantity).is_none() {
            return Err(DomainError::OutOfRange { field: "notional" });
        }

        let notes = self
            .notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        Ok(Trade {
            id,
            symbol,
            market: self.market.trim().to_string(),
            entry_price: self.entry_price,
            exit_price: self.exit_price,
            quantity: self.quantity,
            date: self.date,
            notes,
            direction: self.direction,
            max_runup: self.max_runup,
            max_drawdown: self.max_drawdown,
        })
    }
}

/// A journaled trade.
///
/// Fields are private so that the derived profit/loss can never disagree
/// with the prices, size and direction it is computed from. Construction
/// also guarantees that profit/loss and notional fit in a [`Decimal`].
#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    id: TradeId,
    symbol: String,
    market: String,
    entry_price: Price,
    exit_price: Price,
    quantity: Quantity,
    date: NaiveDateTime,
    notes: Option<String>,
    direction: Direction,
    max_runup: Option<Pnl>,
    max_drawdown: Option<Pnl>,
}

impl Trade {
    #[must_use]
    pub const fn id(&self) -> &TradeId {
        &self.id
    }

    /// Upper-cased symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    #[must_use]
    pub fn market(&self) -> &str {
        &self.market
    }

    #[must_use]
    pub const fn entry_price(&self) -> Price {
        self.entry_price
    }

    #[must_use]
    pub const fn exit_price(&self) -> Price {
        self.exit_price
    }

    #[must_use]
    pub const fn quantity(&self) -> Quantity {
        self.quantity
    }

    #[must_use]
    pub const fn date(&self) -> NaiveDateTime {
        self.date
    }

    /// Calendar day the trade belongs to.
    #[must_use]
    pub fn trade_date(&self) -> NaiveDate {
        self.date.date()
    }

    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub const fn max_runup(&self) -> Option<Pnl> {
        self.max_runup
    }

    #[must_use]
    pub const fn max_drawdown(&self) -> Option<Pnl> {
        self.max_drawdown
    }

    /// Direction-adjusted profit or loss.
    #[must_use]
    pub fn profit_loss(&self) -> Pnl {
        let delta = (self.exit_price - self.entry_price) * self.quantity;
        match self.direction {
            Direction::Long => delta,
            Direction::Short => -delta,
        }
    }

    /// Entry notional (`entryPrice * quantity`).
    #[must_use]
    pub fn notional(&self) -> Decimal {
        self.entry_price * self.quantity
    }

    /// Returns true if the trade made money. Break-even is not a win.
    #[must_use]
    pub fn is_win(&self) -> bool {
        self.profit_loss() > Decimal::ZERO
    }

    /// Returns true if the trade lost money.
    #[must_use]
    pub fn is_loss(&self) -> bool {
        self.profit_loss() < Decimal::ZERO
    }

    /// Case-insensitive symbol comparison.
    #[must_use]
    pub fn matches_symbol(&self, symbol: &str) -> bool {
        self.symbol.eq_ignore_ascii_case(symbol.trim())
    }

    /// Constructor arguments that rebuild this trade.
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn params(entry: Decimal, exit: Decimal, qty: Decimal, direction: Direction) -> TradeParams {
        TradeParams {
            symbol: " msft ".into(),
            market: "stock".into(),
            entry_price: entry,
            exit_price: exit,
            quantity: qty,
            date: NaiveDate::from_ymd_opt(2024, 5, 2)
                .unwrap()
                .and_hms_opt(10, 15, 0)
                .unwrap(),
            notes: Some("  breakout  ".into()),
            direction,
            max_runup: None,
            max_drawdown: None,
        }
    }

    #[test]
    fn long_profits_when_price_rises() {
        let trade = params(dec!(100), dec!(110), dec!(10), Direction::Long)
            .build()
            .unwrap();
        assert_eq!(trade.profit_loss(), dec!(100));
        assert!(trade.is_win());
    }

    #[test]
    fn short_profits_when_price_falls() {
        let trade = params(dec!(50), dec!(40), dec!(5), Direction::Short)
            .build()
            .unwrap();
        assert_eq!(trade.profit_loss(), dec!(50));
    }

    #[test]
    fn short_loses_when_price_rises() {
        let trade = params(dec!(50), dec!(60), dec!(2), Direction::Short)
            .build()
            .unwrap();
        assert_eq!(trade.profit_loss(), dec!(-20));
        assert!(trade.is_loss());
    }

    #[test]
    fn break_even_is_neither_win_nor_loss() {
        let trade = params(dec!(20), dec!(20), dec!(3), Direction::Long)
            .build()
            .unwrap();
        assert!(!trade.is_win());
        assert!(!trade.is_loss());
    }

    #[test]
    fn symbol_is_trimmed_and_uppercased() {
        let trade = params(dec!(1), dec!(2), dec!(1), Direction::Long)
            .build()
            .unwrap();
        assert_eq!(trade.symbol(), "MSFT");
        assert!(trade.matches_symbol("msft"));
        assert_eq!(trade.notes(), Some("breakout"));
    }

    #[test]
    fn empty_symbol_is_rejected() {
        let mut p = params(dec!(1), dec!(2), dec!(1), Direction::Long);
        p.symbol = "   ".into();
        assert_eq!(p.build(), Err(DomainError::EmptySymbol));
    }

    #[test]
    fn non_positive_exit_is_rejected() {
        let result = params(dec!(1), dec!(0), dec!(1), Direction::Long).build();
        assert!(matches!(
            result,
            Err(DomainError::NonPositivePrice {
                field: "exitPrice",
                ..
            })
        ));
    }

    #[test]
    fn negative_quantity_is_rejected() {
        let result = params(dec!(1), dec!(2), dec!(-5), Direction::Short).build();
        assert!(matches!(
            result,
            Err(DomainError::NonPositiveQuantity { .. })
        ));
    }

    #[test]
    fn negative_runup_is_rejected() {
        let mut p = params(dec!(1), dec!(2), dec!(1), Direction::Long);
        p.max_runup = Some(dec!(-1));
        assert!(matches!(
            p.build(),
            Err(DomainError::InvalidExcursion { .. })
        ));
    }

    #[test]
    fn pnl_beyond_decimal_range_is_rejected() {
        let result = params(dec!(1), Decimal::MAX, dec!(2), Direction::Long).build();
        assert_eq!(result, Err(DomainError::OutOfRange { field: "profitLoss" }));
    }

    #[test]
    fn notional_beyond_decimal_range_is_rejected() {
        let result = params(Decimal::MAX, Decimal::MAX, dec!(2), Direction::Short).build();
        assert_eq!(result, Err(DomainError::OutOfRange { field: "notional" }));
    }

    #[test]
    fn largest_representable_pnl_is_accepted() {
        let trade = params(dec!(1), Decimal::MAX, dec!(1), Direction::Short)
            .build()
            .unwrap();
        assert_eq!(trade.profit_loss(), -(Decimal::MAX - dec!(1)));
    }

    #[test]
    fn rebuild_keeps_id_and_recomputes_pnl() {
        let trade = params(dec!(10), dec!(12), dec!(5), Direction::Long)
            .build()
            .unwrap();
        let mut p = trade.params();
        p.direction = Direction::Short;
        let edited = p.build_with_id(trade.id().clone()).unwrap();
        assert_eq!(edited.id(), trade.id());
        assert_eq!(edited.profit_loss(), dec!(-10));
    }

    #[test]
    fn parses_text_fields() {
        let text = TradeText {
            symbol: "nvda",
            market: "stock",
            entry_price: "$1,000",
            exit_price: "1010.5",
            quantity: "2",
            date: "2024-07-01T15:59",
            direction: "sell",
            max_runup: "30",
            ..Default::default()
        };
        let trade = TradeParams::parse(&text).unwrap().build().unwrap();
        assert_eq!(trade.direction(), Direction::Short);
        assert_eq!(trade.profit_loss(), dec!(-21.0));
        assert_eq!(trade.max_runup(), Some(dec!(30)));
        assert_eq!(trade.max_drawdown(), None);
        assert_eq!(trade.notes(), None);
    }

    #[test]
    fn unparsable_text_names_the_field() {
        let text = TradeText {
            symbol: "X",
            entry_price: "10",
            exit_price: "ten",
            quantity: "1",
            date: "2024-07-01",
            ..Default::default()
        };
        assert_eq!(
            TradeParams::parse(&text),
            Err(DomainError::malformed("exitPrice", "ten"))
        );
    }

    #[test]
    fn direction_parses_aliases() {
        assert_eq!("LONG".parse::<Direction>().unwrap(), Direction::Long);
        assert_eq!("sell".parse::<Direction>().unwrap(), Direction::Short);
        assert!("sideways".parse::<Direction>().is_err());
    }
}
