//! Domain validation errors for trade records.
//!
//! These errors are returned by the validating constructors in
//! [`crate::domain::trade`] and surface as the `MalformedInput` error kind.
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//! use tradebook::domain::error::DomainError;
//! use tradebook::domain::trade::{Direction, TradeParams};
//!
//! let date = NaiveDate::from_ymd_opt(2024, 3, 1)
//!     .unwrap()
//!     .and_hms_opt(9, 30, 0)
//!     .unwrap();
//!
//! let result = TradeParams {
//!     symbol: "aapl".into(),
//!     market: "stock".into(),
//!     entry_price: dec!(0),
//!     exit_price: dec!(110),
//!     quantity: dec!(10),
//!     date,
//!     notes: None,
//!     direction: Direction::Long,
//!     max_runup: None,
//!     max_drawdown: None,
//! }
//! .build();
//!
//! assert!(matches!(result, Err(DomainError::NonPositivePrice { .. })));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that occur when trade invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A numeric or enumerated field could not be parsed.
    #[error("malformed {field}: '{value}'")]
    MalformedInput {
        /// Name of the offending field.
        field: &'static str,
        /// The raw text that failed to parse.
        value: String,
    },

    /// Symbols must contain at least one non-whitespace character.
    #[error("symbol cannot be empty")]
    EmptySymbol,

    /// Entry and exit prices must be strictly positive.
    #[error("{field} must be positive, got {value}")]
    NonPositivePrice {
        /// Either `entryPrice` or `exitPrice`.
        field: &'static str,
        /// The invalid price that was provided.
        value: Decimal,
    },

    /// Quantity must be strictly positive; direction carries the sign.
    #[error("quantity must be positive, got {quantity}")]
    NonPositiveQuantity {
        /// The invalid quantity that was provided.
        quantity: Decimal,
    },

    /// Excursion annotations have a fixed sign.
    #[error("{field} has the wrong sign: {value}")]
    InvalidExcursion {
        /// Either `maxRunup` or `maxDrawdown`.
        field: &'static str,
        /// The rejected value.
        value: Decimal,
    },

    /// A derived amount does not fit in a decimal.
    #[error("{field} is out of range for the given prices and quantity")]
    OutOfRange {
        /// Either `profitLoss` or `notional`.
        field: &'static str,
    },
}

impl DomainError {
    /// Build a [`DomainError::MalformedInput`] for a field.
    pub fn malformed(field: &'static str, value: impl Into<String>) -> Self {
        Self::MalformedInput {
            field,
            value: value.into(),
        }
    }
}
