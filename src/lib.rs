//! Tradebook - local trade journal with performance analytics.
//!
//! Record closed trades, keep them in a local store of your choice and
//! compute the figures a trader reviews: win rate, profit factor, equity
//! and drawdown curves, streaks, excursions and per-weekday, per-price and
//! per-symbol breakdowns.
//!
//! # Architecture
//!
//! The crate is laid out hexagonally:
//!
//! - **`domain`** - trades, ids, filters and preferences. No I/O.
//! - **`metrics`** - pure functions from a slice of trades to analytics.
//! - **`port`** - traits for trade and preference storage.
//! - **`adapter::outbound`** - SQLite key-value and CSV spreadsheet
//!   backends, JSON preference file.
//! - **`application`** - [`application::TradeManager`], the owner of the
//!   working set, plus JSON import/export.
//! - **`adapter::inbound::cli`** - the `tradebook` command line.
//!
//! # Modules
//!
//! - [`config`] - Configuration loading from TOML files
//! - [`domain`] - Trade record, parsing and validation
//! - [`error`] - Error types for the crate
//! - [`metrics`] - Metrics engine
//! - [`application`] - Trade collection manager
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tradebook::domain::{Direction, TradeParams};
//! use tradebook::metrics::{PerformanceSummary, StreakOrder};
//!
//! let trade = TradeParams {
//!     symbol: "aapl".into(),
//!     market: "stock".into(),
//!     entry_price: dec!(100),
//!     exit_price: dec!(110),
//!     quantity: dec!(10),
//!     date: chrono::NaiveDate::from_ymd_opt(2024, 3, 1)
//!         .unwrap()
//!         .and_hms_opt(10, 0, 0)
//!         .unwrap(),
//!     notes: None,
//!     direction: Direction::Long,
//!     max_runup: None,
//!     max_drawdown: None,
//! }
//! .build()
//! .unwrap();
//!
//! let summary = PerformanceSummary::compute(&[trade], StreakOrder::Storage);
//! assert_eq!(summary.net_pnl, dec!(100));
//! ```

pub mod adapter;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
