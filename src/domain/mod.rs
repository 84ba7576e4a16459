//! Trade journal domain types. No I/O.

pub mod error;
pub mod filter;
pub mod id;
pub mod money;
pub mod parse;
pub mod preference;
pub mod record;
pub mod trade;

pub use error::DomainError;
pub use filter::TradeFilter;
pub use id::TradeId;
pub use money::{Pnl, Price, Quantity};
pub use preference::{AutoBackup, BackendKind, DefaultView, Preferences, Theme};
pub use record::TradeRecord;
pub use trade::{Direction, Trade, TradeParams, TradeText};
