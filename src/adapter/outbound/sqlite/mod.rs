//! Key-value backend on SQLite.

pub mod database;
pub mod store;

pub use store::SqliteTradeStore;
