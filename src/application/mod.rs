//! Application services: the trade collection manager and file transfer.

pub mod manager;
pub mod transfer;

pub use manager::{ManagerState, Snapshot, TradeManager};
