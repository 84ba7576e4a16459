//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`domain`]: trade builders (`TradeBuilder`, `long`, `short`).
//! - [`store`]: in-memory [`TradeStore`](crate::port::TradeStore) and
//!   [`PreferenceStore`](crate::port::PreferenceStore) implementations with
//!   failure injection.

pub mod domain;
pub mod store;
