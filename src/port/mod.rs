//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports are the seams between the trade manager and the outside world.
//! Adapters implement them; the application layer only ever sees the
//! traits.
//!
//! ```text
//!                 ┌──────────────────────────┐
//!   CLI ────────▶ │  TradeManager (app)      │
//!                 │  domain + metrics        │
//!                 └────────────┬─────────────┘
//!                              │
//!            ┌─────────────────┼───────────────────┐
//!            ▼                 ▼                   ▼
//!     ┌────────────┐    ┌─────────────┐    ┌──────────────┐
//!     │ TradeStore │    │StoreFactory │    │PreferenceStore│
//!     └────────────┘    └─────────────┘    └──────────────┘
//! ```
//!
//! - [`TradeStore`]: load and save the whole trade collection.
//! - [`StoreFactory`]: open a [`TradeStore`] for a [`BackendKind`](crate::domain::BackendKind).
//! - [`PreferenceStore`]: load and save user preferences.

pub mod preference;
pub mod store;

pub use preference::PreferenceStore;
pub use store::{StoreFactory, TradeStore};
