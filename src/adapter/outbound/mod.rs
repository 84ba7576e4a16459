//! Outbound adapters: storage backends.

pub mod factory;
pub mod preference;
pub mod spreadsheet;
pub mod sqlite;

pub use factory::FileStoreFactory;
pub use preference::JsonPreferenceStore;
pub use spreadsheet::SpreadsheetTradeStore;
pub use sqlite::SqliteTradeStore;
