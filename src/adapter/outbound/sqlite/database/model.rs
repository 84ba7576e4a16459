//! Database model types for Diesel ORM.

use diesel::prelude::*;

use super::schema::kv;

/// One key-value entry.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = kv)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct KvRow {
    pub key: String,
    pub value: String,
}
