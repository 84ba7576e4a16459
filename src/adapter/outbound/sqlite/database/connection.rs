//! Database connection management using Diesel ORM.
//!
//! Provides connection pooling and migration support for the key-value
//! SQLite database.

use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::{RunQueryDsl, SqliteConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use crate::domain::BackendKind;
use crate::error::{Error, Result};

/// Embedded database migrations compiled from the migrations/ directory.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Type alias for a SQLite connection pool.
pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

/// How long a statement waits on a database locked by another process.
pub const BUSY_TIMEOUT_MS: u64 = 5000;

/// Pragmas applied to every pooled connection.
#[derive(Debug, Clone, Copy)]
struct ConnectionPragmas;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionPragmas {
    fn on_acquire(
        &self,
        conn: &mut SqliteConnection,
    ) -> std::result::Result<(), diesel::r2d2::Error> {
        diesel::sql_query(format!("PRAGMA busy_timeout={BUSY_TIMEOUT_MS}"))
            .execute(conn)
            .map(|_| ())
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Create a connection pool for the given database URL.
///
/// # Errors
/// Returns [`Error::StorageUnavailable`] if the pool cannot be created.
pub fn create_pool(database_url: &str) -> Result<DbPool> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Pool::builder()
        .max_size(4)
        .connection_customizer(Box::new(ConnectionPragmas))
        .build(manager)
        .map_err(|e| Error::storage(BackendKind::KeyValue, e))
}

/// Run all pending database migrations.
///
/// # Errors
/// Returns [`Error::StorageUnavailable`] if migrations fail.
pub fn run_migrations(pool: &DbPool) -> Result<()> {
    let mut conn = pool
        .get()
        .map_err(|e| Error::storage(BackendKind::KeyValue, e))?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| Error::storage(BackendKind::KeyValue, e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::prelude::*;

    #[derive(diesel::QueryableByName)]
    struct TableName {
        #[diesel(sql_type = diesel::sql_types::Text)]
        name: String,
    }

    #[derive(diesel::QueryableByName)]
    struct BusyTimeout {
        #[diesel(sql_type = diesel::sql_types::BigInt)]
        timeout: i64,
    }

    fn temp_url(dir: &tempfile::TempDir) -> String {
        dir.path().join("test.db").display().to_string()
    }

    #[test]
    fn run_migrations_creates_kv_table() {
        let dir = tempfile::tempdir().unwrap();
        let pool = create_pool(&temp_url(&dir)).unwrap();
        run_migrations(&pool).unwrap();

        let mut conn = pool.get().unwrap();
        let tables: Vec<String> = diesel::sql_query(
            "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' AND name != '__diesel_schema_migrations'",
        )
        .load::<TableName>(&mut conn)
        .unwrap()
        .into_iter()
        .map(|t| t.name)
        .collect();

        assert_eq!(tables, vec!["kv".to_string()]);
    }

    #[test]
    fn pooled_connections_wait_on_locks() {
        let dir = tempfile::tempdir().unwrap();
        let pool = create_pool(&temp_url(&dir)).unwrap();
        let mut conn = pool.get().unwrap();

        let rows = diesel::sql_query("PRAGMA busy_timeout")
            .load::<BusyTimeout>(&mut conn)
            .unwrap();
        assert_eq!(rows[0].timeout, BUSY_TIMEOUT_MS as i64);
    }

    #[test]
    fn run_migrations_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let pool = create_pool(&temp_url(&dir)).unwrap();
        run_migrations(&pool).unwrap();
        run_migrations(&pool).unwrap();
    }
}
