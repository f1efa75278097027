//! Database connection management using Diesel ORM.
//!
//! Provides connection pooling, migration support, and connection
//! configuration for SQLite databases.

use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use crate::error::{Error, Result};

/// Embedded database migrations compiled from the migrations/ directory.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Database URL of a private in-memory database.
pub const IN_MEMORY: &str = ":memory:";

/// Type alias for a SQLite connection pool.
pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

/// Applies the per-connection pragmas whenever the pool opens a connection.
#[derive(Debug, Clone, Copy)]
struct ConnectionCustomizer {
    busy_timeout_ms: u64,
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionCustomizer {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> std::result::Result<(), diesel::r2d2::Error> {
        configure_sqlite_connection(conn, self.busy_timeout_ms).map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Create a connection pool for the given database URL.
///
/// Every connection gets `busy_timeout_ms` and foreign key enforcement
/// before it is handed out, including the ones used for migrations.
///
/// Every connection to `:memory:` opens a separate database, so in-memory
/// pools hold exactly one connection that is never recycled.
///
/// # Errors
/// Returns an error if the pool cannot be created.
pub fn create_pool(database_url: &str, max_size: u32, busy_timeout_ms: u64) -> Result<DbPool> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    let builder = Pool::builder().connection_customizer(Box::new(ConnectionCustomizer {
        busy_timeout_ms,
    }));

    let builder = if database_url == IN_MEMORY {
        builder
            .max_size(1)
            .min_idle(Some(1))
            .max_lifetime(None)
            .idle_timeout(None)
    } else {
        builder.max_size(max_size.max(1))
    };

    builder
        .build(manager)
        .map_err(|e| Error::Connection(e.to_string()))
}

/// Run all pending database migrations.
///
/// # Errors
/// Returns an error if migrations fail.
pub fn run_migrations(pool: &DbPool) -> Result<()> {
    let mut conn = pool.get().map_err(|e| Error::Connection(e.to_string()))?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| Error::Connection(e.to_string()))?;
    Ok(())
}

/// Switch a file-backed database to write-ahead logging.
///
/// # Errors
/// Returns an error if the pragma fails to apply.
pub fn enable_wal(pool: &DbPool) -> Result<()> {
    let mut conn = pool.get().map_err(|e| Error::Connection(e.to_string()))?;
    diesel::sql_query("PRAGMA journal_mode=WAL")
        .execute(&mut conn)
        .map_err(|e| Error::Database(e.to_string()))?;
    Ok(())
}

/// Set the busy timeout and enable foreign keys on one connection.
///
/// # Errors
/// Returns the Diesel error if a pragma fails to apply.
pub fn configure_sqlite_connection(conn: &mut SqliteConnection, busy_timeout_ms: u64) -> QueryResult<()> {
    diesel::sql_query(format!("PRAGMA busy_timeout={busy_timeout_ms}")).execute(conn)?;
    diesel::sql_query("PRAGMA foreign_keys=ON").execute(conn)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(diesel::QueryableByName)]
    struct TableName {
        #[diesel(sql_type = diesel::sql_types::Text)]
        name: String,
    }

    #[derive(diesel::QueryableByName)]
    struct Pragma {
        #[diesel(sql_type = diesel::sql_types::BigInt)]
        value: i64,
    }

    fn pragma(conn: &mut SqliteConnection, query: &str) -> i64 {
        diesel::sql_query(query)
            .get_result::<Pragma>(conn)
            .unwrap()
            .value
    }

    #[derive(diesel::QueryableByName)]
    struct TableCount {
        #[diesel(sql_type = diesel::sql_types::BigInt)]
        count: i64,
    }

    #[test]
    fn create_pool_with_memory_db() {
        let pool = create_pool(IN_MEMORY, 5, 5000);
        assert!(pool.is_ok());
    }

    #[test]
    fn memory_pool_is_capped_at_one_connection() {
        let pool = create_pool(IN_MEMORY, 5, 5000).unwrap();
        assert_eq!(pool.max_size(), 1);
    }

    #[test]
    fn memory_pool_never_recycles_its_connection() {
        let pool = create_pool(IN_MEMORY, 5, 5000).unwrap();

        assert_eq!(pool.min_idle(), Some(1));
        assert_eq!(pool.max_lifetime(), None);
        assert_eq!(pool.idle_timeout(), None);
    }

    #[test]
    fn file_pool_keeps_requested_size() {
        let dir = tempfile::tempdir().unwrap();
        let url = dir.path().join("pool.sqlite").display().to_string();

        let pool = create_pool(&url, 3, 5000).unwrap();
        assert_eq!(pool.max_size(), 3);
    }

    #[test]
    fn pooled_connections_arrive_configured() {
        let dir = tempfile::tempdir().unwrap();
        let url = dir.path().join("pragmas.sqlite").display().to_string();
        let pool = create_pool(&url, 2, 1234).unwrap();

        let mut conn = pool.get().unwrap();
        assert_eq!(pragma(&mut conn, "SELECT timeout AS value FROM pragma_busy_timeout"), 1234);
        assert_eq!(pragma(&mut conn, "SELECT foreign_keys AS value FROM pragma_foreign_keys"), 1);
    }

    #[test]
    fn run_migrations_creates_tables() {
        let pool = create_pool(IN_MEMORY, 1, 5000).unwrap();
        run_migrations(&pool).unwrap();

        let mut conn = pool.get().unwrap();
        let result: Vec<String> = diesel::sql_query(
            "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' AND name != '__diesel_schema_migrations' ORDER BY name"
        )
        .load::<TableName>(&mut conn)
        .unwrap()
        .into_iter()
        .map(|t| t.name)
        .collect();

        assert_eq!(
            result,
            vec![
                "account_snapshots".to_string(),
                "audit_entries".to_string(),
                "breadcrumbs".to_string(),
                "interactions".to_string(),
            ]
        );
    }

    #[test]
    fn run_migrations_is_idempotent() {
        let pool = create_pool(IN_MEMORY, 1, 5000).unwrap();

        run_migrations(&pool).unwrap();
        run_migrations(&pool).unwrap();

        let mut conn = pool.get().unwrap();
        let result: i64 = diesel::sql_query(
            "SELECT COUNT(*) as count FROM sqlite_master WHERE type='table' AND name='breadcrumbs'",
        )
        .load::<TableCount>(&mut conn)
        .unwrap()
        .first()
        .unwrap()
        .count;

        assert_eq!(result, 1);
    }

    #[test]
    fn configure_sqlite_connection_sets_pragmas() {
        let pool = create_pool(IN_MEMORY, 1, 5000).unwrap();
        let mut conn = pool.get().unwrap();

        assert!(configure_sqlite_connection(&mut conn, 5000).is_ok());
    }
}
