//! Persistence adapter: connection pool, migrations, models, repositories.
//!
//! All cross-request coordination in the system is delegated to PostgreSQL:
//! uniqueness invariants are enforced by `uq_`-prefixed constraints and the
//! atomic units (campaign + owner membership, invite redemption) run inside
//! transactions. Nothing in this crate caches state between calls.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;

/// Shared connection pool type.
pub type DbPool = sqlx::PgPool;

/// Create a connection pool for the given database URL.
///
/// `acquire_timeout` bounds how long a request may wait for a connection so
/// a saturated pool surfaces as an error instead of an indefinite hang.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await?;
    tracing::debug!(max_connections = 10, "Database pool created");
    Ok(pool)
}

/// Verify the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all pending migrations from `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// True if `err` is a unique-constraint violation (PostgreSQL 23505) on the
/// named constraint.
///
/// The engines use this to turn a lost uniqueness race into its well-typed
/// domain failure instead of a generic 500.
pub fn is_unique_violation(err: &sqlx::Error, constraint: &str) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some("23505") && db_err.constraint() == Some(constraint)
        }
        _ => false,
    }
}
