//! Postgres connection pool and schema bootstrap.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{debug, info};

use crate::DbError;

/// Type alias for the shared Postgres pool used by the invoice store.
pub type DbPool = PgPool;

/// How long a request waits for a free connection before failing.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Open a pool against `database_url` with at most `max_connections`.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, DbError> {
    info!(max_connections, "opening invoice database pool");
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(database_url)
        .await?;
    debug!(size = pool.size(), "pool ready");
    Ok(pool)
}

/// Apply the embedded migrations from the workspace `migrations/` directory.
///
/// Creates the `invoices` table on a fresh database; a no-op afterwards.
pub async fn run_migrations(pool: &DbPool) -> Result<(), DbError> {
    info!("applying invoice schema migrations");
    sqlx::migrate!("../../migrations").run(pool).await?;
    Ok(())
}
