//! Database migration runner
//!
//! Migrations are plain SQL files in the `migrations/` directory at the
//! workspace root, embedded at compile time and applied at startup. sqlx
//! tracks applied versions in its own bookkeeping table, so running the
//! binary against an up-to-date database is a no-op.

use sqlx::postgres::PgPool;
use tracing::{info, warn};

/// Runs all pending database migrations
///
/// # Errors
///
/// Returns an error if a migration fails to execute or the database
/// connection is lost mid-run.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Starting database migrations");

    match sqlx::migrate!("../migrations").run(pool).await {
        Ok(()) => {
            info!("All database migrations completed successfully");
            Ok(())
        }
        Err(e) => {
            warn!("Migration failed: {}", e);
            Err(e)
        }
    }
}
