//! Schema bootstrap
//!
//! The `users`/`tasks` schema is embedded from `migrations/` at compile time
//! and applied when the service starts. Already-applied migrations are
//! skipped, so running this against an initialized database is a no-op.
//!
//! # Example
//!
//! ```no_run
//! use taskboard_shared::db::pool::{create_pool, PoolConfig};
//! use taskboard_shared::db::migrations::run_migrations;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool(&PoolConfig::new("postgresql://localhost/taskboard")).await?;
//! run_migrations(&pool).await?;
//! # Ok(())
//! # }
//! ```

use sqlx::postgres::PgPool;
use tracing::{info, warn};

/// Applies the embedded schema to the database
///
/// # Errors
///
/// Returns an error if a migration fails to execute or the recorded
/// checksum of an applied migration no longer matches the embedded file.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Applying database schema");

    match sqlx::migrate!("./migrations").run(pool).await {
        Ok(()) => {
            info!("Database schema is up to date");
            Ok(())
        }
        Err(e) => {
            warn!("Migration failed: {}", e);
            Err(e)
        }
    }
}
