//! # Database Migrations
//!
//! The catalog schema, embedded into the binary.
//!
//! ## How Migrations Work
//! ```text
//! Database::new()
//!      │
//!      ▼
//! Check _sqlx_migrations table ── missing? create it
//!      │
//!      ▼
//! 001_initial_schema.sql   products table + title/created_at indexes
//!      │
//!      ▼
//! Record checksum in _sqlx_migrations
//! ```
//!
//! New files go in `migrations/sqlite/` as `NNN_description.sql`. Existing
//! files are never edited once released.

use sqlx::SqlitePool;
use tracing::info;

use crate::error::DbResult;

/// Embedded migrations from the workspace `migrations/sqlite` directory.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Runs all pending database migrations.
///
/// Idempotent, and each migration runs in its own transaction.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    info!("Checking for pending migrations");

    MIGRATOR.run(pool).await?;

    info!("All migrations applied successfully");
    Ok(())
}

/// Returns `(total_migrations, applied_migrations)` for diagnostics.
pub async fn migration_status(pool: &SqlitePool) -> DbResult<(usize, usize)> {
    let total = MIGRATOR.migrations.len();

    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
        .fetch_one(pool)
        .await
        .unwrap_or(0);

    Ok((total, usize::try_from(applied).unwrap_or(0)))
}
