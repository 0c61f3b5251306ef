//! Database migration command.

use fds_db::DbPool;

/// Apply every pending migration.
pub async fn run(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    tracing::info!("Running migrations...");
    fds_db::run_migrations(pool).await?;
    tracing::info!("Migrations complete");
    Ok(())
}
