pub mod admin;
pub mod migrate;

use fds_db::DbPool;

/// Database used when `DATABASE_URL` is unset.
const DEFAULT_DATABASE_URL: &str = "sqlite://fds.db";

/// Open a pool on `DATABASE_URL`.
pub async fn connect() -> Result<DbPool, sqlx::Error> {
    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.into());

    tracing::info!(database_url = %database_url, "Connecting to database");
    fds_db::create_pool(&database_url).await
}
