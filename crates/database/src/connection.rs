use crate::error::DbError;
use sqlx::{PgPool, postgres::PgPoolOptions};
use std::time::Duration;

/// Establishes a connection pool to the PostgreSQL database.
///
/// The pool is cheap to clone and is meant to be created once at start-up
/// and handed to a `DbRepository`.
pub async fn connect(
    database_url: &str,
    max_connections: u32,
    acquire_timeout: Duration,
) -> Result<PgPool, DbError> {
    if database_url.trim().is_empty() {
        return Err(DbError::ConnectionConfigError(
            "DATABASE_URL must be set.".to_string(),
        ));
    }

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(acquire_timeout)
        .connect(database_url)
        .await?;

    tracing::info!(max_connections, "Connected to the database.");
    Ok(pool)
}

/// Applies the bundled migrations, creating the `students` table if needed.
pub async fn run_migrations(pool: &PgPool) -> Result<(), DbError> {
    // Use a relative path from the crate root
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Database migrations are up to date.");
    Ok(())
}
