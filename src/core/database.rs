use crate::core::config::DatabaseConfig;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::borrow::Cow;
use std::time::Duration;

/// PostgreSQL SQLSTATE for unique constraint violations
const UNIQUE_VIOLATION: &str = "23505";
/// PostgreSQL SQLSTATE for foreign key violations
const FOREIGN_KEY_VIOLATION: &str = "23503";

pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
        .connect(&config.url)
        .await
}

/// Name of the unique constraint that rejected a write, if that is what happened.
///
/// Returns `Some("")` when the driver reports a unique violation without a
/// constraint name.
pub fn unique_violation(e: &sqlx::Error) -> Option<&str> {
    match e {
        sqlx::Error::Database(db_err)
            if db_err.code() == Some(Cow::Borrowed(UNIQUE_VIOLATION)) =>
        {
            Some(db_err.constraint().unwrap_or(""))
        }
        _ => None,
    }
}

/// Whether a write failed because a referenced row does not exist
pub fn is_foreign_key_violation(e: &sqlx::Error) -> bool {
    matches!(
        e,
        sqlx::Error::Database(db_err) if db_err.code() == Some(Cow::Borrowed(FOREIGN_KEY_VIOLATION))
    )
}
