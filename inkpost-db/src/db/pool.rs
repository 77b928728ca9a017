//! Connection pool construction
//!
//! Thin wrappers over `PgPoolOptions` so callers only ever hand over a URL
//! (or a loaded [`DatabaseConfig`]) and get the classified error taxonomy
//! back instead of raw sqlx errors.

use inkpost_core::DatabaseConfig;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::error::DbResult;

/// Pool size used when the caller doesn't specify one.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Open a pool against `database_url` with the default connection limit.
///
/// An unreachable store surfaces as
/// [`DbError::Connection`](crate::DbError::Connection).
pub async fn connect(database_url: &str) -> DbResult<PgPool> {
    connect_with_options(database_url, DEFAULT_MAX_CONNECTIONS).await
}

/// Open a pool with an explicit connection limit.
pub async fn connect_with_options(database_url: &str, max_connections: u32) -> DbResult<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Open a pool from a loaded configuration section. This is the seam the
/// application boot path goes through: config supplies the URL and limit,
/// this module turns them into a live pool.
pub async fn connect_from(config: &DatabaseConfig) -> DbResult<PgPool> {
    connect_with_options(&config.url, config.max_connections).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkpost_core::AppConfig;

    // These need a reachable PostgreSQL instance:
    //     DATABASE_URL=postgres://... cargo test -p inkpost-db -- --ignored

    #[tokio::test]
    #[ignore = "requires database"]
    async fn connect_from_config_round_trips() {
        let config = AppConfig::from_env().expect("DATABASE_URL required");
        let pool = connect_from(&config.database).await.expect("pool");

        let row: (i64,) = sqlx::query_as("SELECT 40 + 2")
            .fetch_one(&pool)
            .await
            .expect("query");
        assert_eq!(row.0, 42);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn pool_serves_parallel_queries() {
        let config = AppConfig::from_env().expect("DATABASE_URL required");
        let pool = connect_from(&config.database).await.expect("pool");

        let (a, b, c): ((i32,), (i32,), (i32,)) = tokio::try_join!(
            sqlx::query_as("SELECT 1").fetch_one(&pool),
            sqlx::query_as("SELECT 2").fetch_one(&pool),
            sqlx::query_as("SELECT 3").fetch_one(&pool),
        )
        .expect("parallel queries");

        assert_eq!((a.0, b.0, c.0), (1, 2, 3));
    }
}
