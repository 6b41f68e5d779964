//! PostgreSQL queries and connection helpers.

use chrono::{DateTime, Utc};
use pgdemo_common::error::{DemoError, DemoResult};
use sqlx::PgPool;

/// The one query the service runs.
pub const CURRENT_TIME_QUERY: &str = "SELECT NOW() AS current_time";

/// Liveness probe — acquire one connection and hand it straight back.
///
/// Never fails; the result is for logging only. sqlx keeps retrying a refused
/// connection until the pool's acquire timeout (30s by default) and then
/// reports `PoolTimedOut`, so a database that is down at boot is logged that
/// late and as a connection failure rather than a timeout.
pub async fn liveness_probe(pool: &PgPool) -> bool {
    match pool.acquire().await {
        Ok(_conn) => {
            tracing::info!("✅ Connected to PostgreSQL");
            true
        }
        Err(e) => {
            let err = probe_failure(e);
            tracing::error!(kind = err.kind(), "❌ Database connection failed: {err}");
            false
        }
    }
}

/// During the probe nothing else holds connections, so running out of time
/// means the server never answered.
fn probe_failure(err: sqlx::Error) -> DemoError {
    match err {
        sqlx::Error::PoolTimedOut => DemoError::ConnectionUnavailable(err),
        other => DemoError::from(other),
    }
}

/// Fetch the database server's current time.
pub async fn current_time(pool: &PgPool) -> DemoResult<DateTime<Utc>> {
    let time = sqlx::query_scalar::<_, DateTime<Utc>>(CURRENT_TIME_QUERY)
        .fetch_one(pool)
        .await?;

    Ok(time)
}
