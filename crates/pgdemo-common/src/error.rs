//! Error type for the database path.
//!
//! Failures are classified by kind so logs say what actually went wrong, but
//! every kind converts to the same HTTP response: callers only ever see
//! `500 {"error":"Database query failed"}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Message returned to clients for any database failure.
pub const QUERY_FAILED_MESSAGE: &str = "Database query failed";

#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    /// The server could not be reached or refused the session
    /// (network, TLS, authentication, unknown database, closed pool).
    #[error("Database connection unavailable: {0}")]
    ConnectionUnavailable(#[source] sqlx::Error),

    /// No connection became available before the pool gave up.
    #[error("Database timed out: {0}")]
    Timeout(#[source] sqlx::Error),

    #[error("Database query error: {0}")]
    Query(#[source] sqlx::Error),
}

/// JSON error response body sent to clients.
#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
}

impl DemoError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    /// Short label used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ConnectionUnavailable(_) => "CONNECTION_UNAVAILABLE",
            Self::Timeout(_) => "TIMEOUT",
            Self::Query(_) => "QUERY_FAILED",
        }
    }
}

impl From<sqlx::Error> for DemoError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut => Self::Timeout(err),
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
            | sqlx::Error::Configuration(_) => Self::ConnectionUnavailable(err),
            sqlx::Error::Database(ref db)
                if db.code().is_some_and(|code| is_connection_sqlstate(&code)) =>
            {
                Self::ConnectionUnavailable(err)
            }
            _ => Self::Query(err),
        }
    }
}

/// SQLSTATEs the server reports when it will not serve this session at all.
fn is_connection_sqlstate(code: &str) -> bool {
    // 08: connection exception, 28: invalid authorization,
    // 57P0x: shutdown / cannot connect now, 3D000: database does not exist
    code.starts_with("08") || code.starts_with("28") || code.starts_with("57P") || code == "3D000"
}

impl IntoResponse for DemoError {
    fn into_response(self) -> Response {
        tracing::error!(kind = self.kind(), "{self}");

        let body = ErrorResponse {
            error: QUERY_FAILED_MESSAGE,
        };

        (self.status_code(), axum::Json(body)).into_response()
    }
}

/// Convenience type alias for Results using DemoError.
pub type DemoResult<T> = Result<T, DemoError>;
