//! # pgdemo-db
//!
//! Connection pool provider. Builds the one PostgreSQL pool the process uses
//! and runs a best-effort connectivity check next to it.

pub mod postgres;

use pgdemo_common::config::DatabaseConfig;
use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use tokio::task::JoinHandle;

/// Shared database state passed through Axum extractors.
#[derive(Clone)]
pub struct Database {
    pub pg: PgPool,
}

impl Database {
    /// Create the pool without opening a connection.
    ///
    /// Sizing and timeouts are left at the sqlx defaults. Must be called from
    /// within a Tokio runtime (the pool spawns its reaper task there).
    pub fn connect_lazy(config: &DatabaseConfig) -> Self {
        tracing::info!(?config, "Creating PostgreSQL pool");
        let pg = PgPoolOptions::new().connect_lazy_with(connect_options(config));
        Self { pg }
    }

    /// Wrap an already-built pool.
    pub fn from_pool(pg: PgPool) -> Self {
        Self { pg }
    }

    /// Probe connectivity in the background.
    ///
    /// The outcome is only logged; the pool is usable either way. The handle
    /// resolves to whether a connection could be acquired.
    pub fn spawn_liveness_probe(&self) -> JoinHandle<bool> {
        let pg = self.pg.clone();
        tokio::spawn(async move { postgres::liveness_probe(&pg).await })
    }
}

/// Translate the config into connect options.
///
/// Starts from the client defaults and overrides only the values that are
/// actually set. Empty strings count as unset.
pub fn connect_options(config: &DatabaseConfig) -> PgConnectOptions {
    let mut options = PgConnectOptions::new();

    if let Some(host) = non_empty(&config.host) {
        options = options.host(host);
    }
    if let Some(port) = config.port {
        options = options.port(port);
    }
    if let Some(user) = non_empty(&config.user) {
        options = options.username(user);
    }
    if let Some(password) = non_empty(&config.password) {
        options = options.password(password);
    }
    if let Some(name) = non_empty(&config.name) {
        options = options.database(name);
    }

    options
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
