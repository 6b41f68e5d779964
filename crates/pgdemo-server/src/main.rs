//! # pgdemo server
//!
//! Loads configuration, builds the shared pool, and serves the API.

use pgdemo_api::{build_router, AppState};
use pgdemo_db::Database;
use std::net::{Ipv4Addr, SocketAddr};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = pgdemo_common::config::load()?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pgdemo=debug,tower_http=debug".into()),
        )
        .with_target(true)
        .init();

    tracing::info!("Starting pgdemo v{}", env!("CARGO_PKG_VERSION"));

    // One pool for the whole process. The probe only logs; a dead database
    // at boot does not keep the server from listening.
    let db = Database::connect_lazy(&config.database);
    let _probe = db.spawn_liveness_probe();

    let router = build_router(AppState { db });
    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.server.port));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("✅ Server running on port {}", config.server.port);
    axum::serve(listener, router).await?;

    Ok(())
}
