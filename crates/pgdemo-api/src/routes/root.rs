//! Root endpoint — a plain "it's up" page that never touches the database.

use axum::{routing::get, Router};
use std::sync::Arc;

use crate::AppState;

pub const ROOT_BANNER: &str = "🚀 Node.js + PostgreSQL Demo App is running!";

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(root))
}

/// GET /
async fn root() -> &'static str {
    ROOT_BANNER
}
