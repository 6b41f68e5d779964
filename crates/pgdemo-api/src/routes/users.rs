//! Users route — runs the time query against the shared pool.

use axum::{extract::State, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use pgdemo_common::error::DemoResult;
use pgdemo_db::postgres;
use serde::Serialize;
use std::sync::Arc;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct UsersResponse {
    pub message: &'static str,
    pub time: DateTime<Utc>,
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/users", get(get_users))
}

/// GET /users — report the database clock.
///
/// Any failure is logged by [`pgdemo_common::error::DemoError`] and becomes a
/// generic 500.
async fn get_users(State(state): State<Arc<AppState>>) -> DemoResult<Json<UsersResponse>> {
    let time = postgres::current_time(&state.db.pg).await?;

    Ok(Json(UsersResponse {
        message: "DB connected!",
        time,
    }))
}
