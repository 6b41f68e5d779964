//! # pgdemo-api
//!
//! HTTP layer for pgdemo: the root banner and the `/users` database check.

pub mod routes;

use axum::Router;
use pgdemo_db::Database;
use std::sync::Arc;

/// Shared application state available to all route handlers.
#[derive(Clone)]
pub struct AppState {
    /// The process-wide pool. Built once at startup, never per request.
    pub db: Database,
}

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::root::router())
        .merge(routes::users::router())
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
    use std::time::Duration;
    use tower::ServiceExt;

    /// Database whose pool points at a port nothing listens on.
    fn unreachable_database() -> Database {
        let options = PgConnectOptions::new().host("127.0.0.1").port(1);
        let pool = PgPoolOptions::new()
            .acquire_timeout(Duration::from_millis(500))
            .connect_lazy_with(options);

        Database::from_pool(pool)
    }

    fn app_without_database() -> Router {
        build_router(AppState {
            db: unreachable_database(),
        })
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn root_returns_banner_without_database() {
        let response = app_without_database().oneshot(get("/")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("text/plain"));

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(
            std::str::from_utf8(&bytes).unwrap(),
            "🚀 Node.js + PostgreSQL Demo App is running!"
        );
    }

    #[tokio::test]
    async fn failed_startup_check_still_serves_root() {
        let db = unreachable_database();
        let connected = db.spawn_liveness_probe().await.unwrap();
        assert!(!connected);

        let app = build_router(AppState { db });
        let response = app.oneshot(get("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn users_returns_500_when_database_unreachable() {
        let response = app_without_database().oneshot(get("/users")).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "error": "Database query failed" })
        );
    }

    #[tokio::test]
    async fn failed_query_does_not_stop_the_router() {
        let app = app_without_database();

        let failed = app.clone().oneshot(get("/users")).await.unwrap();
        assert_eq!(failed.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let root = app.clone().oneshot(get("/")).await.unwrap();
        assert_eq!(root.status(), StatusCode::OK);

        let again = app.oneshot(get("/users")).await.unwrap();
        assert_eq!(again.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn concurrent_failures_are_independent() {
        let app = app_without_database();

        let (a, b) = tokio::join!(
            app.clone().oneshot(get("/users")),
            app.clone().oneshot(get("/users")),
        );

        for response in [a.unwrap(), b.unwrap()] {
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(
                body_json(response).await,
                serde_json::json!({ "error": "Database query failed" })
            );
        }
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let response = app_without_database()
            .oneshot(get("/nonexistent"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn post_to_users_is_rejected() {
        let request = Request::builder()
            .method("POST")
            .uri("/users")
            .body(Body::empty())
            .unwrap();
        let response = app_without_database().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    // Run with DB_HOST/DB_USER/... pointing at a live server:
    //   cargo test -p pgdemo-api -- --ignored

    fn app_with_database() -> Router {
        let config = pgdemo_common::config::load().expect("config");
        build_router(AppState {
            db: Database::connect_lazy(&config.database),
        })
    }

    fn assert_users_body(body: &serde_json::Value) {
        assert_eq!(body["message"], "DB connected!");
        let time = body["time"].as_str().expect("time should be a string");
        chrono::DateTime::parse_from_rfc3339(time).expect("time should be RFC 3339");
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn users_returns_database_time() {
        let response = app_with_database().oneshot(get("/users")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_users_body(&body_json(response).await);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn concurrent_users_requests_both_succeed() {
        let app = app_with_database();

        let (a, b) = tokio::join!(
            app.clone().oneshot(get("/users")),
            app.clone().oneshot(get("/users")),
        );

        for response in [a.unwrap(), b.unwrap()] {
            assert_eq!(response.status(), StatusCode::OK);
            assert_users_body(&body_json(response).await);
        }
    }
}
