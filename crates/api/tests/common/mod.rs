#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use kanban_api::router::build_app_router;
use kanban_api::config::ServerConfig;
use kanban_api::state::AppState;

/// A `ServerConfig` for tests; the database URL is never dialed since
/// `#[sqlx::test]` hands us a pool directly.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: "postgres://unused".to_string(),
        db_max_connections: 5,
    }
}

/// The production router, middleware included, over the given pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(test_config()),
    };
    build_app_router(state).unwrap()
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn delete(app: Router, uri: &str) -> Response {
    app.oneshot(Request::delete(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send_json(app, Method::POST, uri, body).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send_json(app, Method::PUT, uri, body).await
}

async fn send_json(app: Router, method: Method, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixture helpers
// ---------------------------------------------------------------------------

/// Create categories through the API and place them 1..N in the given order.
pub async fn seed_categories(pool: &PgPool, names: &[&str]) -> Vec<i64> {
    let mut ids = Vec::new();
    for name in names {
        let created = body_json(
            post_json(
                build_test_app(pool.clone()),
                "/categories",
                serde_json::json!({ "name": name }),
            )
            .await,
        )
        .await;
        ids.push(created["id"].as_i64().unwrap());
    }
    for (i, id) in ids.iter().enumerate() {
        let response = put_json(
            build_test_app(pool.clone()),
            &format!("/categories/reorder/{id}"),
            serde_json::json!({ "order": i + 1 }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }
    ids
}

/// Create cards in a category through the API and place them 1..N.
pub async fn seed_cards(pool: &PgPool, category_id: i64, names: &[&str]) -> Vec<i64> {
    let mut ids = Vec::new();
    for name in names {
        let created = body_json(
            post_json(
                build_test_app(pool.clone()),
                "/cards",
                serde_json::json!({ "categoryId": category_id, "name": name }),
            )
            .await,
        )
        .await;
        ids.push(created["id"].as_i64().unwrap());
    }
    for (i, id) in ids.iter().enumerate() {
        let response = put_json(
            build_test_app(pool.clone()),
            &format!("/cards/reorder/{id}"),
            serde_json::json!({ "order": i + 1 }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }
    ids
}
