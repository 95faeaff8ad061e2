#![allow(dead_code)]

use std::sync::Arc;

use arbor_api::config::ServerConfig;
use arbor_api::router::build_app_router;
use arbor_api::state::AppState;
use arbor_db::DbPool;
use axum::body::Body;
use axum::http::{HeaderValue, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        database_max_connections: 1,
        cors_origins: vec![HeaderValue::from_static("http://localhost:5173")],
        request_timeout_secs: 30,
    }
}

/// Build the full application router over `pool`, with the same
/// middleware stack production uses.
pub fn build_test_app(pool: DbPool) -> Router {
    build_app_router(AppState {
        pool,
        config: Arc::new(test_config()),
    })
}

/// Send one request. `caller` becomes the `user_id` header when given.
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    caller: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(caller) = caller {
        builder = builder.header("user_id", caller);
    }
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str, caller: Option<&str>) -> Response<Body> {
    send(app, Method::GET, uri, caller, None).await
}

pub async fn post_json(
    app: Router,
    uri: &str,
    caller: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::POST, uri, caller, Some(body)).await
}

pub async fn patch_json(
    app: Router,
    uri: &str,
    caller: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::PATCH, uri, caller, Some(body)).await
}

pub async fn delete(app: Router, uri: &str, caller: Option<&str>) -> Response<Body> {
    send(app, Method::DELETE, uri, caller, None).await
}

/// Collect a response body as raw bytes.
pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Create a tree through the API and return its id.
pub async fn create_tree(pool: &DbPool, caller: &str, name: &str) -> i64 {
    let app = build_test_app(pool.clone());
    let response = post_json(app, "/trees", Some(caller), serde_json::json!({"name": name})).await;
    assert_eq!(response.status(), 201);
    body_json(response).await["id"].as_i64().unwrap()
}
