#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use regform_api::config::ServerConfig;
use regform_api::router::build_app_router;
use regform_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// Processing delay is zero so accepted submissions return immediately.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        processing_delay_ms: 0,
    }
}

/// Build the full application router with the production middleware stack.
pub fn build_test_app() -> Router {
    let config = test_config();
    build_app_router(AppState::new(&config), &config)
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    post_raw(app, uri, "application/json", body.to_string()).await
}

pub async fn post_form(app: Router, uri: &str, pairs: &[(&str, &str)]) -> Response {
    let body = serde_urlencoded::to_string(pairs).unwrap();
    post_raw(app, uri, "application/x-www-form-urlencoded", body).await
}

pub async fn post_raw(app: Router, uri: &str, content_type: &str, body: String) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// A registration body that passes every rule.
pub fn valid_registration() -> serde_json::Value {
    serde_json::json!({
        "name": "Jo",
        "email": "a@b.com",
        "password": "Abcdefg1",
        "confirmPassword": "Abcdefg1",
        "acceptsTerms": true
    })
}
