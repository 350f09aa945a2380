#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use jsonwebtoken::{encode, get_current_timestamp, EncodingKey, Header};
use vx_api::auth::jwt::JwtConfig;
use vx_api::config::{ServerConfig, WalletConfig};
use vx_api::router::build_app_router;
use vx_api::state::AppState;

pub const TEST_SECRET: &str = "integration-test-secret-long-enough";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3001".to_string()],
        request_timeout_secs: 30,
        database_url: String::new(),
        jwt: JwtConfig {
            secret: TEST_SECRET.to_string(),
            leeway_secs: 0,
        },
        wallet: WalletConfig {
            wc_project_id: Some("test-wc-project".to_string()),
        },
    }
}

/// Build the full application router (same middleware stack as `main.rs`).
pub fn build_test_app(pool: PgPool) -> Router {
    build_app_router(AppState {
        pool,
        config: Arc::new(test_config()),
    })
}

/// Sign a session token the way the auth service does.
pub fn mint_token(secret: &str, sub: &str, role: &str, ttl_secs: i64) -> String {
    let exp = get_current_timestamp() as i64 + ttl_secs;
    encode(
        &Header::default(),
        &serde_json::json!({"sub": sub, "role": role, "exp": exp}),
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("token signing should succeed")
}

/// A bearer token accepted by [`build_test_app`].
pub fn token() -> String {
    mint_token(TEST_SECRET, "user-1", "user", 600)
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(&token()), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(&token()), Some(body)).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(&token()), Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None, None).await
}

pub async fn delete_auth(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(&token()), None).await
}

pub async fn get_with_header(app: Router, uri: &str, name: &str, value: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(name, value)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
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

/// Collect and parse a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
