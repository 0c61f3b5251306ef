#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tower::ServiceExt;

use fds_api::auth::password::hash_password;
use fds_api::auth::token::{issue_token, TokenConfig};
use fds_api::config::ServerConfig;
use fds_api::router::build_app_router;
use fds_api::state::AppState;
use fds_db::models::admin::{Admin, CreateAdmin};
use fds_db::repositories::AdminRepo;

/// Password given to every admin created by [`create_admin`].
pub const TEST_PASSWORD: &str = "admin123";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        overdue_window_months: 2,
        token: TokenConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            ttl_mins: 60,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: SqlitePool) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(test_config()),
    };
    build_app_router(state)
}

/// Insert an admin with [`TEST_PASSWORD`].
pub async fn create_admin(pool: &SqlitePool, username: &str) -> Admin {
    let input = CreateAdmin {
        username: username.to_string(),
        password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
        name: "System Administrator".to_string(),
    };
    AdminRepo::create(pool, &input)
        .await
        .expect("admin creation should succeed")
}

/// Create an admin and return a valid bearer token for it.
pub async fn admin_token(pool: &SqlitePool) -> String {
    let admin = create_admin(pool, "admin").await;
    issue_token(admin.id, &admin.username, &test_config().token)
        .expect("token generation should succeed")
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

fn json_request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, json_request(Method::GET, uri, None, None)).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, json_request(Method::GET, uri, Some(token), None)).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, json_request(Method::POST, uri, None, Some(body))).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, json_request(Method::POST, uri, Some(token), Some(body))).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, json_request(Method::PUT, uri, Some(token), Some(body))).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, json_request(Method::DELETE, uri, Some(token), None)).await
}

/// Create a member through the API and return its JSON representation.
pub async fn create_member(app: Router, token: &str, body: serde_json::Value) -> serde_json::Value {
    let response = post_json_auth(app, "/api/v1/admin/members", body, token).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

/// Record a contribution through the API, returning the raw response.
pub async fn create_contribution(
    app: Router,
    token: &str,
    member_id: i64,
    month: &str,
    year: i32,
    amount: f64,
) -> Response {
    let body = serde_json::json!({
        "member_id": member_id,
        "month": month,
        "year": year,
        "amount": amount,
    });
    post_json_auth(app, "/api/v1/admin/contributions", body, token).await
}
