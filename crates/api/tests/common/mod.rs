#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use tasklist_api::config::{DatabaseConfig, ServerConfig};
use tasklist_api::router::build_app_router;
use tasklist_api::state::AppState;
use tasklist_core::flash::Flash;

/// Session secret used to sign flash cookies in tests.
pub const TEST_SECRET: &str = "test-session-secret";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        request_timeout_secs: 30,
        session_secret: TEST_SECRET.to_string(),
        database: DatabaseConfig {
            url: None,
            host: "127.0.0.1".to_string(),
            port: 5432,
            user: "todo_user".to_string(),
            password: "mypassword".to_string(),
            name: "todo".to_string(),
            max_connections: 5,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get_with_cookie(app: Router, uri: &str, cookie: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(COOKIE, cookie)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST an already url-encoded form body.
pub async fn post_form(app: Router, uri: &str, body: &str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn location(response: &Response) -> &str {
    response
        .headers()
        .get(LOCATION)
        .expect("redirect should carry a Location header")
        .to_str()
        .unwrap()
}

/// Raw `flash=<value>` pair from the response's `Set-Cookie`, if any.
pub fn flash_cookie_pair(response: &Response) -> Option<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("flash="))
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

/// Decode the flash notice set by a redirect.
pub fn flash_of(response: &Response) -> Option<Flash> {
    let pair = flash_cookie_pair(response)?;
    let value = pair.strip_prefix("flash=")?;
    Flash::decode(TEST_SECRET, value)
}

pub async fn count_tasks(pool: &PgPool) -> i64 {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks")
        .fetch_one(pool)
        .await
        .unwrap();
    count
}
