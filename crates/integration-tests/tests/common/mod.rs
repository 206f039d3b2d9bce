//! Shared harness for router-level tests.
//!
//! Builds the real router over an in-memory SQLite store and the in-process
//! counter store. Tests pick a client address via `X-Forwarded-For`, which
//! is exactly how the server keys counters behind a proxy.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use api_adapters::{api_router, AppState, ADMIN_PASSWORD_HEADER};
use auth_adapters::{AdminGuard, LockoutConfig};
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use secrecy::SecretString;
use serde_json::{json, Value};
use services::{NoteService, RateLimitConfig, RateLimiter};
use storage_adapters::{MemoryCounterStore, SqliteNoteRepo};
use tower::ServiceExt;

pub const ADMIN_PASSWORD: &str = "correct horse battery staple";

/// Limits high enough that tests not about rate limiting never trip them.
pub fn relaxed_limits() -> RateLimitConfig {
    RateLimitConfig {
        per_minute: 100_000,
        minute_window: Duration::from_secs(60),
        per_day: 100_000,
        day_window: Duration::from_secs(86_400),
    }
}

pub async fn test_app(limits: RateLimitConfig, lockout: LockoutConfig) -> Router {
    let repo = SqliteNoteRepo::open_in_memory()
        .await
        .expect("in-memory sqlite");
    let counters = Arc::new(MemoryCounterStore::new());

    let state = AppState {
        notes: NoteService::new(Arc::new(repo)),
        limiter: RateLimiter::new(counters.clone(), limits),
        admin: AdminGuard::new(
            SecretString::from(ADMIN_PASSWORD.to_owned()),
            counters,
            lockout,
        ),
    };

    api_router(state)
}

pub async fn default_app() -> Router {
    test_app(relaxed_limits(), LockoutConfig::default()).await
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.expect("infallible")
}

pub async fn post_note(
    app: &Router,
    client: &str,
    content: &str,
    author: Option<&str>,
) -> Response<Body> {
    let mut body = json!({ "content": content });
    if let Some(author) = author {
        body["author"] = json!(author);
    }

    let request = Request::builder()
        .method("POST")
        .uri("/api/notes")
        .header("content-type", "application/json")
        .header("x-forwarded-for", client)
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn get_notes(app: &Router) -> Response<Body> {
    let request = Request::builder()
        .uri("/api/notes")
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn admin_request(
    app: &Router,
    method: &str,
    uri: &str,
    client: &str,
    password: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("x-forwarded-for", client);
    if let Some(password) = password {
        builder = builder.header(ADMIN_PASSWORD_HEADER, password);
    }
    send(app, builder.body(Body::empty()).unwrap()).await
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

/// Posts a note that must succeed and returns its id.
pub async fn seed_note(app: &Router, client: &str, content: &str) -> i64 {
    let response = post_note(app, client, content, None).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["note"]["id"].as_i64().unwrap()
}
