//! Posting rate limits: per-minute and per-day windows, keyed per client.

mod common;

use std::time::Duration;

use auth_adapters::LockoutConfig;
use axum::http::StatusCode;
use common::*;
use services::RateLimitConfig;

fn production_limits() -> RateLimitConfig {
    RateLimitConfig::default()
}

/// A daily limit of 10 with the minute window effectively disabled.
fn day_only_limits() -> RateLimitConfig {
    RateLimitConfig {
        per_minute: 100_000,
        ..RateLimitConfig::default()
    }
}

#[tokio::test]
async fn second_post_within_the_minute_is_rejected() {
    let app = test_app(production_limits(), LockoutConfig::default()).await;

    let response = post_note(&app, "10.0.0.1", "first", None).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_note(&app, "10.0.0.1", "second", None).await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Too many requests");
    assert!(body["message"].as_str().unwrap().contains("minute"));
    assert!(body["retry_after_secs"].as_u64().unwrap() <= 60);
}

#[tokio::test]
async fn eleventh_post_within_the_day_is_rejected() {
    let app = test_app(day_only_limits(), LockoutConfig::default()).await;

    for i in 0..10 {
        let response = post_note(&app, "10.0.0.1", &format!("note {i}"), None).await;
        assert_eq!(response.status(), StatusCode::CREATED, "note {i}");
    }

    let response = post_note(&app, "10.0.0.1", "one too many", None).await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    let body = body_json(response).await;
    assert!(body["message"].as_str().unwrap().contains("Daily"));
}

#[tokio::test]
async fn limits_are_keyed_per_client() {
    let app = test_app(production_limits(), LockoutConfig::default()).await;

    let response = post_note(&app, "10.0.0.1", "mine", None).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let response = post_note(&app, "10.0.0.1", "mine again", None).await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    // A different address still has its slot.
    let response = post_note(&app, "10.0.0.2", "theirs", None).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn rejected_posts_are_never_stored() {
    let app = test_app(production_limits(), LockoutConfig::default()).await;

    post_note(&app, "10.0.0.1", "kept", None).await;
    let response = post_note(&app, "10.0.0.1", "dropped", None).await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    let listed = body_json(get_notes(&app).await).await;
    let notes = listed["notes"].as_array().unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0]["content"], "kept");
}

#[tokio::test]
async fn minute_window_expiry_frees_the_slot() {
    let limits = RateLimitConfig {
        per_minute: 1,
        minute_window: Duration::from_millis(80),
        ..day_only_limits()
    };
    let app = test_app(limits, LockoutConfig::default()).await;

    let response = post_note(&app, "10.0.0.1", "first", None).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let response = post_note(&app, "10.0.0.1", "too soon", None).await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    tokio::time::sleep(Duration::from_millis(120)).await;

    let response = post_note(&app, "10.0.0.1", "after the window", None).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn minute_rejections_do_not_consume_the_daily_allowance() {
    let limits = RateLimitConfig {
        per_minute: 1,
        minute_window: Duration::from_millis(60),
        per_day: 2,
        day_window: Duration::from_secs(86_400),
    };
    let app = test_app(limits, LockoutConfig::default()).await;

    assert_eq!(
        post_note(&app, "10.0.0.1", "day 1", None).await.status(),
        StatusCode::CREATED
    );
    // Bounced by the minute window; must not count against the day.
    assert_eq!(
        post_note(&app, "10.0.0.1", "burst", None).await.status(),
        StatusCode::TOO_MANY_REQUESTS
    );

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(
        post_note(&app, "10.0.0.1", "day 2", None).await.status(),
        StatusCode::CREATED
    );

    tokio::time::sleep(Duration::from_millis(100)).await;
    let response = post_note(&app, "10.0.0.1", "day 3", None).await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    let body = body_json(response).await;
    assert!(body["message"].as_str().unwrap().contains("Daily"));
}
