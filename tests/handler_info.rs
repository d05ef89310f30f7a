mod common;

use serde_json::Value;
use shortcode::api::dto::url::{AnalyticsResponse, UrlResponse};

#[tokio::test]
async fn test_info_returns_record_without_counting() {
    let state = common::create_test_state();
    common::create_test_url(&state, "https://a.test", Some("promo")).await;
    let server = common::create_test_server(state);

    let first: UrlResponse = server.get("/api/info/promo").await.json();
    let second: UrlResponse = server.get("/api/info/promo").await.json();

    assert_eq!(first.short_code, "promo");
    assert_eq!(first.original_url, "https://a.test");
    assert_eq!(first.clicks, 0);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_info_expired_is_not_found() {
    let state = common::create_test_state();
    common::create_expired_url(&state, "https://a.test", "old").await;
    let server = common::create_test_server(state);

    let response = server.get("/api/info/old").await;

    response.assert_status_not_found();
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "not_found");
    assert_eq!(body["error"]["message"], "URL not found or expired");
}

#[tokio::test]
async fn test_analytics_reports_clicks() {
    let state = common::create_test_state();
    common::create_test_url(&state, "https://a.test", Some("promo")).await;
    let server = common::create_test_server(state);

    server.get("/promo").await;
    server.get("/promo").await;

    let response = server.get("/api/analytics/promo").await;
    assert_eq!(response.status_code(), 200);

    let body: AnalyticsResponse = response.json();
    assert_eq!(body.short_code, "promo");
    assert_eq!(body.clicks, 2);
    assert_eq!(body.custom_alias.as_deref(), Some("promo"));
}

#[tokio::test]
async fn test_analytics_unknown_code() {
    let server = common::create_test_server(common::create_test_state());

    server.get("/api/analytics/nope").await.assert_status_not_found();
}
