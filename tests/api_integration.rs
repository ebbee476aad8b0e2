//! Integration tests for the REST API feature.

#![cfg(feature = "api")]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::util::ServiceExt;

use appliance_usage::api::router;
use appliance_usage::config::ReportConfig;

async fn post_json(uri: &str, body: String) -> (StatusCode, serde_json::Value) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    let resp = router().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or_default())
}

fn preset_body(name: &str) -> String {
    let cfg = ReportConfig::from_preset(name).unwrap();
    serde_json::to_string(&cfg.profile).unwrap()
}

#[tokio::test]
async fn month_endpoint_returns_every_day() {
    let (status, json) = post_json("/month", preset_body("month")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["metric"], "usage");
    assert_eq!(json["days"].as_array().map(Vec::len), Some(31));
    assert_eq!(json["days"][0]["day"], 1);
    assert_eq!(json["days"][0]["minutes"], 480);
}

#[tokio::test]
async fn day_endpoint_matches_month_row() {
    let (status, json) = post_json("/usage/day/2", preset_body("month")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["day"], 2);
    assert_eq!(json["minutes"], 460);
}

#[tokio::test]
async fn savings_preset_over_http() {
    let (status, json) = post_json("/savings", preset_body("auto_off")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["minutes"], 1340);
}

#[tokio::test]
async fn unknown_state_is_rejected_before_handler() {
    let body = r#"{"initial":"standby","events":[]}"#.to_string();
    let (status, _) = post_json("/usage", body).await;
    assert!(status.is_client_error());
}
