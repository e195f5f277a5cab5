//! HTTP behavior against fake providers.

#![cfg(feature = "http-server")]

mod support;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use room_analytics::api::DayRecord;
use room_analytics::db::RoomRepository;
use room_analytics::http::{create_router, AppState};
use room_analytics::models::calendar;
use serde_json::Value;
use support::{FailingRepository, FixedRepository, SlowRepository};
use tower::ServiceExt;

fn app(repo: Arc<dyn RoomRepository>) -> Router {
    create_router(AppState::new(repo))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
async fn test_health_surfaces_provider_error() {
    let (status, body) = get(app(Arc::new(FailingRepository)), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert!(body["database"]
        .as_str()
        .unwrap()
        .starts_with("error: "));
}

#[tokio::test]
async fn test_failing_provider_maps_to_503() {
    for uri in ["/A101", "/v1/rooms/A101/analytics", "/rooms", "/v1/rooms"] {
        let (status, body) = get(app(Arc::new(FailingRepository)), uri).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE, "{uri}");
        assert_eq!(body["code"], "UPSTREAM_UNAVAILABLE");
    }
}

#[tokio::test]
async fn test_fetch_timeout_maps_to_503() {
    let state = AppState::new(Arc::new(SlowRepository {
        delay: Duration::from_millis(250),
    }))
    .with_fetch_timeout(Duration::from_millis(25));

    let (status, body) = get(create_router(state), "/A101").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["details"].as_str().unwrap().contains("Timeout"));
}

#[tokio::test]
async fn test_analytics_from_fixed_series() {
    let today = calendar::today();
    let repo = FixedRepository::single(
        "D404",
        vec![
            DayRecord::new(today, true, 149.999),
            DayRecord::new(calendar::days_ahead(today, 1), true, 99.5),
        ],
    );

    let (status, body) = get(app(Arc::new(repo)), "/v1/rooms/D404/analytics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["room_id"], "D404");
    assert_eq!(body["rate_analytics"]["highest_rate"], 149.99);
    assert_eq!(body["rate_analytics"]["lowest_rate"], 99.5);

    let total: f64 = body["monthly_occupancy"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["occupancy_percentage"].as_f64().unwrap())
        .sum();
    // Both days booked, whether or not they straddle a month boundary
    assert!(total == 100.0 || total == 200.0);
}

#[tokio::test]
async fn test_unknown_path_segment_is_room_lookup() {
    let (status, body) = get(app(Arc::new(FixedRepository { rooms: vec![] })), "/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
    assert!(body["message"].as_str().unwrap().contains("nope"));
}
