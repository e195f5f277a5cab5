use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use super::create_router;
use crate::api::{DayRecord, RoomId};
use crate::db::repositories::LocalRepository;
use crate::db::repository::{RepositoryError, RepositoryResult, RoomRepository};
use crate::http::AppState;
use crate::models::calendar;

fn seeded_repo() -> Arc<LocalRepository> {
    let repo = Arc::new(LocalRepository::new());
    let today = calendar::today();
    repo.insert_series(
        &RoomId::new("B202"),
        vec![DayRecord::new(today, false, 80.0)],
    );
    repo.insert_series(
        &RoomId::new("A101"),
        vec![DayRecord::new(today, true, 100.555)],
    );
    repo
}

fn app(repo: Arc<LocalRepository>) -> Router {
    create_router(AppState::new(repo))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn test_health_reports_provider() {
    let (status, body) = get(app(seeded_repo()), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");

    let repo = seeded_repo();
    repo.set_healthy(false);
    let (status, body) = get(app(repo), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "disconnected");
}

#[tokio::test]
async fn test_list_rooms_sorted() {
    let (status, body) = get(app(seeded_repo()), "/rooms").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({"rooms": ["A101", "B202"]}));

    let (status, body) = get(app(seeded_repo()), "/v1/rooms").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rooms"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_list_rooms_empty_is_ok() {
    let (status, body) = get(app(Arc::new(LocalRepository::new())), "/rooms").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({"rooms": []}));
}

#[tokio::test]
async fn test_room_analytics_wire_format() {
    let month = calendar::month_label(calendar::today());

    for uri in ["/A101", "/v1/rooms/A101/analytics"] {
        let (status, body) = get(app(seeded_repo()), uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(
            body,
            serde_json::json!({
                "room_id": "A101",
                "monthly_occupancy": [{"month": month, "occupancy_percentage": 100.0}],
                "rate_analytics": {
                    "average_rate": 100.55,
                    "highest_rate": 100.55,
                    "lowest_rate": 100.55
                }
            })
        );
    }
}

#[tokio::test]
async fn test_unknown_room_is_404() {
    let (status, body) = get(app(seeded_repo()), "/Z999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_blank_room_is_400() {
    let (status, body) = get(app(seeded_repo()), "/%20%20").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
    assert_eq!(body["message"], "room ID is required");
}

#[tokio::test]
async fn test_provider_failure_is_503() {
    let repo = seeded_repo();
    repo.set_healthy(false);

    let (status, body) = get(app(repo.clone()), "/A101").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "UPSTREAM_UNAVAILABLE");
    assert!(body["details"].is_string());

    let (status, _) = get(app(repo), "/rooms").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

/// Provider whose payloads never decode.
struct UndecodableRepository;

#[async_trait]
impl RoomRepository for UndecodableRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }

    async fn list_room_ids(&self) -> RepositoryResult<Vec<RoomId>> {
        Err(RepositoryError::validation("expected an object of rooms"))
    }

    async fn fetch_day_series(
        &self,
        _room_id: &RoomId,
        _start: chrono::NaiveDate,
        _end: chrono::NaiveDate,
    ) -> RepositoryResult<Vec<DayRecord>> {
        Err(RepositoryError::validation("expected an array of day records"))
    }
}

#[tokio::test]
async fn test_malformed_payload_is_503() {
    for uri in ["/rooms", "/A101", "/v1/rooms/A101/analytics"] {
        let app = create_router(AppState::new(Arc::new(UndecodableRepository)));
        let (status, body) = get(app, uri).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE, "{uri}");
        assert_eq!(body["code"], "UPSTREAM_UNAVAILABLE");
        assert!(body["details"]
            .as_str()
            .is_some_and(|d| d.contains("expected an")));
    }
}

#[tokio::test]
async fn test_cors_preflight() {
    let response = app(seeded_repo())
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/rooms")
                .header("Origin", "http://localhost:3000")
                .header("Access-Control-Request-Method", "GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "*"
    );
}
