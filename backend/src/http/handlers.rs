//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for business logic.

use axum::{
    extract::{Path, State},
    Json,
};
use log::debug;

use super::dto::{AnalyticsResponse, HealthResponse, RoomListResponse};
use super::error::AppError;
use super::state::AppState;
use crate::api::RoomId;
use crate::db::services as db_services;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the provider is reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: "v1".to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Rooms
// =============================================================================

/// GET /rooms, GET /v1/rooms
///
/// List every room the provider knows about. No rooms is an empty list.
pub async fn list_rooms(State(state): State<AppState>) -> HandlerResult<RoomListResponse> {
    let rooms = state.analytics.list_room_ids().await?;
    Ok(Json(RoomListResponse { rooms }))
}

/// GET /{room_id}, GET /v1/rooms/{room_id}/analytics
///
/// Monthly occupancy and 30-day rate statistics for one room.
pub async fn get_room_analytics(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
) -> HandlerResult<AnalyticsResponse> {
    let room_id = RoomId::new(room_id);
    debug!("Analytics requested for room={}", room_id);

    let analytics = state.analytics.get_room_analytics(&room_id).await?;
    Ok(Json(analytics))
}
