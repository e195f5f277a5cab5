//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    let api_v1 = Router::new()
        .route("/rooms", get(handlers::list_rooms))
        .route(
            "/rooms/{room_id}/analytics",
            get(handlers::get_room_analytics),
        );

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/rooms", get(handlers::list_rooms))
        .route("/{room_id}", get(handlers::get_room_analytics))
        .nest("/v1", api_v1)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
#[path = "router_tests.rs"]
mod router_tests;
