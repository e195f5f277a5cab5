//! # Room Analytics Backend
//!
//! Occupancy and nightly-rate analytics for hotel rooms.
//!
//! For a room, the backend reports the booked share of days per calendar
//! month over the next five months and the average, highest and lowest
//! nightly rate over the next thirty days. Booking data comes from an
//! in-memory store, PostgreSQL, or a remote JSON rooms endpoint.
//!
//! ## Architecture
//!
//! - [`api`]: Data Transfer Objects (DTOs) for API responses
//! - [`models`]: Calendar helpers and date windows
//! - [`services`]: Aggregators, rounding and the analytics service
//! - [`db`]: Repository traits, providers and their configuration
//! - [`http`]: Axum-based HTTP server and request handlers
//! - [`routes`]: Route-specific data types

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod api;

pub mod db;
pub mod models;

pub mod routes;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
