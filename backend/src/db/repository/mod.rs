//! Repository traits and error types for booking data access.

pub mod error;
pub mod rooms;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};
pub use rooms::{BookingRepository, RoomRepository};
