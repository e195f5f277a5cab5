pub mod analytics;
pub mod rooms;
