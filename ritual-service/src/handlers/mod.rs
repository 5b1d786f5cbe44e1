//! HTTP handlers for ritual-service.

pub mod health;
pub mod notifications;
pub mod records;
pub mod rituals;
pub mod users;

pub use health::{health_check, metrics_endpoint, readiness_check};
