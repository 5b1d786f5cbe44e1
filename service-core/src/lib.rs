//! service-core: Shared HTTP infrastructure for the ritual backend.
pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod observability;
pub mod validation;

pub use axum;
pub use serde;
pub use serde_json;
pub use tokio;
pub use tower;
pub use tower_http;
pub use tracing;
pub use validator;
