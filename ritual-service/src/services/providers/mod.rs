pub mod oauth;
pub mod push;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use service_core::error::AppError;
use std::collections::HashMap;
use thiserror::Error;

pub use oauth::ServiceAccountTokenSource;
pub use push::{FcmProvider, MockPushProvider};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Provider not enabled: {0}")]
    NotEnabled(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Send error: {0}")]
    SendFailed(String),

    #[error("Authentication error: {0}")]
    Authentication(String),
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        AppError::NotificationError(err.to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderResponse {
    /// Opaque id assigned by the push service, e.g. `projects/p/messages/123`.
    pub message_id: String,
}

#[derive(Debug, Clone)]
pub struct PushMessage {
    pub device_token: String,
    pub title: String,
    pub body: String,
    pub data: HashMap<String, String>,
}

#[async_trait]
pub trait PushProvider: Send + Sync {
    async fn send(&self, push: &PushMessage) -> Result<ProviderResponse, ProviderError>;
    async fn health_check(&self) -> Result<(), ProviderError>;
    fn is_enabled(&self) -> bool;
}
