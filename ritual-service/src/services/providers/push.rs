use super::{ProviderError, ProviderResponse, PushMessage, PushProvider, ServiceAccountTokenSource};
use crate::config::FcmConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// FCM HTTP v1 sender authenticated with service-account credentials.
pub struct FcmProvider {
    config: FcmConfig,
    client: Client,
    tokens: ServiceAccountTokenSource,
}

#[derive(Debug, Serialize)]
pub(crate) struct FcmRequest<'a> {
    message: FcmMessage<'a>,
}

#[derive(Debug, Serialize)]
struct FcmMessage<'a> {
    token: &'a str,
    notification: FcmNotification<'a>,
    data: &'a HashMap<String, String>,
}

#[derive(Debug, Serialize)]
struct FcmNotification<'a> {
    title: &'a str,
    body: &'a str,
}

impl<'a> FcmRequest<'a> {
    pub(crate) fn from_push(push: &'a PushMessage) -> Self {
        Self {
            message: FcmMessage {
                token: &push.device_token,
                notification: FcmNotification {
                    title: &push.title,
                    body: &push.body,
                },
                data: &push.data,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct FcmResponse {
    name: String,
}

#[derive(Debug, Deserialize)]
struct FcmErrorBody {
    error: FcmError,
}

#[derive(Debug, Deserialize)]
struct FcmError {
    message: String,
    #[serde(default)]
    status: String,
}

impl FcmProvider {
    pub fn new(config: FcmConfig) -> Result<Self, ProviderError> {
        if config.project_id.is_empty() {
            return Err(ProviderError::Configuration(
                "FIREBASE_PROJECT_ID is not configured".to_string(),
            ));
        }

        let client = Client::new();
        let tokens = ServiceAccountTokenSource::new(client.clone(), &config)?;

        Ok(Self {
            config,
            client,
            tokens,
        })
    }

    fn send_url(&self) -> String {
        format!(
            "{}/{}/messages:send",
            self.config.api_url.trim_end_matches('/'),
            self.config.project_id
        )
    }
}

#[async_trait]
impl PushProvider for FcmProvider {
    async fn send(&self, push: &PushMessage) -> Result<ProviderResponse, ProviderError> {
        if !self.config.enabled {
            return Err(ProviderError::NotEnabled(
                "FCM push provider is not enabled".to_string(),
            ));
        }

        let access_token = self.tokens.access_token().await?;

        let response = self
            .client
            .post(self.send_url())
            .bearer_auth(&access_token)
            .json(&FcmRequest::from_push(push))
            .send()
            .await
            .map_err(|e| ProviderError::Connection(format!("Failed to connect to FCM: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let detail = match serde_json::from_str::<FcmErrorBody>(&body) {
                Ok(parsed) => format!("{} {}", parsed.error.status, parsed.error.message),
                Err(_) => body,
            };
            return Err(ProviderError::SendFailed(format!(
                "FCM API returned error status {}: {}",
                status,
                detail.trim()
            )));
        }

        let fcm_response: FcmResponse = response.json().await.map_err(|e| {
            ProviderError::SendFailed(format!("Failed to parse FCM response: {}", e))
        })?;

        tracing::info!(
            message_id = %fcm_response.name,
            "Push notification sent successfully via FCM"
        );

        Ok(ProviderResponse {
            message_id: fcm_response.name,
        })
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        if !self.config.enabled {
            return Ok(());
        }
        self.tokens.access_token().await.map(|_| ())
    }

    fn is_enabled(&self) -> bool {
        self.config.enabled
    }
}

/// Mock push provider for testing and local runs without Firebase.
pub struct MockPushProvider {
    enabled: bool,
    send_count: AtomicU64,
}

impl MockPushProvider {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            send_count: AtomicU64::new(0),
        }
    }

    pub fn send_count(&self) -> u64 {
        self.send_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PushProvider for MockPushProvider {
    async fn send(&self, push: &PushMessage) -> Result<ProviderResponse, ProviderError> {
        if !self.enabled {
            return Err(ProviderError::NotEnabled(
                "Mock push provider is not enabled".to_string(),
            ));
        }

        let sequence = self.send_count.fetch_add(1, Ordering::SeqCst) + 1;

        tracing::info!(
            title = %push.title,
            data_keys = push.data.len(),
            "[MOCK] Push notification would be sent"
        );

        Ok(ProviderResponse {
            message_id: format!("mock-push-{}", sequence),
        })
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}
