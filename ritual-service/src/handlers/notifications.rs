use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use service_core::error::AppError;
use service_core::extract::ApiJson;
use service_core::validation::ValidateRequest;
use std::collections::HashMap;
use validator::Validate;

use crate::services::{record_push, PushMessage};
use crate::startup::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct SendNotificationRequest {
    #[validate(
        required(message = "fcm_token is required"),
        length(min = 1, message = "fcm_token is required")
    )]
    pub fcm_token: Option<String>,
    #[validate(
        required(message = "title and body are required"),
        length(min = 1, message = "title and body are required")
    )]
    pub title: Option<String>,
    #[validate(
        required(message = "title and body are required"),
        length(min = 1, message = "title and body are required")
    )]
    pub body: Option<String>,
    pub data: Option<HashMap<String, String>>,
}

impl ValidateRequest for SendNotificationRequest {
    const FIELD_ORDER: &'static [&'static str] = &["fcm_token", "title", "body"];
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendNotificationResponse {
    pub success: bool,
    pub message_id: String,
    pub message: String,
}

/// Sends one push notification; no retry, no delivery tracking.
#[tracing::instrument(skip(state, request))]
pub async fn send_notification(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SendNotificationRequest>,
) -> Result<Json<SendNotificationResponse>, AppError> {
    request.validate_request()?;

    let push = PushMessage {
        device_token: request.fcm_token.unwrap_or_default(),
        title: request.title.unwrap_or_default(),
        body: request.body.unwrap_or_default(),
        data: request.data.unwrap_or_default(),
    };

    match state.push_provider.send(&push).await {
        Ok(response) => {
            record_push("sent");
            tracing::info!(message_id = %response.message_id, "Notification sent");
            Ok(Json(SendNotificationResponse {
                success: true,
                message_id: response.message_id,
                message: "Notification sent successfully".to_string(),
            }))
        }
        Err(e) => {
            record_push("failed");
            Err(e.into())
        }
    }
}
