use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(anyhow::Error),

    #[error("Not found: {0}")]
    NotFound(anyhow::Error),

    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),

    #[error("Service Unavailable")]
    ServiceUnavailable,

    #[error("Database error: {0}")]
    DatabaseError(anyhow::Error),

    #[error("Notification error: {0}")]
    NotificationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        AppError::BadRequest(anyhow::anyhow!(message.into()))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::NotFound(anyhow::anyhow!(message.into()))
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            AppError::InternalError(_)
            | AppError::DatabaseError(_)
            | AppError::NotificationError(_)
            | AppError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::bad_request(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Downstream error text stays in the logs; clients only see the category.
        let body = match &self {
            AppError::BadRequest(err) => json!({ "error": err.to_string() }),
            AppError::NotFound(err) => json!({ "message": err.to_string() }),
            AppError::ServiceUnavailable => json!({ "error": "Service unavailable" }),
            AppError::InternalError(err) => {
                tracing::error!(error = ?err, "Internal server error");
                json!({ "error": "Internal server error" })
            }
            AppError::DatabaseError(err) => {
                tracing::error!(error = %err, "Database error");
                json!({ "error": "Database error" })
            }
            AppError::NotificationError(msg) => {
                tracing::error!(error = %msg, "Notification delivery failed");
                json!({ "error": "Notification delivery failed" })
            }
            AppError::ConfigError(err) => {
                tracing::error!(error = %err, "Configuration error");
                json!({ "error": "Configuration error" })
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body should be readable")
            .to_bytes();
        let body = serde_json::from_slice(&bytes).expect("body should be JSON");
        (status, body)
    }

    #[tokio::test]
    async fn bad_request_exposes_message_under_error_key() {
        let (status, body) = render(AppError::bad_request("fcm_token is required")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "fcm_token is required" }));
    }

    #[tokio::test]
    async fn not_found_uses_message_key() {
        let (status, body) = render(AppError::not_found("User not found")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "message": "User not found" }));
    }

    #[tokio::test]
    async fn database_error_hides_raw_text() {
        let err = AppError::DatabaseError(anyhow::anyhow!("relation \"users\" does not exist"));
        let (status, body) = render(err).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Database error");
        assert!(!body.to_string().contains("relation"));
    }

    #[tokio::test]
    async fn notification_error_is_internal() {
        let (status, body) =
            render(AppError::NotificationError("UNREGISTERED".to_string())).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Notification delivery failed");
    }

    #[test]
    fn service_unavailable_maps_to_503() {
        assert_eq!(
            AppError::ServiceUnavailable.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
