use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use service_core::error::AppError;
use service_core::extract::{ApiJson, ApiPath};
use service_core::validation::ValidateRequest;
use validator::Validate;

use crate::models::User;
use crate::services::{get_or_create_user, record_created};
use crate::startup::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(
        required(message = "fcm_token is required"),
        length(min = 1, message = "fcm_token is required")
    )]
    pub fcm_token: Option<String>,
    pub nickname: Option<String>,
}

impl ValidateRequest for CreateUserRequest {
    const FIELD_ORDER: &'static [&'static str] = &["fcm_token"];
}

#[tracing::instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    let users = state.store.list_users().await?;
    Ok(Json(users))
}

#[tracing::instrument(skip(state, fcm_token))]
pub async fn get_user(
    State(state): State<AppState>,
    ApiPath(fcm_token): ApiPath<String>,
) -> Result<Json<User>, AppError> {
    let user = state
        .store
        .find_user_by_token(&fcm_token)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    Ok(Json(user))
}

/// Registers a device; returns `201` for a new user, `200` for a known token.
#[tracing::instrument(skip(state, request))]
pub async fn create_user(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    request.validate_request()?;
    let fcm_token = request.fcm_token.unwrap_or_default();

    let lookup = get_or_create_user(state.store.as_ref(), &fcm_token, request.nickname).await?;

    if lookup.created {
        record_created("users");
        tracing::info!(user_id = lookup.user.id, "User created");
        Ok((StatusCode::CREATED, Json(lookup.user)))
    } else {
        Ok((StatusCode::OK, Json(lookup.user)))
    }
}
