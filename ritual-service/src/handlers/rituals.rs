use axum::{extract::State, http::StatusCode, Json};
use chrono::NaiveDate;
use serde::Deserialize;
use service_core::error::AppError;
use service_core::extract::ApiJson;
use service_core::validation::ValidateRequest;
use validator::Validate;

use crate::models::{NewRitual, Ritual, RitualWithUsers, DEFAULT_MINUTES};
use crate::services::{create_ritual as create_ritual_with_users, record_created};
use crate::startup::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateRitualRequest {
    #[validate(
        required(message = "title is required"),
        length(min = 1, message = "title is required")
    )]
    pub title: Option<String>,
    pub default_minutes: Option<i32>,
    #[validate(
        required(message = "user_ids must be a non-empty array"),
        length(min = 1, message = "user_ids must be a non-empty array")
    )]
    pub user_ids: Option<Vec<i64>>,
    pub rule: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl ValidateRequest for CreateRitualRequest {
    const FIELD_ORDER: &'static [&'static str] = &["title", "user_ids"];
}

#[tracing::instrument(skip(state))]
pub async fn list_rituals(
    State(state): State<AppState>,
) -> Result<Json<Vec<RitualWithUsers>>, AppError> {
    let rituals = state.store.list_rituals().await?;
    Ok(Json(rituals))
}

#[tracing::instrument(skip(state, request))]
pub async fn create_ritual(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateRitualRequest>,
) -> Result<(StatusCode, Json<Ritual>), AppError> {
    request.validate_request()?;

    let new_ritual = NewRitual {
        title: request.title.unwrap_or_default(),
        default_minutes: request.default_minutes.unwrap_or(DEFAULT_MINUTES),
        rule: request.rule,
        start_date: request.start_date,
        end_date: request.end_date,
    };
    let user_ids = request.user_ids.unwrap_or_default();

    let ritual = create_ritual_with_users(state.store.as_ref(), new_ritual, &user_ids).await?;
    record_created("rituals");

    Ok((StatusCode::CREATED, Json(ritual)))
}
