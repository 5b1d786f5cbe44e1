use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use service_core::error::AppError;
use service_core::extract::{ApiJson, ApiPath};
use service_core::validation::ValidateRequest;
use validator::Validate;

use crate::models::{NewRitualRecord, RitualRecord, RitualRecordWithUser};
use crate::services::record_created;
use crate::startup::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateRitualRecordRequest {
    #[validate(required(message = "ritual_id and user_id are required"))]
    pub ritual_id: Option<i64>,
    #[validate(required(message = "ritual_id and user_id are required"))]
    pub user_id: Option<i64>,
    pub image_url: Option<String>,
    pub review: Option<String>,
}

impl ValidateRequest for CreateRitualRecordRequest {
    const FIELD_ORDER: &'static [&'static str] = &["ritual_id", "user_id"];
}

#[tracing::instrument(skip(state, request))]
pub async fn create_ritual_record(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateRitualRecordRequest>,
) -> Result<(StatusCode, Json<RitualRecord>), AppError> {
    request.validate_request()?;

    let new_record = NewRitualRecord {
        ritual_id: request.ritual_id.unwrap_or_default(),
        user_id: request.user_id.unwrap_or_default(),
        image_url: request.image_url,
        review: request.review,
    };

    let record = state.store.insert_ritual_record(&new_record).await?;
    record_created("ritual_records");

    tracing::info!(
        record_id = record.id,
        ritual_id = record.ritual_id,
        user_id = record.user_id,
        "Ritual record created"
    );

    Ok((StatusCode::CREATED, Json(record)))
}

#[tracing::instrument(skip(state))]
pub async fn list_ritual_records(
    State(state): State<AppState>,
    ApiPath(ritual_id): ApiPath<i64>,
) -> Result<Json<Vec<RitualRecordWithUser>>, AppError> {
    let records = state.store.list_ritual_records(ritual_id).await?;
    Ok(Json(records))
}
