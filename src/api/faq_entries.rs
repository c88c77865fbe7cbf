use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;

use crate::{
    api::middleware::{ApiError, ApiResult, AppState},
    models::{CreateFaqEntryRequest, FaqEntry},
};

#[derive(Debug, Serialize)]
pub struct FaqListResponse {
    pub entries: Vec<FaqEntry>,
    pub total: usize,
}

/// Create a FAQ entry
pub async fn create_faq_entry(
    State(state): State<AppState>,
    Json(request): Json<CreateFaqEntryRequest>,
) -> ApiResult<impl IntoResponse> {
    if request.question.trim().is_empty() {
        return Err(ApiError::BadRequest("FAQ question cannot be empty".to_string()));
    }
    if request.answer.trim().is_empty() {
        return Err(ApiError::BadRequest("FAQ answer cannot be empty".to_string()));
    }

    let entry = FaqEntry::new(request.question, request.answer);
    state.db.create_faq_entry(&entry).await?;

    Ok((StatusCode::CREATED, Json(entry)))
}

/// List FAQ entries
pub async fn list_faq_entries(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let entries = state.db.list_faq_entries().await?;
    let total = entries.len();
    Ok(Json(FaqListResponse { entries, total }))
}

/// Get a FAQ entry by id
pub async fn get_faq_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let entry = state
        .db
        .get_faq_entry_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound("FAQ entry not found".to_string()))?;

    Ok(Json(entry))
}
