use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::ResumeSection;
use crate::response::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::suggestions::apply::apply_suggestions;
use crate::suggestions::models::Suggestion;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhanceRequest {
    pub job_description: String,
    pub resume_data: ResumeSection,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhanceResponse {
    pub session_id: Uuid,
    pub suggestions: Vec<Suggestion>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyRequest {
    pub session_id: Uuid,
    pub suggestion_ids: Vec<Uuid>,
    pub resume_data: ResumeSection,
}

/// POST /api/v1/ai/enhance
pub async fn handle_enhance(
    State(state): State<AppState>,
    Json(req): Json<EnhanceRequest>,
) -> ApiResult<EnhanceResponse> {
    if req.job_description.trim().is_empty() {
        return Err(AppError::Validation("jobDescription must not be empty".to_string()));
    }

    let suggestions = state
        .enhancer
        .enhance(&req.job_description, &req.resume_data)
        .await?;
    let session_id = Uuid::new_v4();
    state.suggestions.put(session_id, suggestions.clone()).await?;

    info!(%session_id, count = suggestions.len(), "Generated suggestions");
    Ok(ApiResponse::ok(EnhanceResponse {
        session_id,
        suggestions,
    }))
}

/// POST /api/v1/ai/apply
pub async fn handle_apply(
    State(state): State<AppState>,
    Json(req): Json<ApplyRequest>,
) -> ApiResult<ResumeSection> {
    let batch = state
        .suggestions
        .get(req.session_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("suggestion session {} not found or expired", req.session_id))
        })?;

    let resume = apply_suggestions(req.resume_data, &batch, &req.suggestion_ids);
    Ok(ApiResponse::ok(resume))
}
