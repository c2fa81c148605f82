use axum::Json;
use serde::{Deserialize, Serialize};

use crate::bulk_edit::grammar::{
    format_experience_text, format_project_text, parse_experience_text, parse_project_text,
};
use crate::models::resume::{Project, WorkExperience};
use crate::response::{ApiResponse, ApiResult};

#[derive(Debug, Deserialize)]
pub struct EntriesRequest<T> {
    pub entries: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub struct TextRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct TextResponse {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct EntriesResponse<T> {
    pub entries: Vec<T>,
}

/// POST /api/v1/bulk-edit/experience/format
pub async fn handle_format_experience(
    Json(req): Json<EntriesRequest<WorkExperience>>,
) -> ApiResult<TextResponse> {
    Ok(ApiResponse::ok(TextResponse {
        text: format_experience_text(&req.entries),
    }))
}

/// POST /api/v1/bulk-edit/experience/parse
///
/// Empty text is a valid edit: the user cleared every entry.
pub async fn handle_parse_experience(
    Json(req): Json<TextRequest>,
) -> ApiResult<EntriesResponse<WorkExperience>> {
    Ok(ApiResponse::ok(EntriesResponse {
        entries: parse_experience_text(&req.text),
    }))
}

/// POST /api/v1/bulk-edit/projects/format
pub async fn handle_format_projects(
    Json(req): Json<EntriesRequest<Project>>,
) -> ApiResult<TextResponse> {
    Ok(ApiResponse::ok(TextResponse {
        text: format_project_text(&req.entries),
    }))
}

/// POST /api/v1/bulk-edit/projects/parse
pub async fn handle_parse_projects(
    Json(req): Json<TextRequest>,
) -> ApiResult<EntriesResponse<Project>> {
    Ok(ApiResponse::ok(EntriesResponse {
        entries: parse_project_text(&req.text),
    }))
}
