use std::path::Path;

use axum::{
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::export::{render, ExportError, ExportFormat};
use crate::models::resume::ResumeSection;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    pub resume_data: ResumeSection,
    pub format: String,
    #[serde(default)]
    pub file_name: Option<String>,
}

/// POST /api/v1/resumes/export
/// Returns the rendered document as an attachment, not a JSON envelope.
pub async fn handle_export(Json(req): Json<ExportRequest>) -> Result<Response, AppError> {
    let format: ExportFormat = req
        .format
        .parse()
        .map_err(|e: ExportError| AppError::Validation(e.to_string()))?;

    let bytes = render(&req.resume_data, format)?;
    let file_name = format!(
        "{}.{}",
        attachment_stem(req.file_name.as_deref()),
        format.extension()
    );
    info!(?format, %file_name, bytes = bytes.len(), "Exported resume");

    Ok((
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}

/// File stem safe to place inside a quoted `Content-Disposition` value.
fn attachment_stem(requested: Option<&str>) -> String {
    let stem = requested
        .and_then(|name| Path::new(name.trim()).file_stem())
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    let cleaned: String = stem
        .chars()
        .map(|c| match c {
            c if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') => c,
            _ => '_',
        })
        .collect();
    let cleaned = cleaned.trim_matches(|c| c == '_' || c == '.');
    if cleaned.is_empty() {
        "resume".to_string()
    } else {
        cleaned.to_string()
    }
}
