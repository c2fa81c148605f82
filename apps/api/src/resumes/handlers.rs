use std::path::Path;

use anyhow::Context;
use axum::{
    extract::{multipart::MultipartError, Multipart},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::extract::{extract_text, FileFormat};
use crate::models::resume::ResumeSection;
use crate::parser::parse_resume;
use crate::response::{ApiResponse, ApiResult};

const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub resume: ResumeSection,
    pub raw_text: String,
    pub file_name: String,
}

#[derive(Debug, Deserialize)]
pub struct ParseRequest {
    pub text: String,
}

/// POST /api/v1/resumes/upload
///
/// Multipart body with a `file` field (.pdf, .docx or .doc).
pub async fn handle_upload(mut multipart: Multipart) -> ApiResult<UploadResponse> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let extension = Path::new(&file_name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_string();
        let format = FileFormat::from_extension(&extension)?;
        let bytes = field.bytes().await.map_err(multipart_error)?;
        info!(%file_name, bytes = bytes.len(), "Upload received");

        // Removed when `upload` drops at the end of the request.
        let upload = spool(format, bytes).await?;
        debug!(path = %upload.path().display(), "Upload spooled");

        let raw_text = extract_text(upload.path(), format.extension()).await?;
        let resume = parse_resume(&raw_text);
        info!(
            %file_name,
            sections = resume.dynamic_sections.len(),
            "Sections detected"
        );

        return Ok(ApiResponse::ok(UploadResponse {
            resume,
            raw_text,
            file_name,
        }));
    }

    Err(AppError::Validation(format!(
        "multipart field '{FILE_FIELD}' is required"
    )))
}

/// POST /api/v1/resumes/parse
pub async fn handle_parse(Json(req): Json<ParseRequest>) -> ApiResult<ResumeSection> {
    if req.text.trim().is_empty() {
        return Err(AppError::Validation("text must not be empty".to_string()));
    }
    let resume = parse_resume(&req.text);
    info!(sections = resume.dynamic_sections.len(), "Sections detected");
    Ok(ApiResponse::ok(resume))
}

/// Writes the upload to a unique temp path that keeps its extension.
async fn spool(format: FileFormat, bytes: Bytes) -> Result<NamedTempFile, AppError> {
    let file = tempfile::Builder::new()
        .prefix("resume-")
        .suffix(&format!(".{}", format.extension()))
        .tempfile()
        .context("creating temp file")?;
    tokio::fs::write(file.path(), &bytes)
        .await
        .context("writing temp file")?;
    Ok(file)
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::Validation(err.body_text())
    }
}
