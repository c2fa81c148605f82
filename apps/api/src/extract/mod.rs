//! Uploaded file → raw UTF-8 text.
//!
//! Decoders are synchronous and CPU-bound, so they run on the blocking pool.
//! A decoder panic is reported as an extraction failure for that request.

pub mod docx;
pub mod pdf;

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Unsupported file format '{0}'; expected .pdf, .docx or .doc")]
    UnsupportedFormat(String),

    #[error("Could not extract text: {0}")]
    Extraction(String),

    #[error("Could not read file: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Pdf,
    Docx,
    Doc,
}

impl FileFormat {
    /// Accepts `pdf`, `.PDF`, `docx`, `.doc` and so on.
    pub fn from_extension(extension: &str) -> Result<Self, ExtractError> {
        match extension
            .trim()
            .trim_start_matches('.')
            .to_ascii_lowercase()
            .as_str()
        {
            "pdf" => Ok(FileFormat::Pdf),
            "docx" => Ok(FileFormat::Docx),
            "doc" => Ok(FileFormat::Doc),
            _ => Err(ExtractError::UnsupportedFormat(extension.to_string())),
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            FileFormat::Pdf => "pdf",
            FileFormat::Docx => "docx",
            FileFormat::Doc => "doc",
        }
    }
}

/// Reads `path` and decodes it according to `extension`.
///
/// The extension is checked before the file is touched.
pub async fn extract_text(path: &Path, extension: &str) -> Result<String, ExtractError> {
    let format = FileFormat::from_extension(extension)?;
    let bytes = tokio::fs::read(path).await?;
    debug!(?format, bytes = bytes.len(), "Extracting text");

    let raw = tokio::task::spawn_blocking(move || extract_from_bytes(format, &bytes))
        .await
        .map_err(|e| ExtractError::Extraction(format!("decoder aborted: {e}")))??;

    Ok(normalize_text(&raw))
}

pub fn extract_from_bytes(format: FileFormat, bytes: &[u8]) -> Result<String, ExtractError> {
    match format {
        FileFormat::Pdf => pdf::extract_pdf_text(bytes),
        FileFormat::Docx => docx::extract_docx_text(bytes),
        FileFormat::Doc => docx::extract_doc_text(bytes),
    }
}

static BLANK_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n(?:[ \t]*\n){3,}").unwrap());

/// Unifies line endings and spacing, and collapses long runs of blank lines.
pub fn normalize_text(text: &str) -> String {
    let unified = text
        .replace("\r\n", "\n")
        .replace(['\r', '\u{0c}'], "\n")
        .replace('\u{a0}', " ")
        .replace('\u{feff}', "");
    let trimmed_lines = unified
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n");
    BLANK_RUN_RE
        .replace_all(&trimmed_lines, "\n\n")
        .trim()
        .to_string()
}
