use tracing::warn;

use super::ExtractError;

/// Text layer of a PDF. Image-only (scanned) files have none and are rejected.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| ExtractError::Extraction(format!("PDF could not be decoded: {e}")))?;

    if text.trim().is_empty() {
        warn!(bytes = bytes.len(), "PDF decoded without a text layer");
        return Err(ExtractError::Extraction(
            "PDF has no text layer; scanned documents are not supported".to_string(),
        ));
    }
    Ok(text)
}
