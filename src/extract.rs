use std::path::Path;

use thiserror::Error;
use tracing::debug;

/// Failure classification for PDF text extraction. No retries are attempted;
/// the underlying parser message is preserved for diagnostics.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("File not found at path: {0}")]
    NotFound(String),

    #[error("PDF file appears to be empty or unreadable")]
    Empty,

    #[error("Error reading PDF file: {0}")]
    Unreadable(String),
}

/// Extract the full text of a PDF report, concatenated across pages and
/// whitespace-normalized. Same bytes in, same text out.
pub fn extract_text(path: &Path) -> Result<String, ExtractError> {
    if !path.exists() {
        return Err(ExtractError::NotFound(path.display().to_string()));
    }

    let raw = pdf_extract::extract_text(path)
        .map_err(|e| ExtractError::Unreadable(e.to_string()))?;

    let text = normalize(&raw);
    if text.is_empty() {
        return Err(ExtractError::Empty);
    }

    debug!(chars = text.len(), "extracted report text");
    Ok(text)
}

/// Collapse blank lines and trim surrounding whitespace.
fn normalize(raw: &str) -> String {
    let mut text = raw.replace("\r\n", "\n");
    while text.contains("\n\n") {
        text = text.replace("\n\n", "\n");
    }
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn missing_file_is_not_found() {
        let err = extract_text(Path::new("/nonexistent/report.pdf")).unwrap_err();
        assert!(matches!(err, ExtractError::NotFound(_)));
    }

    #[test]
    fn garbage_bytes_are_unreadable() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"this is not a pdf").unwrap();
        let err = extract_text(file.path()).unwrap_err();
        assert!(matches!(err, ExtractError::Unreadable(_)));
    }

    #[test]
    fn normalize_collapses_blank_lines() {
        let raw = "  Hemoglobin 13.5 g/dL\n\n\nGlucose 90 mg/dL\n\n";
        assert_eq!(normalize(raw), "Hemoglobin 13.5 g/dL\nGlucose 90 mg/dL");
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = normalize("a\n\nb\n\n\nc\n");
        assert_eq!(normalize(&once), once);
    }
}
