//! Format-specific text acquisition.
//!
//! Each extractor turns document bytes into a uniform [`ExtractedText`].
//! The caller picks the variant via [`DocumentFormat`] - classification
//! by MIME type or extension is the caller's concern, the core never
//! sniffs.

mod docx;
mod plain;
pub mod scan;

pub use docx::extract_docx;
pub use plain::extract_plain_text;
pub use scan::{looks_scanned, validate_page_count, word_token_count};

use serde::{Deserialize, Serialize};

use crate::error::ExtractError;
use crate::models::ExtractedText;
use crate::ocr::OcrOrchestrator;

/// Input modality discriminant, declared or sniffed by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    PlainText,
    Docx,
    Image,
}

impl DocumentFormat {
    /// Map a MIME type to a format discriminant.
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "text/plain" => Some(DocumentFormat::PlainText),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                Some(DocumentFormat::Docx)
            }
            m if m.starts_with("image/") => Some(DocumentFormat::Image),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentFormat::PlainText => "text",
            DocumentFormat::Docx => "docx",
            DocumentFormat::Image => "image",
        }
    }
}

impl std::str::FromStr for DocumentFormat {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" | "txt" => Ok(DocumentFormat::PlainText),
            "docx" => Ok(DocumentFormat::Docx),
            "image" => Ok(DocumentFormat::Image),
            other => Err(ExtractError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Acquire raw text from document bytes using the extractor selected by
/// `format`. The image path delegates to the OCR orchestrator.
pub async fn acquire_text(
    content: &[u8],
    format: DocumentFormat,
    ocr: &OcrOrchestrator,
) -> Result<ExtractedText, ExtractError> {
    match format {
        DocumentFormat::PlainText => Ok(extract_plain_text(content)),
        DocumentFormat::Docx => extract_docx(content),
        DocumentFormat::Image => ocr.recognize_image(content).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_mime() {
        assert_eq!(
            DocumentFormat::from_mime("text/plain"),
            Some(DocumentFormat::PlainText)
        );
        assert_eq!(
            DocumentFormat::from_mime(
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            ),
            Some(DocumentFormat::Docx)
        );
        assert_eq!(
            DocumentFormat::from_mime("image/png"),
            Some(DocumentFormat::Image)
        );
        assert_eq!(DocumentFormat::from_mime("application/pdf"), None);
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("docx".parse::<DocumentFormat>().unwrap(), DocumentFormat::Docx);
        let err = "pdf".parse::<DocumentFormat>().unwrap_err();
        assert!(matches!(err, ExtractError::UnsupportedFormat(_)));
    }
}
