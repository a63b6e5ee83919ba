//! Raw text acquisition results.

use serde::{Deserialize, Serialize};

/// Pipeline that produced the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionMethod {
    /// Direct text-layer extraction (plain text, DOCX).
    Text,
    /// Optical character recognition.
    Ocr,
}

impl ExtractionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionMethod::Text => "text",
            ExtractionMethod::Ocr => "ocr",
        }
    }
}

/// Result of raw text acquisition from a document.
///
/// Created once per extraction attempt and consumed by the field
/// extractor; never persisted by the core itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedText {
    /// Extracted textual content; may be empty.
    pub text: String,
    /// Number of pages that contributed text.
    pub page_count: u32,
    /// Which pipeline produced the text.
    pub method: ExtractionMethod,
    /// Engine-reported accuracy estimate in [0, 100].
    /// Only meaningful when `method` is OCR.
    pub confidence: Option<f32>,
}

impl ExtractedText {
    /// Single-page text-layer result with no confidence attached.
    pub fn from_text_layer(text: String) -> Self {
        Self {
            text,
            page_count: 1,
            method: ExtractionMethod::Text,
            confidence: None,
        }
    }

    /// Count of word-like tokens, used to compare extraction quality
    /// between the text layer and an OCR rescue of the same document.
    pub fn word_count(&self) -> usize {
        crate::extract::scan::word_token_count(&self.text)
    }
}
