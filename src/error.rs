//! Error taxonomy for text acquisition and OCR.
//!
//! Field extraction never raises - absence of a match is an empty result,
//! not an error. Only acquisition, the OCR path, and the container layer
//! produce errors, and they propagate to the caller which decides whether
//! to retry with another modality or surface a failure.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur during text acquisition and OCR.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Caller passed a format discriminant with no matching extractor.
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),

    /// Container or archive unreadable (e.g. corrupt DOCX package).
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    /// OCR recognition exceeded its time budget and was abandoned.
    #[error("OCR timed out after {0:?}")]
    OcrTimeout(Duration),

    /// Every page in a multi-page OCR batch failed.
    #[error("OCR failed on all {0} page(s)")]
    OcrBatchFailed(usize),

    /// Text acquisition succeeded but yielded nothing usable after all
    /// fallbacks.
    #[error("no extractable content ({0} chars after all fallbacks)")]
    NoExtractableContent(usize),

    /// The OCR engine binary is not installed or not runnable.
    #[error("OCR engine not available: {0}")]
    EngineNotAvailable(String),

    /// The OCR engine ran but reported a failure.
    #[error("OCR failed: {0}")]
    OcrFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
