//! cvintake - résumé text acquisition, OCR fallback, and structured
//! field extraction.
//!
//! The pipeline takes already-validated document bytes plus a format
//! discriminant, acquires raw text (with an OCR rescue path for scanned
//! documents), extracts a structured candidate-profile draft with
//! per-field provenance, and caches results per requester by content
//! fingerprint.

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod fields;
pub mod models;
pub mod ocr;
pub mod pipeline;

pub use cache::{CacheStats, ResultCache};
pub use config::ExtractionConfig;
pub use error::ExtractError;
pub use extract::DocumentFormat;
pub use models::{CandidateProfileDraft, ExtractedText, ExtractionMethod, FieldProvenanceEntry};
pub use pipeline::{CachedExtraction, ExtractionOutcome, ExtractionPipeline};
