//! Extraction pipeline configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::extract::scan;

/// Default per-page OCR time budget (60 seconds).
pub const DEFAULT_OCR_TIMEOUT_MS: u64 = 60_000;

/// Default cap on pages OCRed per batch.
pub const DEFAULT_MAX_OCR_PAGES: usize = 2;

/// Default result cache TTL (1 hour).
pub const DEFAULT_CACHE_TTL_MS: u64 = 3_600_000;

/// Tunables for text acquisition, OCR, and caching.
///
/// All fields have defaults matching the deployment's working setup;
/// a TOML file can override any subset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Tesseract language set. The deployment's working languages.
    pub ocr_languages: String,
    /// Per-page OCR time budget in milliseconds.
    pub ocr_timeout_ms: u64,
    /// Maximum pages processed per OCR batch.
    pub max_ocr_pages: usize,
    /// Maximum page count accepted before spending OCR budget.
    pub max_document_pages: u32,
    /// Result cache TTL in milliseconds.
    pub cache_ttl_ms: u64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            ocr_languages: "eng+deu+fra+ita".to_string(),
            ocr_timeout_ms: DEFAULT_OCR_TIMEOUT_MS,
            max_ocr_pages: DEFAULT_MAX_OCR_PAGES,
            max_document_pages: scan::DEFAULT_MAX_PAGES,
            cache_ttl_ms: DEFAULT_CACHE_TTL_MS,
        }
    }
}

impl ExtractionConfig {
    /// Load configuration from a TOML file, falling back to defaults
    /// for absent keys.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ExtractionConfig::default();
        assert_eq!(config.ocr_languages, "eng+deu+fra+ita");
        assert_eq!(config.ocr_timeout_ms, 60_000);
        assert_eq!(config.max_ocr_pages, 2);
        assert_eq!(config.max_document_pages, 20);
        assert_eq!(config.cache_ttl_ms, 3_600_000);
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config: ExtractionConfig = toml::from_str("max_ocr_pages = 4").unwrap();
        assert_eq!(config.max_ocr_pages, 4);
        assert_eq!(config.ocr_timeout_ms, DEFAULT_OCR_TIMEOUT_MS);
    }
}
