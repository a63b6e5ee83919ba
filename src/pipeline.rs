//! End-to-end extraction pipeline.
//!
//! Fingerprint, cache lookup, text acquisition, scan detection with an
//! optional OCR rescue, field extraction, cache store. The cache is an
//! explicitly constructed collaborator passed in at build time, so
//! callers (and tests) control its lifetime.

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cache::{CacheStats, ResultCache};
use crate::config::ExtractionConfig;
use crate::error::ExtractError;
use crate::extract::{self, scan, DocumentFormat};
use crate::fields;
use crate::models::{
    fingerprint, CandidateProfileDraft, ExtractedText, ExtractionMethod, FieldProvenanceEntry,
};
use crate::ocr::OcrOrchestrator;

/// The cacheable portion of an extraction: everything except
/// per-request metadata like timing and the cache-hit flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedExtraction {
    pub draft: CandidateProfileDraft,
    pub provenance: Vec<FieldProvenanceEntry>,
    pub method: ExtractionMethod,
    pub confidence: Option<f32>,
    pub page_count: u32,
}

/// Full result of one `process_document` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionOutcome {
    pub draft: CandidateProfileDraft,
    pub provenance: Vec<FieldProvenanceEntry>,
    pub method: ExtractionMethod,
    pub confidence: Option<f32>,
    pub page_count: u32,
    pub processing_time_ms: u64,
    pub cache_hit: bool,
    /// When this response was produced (cache hits get a fresh stamp).
    pub extracted_at: DateTime<Utc>,
}

/// Résumé extraction pipeline with an injected result cache.
pub struct ExtractionPipeline {
    config: ExtractionConfig,
    ocr: OcrOrchestrator,
    cache: Arc<ResultCache<CachedExtraction>>,
}

impl ExtractionPipeline {
    /// Build a pipeline around the system OCR engine.
    pub fn new(config: ExtractionConfig, cache: Arc<ResultCache<CachedExtraction>>) -> Self {
        let ocr = OcrOrchestrator::new(&config);
        Self { config, ocr, cache }
    }

    /// Build a pipeline around a custom OCR orchestrator (tests inject
    /// stub engines through this).
    pub fn with_ocr(
        config: ExtractionConfig,
        ocr: OcrOrchestrator,
        cache: Arc<ResultCache<CachedExtraction>>,
    ) -> Self {
        Self { config, ocr, cache }
    }

    /// Acquire raw text from document bytes via the format-selected
    /// extractor.
    pub async fn acquire_text(
        &self,
        content: &[u8],
        format: DocumentFormat,
    ) -> Result<ExtractedText, ExtractError> {
        extract::acquire_text(content, format, &self.ocr).await
    }

    /// Retry a suspect text-layer extraction via OCR over page
    /// renderings of the same document. Keeps whichever result carries
    /// more word content; OCR errors fall back to the original text
    /// rather than failing the request.
    pub async fn maybe_rescue_via_ocr(
        &self,
        extracted: ExtractedText,
        page_renderings: &[Vec<u8>],
    ) -> ExtractedText {
        if page_renderings.is_empty() {
            return extracted;
        }
        if !scan::validate_page_count(page_renderings.len() as u32, self.config.max_document_pages)
        {
            tracing::debug!(
                pages = page_renderings.len(),
                "document too large for OCR rescue"
            );
            return extracted;
        }

        match self.ocr.recognize_images(page_renderings).await {
            Ok(ocr_result) => {
                if ocr_result.word_count() > extracted.word_count() {
                    ocr_result
                } else {
                    extracted
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "OCR rescue failed, keeping text-layer result");
                extracted
            }
        }
    }

    /// Run the full pipeline for one document on behalf of a requester.
    ///
    /// A cache hit short-circuits everything: the stored result is
    /// returned with a fresh timing envelope. `page_renderings` are
    /// image renderings of the document's pages, used only when the
    /// text layer looks scanned.
    pub async fn process_document(
        &self,
        content: &[u8],
        format: DocumentFormat,
        requester_id: &str,
        page_renderings: &[Vec<u8>],
    ) -> Result<ExtractionOutcome, ExtractError> {
        let started = Instant::now();
        let fp = fingerprint(content);

        if let Some(cached) = self.cache.get(&fp, requester_id) {
            tracing::debug!(fingerprint = %fp, "cache hit");
            return Ok(Self::outcome(cached, started, true));
        }

        let mut extracted = self.acquire_text(content, format).await?;

        if extracted.method == ExtractionMethod::Text && scan::looks_scanned(&extracted.text) {
            tracing::debug!(
                chars = extracted.text.len(),
                "text layer looks scanned, attempting OCR rescue"
            );
            extracted = self.maybe_rescue_via_ocr(extracted, page_renderings).await;
        }

        if scan::looks_scanned(&extracted.text) && extracted.word_count() == 0 {
            return Err(ExtractError::NoExtractableContent(extracted.text.len()));
        }

        let (draft, provenance) = fields::extract_profile(&extracted.text);
        let cached = CachedExtraction {
            draft,
            provenance,
            method: extracted.method,
            confidence: extracted.confidence,
            page_count: extracted.page_count,
        };
        self.cache.put(&fp, requester_id, cached.clone());

        Ok(Self::outcome(cached, started, false))
    }

    /// Drop the cached result for a document/requester pair.
    pub fn invalidate_cached(&self, content: &[u8], requester_id: &str) {
        self.cache.invalidate(&fingerprint(content), requester_id);
    }

    /// Cache occupancy snapshot.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    fn outcome(cached: CachedExtraction, started: Instant, cache_hit: bool) -> ExtractionOutcome {
        ExtractionOutcome {
            draft: cached.draft,
            provenance: cached.provenance,
            method: cached.method,
            confidence: cached.confidence,
            page_count: cached.page_count,
            processing_time_ms: started.elapsed().as_millis() as u64,
            cache_hit,
            extracted_at: Utc::now(),
        }
    }
}
