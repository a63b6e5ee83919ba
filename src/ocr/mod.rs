//! OCR orchestration.
//!
//! Runs the OCR engine per page under a shared per-page time budget,
//! with multi-language support, partial-failure tolerance, and
//! confidence aggregation. The engine itself offers no cancellation
//! hook, so each recognition is raced against a timer on a blocking
//! task; a timed-out attempt is abandoned and its output never reused.

mod engine;

pub use engine::{EngineOutput, OcrEngine, TesseractEngine};

use std::sync::Arc;
use std::time::Duration;

use crate::config::ExtractionConfig;
use crate::error::ExtractError;
use crate::models::{ExtractedText, ExtractionMethod};

/// Orchestrates OCR engine runs with timeout and batching policy.
pub struct OcrOrchestrator {
    engine: Arc<dyn OcrEngine>,
    timeout: Duration,
    max_pages: usize,
}

impl OcrOrchestrator {
    /// Build an orchestrator around the system tesseract engine using
    /// the configured language set, per-page timeout, and batch cap.
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            engine: Arc::new(TesseractEngine::new(&config.ocr_languages)),
            timeout: Duration::from_millis(config.ocr_timeout_ms),
            max_pages: config.max_ocr_pages,
        }
    }

    /// Build an orchestrator around a custom engine (tests inject stub
    /// engines through this).
    pub fn with_engine(engine: Arc<dyn OcrEngine>, timeout: Duration, max_pages: usize) -> Self {
        Self {
            engine,
            timeout,
            max_pages,
        }
    }

    /// Whether the underlying engine can run on this host.
    pub fn engine_available(&self) -> bool {
        self.engine.is_available()
    }

    /// Recognize a single image.
    ///
    /// The blocking engine call runs on a separate task and is raced
    /// against the timeout; whichever settles first wins. On timeout
    /// the in-flight attempt is discarded and [`ExtractError::OcrTimeout`]
    /// returned. Retry policy, if any, belongs to the caller.
    pub async fn recognize_image(&self, image: &[u8]) -> Result<ExtractedText, ExtractError> {
        let engine = Arc::clone(&self.engine);
        let image = image.to_vec();

        let recognition = tokio::task::spawn_blocking(move || engine.recognize(&image));

        let output = match tokio::time::timeout(self.timeout, recognition).await {
            Ok(joined) => joined
                .map_err(|e| ExtractError::OcrFailed(format!("recognition task failed: {}", e)))??,
            Err(_) => {
                // Dropping the join handle abandons the attempt; its
                // result is never observed by a later call.
                return Err(ExtractError::OcrTimeout(self.timeout));
            }
        };

        Ok(ExtractedText {
            text: output.text,
            page_count: 1,
            method: ExtractionMethod::Ocr,
            confidence: output.confidence,
        })
    }

    /// Recognize a batch of page images with partial-failure tolerance.
    ///
    /// Only the first `max_pages` buffers are processed - a deliberate
    /// cost cap; callers needing more pages re-invoke. Pages run in
    /// input order, each under the same per-page timeout. A failed page
    /// is skipped; only when every page fails does the batch fail.
    /// Surviving pages are joined with a double newline, the reported
    /// confidence is the mean over surviving pages with a missing
    /// confidence counting as zero.
    pub async fn recognize_images(&self, pages: &[Vec<u8>]) -> Result<ExtractedText, ExtractError> {
        let attempted = pages.len().min(self.max_pages);
        let mut texts: Vec<String> = Vec::with_capacity(attempted);
        let mut conf_sum = 0.0f32;

        for (index, page) in pages.iter().take(self.max_pages).enumerate() {
            match self.recognize_image(page).await {
                Ok(result) => {
                    conf_sum += result.confidence.unwrap_or(0.0);
                    texts.push(result.text);
                }
                Err(e) => {
                    tracing::warn!(page = index + 1, error = %e, "OCR failed for page, skipping");
                }
            }
        }

        if texts.is_empty() {
            return Err(ExtractError::OcrBatchFailed(attempted));
        }

        let page_count = texts.len() as u32;
        Ok(ExtractedText {
            text: texts.join("\n\n"),
            page_count,
            method: ExtractionMethod::Ocr,
            confidence: Some(conf_sum / page_count as f32),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Stub engine: fails on buffers containing "corrupt", echoes the
    /// buffer text otherwise.
    struct EchoEngine;

    impl OcrEngine for EchoEngine {
        fn recognize(&self, image: &[u8]) -> Result<EngineOutput, ExtractError> {
            let text = String::from_utf8_lossy(image).into_owned();
            if text.contains("corrupt") {
                return Err(ExtractError::OcrFailed("unrecognizable page".to_string()));
            }
            Ok(EngineOutput {
                text,
                confidence: Some(90.0),
            })
        }
    }

    /// Stub engine that never finishes within a short timeout.
    struct SlowEngine;

    impl OcrEngine for SlowEngine {
        fn recognize(&self, _image: &[u8]) -> Result<EngineOutput, ExtractError> {
            std::thread::sleep(Duration::from_secs(5));
            Ok(EngineOutput {
                text: "too late".to_string(),
                confidence: None,
            })
        }
    }

    fn orchestrator(engine: impl OcrEngine, timeout: Duration) -> OcrOrchestrator {
        OcrOrchestrator::with_engine(Arc::new(engine), timeout, 2)
    }

    #[tokio::test]
    async fn test_single_image_success() {
        let ocr = orchestrator(EchoEngine, Duration::from_secs(1));
        let result = ocr.recognize_image(b"hello world").await.unwrap();
        assert_eq!(result.text, "hello world");
        assert_eq!(result.page_count, 1);
        assert_eq!(result.method, ExtractionMethod::Ocr);
        assert_eq!(result.confidence, Some(90.0));
    }

    #[tokio::test]
    async fn test_timeout_fires() {
        let ocr = orchestrator(SlowEngine, Duration::from_millis(50));
        let err = ocr.recognize_image(b"page").await.unwrap_err();
        assert!(matches!(err, ExtractError::OcrTimeout(_)));
    }

    #[tokio::test]
    async fn test_batch_partial_tolerance() {
        let ocr = OcrOrchestrator::with_engine(Arc::new(EchoEngine), Duration::from_secs(1), 10);
        let pages = vec![
            b"page one".to_vec(),
            b"corrupt".to_vec(),
            b"page three".to_vec(),
        ];
        let result = ocr.recognize_images(&pages).await.unwrap();
        assert_eq!(result.text, "page one\n\npage three");
        assert_eq!(result.page_count, 2);
        assert_eq!(result.confidence, Some(90.0));
    }

    #[tokio::test]
    async fn test_batch_total_failure() {
        let ocr = orchestrator(EchoEngine, Duration::from_secs(1));
        let pages = vec![b"corrupt a".to_vec(), b"corrupt b".to_vec()];
        let err = ocr.recognize_images(&pages).await.unwrap_err();
        assert!(matches!(err, ExtractError::OcrBatchFailed(2)));
    }

    #[tokio::test]
    async fn test_batch_respects_page_cap() {
        let ocr = orchestrator(EchoEngine, Duration::from_secs(1));
        let pages = vec![b"one".to_vec(), b"two".to_vec(), b"three".to_vec()];
        let result = ocr.recognize_images(&pages).await.unwrap();
        // max_pages = 2: the third buffer is never processed.
        assert_eq!(result.text, "one\n\ntwo");
        assert_eq!(result.page_count, 2);
    }
}
