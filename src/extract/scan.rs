//! Scanned-document detection.
//!
//! Advisory heuristics deciding whether a text-layer extraction looks
//! like a failed read of a scanned document (empty or garbage text
//! layer) that should be retried via OCR. Not authoritative - the
//! caller decides whether to actually spend OCR budget.

use std::sync::LazyLock;

use regex::Regex;

/// Minimum characters below which any document is suspect.
pub const MIN_TEXT_LENGTH: usize = 100;

/// Minimum ratio of word tokens to total characters.
pub const MIN_WORD_DENSITY: f64 = 0.1;

/// Maximum pages accepted before spending OCR budget.
pub const DEFAULT_MAX_PAGES: u32 = 20;

static WORD_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Za-z]{2,}").unwrap());

/// Count word-like tokens (runs of two or more ASCII letters).
pub fn word_token_count(text: &str) -> usize {
    WORD_TOKEN.find_iter(text).count()
}

/// Heuristically classify whether `text` looks like a failed or
/// low-quality extraction. Applied in order, any match returns true:
///
/// 1. Fewer than [`MIN_TEXT_LENGTH`] characters.
/// 2. Word density below [`MIN_WORD_DENSITY`]: word tokens divided by
///    total characters, typical of garbled text-layer reads.
pub fn looks_scanned(text: &str) -> bool {
    if text.len() < MIN_TEXT_LENGTH {
        return true;
    }

    let density = word_token_count(text) as f64 / text.len() as f64;
    if density < MIN_WORD_DENSITY {
        tracing::debug!(density, "text layer below word-density threshold");
        return true;
    }

    false
}

/// Reject oversized documents before OCR. Zero pages is invalid too.
pub fn validate_page_count(page_count: u32, max_pages: u32) -> bool {
    page_count > 0 && page_count <= max_pages
}
