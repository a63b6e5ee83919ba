//! Plain-text extraction.

use crate::models::ExtractedText;

/// Decode bytes as text verbatim. Lossy UTF-8: the caller is
/// responsible for not routing binary data here, so stray invalid
/// sequences are replaced rather than rejected.
pub fn extract_plain_text(content: &[u8]) -> ExtractedText {
    ExtractedText::from_text_layer(String::from_utf8_lossy(content).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExtractionMethod;

    #[test]
    fn test_decodes_verbatim() {
        let result = extract_plain_text("Jane Doe\nEmail: jane@example.com".as_bytes());
        assert_eq!(result.text, "Jane Doe\nEmail: jane@example.com");
        assert_eq!(result.page_count, 1);
        assert_eq!(result.method, ExtractionMethod::Text);
        assert!(result.confidence.is_none());
    }

    #[test]
    fn test_invalid_utf8_is_replaced_not_rejected() {
        let result = extract_plain_text(&[b'o', b'k', 0xff, b'!']);
        assert!(result.text.starts_with("ok"));
        assert!(result.text.ends_with('!'));
    }
}
