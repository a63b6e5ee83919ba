//! Content fingerprinting for cache addressing.

use sha2::{Digest, Sha256};

/// Compute the SHA-256 fingerprint of a byte buffer as 64 lowercase hex
/// characters.
///
/// Deterministic: identical bytes always produce the same fingerprint.
/// Empty input is valid and yields the digest of the empty string.
pub fn fingerprint(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_deterministic() {
        let content = b"resume content";
        assert_eq!(fingerprint(content), fingerprint(content));
        assert_eq!(fingerprint(content).len(), 64);
    }

    #[test]
    fn test_fingerprint_differs_on_single_byte() {
        assert_ne!(fingerprint(b"resume content"), fingerprint(b"resume contenu"));
    }

    #[test]
    fn test_fingerprint_empty_input() {
        // SHA-256 of the empty string.
        assert_eq!(
            fingerprint(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_fingerprint_lowercase_hex() {
        let fp = fingerprint(b"anything");
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}
