//! Language proficiency extraction.
//!
//! Matches "language ... level" pairs anywhere in the text, since many
//! résumés list languages inline rather than in a dedicated section.
//! Language names across the four working languages are canonicalized
//! to their English form; levels are CEFR codes or native-tongue
//! synonyms. First match per language wins, in order of appearance.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{FieldProvenanceEntry, LanguageEntry, LanguageLevel};

static LANGUAGE_LEVEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(english|englisch|anglais|inglese|german|deutsch|allemand|tedesco|french|französisch|francais|français|francese|italian|italienisch|italien|italiano|spanish|spanisch|espagnol|spagnolo|portuguese|portugiesisch|portugais)\b[^\n]{0,30}?\b(A1|A2|B1|B2|C1|C2|native|muttersprache|mother tongue|langue maternelle|madrelingua)\b",
    )
    .unwrap()
});

/// Canonical English name for a matched language token.
fn canonical_language(token: &str) -> &'static str {
    match token.to_lowercase().as_str() {
        "english" | "englisch" | "anglais" | "inglese" => "English",
        "german" | "deutsch" | "allemand" | "tedesco" => "German",
        "french" | "französisch" | "francais" | "français" | "francese" => "French",
        "italian" | "italienisch" | "italien" | "italiano" => "Italian",
        "spanish" | "spanisch" | "espagnol" | "spagnolo" => "Spanish",
        "portuguese" | "portugiesisch" | "portugais" => "Portuguese",
        _ => "English",
    }
}

/// Extract ordered language entries. Never fails.
pub fn extract_languages(text: &str) -> (Vec<LanguageEntry>, Vec<FieldProvenanceEntry>) {
    let mut entries: Vec<LanguageEntry> = Vec::new();
    let mut provenance = Vec::new();

    for caps in LANGUAGE_LEVEL.captures_iter(text) {
        let Some(level) = LanguageLevel::from_token(&caps[2]) else {
            continue;
        };
        let language = canonical_language(&caps[1]).to_string();
        if entries.iter().any(|e| e.language == language) {
            continue;
        }

        let whole = caps.get(0).unwrap();
        provenance.push(FieldProvenanceEntry::new(
            &format!("languages[{}]", entries.len()),
            &format!("{} ({})", language, level.as_str()),
            Some((whole.start(), whole.end())),
        ));
        entries.push(LanguageEntry { language, level });
    }

    (entries, provenance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cefr_levels() {
        let text = "Languages\nGerman: Native\nEnglish: C1\nFrench: B2\n";
        let (entries, prov) = extract_languages(text);
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].language, "German");
        assert_eq!(entries[0].level, LanguageLevel::Native);
        assert_eq!(entries[1].level, LanguageLevel::C1);
        assert_eq!(entries[2].level, LanguageLevel::B2);
        assert_eq!(prov.len(), 3);
    }

    #[test]
    fn test_localized_names_canonicalized() {
        let text = "Sprachen: Deutsch Muttersprache, Englisch C2, Französisch B1\n";
        let (entries, _) = extract_languages(text);
        let names: Vec<&str> = entries.iter().map(|e| e.language.as_str()).collect();
        assert_eq!(names, vec!["German", "English", "French"]);
        assert_eq!(entries[0].level, LanguageLevel::Native);
    }

    #[test]
    fn test_duplicate_language_keeps_first() {
        let text = "English C1\nEnglish B2\n";
        let (entries, _) = extract_languages(text);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].level, LanguageLevel::C1);
    }

    #[test]
    fn test_vague_levels_are_skipped() {
        let text = "English: fluent\nGerman: good\n";
        let (entries, _) = extract_languages(text);
        assert!(entries.is_empty());
    }
}
