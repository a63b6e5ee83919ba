//! Section detection shared by the field extractors.
//!
//! Résumés are segmented by short header lines ("Experience",
//! "Ausbildung", "Compétences", ...). A section body runs from the line
//! after its header to the next recognized header or end of text.

use std::sync::LazyLock;

use regex::Regex;

/// Kinds of sections the extractors care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Experience,
    Education,
    Skills,
    Languages,
    Certificates,
    Summary,
}

const EXPERIENCE_HEADERS: &str = r"work experience|professional experience|employment history|experience|berufserfahrung|berufliche erfahrung|expérience professionnelle|expérience|esperienza lavorativa|esperienze";
const EDUCATION_HEADERS: &str = r"education|ausbildung|bildung|studium|formation|études|formazione|istruzione";
const SKILLS_HEADERS: &str = r"technical skills|skills|kenntnisse|fähigkeiten|compétences techniques|compétences|competenze";
const LANGUAGE_HEADERS: &str = r"languages|language skills|sprachen|sprachkenntnisse|langues|lingue";
const CERTIFICATE_HEADERS: &str = r"certifications?|certificates?|zertifikate|zertifizierungen|certificats|certificazioni";
const SUMMARY_HEADERS: &str = r"summary|profile|profil|highlights|about me|über mich|à propos";

impl SectionKind {
    fn header_words(&self) -> &'static str {
        match self {
            SectionKind::Experience => EXPERIENCE_HEADERS,
            SectionKind::Education => EDUCATION_HEADERS,
            SectionKind::Skills => SKILLS_HEADERS,
            SectionKind::Languages => LANGUAGE_HEADERS,
            SectionKind::Certificates => CERTIFICATE_HEADERS,
            SectionKind::Summary => SUMMARY_HEADERS,
        }
    }
}

/// A line counts as a header when it is nothing but a known header word
/// with optional decoration.
static ANY_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)^[ \t]*(?:{}|{}|{}|{}|{}|{})[ \t]*:?[ \t]*$",
        EXPERIENCE_HEADERS,
        EDUCATION_HEADERS,
        SKILLS_HEADERS,
        LANGUAGE_HEADERS,
        CERTIFICATE_HEADERS,
        SUMMARY_HEADERS,
    ))
    .unwrap()
});

fn kind_header(kind: SectionKind) -> Regex {
    Regex::new(&format!(
        r"(?i)^[ \t]*(?:{})[ \t]*:?[ \t]*$",
        kind.header_words()
    ))
    .unwrap()
}

/// Locate the body of the first section of `kind` in `text`. Returns
/// the body slice and its byte offset into `text`.
pub fn find_section(text: &str, kind: SectionKind) -> Option<(&str, usize)> {
    let header = kind_header(kind);
    let mut offset = 0;
    let mut lines = text.split_inclusive('\n');

    // Find the header line.
    let body_start = loop {
        let line = lines.next()?;
        let line_start = offset;
        offset += line.len();
        if header.is_match(line.trim_end_matches('\n')) {
            break line_start + line.len();
        }
    };

    // Body extends to the next recognized header or end of text.
    let mut body_end = text.len();
    let mut scan = body_start;
    for line in text[body_start..].split_inclusive('\n') {
        if ANY_HEADER.is_match(line.trim_end_matches('\n')) {
            body_end = scan;
            break;
        }
        scan += line.len();
    }

    Some((&text[body_start..body_end], body_start))
}

/// Strip a leading bullet marker from a line, if any.
pub fn strip_bullet(line: &str) -> &str {
    line.trim_start()
        .trim_start_matches(['•', '-', '*', '·', '–', '▪'])
        .trim_start()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Jane Doe\n\nExperience\n03/2019 - 06/2021 Engineer, Acme\n\nEducation:\nMSc Computer Science, ETH\n\nSkills\nRust, SQL\n";

    #[test]
    fn test_finds_experience_section() {
        let (body, offset) = find_section(SAMPLE, SectionKind::Experience).unwrap();
        assert!(body.contains("Engineer, Acme"));
        assert!(!body.contains("MSc"));
        assert_eq!(&SAMPLE[offset..offset + 7], "03/2019");
    }

    #[test]
    fn test_header_with_colon_and_case() {
        let (body, _) = find_section(SAMPLE, SectionKind::Education).unwrap();
        assert!(body.contains("MSc Computer Science"));
        assert!(!body.contains("Rust"));
    }

    #[test]
    fn test_last_section_runs_to_end() {
        let (body, _) = find_section(SAMPLE, SectionKind::Skills).unwrap();
        assert_eq!(body.trim(), "Rust, SQL");
    }

    #[test]
    fn test_missing_section() {
        assert!(find_section(SAMPLE, SectionKind::Certificates).is_none());
    }

    #[test]
    fn test_header_word_inside_prose_is_not_a_header() {
        let text = "I have broad experience in parsing.\nSkills\nRust\n";
        assert!(find_section(text, SectionKind::Experience).is_none());
        let (body, _) = find_section(text, SectionKind::Skills).unwrap();
        assert_eq!(body.trim(), "Rust");
    }

    #[test]
    fn test_strip_bullet() {
        assert_eq!(strip_bullet("• Rust"), "Rust");
        assert_eq!(strip_bullet("- led a team"), "led a team");
        assert_eq!(strip_bullet("plain"), "plain");
    }
}
