//! Heuristic field extraction from raw résumé text.
//!
//! A family of pure functions, independently invocable, each applying
//! an ordered set of deterministic pattern rules and returning the
//! first/best match per logical slot together with provenance entries.
//! None of them fails: absence of a match is success with an empty
//! result, and an extraction with zero matched fields is still a valid
//! draft requiring manual completion.

pub mod dates;
mod certificates;
mod education;
mod experience;
mod languages;
mod personal;
mod sections;
mod skills;

pub use certificates::extract_certificates;
pub use education::extract_education;
pub use experience::extract_experiences;
pub use languages::extract_languages;
pub use personal::extract_personal_info;
pub use skills::{extract_highlights, extract_skills};

use crate::models::{CandidateProfileDraft, FieldProvenanceEntry};

/// Normalize raw text for pattern matching: unified line endings,
/// stripped BOM, horizontal whitespace collapsed within lines.
pub fn normalize_text(text: &str) -> String {
    let text = text.trim_start_matches('\u{feff}').replace("\r\n", "\n").replace('\r', "\n");
    let lines: Vec<String> = text
        .split('\n')
        .map(|line| {
            let mut collapsed = String::with_capacity(line.len());
            let mut last_was_space = false;
            for c in line.trim_end().chars() {
                if c == ' ' || c == '\t' {
                    if !last_was_space {
                        collapsed.push(' ');
                    }
                    last_was_space = true;
                } else {
                    collapsed.push(c);
                    last_was_space = false;
                }
            }
            collapsed
        })
        .collect();
    lines.join("\n")
}

/// Run every field extractor over the text and assemble the draft plus
/// the combined provenance trail.
///
/// Pure: identical text yields identical output, with no hidden state.
pub fn extract_profile(text: &str) -> (CandidateProfileDraft, Vec<FieldProvenanceEntry>) {
    let normalized = normalize_text(text);

    let (personal, mut provenance) = extract_personal_info(&normalized);
    let (experience, prov) = extract_experiences(&normalized);
    provenance.extend(prov);
    let (education, prov) = extract_education(&normalized);
    provenance.extend(prov);
    let (skills, prov) = extract_skills(&normalized);
    provenance.extend(prov);
    let (languages, prov) = extract_languages(&normalized);
    provenance.extend(prov);
    let (certificates, prov) = extract_certificates(&normalized);
    provenance.extend(prov);
    let (highlights, prov) = extract_highlights(&normalized);
    provenance.extend(prov);

    let draft = CandidateProfileDraft {
        personal,
        experience,
        education,
        skills,
        languages,
        certificates,
        highlights,
    };
    (draft, provenance)
}
