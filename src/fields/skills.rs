//! Skills and highlights extraction.

use std::collections::BTreeSet;

use crate::models::FieldProvenanceEntry;

use super::sections::{find_section, strip_bullet, SectionKind};

/// Extract the skill set from the skills section: comma, semicolon, or
/// bullet separated tokens. Never fails; no section means no skills.
pub fn extract_skills(text: &str) -> (BTreeSet<String>, Vec<FieldProvenanceEntry>) {
    let mut skills = BTreeSet::new();
    let mut provenance = Vec::new();

    let Some((body, _)) = find_section(text, SectionKind::Skills) else {
        return (skills, provenance);
    };

    for line in body.lines() {
        for token in strip_bullet(line.trim()).split([',', ';', '•', '|', '·']) {
            let skill = token.trim().trim_end_matches('.').trim();
            if skill.is_empty() || skill.len() > 40 {
                continue;
            }
            if skills.insert(skill.to_string()) {
                provenance.push(FieldProvenanceEntry::new("skills", skill, None));
            }
        }
    }

    (skills, provenance)
}

/// Extract highlight lines from the summary/profile section, in order.
/// Bulleted lines are preferred; a plain single-paragraph summary
/// yields one highlight per sentence-bearing line.
pub fn extract_highlights(text: &str) -> (Vec<String>, Vec<FieldProvenanceEntry>) {
    let mut highlights = Vec::new();
    let mut provenance = Vec::new();

    let Some((body, _)) = find_section(text, SectionKind::Summary) else {
        return (highlights, provenance);
    };

    for line in body.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let highlight = strip_bullet(trimmed).to_string();
        if highlight.len() < 3 {
            continue;
        }
        provenance.push(FieldProvenanceEntry::new(
            &format!("highlights[{}]", highlights.len()),
            &highlight,
            None,
        ));
        highlights.push(highlight);
    }

    (highlights, provenance)
}
