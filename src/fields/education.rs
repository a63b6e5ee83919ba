//! Education extraction.
//!
//! Lines in the education section carrying a degree keyword become
//! entries; the institution comes from the same line after a separator
//! or from an adjacent line naming a school. Date ranges attach to the
//! nearest preceding or same-line entry.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{EducationEntry, FieldProvenanceEntry};

use super::dates::parse_range;
use super::sections::{find_section, strip_bullet, SectionKind};

static DEGREE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(b\.?sc|m\.?sc|bachelor|master|ph\.?d|doktorat?|diplom|dipl\.|mba|cas|das|mas|matura|maturité|lehre|apprenticeship|licence|laurea|eidg\. fachausweis)\b").unwrap()
});

static INSTITUTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(universität|université|università|university|eth|epfl|hochschule|fachhochschule|hslu|zhaw|fhnw|école|school|college|institut|gymnasium|berufsschule)\b").unwrap()
});

/// Extract ordered education entries. Never fails.
pub fn extract_education(text: &str) -> (Vec<EducationEntry>, Vec<FieldProvenanceEntry>) {
    let mut entries: Vec<EducationEntry> = Vec::new();
    let mut provenance = Vec::new();

    let Some((body, _)) = find_section(text, SectionKind::Education) else {
        return (entries, provenance);
    };

    for raw_line in body.lines() {
        let mut line = strip_bullet(raw_line.trim()).to_string();
        if line.is_empty() {
            continue;
        }

        // A range on the line dates the entry it describes.
        let range = parse_range(&line).map(|(range, span)| {
            let remainder = format!("{} {}", &line[..span.0], &line[span.1..]);
            line = remainder.trim().trim_matches([',', '|', ':']).trim().to_string();
            range
        });

        if line.is_empty() {
            // Bare range line: dates the most recent entry if it has none.
            if let (Some(range), Some(last)) = (range, entries.last_mut()) {
                if last.start_date.is_none() && last.end_date.is_none() {
                    last.start_date = range.start;
                    last.end_date = range.end;
                }
            }
            continue;
        }

        if DEGREE.is_match(&line) {
            let (degree, institution) = split_degree_institution(&line);
            entries.push(EducationEntry {
                degree,
                institution,
                start_date: range.as_ref().and_then(|r| r.start.clone()),
                end_date: range.as_ref().and_then(|r| r.end.clone()),
            });
        } else if INSTITUTION.is_match(&line) {
            // Institution on its own line belongs to the entry above.
            if let Some(last) = entries.last_mut() {
                if last.institution.is_empty() {
                    last.institution = line.clone();
                }
            }
        }
    }

    // Entries need both halves to be useful downstream; provenance is
    // indexed against the surviving entries only.
    let mut filtered: Vec<EducationEntry> = Vec::with_capacity(entries.len());
    for entry in entries {
        if entry.institution.is_empty() {
            continue;
        }
        provenance.push(FieldProvenanceEntry::new(
            &format!("education[{}].degree", filtered.len()),
            &entry.degree,
            None,
        ));
        provenance.push(FieldProvenanceEntry::new(
            &format!("education[{}].institution", filtered.len()),
            &entry.institution,
            None,
        ));
        filtered.push(entry);
    }
    (filtered, provenance)
}

/// Split "MSc Computer Science, ETH Zürich" style lines. When no
/// separator is present but the line names a school, the institution
/// match and everything after it is the institution.
fn split_degree_institution(line: &str) -> (String, String) {
    for sep in [", ", " - ", " – ", " | ", " at ", " @ "] {
        if let Some((degree, institution)) = line.split_once(sep) {
            let degree = degree.trim();
            let institution = institution.trim();
            if !degree.is_empty() && !institution.is_empty() {
                return (degree.to_string(), institution.to_string());
            }
        }
    }
    if let Some(m) = INSTITUTION.find(line) {
        let degree = line[..m.start()].trim().trim_matches(',').trim();
        if !degree.is_empty() {
            return (degree.to_string(), line[m.start()..].trim().to_string());
        }
    }
    (line.trim().to_string(), String::new())
}
