//! Work experience extraction.
//!
//! Entries are segmented by date-range lines inside the experience
//! section. Role and company come from the remainder of the range line
//! or the following line; bullets become the description and a labeled
//! technologies line feeds the technology set. Entries without both a
//! role and a company are dropped - best-effort and lossy by design.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::{ExperienceEntry, FieldProvenanceEntry};

use super::dates::parse_range;
use super::sections::{find_section, strip_bullet, SectionKind};

/// "Role at Company" with localized connectors.
static ROLE_AT_COMPANY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(.{2,60}?)\s+(?:at|@|bei|chez|presso)\s+(.{2,60})$").unwrap()
});

/// "Role, Company", "Role - Company", "Role | Company".
static ROLE_SEP_COMPANY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.{2,60}?)\s*(?:,|\||–|—| - )\s*(.{2,60})$").unwrap()
});

static TECHNOLOGIES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:technologies|technologien|tech stack|stack|tools)[ \t:.]+(.+)$").unwrap()
});

struct PendingEntry {
    entry: ExperienceEntry,
    description_lines: Vec<String>,
    has_role: bool,
}

impl PendingEntry {
    fn new(start: Option<String>, end: Option<String>) -> Self {
        Self {
            entry: ExperienceEntry {
                start_date: start,
                end_date: end,
                ..Default::default()
            },
            description_lines: Vec::new(),
            has_role: false,
        }
    }

    fn finish(mut self, index: usize, provenance: &mut Vec<FieldProvenanceEntry>) -> Option<ExperienceEntry> {
        if !self.has_role {
            return None;
        }
        if !self.description_lines.is_empty() {
            self.entry.description = Some(self.description_lines.join("\n"));
        }
        provenance.push(FieldProvenanceEntry::new(
            &format!("experience[{}].role", index),
            &self.entry.role,
            None,
        ));
        provenance.push(FieldProvenanceEntry::new(
            &format!("experience[{}].company", index),
            &self.entry.company,
            None,
        ));
        Some(self.entry)
    }
}

/// Extract ordered work-experience entries. Never fails.
pub fn extract_experiences(text: &str) -> (Vec<ExperienceEntry>, Vec<FieldProvenanceEntry>) {
    let mut entries = Vec::new();
    let mut provenance = Vec::new();

    let Some((body, _)) = find_section(text, SectionKind::Experience) else {
        return (entries, provenance);
    };

    let mut pending: Option<PendingEntry> = None;

    for raw_line in body.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some((range, span)) = parse_range(line) {
            if let Some(done) = pending.take() {
                if let Some(entry) = done.finish(entries.len(), &mut provenance) {
                    entries.push(entry);
                }
            }
            let mut next = PendingEntry::new(range.start, range.end);

            // Text on the range line itself may carry role and company.
            let remainder = format!("{} {}", &line[..span.0], &line[span.1..]);
            let remainder = remainder.trim().trim_matches([',', '|', ':']).trim();
            if !remainder.is_empty() {
                apply_role_line(&mut next, remainder);
            }
            pending = Some(next);
            continue;
        }

        let Some(current) = pending.as_mut() else {
            continue;
        };

        if let Some(caps) = TECHNOLOGIES.captures(line) {
            let techs: BTreeSet<String> = caps[1]
                .split([',', ';', '/', '|'])
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect();
            current.entry.technologies.extend(techs);
        } else if !current.has_role {
            apply_role_line(current, line);
        } else {
            current.description_lines.push(strip_bullet(line).to_string());
        }
    }

    if let Some(done) = pending.take() {
        if let Some(entry) = done.finish(entries.len(), &mut provenance) {
            entries.push(entry);
        }
    }

    (entries, provenance)
}

/// First matching role/company rule wins; a line matching neither is
/// treated as description once a role exists, otherwise ignored.
fn apply_role_line(pending: &mut PendingEntry, line: &str) {
    let line = strip_bullet(line);
    for rule in [&*ROLE_AT_COMPANY, &*ROLE_SEP_COMPANY] {
        if let Some(caps) = rule.captures(line) {
            pending.entry.role = caps[1].trim().to_string();
            pending.entry.company = caps[2].trim().to_string();
            pending.has_role = true;
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_line_with_role_and_company() {
        let text = "Experience\n03/2019 - 06/2021 Software Engineer, Acme AG\n";
        let (entries, prov) = extract_experiences(text);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].role, "Software Engineer");
        assert_eq!(entries[0].company, "Acme AG");
        assert_eq!(entries[0].start_date.as_deref(), Some("2019-03"));
        assert_eq!(entries[0].end_date.as_deref(), Some("2021-06"));
        assert!(prov.iter().any(|p| p.target_field == "experience[0].role"));
    }

    #[test]
    fn test_role_on_following_line_with_at_connector() {
        let text = "Experience\n07/2021 - present\nData Engineer at Beta GmbH\n• built pipelines\n";
        let (entries, _) = extract_experiences(text);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].role, "Data Engineer");
        assert_eq!(entries[0].company, "Beta GmbH");
        assert_eq!(entries[0].end_date.as_deref(), Some("present"));
        assert_eq!(entries[0].description.as_deref(), Some("built pipelines"));
    }

    #[test]
    fn test_multiple_entries_in_order() {
        let text = "Berufserfahrung\n\
            01/2022 - heute Senior Engineer, Gamma\n\
            03/2019 - 12/2021 Engineer, Acme\n";
        let (entries, _) = extract_experiences(text);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].company, "Gamma");
        assert_eq!(entries[0].end_date.as_deref(), Some("present"));
        assert_eq!(entries[1].company, "Acme");
    }

    #[test]
    fn test_technologies_line() {
        let text = "Experience\n03/2019 - 06/2021 Engineer, Acme\nTechnologies: Rust, PostgreSQL, Kafka\n";
        let (entries, _) = extract_experiences(text);
        let techs: Vec<&str> = entries[0].technologies.iter().map(|s| s.as_str()).collect();
        assert_eq!(techs, vec!["Kafka", "PostgreSQL", "Rust"]);
    }

    #[test]
    fn test_year_only_range_keeps_entry_but_drops_dates() {
        let text = "Experience\n2019 - 2021 Backend Developer, Delta\n";
        let (entries, _) = extract_experiences(text);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].start_date, None);
        assert_eq!(entries[0].end_date, None);
    }

    #[test]
    fn test_entry_without_company_is_dropped() {
        let text = "Experience\n03/2019 - 06/2021\nFreelancing\n";
        let (entries, _) = extract_experiences(text);
        assert!(entries.is_empty());
    }

    #[test]
    fn test_no_section_is_empty_not_error() {
        let (entries, prov) = extract_experiences("Jane Doe\njane@example.com\n");
        assert!(entries.is_empty());
        assert!(prov.is_empty());
    }
}
