//! Certificate extraction.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{CertificateEntry, FieldProvenanceEntry};

use super::dates::normalize_year_month;
use super::sections::{find_section, strip_bullet, SectionKind};

/// Month-bearing date on a certificate line: `03/2021` or `2021-03`.
/// Year-only dates are dropped rather than guessed.
static CERT_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:(\d{1,2})[./](\d{4})|(\d{4})-(\d{2}))\b").unwrap());

/// Extract ordered certificate entries from the certificates section.
/// Each non-empty line is one certificate: name, optionally an issuer
/// after a separator, optionally a month-precision date.
pub fn extract_certificates(text: &str) -> (Vec<CertificateEntry>, Vec<FieldProvenanceEntry>) {
    let mut entries = Vec::new();
    let mut provenance = Vec::new();

    let Some((body, _)) = find_section(text, SectionKind::Certificates) else {
        return (entries, provenance);
    };

    for raw_line in body.lines() {
        let mut line = strip_bullet(raw_line.trim()).to_string();
        if line.is_empty() {
            continue;
        }

        let date = line_date(&line).map(|(parsed, (start, end))| {
            let cleaned = format!("{} {}", &line[..start], &line[end..]);
            line = cleaned.trim().trim_matches([',', '(', ')', '-']).trim().to_string();
            parsed
        });

        let (name, issuer) = match line.split_once(", ").or_else(|| line.split_once(" - ")) {
            Some((name, issuer)) if !issuer.trim().is_empty() => {
                (name.trim().to_string(), Some(issuer.trim().to_string()))
            }
            _ => (line.trim().to_string(), None),
        };
        if name.is_empty() {
            continue;
        }

        provenance.push(FieldProvenanceEntry::new(
            &format!("certificates[{}].name", entries.len()),
            &name,
            None,
        ));
        entries.push(CertificateEntry { name, issuer, date });
    }

    (entries, provenance)
}

/// Month-precision date on a certificate line, as an owned normalized
/// value plus the byte span to cut out of the line.
fn line_date(line: &str) -> Option<(String, (usize, usize))> {
    let caps = CERT_DATE.captures(line)?;
    let parsed = if let (Some(month), Some(year)) = (caps.get(1), caps.get(2)) {
        normalize_year_month(year.as_str(), month.as_str())
    } else if let (Some(year), Some(month)) = (caps.get(3), caps.get(4)) {
        normalize_year_month(year.as_str(), month.as_str())
    } else {
        None
    }?;
    let whole = caps.get(0).unwrap();
    Some((parsed, (whole.start(), whole.end())))
}
