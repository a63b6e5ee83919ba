//! Personal data extraction.
//!
//! Ordered regex rules over the normalized text; the first match fills
//! a slot, further candidate matches are still recorded as provenance
//! entries so a reviewer can resolve conflicts downstream.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{FieldProvenanceEntry, PersonalInfo};

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap());

static LINKEDIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:https?://)?(?:www\.)?linkedin\.com/in/[A-Za-z0-9_%-]+").unwrap()
});

/// Labeled phone first, bare international/trunk-prefixed number second.
static PHONE_RULES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?im)^[ \t]*(?:phone|tel(?:efon)?|téléphone|mobile|natel)[ \t:.]+([+0][0-9 ()./-]{7,18}[0-9])").unwrap(),
        // Bare number in Swiss/international grouping. Deliberately
        // narrower than the labeled rule so date ranges never match.
        Regex::new(r"(?:\+\d{1,3} ?|\b0)\d{2}[ .]?\d{3}[ .]?\d{2}[ .]?\d{2}\b").unwrap(),
    ]
});

static BIRTH_DATE: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    let label = r"(?:geburtsdatum|date de naissance|data di nascita|date of birth|birth\s?date|born)";
    vec![
        Regex::new(&format!(r"(?i){}[ \t:.]*(\d{{1,2}})[./-](\d{{1,2}})[./-](\d{{4}})", label))
            .unwrap(),
        Regex::new(&format!(r"(?i){}[ \t:.]*(\d{{4}})-(\d{{2}})-(\d{{2}})", label)).unwrap(),
    ]
});

static NATIONALITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^[ \t]*(?:nationality|nationalität|staatsangehörigkeit|nationalité|nazionalità)[ \t:.]+([^\n]{2,40})").unwrap()
});

static TARGET_ROLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^[ \t]*(?:target (?:role|position)|desired (?:role|position)|objective|zielposition|gewünschte position|poste recherché)[ \t:.]+([^\n]{2,70})").unwrap()
});

static PHOTO_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?im)^[ \t]*photo[ \t:.]+(https?://\S+)").unwrap());

/// Swiss postal address: four-digit ZIP followed by a capitalized
/// locality. A second locality word needs three or more characters so a
/// trailing canton code stays out of the city.
static ZIP_CITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)\b(?:CH-)?(\d{4}) ([A-ZÄÖÜ][A-Za-zÄÖÜäöüéèêàâ'.-]+(?: [A-ZÄÖÜ][A-Za-zÄÖÜäöüéèêàâ'.-]{2,})?)").unwrap()
});

/// Two-letter canton codes, matched as standalone uppercase tokens.
static CANTON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(AG|AI|AR|BE|BL|BS|FR|GE|GL|GR|JU|LU|NE|NW|OW|SG|SH|SO|SZ|TG|TI|UR|VD|VS|ZG|ZH)\b").unwrap()
});

/// Words that disqualify a line from being the candidate's name.
static NOT_A_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)curriculum|vitae|résumé|resume|lebenslauf|\bcv\b|profile|kontakt|contact")
        .unwrap()
});

/// Extract the personal data block. Never fails; unmatched fields stay
/// absent.
pub fn extract_personal_info(text: &str) -> (PersonalInfo, Vec<FieldProvenanceEntry>) {
    let mut info = PersonalInfo::default();
    let mut provenance = Vec::new();

    if let Some((first, last, span)) = find_name(text) {
        provenance.push(FieldProvenanceEntry::new(
            "personal.firstName",
            &first,
            Some(span),
        ));
        provenance.push(FieldProvenanceEntry::new(
            "personal.lastName",
            &last,
            Some(span),
        ));
        info.first_name = Some(first);
        info.last_name = Some(last);
    }

    if let Some(m) = EMAIL.find(text) {
        info.email = Some(m.as_str().to_string());
        provenance.push(FieldProvenanceEntry::new(
            "personal.email",
            m.as_str(),
            Some((m.start(), m.end())),
        ));
    }

    if let Some(m) = LINKEDIN.find(text) {
        info.linkedin_url = Some(m.as_str().to_string());
        provenance.push(FieldProvenanceEntry::new(
            "personal.linkedinUrl",
            m.as_str(),
            Some((m.start(), m.end())),
        ));
    }

    // Every matching phone rule contributes a provenance candidate; the
    // first one fills the slot.
    for rule in PHONE_RULES.iter() {
        if let Some(caps) = rule.captures(text) {
            let m = caps.get(caps.len() - 1).unwrap();
            let value = m.as_str().trim().to_string();
            provenance.push(FieldProvenanceEntry::new(
                "personal.phone",
                &value,
                Some((m.start(), m.end())),
            ));
            if info.phone.is_none() {
                info.phone = Some(value);
            }
        }
    }

    for rule in BIRTH_DATE.iter() {
        if let Some(caps) = rule.captures(text) {
            if let Some(date) = normalize_birth_date(&caps) {
                let whole = caps.get(0).unwrap();
                provenance.push(FieldProvenanceEntry::new(
                    "personal.birthDate",
                    &date,
                    Some((whole.start(), whole.end())),
                ));
                if info.birth_date.is_none() {
                    info.birth_date = Some(date);
                }
            }
        }
    }

    if let Some(caps) = ZIP_CITY.captures(text) {
        let city = caps.get(2).unwrap();
        info.city = Some(city.as_str().to_string());
        provenance.push(FieldProvenanceEntry::new(
            "personal.city",
            city.as_str(),
            Some((city.start(), city.end())),
        ));
    }

    if let Some(m) = CANTON.find(text) {
        info.canton = Some(m.as_str().to_string());
        provenance.push(FieldProvenanceEntry::new(
            "personal.canton",
            m.as_str(),
            Some((m.start(), m.end())),
        ));
    }

    for (rule, field, slot) in [
        (&*NATIONALITY, "personal.nationality", Slot::Nationality),
        (&*TARGET_ROLE, "personal.targetRole", Slot::TargetRole),
        (&*PHOTO_URL, "personal.photoUrl", Slot::PhotoUrl),
    ] {
        if let Some(caps) = rule.captures(text) {
            let m = caps.get(1).unwrap();
            let value = m.as_str().trim().to_string();
            provenance.push(FieldProvenanceEntry::new(
                field,
                &value,
                Some((m.start(), m.end())),
            ));
            match slot {
                Slot::Nationality => info.nationality = Some(value),
                Slot::TargetRole => info.target_role = Some(value),
                Slot::PhotoUrl => info.photo_url = Some(value),
            }
        }
    }

    (info, provenance)
}

enum Slot {
    Nationality,
    TargetRole,
    PhotoUrl,
}

/// The candidate's name is expected near the top: the first of the
/// leading lines that reads like a bare name (two to four capitalized
/// words, no digits, no contact noise).
fn find_name(text: &str) -> Option<(String, String, (usize, usize))> {
    let mut offset = 0;
    for line in text.split_inclusive('\n').take(10) {
        let trimmed = line.trim();
        let start = offset + (line.len() - line.trim_start().len());
        offset += line.len();

        if trimmed.is_empty() || trimmed.len() > 60 || NOT_A_NAME.is_match(trimmed) {
            continue;
        }
        if trimmed.contains('@') || trimmed.chars().any(|c| c.is_ascii_digit()) {
            continue;
        }

        let words: Vec<&str> = trimmed.split_whitespace().collect();
        if !(2..=4).contains(&words.len()) {
            continue;
        }
        if !words
            .iter()
            .all(|w| w.chars().next().is_some_and(|c| c.is_uppercase()))
        {
            continue;
        }

        let first = words[0].to_string();
        let last = words[1..].join(" ");
        return Some((first, last, (start, start + trimmed.len())));
    }
    None
}

fn normalize_birth_date(caps: &regex::Captures<'_>) -> Option<String> {
    let a: u32 = caps.get(1)?.as_str().parse().ok()?;
    let b: u32 = caps.get(2)?.as_str().parse().ok()?;
    let c: u32 = caps.get(3)?.as_str().parse().ok()?;

    // Either DD.MM.YYYY or YYYY-MM-DD depending on which rule matched.
    let (year, month, day) = if a > 1900 { (a, b, c) } else { (c, b, a) };
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) || !(1900..=2100).contains(&year) {
        return None;
    }
    Some(format!("{:04}-{:02}-{:02}", year, month, day))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_from_first_line() {
        let (info, prov) = extract_personal_info("Jane Doe\nEmail: jane.doe@example.com\n");
        assert_eq!(info.first_name.as_deref(), Some("Jane"));
        assert_eq!(info.last_name.as_deref(), Some("Doe"));
        assert!(prov.iter().any(|p| p.target_field == "personal.firstName"));
    }

    #[test]
    fn test_name_skips_cv_title() {
        let (info, _) = extract_personal_info("Curriculum Vitae\nJane Doe\n");
        assert_eq!(info.first_name.as_deref(), Some("Jane"));
    }

    #[test]
    fn test_email_and_linkedin() {
        let text = "Jane Doe\njane.doe@example.com\nlinkedin.com/in/janedoe\n";
        let (info, prov) = extract_personal_info(text);
        assert_eq!(info.email.as_deref(), Some("jane.doe@example.com"));
        assert_eq!(info.linkedin_url.as_deref(), Some("linkedin.com/in/janedoe"));
        let email_prov = prov
            .iter()
            .find(|p| p.target_field == "personal.email")
            .unwrap();
        let (start, end) = email_prov.source_span.unwrap();
        assert_eq!(&text[start..end], "jane.doe@example.com");
    }

    #[test]
    fn test_phone_labeled_and_bare() {
        let (info, prov) =
            extract_personal_info("Jane Doe\nTel: +41 79 123 45 67\nRef 0041 echoes\n");
        assert_eq!(info.phone.as_deref(), Some("+41 79 123 45 67"));
        // Both rules matched; both candidates are kept in provenance.
        assert!(prov.iter().filter(|p| p.target_field == "personal.phone").count() >= 1);
    }

    #[test]
    fn test_birth_date_formats() {
        let (info, _) = extract_personal_info("Geburtsdatum: 07.03.1991\n");
        assert_eq!(info.birth_date.as_deref(), Some("1991-03-07"));

        let (info, _) = extract_personal_info("Date of birth: 1991-03-07\n");
        assert_eq!(info.birth_date.as_deref(), Some("1991-03-07"));
    }

    #[test]
    fn test_zip_city_and_canton() {
        let (info, _) = extract_personal_info("Jane Doe\nMusterstrasse 1, 8003 Zürich ZH\n");
        assert_eq!(info.city.as_deref(), Some("Zürich"));
        assert_eq!(info.canton.as_deref(), Some("ZH"));
    }

    #[test]
    fn test_canton_code_stays_out_of_two_word_city() {
        let (info, _) = extract_personal_info("Jane Doe\n2300 La Chaux-de-Fonds NE\n");
        assert_eq!(info.city.as_deref(), Some("La Chaux-de-Fonds"));
        assert_eq!(info.canton.as_deref(), Some("NE"));
    }

    #[test]
    fn test_nationality_and_target_role() {
        let text = "Jane Doe\nNationality: Swiss\nTarget role: Senior Data Engineer\n";
        let (info, _) = extract_personal_info(text);
        assert_eq!(info.nationality.as_deref(), Some("Swiss"));
        assert_eq!(info.target_role.as_deref(), Some("Senior Data Engineer"));
    }

    #[test]
    fn test_unmatched_fields_stay_none() {
        let (info, _) = extract_personal_info("short note without contact data\n");
        assert!(info.email.is_none());
        assert!(info.phone.is_none());
        assert!(info.birth_date.is_none());
        assert!(info.photo_url.is_none());
    }
}
