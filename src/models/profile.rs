//! Structured candidate profile draft and field provenance.
//!
//! The draft is a best-effort extraction, never validated as factually
//! correct. Every populated field traces back to a span or heuristic
//! match in the source text via the provenance entries.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// End-date sentinel for ongoing positions. A distinct, meaningful state
/// (ongoing) versus an absent end date (unknown).
pub const PRESENT: &str = "present";

/// Personal data block of the draft.
///
/// Unmatched optional fields stay `None`, never empty strings, to keep
/// the provenance trail honest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Normalized `YYYY-MM-DD`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canton: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
}

/// One work-experience entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    pub role: String,
    pub company: String,
    /// Normalized `YYYY-MM`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// Normalized `YYYY-MM`, or the literal sentinel [`PRESENT`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty", default)]
    pub technologies: BTreeSet<String>,
}

/// One education entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

/// CEFR language proficiency levels plus native proficiency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LanguageLevel {
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
    Native,
}

impl LanguageLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageLevel::A1 => "A1",
            LanguageLevel::A2 => "A2",
            LanguageLevel::B1 => "B1",
            LanguageLevel::B2 => "B2",
            LanguageLevel::C1 => "C1",
            LanguageLevel::C2 => "C2",
            LanguageLevel::Native => "Native",
        }
    }

    /// Parse a level token as it appears in résumé text. CEFR codes map
    /// directly; native-tongue synonyms across the working languages map
    /// to `Native`. Vague adjectives ("fluent", "good") are not guessed.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_uppercase().as_str() {
            "A1" => Some(LanguageLevel::A1),
            "A2" => Some(LanguageLevel::A2),
            "B1" => Some(LanguageLevel::B1),
            "B2" => Some(LanguageLevel::B2),
            "C1" => Some(LanguageLevel::C1),
            "C2" => Some(LanguageLevel::C2),
            "NATIVE" | "MUTTERSPRACHE" | "MOTHER TONGUE" | "LANGUE MATERNELLE"
            | "MADRELINGUA" => Some(LanguageLevel::Native),
            _ => None,
        }
    }
}

/// One language entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageEntry {
    pub language: String,
    pub level: LanguageLevel,
}

/// One certificate entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateEntry {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    /// Normalized `YYYY-MM`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// Structured output of the field extractor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateProfileDraft {
    pub personal: PersonalInfo,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: BTreeSet<String>,
    pub languages: Vec<LanguageEntry>,
    pub certificates: Vec<CertificateEntry>,
    pub highlights: Vec<String>,
}

/// Links an extracted field value back to where and how it was found,
/// enabling manual review downstream.
///
/// Uniqueness per `target_field` is not guaranteed: multiple candidate
/// matches for the same logical field may coexist, and conflict
/// resolution belongs to the consumer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldProvenanceEntry {
    /// Dotted path of the draft field, e.g. `personal.email`.
    pub target_field: String,
    pub extracted_value: String,
    /// Byte offsets of the match in the normalized source text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_span: Option<(usize, usize)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

impl FieldProvenanceEntry {
    pub fn new(target_field: &str, value: &str, span: Option<(usize, usize)>) -> Self {
        Self {
            target_field: target_field.to_string(),
            extracted_value: value.to_string(),
            source_span: span,
            confidence: None,
        }
    }
}
