//! Data model for extraction results and the candidate profile draft.

mod extracted;
mod fingerprint;
mod profile;

pub use extracted::{ExtractedText, ExtractionMethod};
pub use fingerprint::fingerprint;
pub use profile::{
    CandidateProfileDraft, CertificateEntry, EducationEntry, ExperienceEntry,
    FieldProvenanceEntry, LanguageEntry, LanguageLevel, PersonalInfo, PRESENT,
};
