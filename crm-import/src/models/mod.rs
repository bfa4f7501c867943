//! Data models for the contact import

pub mod lenient;
pub mod raw;
pub mod records;

pub use raw::{RawContact, RawEducation, RawExperience, RawLanguage, RawNamed};
pub use records::{
    CompanyKey, CompanyRecord, CompanySnapshot, ContactRecord, EducationRecord,
    ExperienceRecord, InterestRecord, LanguageRecord, RowId, SkillRecord,
};
