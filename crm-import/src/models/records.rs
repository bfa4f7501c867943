//! Normalized rows ready for persistence
//!
//! Strings default to `""` and counts to `0`; only dates and source
//! timestamps stay optional.

use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;

/// Surrogate key assigned by the store
pub type RowId = i64;

/// Contact profile keyed by the external `lead_id`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactRecord {
    pub lead_id: String,
    pub full_name: String,
    pub headline: String,
    pub summary: String,
    pub location: String,
    pub country: String,
    pub connections_count: i64,
    pub connections_count_bucket: String,
    pub lead_quality_score: f64,
    pub linkedin_url: String,
    pub linkedin_short: String,
    pub years_of_experience: i64,
    pub department: String,
    pub current_title_normalized: String,
    pub canonical_shorthand_name: String,
    pub profile_picture_url: String,
    pub experience_count: i64,
    pub email: String,
    pub telephone: String,
    pub current_company_name: String,
    pub current_company_industry: String,
    pub current_company_subindustry: String,
    pub source_created_at: Option<DateTime<Utc>>,
    pub source_updated_at: Option<DateTime<Utc>>,
}

/// Firmographic snapshot of a company
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompanyRecord {
    /// External id from the export, when present
    pub company_id: Option<String>,
    pub company_name: String,
    pub description: String,
    pub industry: String,
    pub subindustry: String,
    pub size: String,
    pub website_url: String,
    pub headquarters_city: String,
    pub headquarters_country: String,
    pub employee_count: i64,
    pub revenue_bucket: String,
    pub company_type: String,
    pub logo_url: String,
    pub linkedin_url: String,
    pub source_created_at: Option<DateTime<Utc>>,
    pub source_updated_at: Option<DateTime<Utc>>,
}

/// Company identity within one import run
///
/// The external id wins; otherwise the lower-cased name as written.
/// Spelling variants of one company ("Acme Corp" / "Acme Corp.") remain
/// distinct keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CompanyKey {
    ExternalId(String),
    Name(String),
}

impl CompanyKey {
    /// Build a key from the identifying fields, ignoring blank values
    pub fn from_parts(company_id: Option<&str>, company_name: Option<&str>) -> Option<Self> {
        let id = company_id.map(str::trim).filter(|id| !id.is_empty());
        if let Some(id) = id {
            return Some(CompanyKey::ExternalId(id.to_string()));
        }

        company_name
            .filter(|name| !name.trim().is_empty())
            .map(|name| CompanyKey::Name(name.to_lowercase()))
    }

    pub fn for_company(company: &CompanyRecord) -> Option<Self> {
        Self::from_parts(company.company_id.as_deref(), Some(&company.company_name))
    }
}

impl fmt::Display for CompanyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompanyKey::ExternalId(id) => write!(f, "id:{}", id),
            CompanyKey::Name(name) => write!(f, "name:{}", name),
        }
    }
}

/// Work-history row; the company has already been resolved
#[derive(Debug, Clone, PartialEq)]
pub struct ExperienceRecord {
    pub contact_id: RowId,
    pub company_id: RowId,
    pub title: String,
    pub title_normalized: String,
    pub department: String,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub duration: String,
    pub description: String,
    pub location: String,
    pub is_current: bool,
    pub order_in_profile: i32,
    pub job_category: String,
    pub company_name: String,
    pub source_created_at: Option<DateTime<Utc>>,
    pub source_updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LanguageRecord {
    pub contact_id: RowId,
    pub language: String,
    pub proficiency: String,
    pub order_in_profile: i32,
    pub source_created_at: Option<DateTime<Utc>>,
    pub source_updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkillRecord {
    pub contact_id: RowId,
    pub skill_name: String,
    pub order_in_profile: i32,
    pub source_created_at: Option<DateTime<Utc>>,
    pub source_updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InterestRecord {
    pub contact_id: RowId,
    pub interest_name: String,
    pub order_in_profile: i32,
    pub source_created_at: Option<DateTime<Utc>>,
    pub source_updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EducationRecord {
    pub contact_id: RowId,
    pub institution: String,
    pub degree: String,
    pub field_of_study: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub order_in_profile: i32,
    pub source_created_at: Option<DateTime<Utc>>,
    pub source_updated_at: Option<DateTime<Utc>>,
}

/// Current-company snapshot stored on a contact row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanySnapshot {
    pub company_name: String,
    pub industry: String,
    pub subindustry: String,
}
