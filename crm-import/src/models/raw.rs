//! Raw contact records as they appear in the JSON export
//!
//! Only recognized fields are declared; everything else in the document is
//! ignored. Every field is optional.

use super::lenient;
use serde::Deserialize;

/// One exported lead
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawContact {
    #[serde(deserialize_with = "lenient::opt_string")]
    pub lead_id: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub full_name: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub headline: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub summary: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub location: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub country: Option<String>,
    #[serde(deserialize_with = "lenient::opt_i64")]
    pub connections_count: Option<i64>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub connections_count_bucket: Option<String>,
    #[serde(deserialize_with = "lenient::opt_f64")]
    pub lead_quality_score: Option<f64>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub lead_linkedin_url: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub linkedin_short: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub years_of_exp_bucket: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub department: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub canonical_shorthand_name: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub lead_logo_url: Option<String>,
    #[serde(deserialize_with = "lenient::opt_i64")]
    pub experience_count: Option<i64>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub email: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub telephone: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub current_exp_company_name: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub current_exp_company_industry: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub current_exp_company_subindustry: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub created_at: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub updated_at: Option<String>,
    #[serde(deserialize_with = "lenient::list")]
    pub experiences: Vec<RawExperience>,
    #[serde(deserialize_with = "lenient::list")]
    pub languages: Vec<RawLanguage>,
    #[serde(deserialize_with = "lenient::list")]
    pub skills: Vec<RawNamed>,
    #[serde(deserialize_with = "lenient::list")]
    pub interests: Vec<RawNamed>,
    #[serde(deserialize_with = "lenient::list")]
    pub education: Vec<RawEducation>,
}

/// One work-history entry, carrying an embedded company snapshot
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawExperience {
    #[serde(deserialize_with = "lenient::opt_string")]
    pub company_id: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub company_name: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub company_description: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub company_industry: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub company_subindustry: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub company_size: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub company_website_url: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub company_headquarters_city: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub company_headquarters_country: Option<String>,
    #[serde(deserialize_with = "lenient::opt_i64")]
    pub company_employee_count: Option<i64>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub revenue_bucket: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub company_type: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub company_logo_url: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub company_linkedin_url: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub title_normalized: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub department: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub date_from: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub date_to: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub duration: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub location: Option<String>,
    #[serde(deserialize_with = "lenient::opt_i64")]
    pub order_in_profile: Option<i64>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub job_category: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub created_at: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawLanguage {
    #[serde(deserialize_with = "lenient::opt_string")]
    pub language: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub proficiency: Option<String>,
    #[serde(deserialize_with = "lenient::opt_i64")]
    pub order_in_profile: Option<i64>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub created_at: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub updated_at: Option<String>,
}

/// Skill or interest: either a bare string or an object with a `name`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawNamed {
    Plain(String),
    Entry(RawNamedEntry),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawNamedEntry {
    #[serde(deserialize_with = "lenient::opt_string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub created_at: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub updated_at: Option<String>,
}

impl Default for RawNamed {
    fn default() -> Self {
        RawNamed::Entry(RawNamedEntry::default())
    }
}

impl RawNamed {
    /// The entry's name, if it has a non-blank one
    pub fn name(&self) -> Option<&str> {
        let name = match self {
            RawNamed::Plain(name) => Some(name.as_str()),
            RawNamed::Entry(entry) => entry.name.as_deref(),
        };
        name.filter(|n| !n.trim().is_empty())
    }

    pub fn created_at(&self) -> Option<&str> {
        match self {
            RawNamed::Plain(_) => None,
            RawNamed::Entry(entry) => entry.created_at.as_deref(),
        }
    }

    pub fn updated_at(&self) -> Option<&str> {
        match self {
            RawNamed::Plain(_) => None,
            RawNamed::Entry(entry) => entry.updated_at.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawEducation {
    #[serde(deserialize_with = "lenient::opt_string")]
    pub institution: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub degree: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub field_of_study: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub start_date: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub end_date: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub created_at: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub updated_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_fields_are_ignored() {
        let raw: RawContact = serde_json::from_str(
            r#"{"lead_id": "L1", "full_name": "Jean Dupont", "favourite_color": "blue"}"#,
        )
        .unwrap();
        assert_eq!(raw.lead_id.as_deref(), Some("L1"));
        assert!(raw.experiences.is_empty());
    }

    #[test]
    fn test_numeric_lead_id_is_stringified() {
        let raw: RawContact = serde_json::from_str(r#"{"lead_id": 1234}"#).unwrap();
        assert_eq!(raw.lead_id.as_deref(), Some("1234"));
    }

    #[test]
    fn test_skills_accept_strings_and_objects() {
        let raw: RawContact = serde_json::from_str(
            r#"{"skills": ["Rust", {"name": "SQL"}, {"level": 3}, 7]}"#,
        )
        .unwrap();
        let names: Vec<Option<&str>> = raw.skills.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec![Some("Rust"), Some("SQL"), None, None]);
    }
}
