//! Test Helper Utilities
//!
//! Shared fixtures for the crm-import integration tests

#![allow(dead_code)]

use crm_import::input::parse_contacts;
use crm_import::models::RawContact;
use crm_import::{ImportOrchestrator, ImportStats, ImportStore};
use serde_json::{json, Value};
use std::io::Write;
use tempfile::NamedTempFile;

/// Parse a JSON array literal the way the importer reads a file
pub fn records(value: Value) -> Vec<RawContact> {
    parse_contacts(&value.to_string(), None).unwrap()
}

/// Run a full import of `value` against `store`
pub async fn import<S: ImportStore>(store: &S, value: Value) -> ImportStats {
    ImportOrchestrator::new(store).run(&records(value)).await
}

/// Write `value` to a temporary JSON file
pub fn write_input(value: &Value) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", value).unwrap();
    file
}

/// Contact with one current position at a named company
pub fn jean_dupont() -> Value {
    json!({
        "lead_id": "L1",
        "full_name": "Jean Dupont",
        "experiences": [
            {"company_name": "Acme", "date_from": "2019", "date_to": "Present", "title": "CEO"}
        ]
    })
}

/// Contact with a single experience at `company_id` / `company_name`
pub fn employee(lead_id: &str, company_id: Option<&str>, company_name: &str) -> Value {
    json!({
        "lead_id": lead_id,
        "full_name": format!("Employee {}", lead_id),
        "experiences": [
            {"company_id": company_id, "company_name": company_name, "title": "Engineer"}
        ]
    })
}

/// Contact carrying one row in every child category
pub fn full_profile(lead_id: &str) -> Value {
    json!({
        "lead_id": lead_id,
        "full_name": "Marie Curie",
        "headline": "Researcher",
        "connections_count": "500",
        "lead_quality_score": 87.5,
        "years_of_exp_bucket": "10-15 years",
        "experiences": [
            {
                "company_id": "C-42",
                "company_name": "Institut du Radium",
                "company_industry": "Research",
                "title": "Directrice",
                "title_normalized": "Director",
                "date_from": "janvier 1914",
                "date_to": "Actuellement"
            },
            {
                "company_name": "Sorbonne",
                "title": "Professor",
                "date_from": "November 1906",
                "date_to": "1934"
            }
        ],
        "languages": [{"language": "French", "proficiency": "Native"}],
        "skills": ["Chemistry", {"name": "Physics"}],
        "interests": ["Cycling"],
        "education": [{"institution": "Sorbonne", "degree": "Licence", "start_date": "1891"}]
    })
}
