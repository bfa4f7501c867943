//! Import pipeline tests against the in-memory store
//!
//! Cover the end-to-end scenarios, re-import behaviour, company
//! deduplication and failure isolation.

mod helpers;

use chrono::NaiveDate;
use crm_import::input::load_contacts;
use crm_import::models::CompanyRecord;
use crm_import::store::{FaultTarget, MemoryStore, StoreError};
use crm_import::ImportError;
use helpers::{employee, full_profile, import, jean_dupont, write_input};
use serde_json::json;

// =============================================================================
// Scenarios
// =============================================================================

#[tokio::test]
async fn test_single_contact_with_current_position() {
    let store = MemoryStore::new();

    let stats = import(&store, json!([jean_dupont()])).await;

    let contacts = store.contacts();
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0].1.full_name, "Jean Dupont");

    let companies = store.companies();
    assert_eq!(companies.len(), 1);
    assert_eq!(companies[0].1.company_name, "Acme");

    let experiences = store.experiences();
    assert_eq!(experiences.len(), 1);
    let exp = &experiences[0];
    assert!(exp.is_current);
    assert_eq!(exp.date_from, NaiveDate::from_ymd_opt(2019, 1, 1));
    assert_eq!(exp.date_to, None);
    assert_eq!(exp.contact_id, contacts[0].0);
    assert_eq!(exp.company_id, companies[0].0);

    assert_eq!(stats.contacts_created, 1);
    assert_eq!(stats.companies_created, 1);
    assert_eq!(stats.experiences.inserted, 1);
    assert_eq!(stats.total_errors, 0);
}

#[tokio::test]
async fn test_reimport_updates_headline_in_place() {
    let store = MemoryStore::new();
    import(&store, json!([{"lead_id": "L1", "headline": "Engineer"}])).await;

    let stats = import(&store, json!([{"lead_id": "L1", "headline": "CTO"}])).await;

    let contacts = store.contacts();
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0].1.headline, "CTO");
    assert_eq!(stats.contacts_updated, 1);
    assert_eq!(stats.contacts_created, 0);
}

#[tokio::test]
async fn test_full_profile_persists_every_category() {
    let store = MemoryStore::new();

    let stats = import(&store, json!([full_profile("L9")])).await;

    let (contact_id, contact) = store.contact_by_lead_id("L9").unwrap();
    assert_eq!(contact.connections_count, 500);
    assert_eq!(contact.lead_quality_score, 87.5);
    assert_eq!(contact.years_of_experience, 10);
    assert_eq!(contact.current_title_normalized, "Director");

    let experiences = store.experiences();
    assert_eq!(experiences.len(), 2);
    assert!(experiences[0].is_current);
    assert_eq!(experiences[0].date_from, NaiveDate::from_ymd_opt(1914, 1, 1));
    assert!(!experiences[1].is_current);
    assert_eq!(experiences[1].date_from, NaiveDate::from_ymd_opt(1906, 11, 1));
    assert_eq!(experiences[1].date_to, NaiveDate::from_ymd_opt(1934, 1, 1));
    assert_eq!(
        experiences.iter().map(|e| e.order_in_profile).collect::<Vec<_>>(),
        vec![1, 2]
    );

    assert_eq!(store.languages().len(), 1);
    assert_eq!(store.skills().len(), 2);
    assert_eq!(store.interests().len(), 1);
    let education = store.education();
    assert_eq!(education.len(), 1);
    assert_eq!(education[0].start_date, NaiveDate::from_ymd_opt(1891, 1, 1));
    assert!(store.skills().iter().all(|s| s.contact_id == contact_id));

    assert_eq!(stats.companies_created, 2);
    assert_eq!(stats.skills.inserted, 2);
    assert_eq!(stats.education.inserted, 1);
}

// =============================================================================
// Idempotence and ordering
// =============================================================================

#[tokio::test]
async fn test_second_run_does_not_grow_contacts_or_companies() {
    let store = MemoryStore::new();
    let input = json!([
        jean_dupont(),
        employee("L2", Some("C1"), "Globex"),
        employee("L3", None, "Initech")
    ]);

    import(&store, input.clone()).await;
    let contacts_after_first = store.contacts().len();
    let companies_after_first = store.companies().len();

    let second = import(&store, input).await;

    assert_eq!(store.contacts().len(), contacts_after_first);
    assert_eq!(store.companies().len(), companies_after_first);
    assert_eq!(second.contacts_updated, 3);
    assert_eq!(second.contacts_created, 0);
    // The fresh run map does not know the companies; the store refuses them
    assert_eq!(second.companies_conflicted, 3);
    assert_eq!(second.companies_created, 0);
    assert_eq!(second.experiences_dropped, 3);
}

#[tokio::test]
async fn test_contacts_are_persisted_in_input_order() {
    let store = MemoryStore::new();

    import(
        &store,
        json!([{"lead_id": "B"}, {"lead_id": "A"}, {"lead_id": "C"}]),
    )
    .await;

    let contacts = store.contacts();
    let lead_ids: Vec<&str> = contacts.iter().map(|(_, c)| c.lead_id.as_str()).collect();
    assert_eq!(lead_ids, vec!["B", "A", "C"]);
    assert!(contacts.windows(2).all(|w| w[0].0 < w[1].0));
}

// =============================================================================
// Company deduplication
// =============================================================================

#[tokio::test]
async fn test_shared_company_id_creates_one_company() {
    let store = MemoryStore::new();

    let stats = import(
        &store,
        json!([
            employee("L1", Some("C1"), "Acme"),
            employee("L2", Some("C1"), "Acme Corporation"),
            employee("L3", Some("C1"), "ACME")
        ]),
    )
    .await;

    let companies = store.companies();
    assert_eq!(companies.len(), 1);
    assert_eq!(stats.companies_created, 1);

    let experiences = store.experiences();
    assert_eq!(experiences.len(), 3);
    assert!(experiences.iter().all(|e| e.company_id == companies[0].0));
}

#[tokio::test]
async fn test_name_key_ignores_case_but_not_punctuation() {
    let store = MemoryStore::new();

    import(
        &store,
        json!([
            employee("L1", None, "Acme Corp"),
            employee("L2", None, "ACME CORP"),
            employee("L3", None, "Acme Corp.")
        ]),
    )
    .await;

    let names: Vec<String> = store
        .companies()
        .into_iter()
        .map(|(_, c)| c.company_name)
        .collect();
    assert_eq!(names, vec!["Acme Corp".to_string(), "Acme Corp.".to_string()]);
    assert_eq!(store.experiences().len(), 3);
}

#[tokio::test]
async fn test_preexisting_company_drops_dependent_experiences() {
    let store = MemoryStore::new();
    store.seed_company(CompanyRecord {
        company_name: "Acme".to_string(),
        ..Default::default()
    });

    let stats = import(&store, json!([jean_dupont()])).await;

    assert_eq!(store.companies().len(), 1);
    assert!(store.experiences().is_empty());
    assert_eq!(stats.companies_conflicted, 1);
    assert_eq!(stats.experiences_dropped, 1);
    assert_eq!(stats.contacts_created, 1);
    assert_eq!(stats.total_errors, 0);
}

#[tokio::test]
async fn test_experiences_without_company_identity_are_never_persisted() {
    let store = MemoryStore::new();

    let stats = import(
        &store,
        json!([{
            "lead_id": "L1",
            "experiences": [
                {"title": "Freelance"},
                {"company_name": "", "company_id": "", "title": "Consultant"},
                {"company_name": "Acme", "title": "CEO"}
            ]
        }]),
    )
    .await;

    let experiences = store.experiences();
    assert_eq!(experiences.len(), 1);
    assert_eq!(experiences[0].title, "CEO");
    assert_eq!(experiences[0].order_in_profile, 3);
    assert_eq!(stats.experiences_dropped, 2);
}

// =============================================================================
// Failure isolation
// =============================================================================

#[tokio::test]
async fn test_contact_failure_skips_only_that_contact() {
    let store = MemoryStore::new();
    store.fail_next(
        FaultTarget::Contact,
        StoreError::ConstraintViolation("value too long".into()),
    );

    let stats = import(
        &store,
        json!([
            employee("L1", None, "Acme"),
            employee("L2", None, "Globex")
        ]),
    )
    .await;

    assert!(store.contact_by_lead_id("L1").is_none());
    assert!(store.contact_by_lead_id("L2").is_some());
    // Companies of the skipped contact are never resolved
    let names: Vec<String> = store.companies().into_iter().map(|(_, c)| c.company_name).collect();
    assert_eq!(names, vec!["Globex".to_string()]);
    assert_eq!(stats.contacts_skipped, 1);
    assert_eq!(stats.contacts_created, 1);
    assert_eq!(stats.total_errors, 1);
    assert!(stats.errors[0].contains("L1"));
}

#[tokio::test]
async fn test_child_failure_does_not_stop_siblings() {
    let store = MemoryStore::new();
    store.fail_next(FaultTarget::Skill, StoreError::Other("boom".into()));

    let stats = import(
        &store,
        json!([{"lead_id": "L1", "skills": ["Rust", "SQL", "Go"], "interests": ["Chess"]}]),
    )
    .await;

    let skills: Vec<String> = store.skills().into_iter().map(|s| s.skill_name).collect();
    assert_eq!(skills, vec!["SQL".to_string(), "Go".to_string()]);
    assert_eq!(store.interests().len(), 1);
    assert_eq!(stats.skills.inserted, 2);
    assert_eq!(stats.skills.failed, 1);
    assert_eq!(stats.interests.inserted, 1);
    assert_eq!(stats.total_errors, 1);
}

#[tokio::test]
async fn test_company_failure_does_not_abort_contact() {
    let store = MemoryStore::new();
    store.fail_next(FaultTarget::Company, StoreError::Connection("reset".into()));

    let stats = import(
        &store,
        json!([{
            "lead_id": "L1",
            "experiences": [
                {"company_name": "Acme", "title": "CEO"},
                {"company_name": "Globex", "title": "CTO"}
            ],
            "languages": [{"language": "English"}]
        }]),
    )
    .await;

    assert_eq!(stats.companies_failed, 1);
    assert_eq!(stats.companies_created, 1);
    assert_eq!(stats.experiences.inserted, 1);
    assert_eq!(stats.experiences_dropped, 1);
    assert_eq!(stats.languages.inserted, 1);
    assert_eq!(store.experiences()[0].title, "CTO");
}

#[tokio::test]
async fn test_records_without_lead_id_are_counted_and_skipped() {
    let store = MemoryStore::new();

    let stats = import(
        &store,
        json!([{"full_name": "No Key"}, 17, {"lead_id": "L1"}]),
    )
    .await;

    assert_eq!(stats.records_read, 3);
    assert_eq!(stats.contacts_skipped, 2);
    assert_eq!(stats.contacts_created, 1);
    assert_eq!(store.contacts().len(), 1);
}

// =============================================================================
// Input loading
// =============================================================================

#[test]
fn test_load_with_limit_from_file() {
    let file = write_input(&json!([jean_dupont(), employee("L2", None, "Globex")]));

    let records = load_contacts(file.path(), Some(1)).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].lead_id.as_deref(), Some("L1"));
}

#[test]
fn test_missing_input_is_fatal() {
    let dir = tempfile::TempDir::new().unwrap();
    let missing = dir.path().join("contacts.json");

    let err = load_contacts(&missing, None).unwrap_err();

    match err {
        ImportError::InputNotFound(path) => assert_eq!(path, missing),
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_non_array_input_is_fatal() {
    let file = write_input(&json!({"contacts": []}));

    assert!(matches!(
        load_contacts(file.path(), None),
        Err(ImportError::InvalidJson(_))
    ));
}
