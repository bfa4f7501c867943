//! Per-contact upsert pipeline
//!
//! Each record moves through
//! `Start → Extracted → ContactPersisted → CompaniesResolved → ChildrenPersisted → Done`.
//! A failure to key or write the contact row ends that record in
//! `ErrorRecorded`; everything after the contact row is best-effort and
//! failures are counted per row.
//!
//! Records are processed strictly one after another in input order and
//! every store call is awaited before the next is issued. No transaction
//! wraps a contact, so a failure part-way leaves the rows written so far.

use crate::dedup::CompanyDeduplicator;
use crate::extract::{
    extract_contact, extract_education, extract_experiences, extract_interests,
    extract_languages, extract_skills, referenced_companies,
};
use crate::models::{ContactRecord, RawContact, RowId};
use crate::stats::{ChildCategory, ImportStats};
use crate::store::{ImportStore, StoreResult};
use tracing::{debug, info, info_span, trace, warn, Instrument};
use uuid::Uuid;

/// Processing stage of one contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactStage {
    Start,
    Extracted,
    ContactPersisted,
    CompaniesResolved,
    ChildrenPersisted,
    Done,
    ErrorRecorded,
}

/// Where a record ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactOutcome {
    pub stage: ContactStage,
    pub contact_id: Option<RowId>,
}

impl ContactOutcome {
    fn failed() -> Self {
        Self {
            stage: ContactStage::ErrorRecorded,
            contact_id: None,
        }
    }
}

fn advance(lead_id: &str, stage: &mut ContactStage, next: ContactStage) {
    trace!(lead_id, from = ?*stage, to = ?next, "Contact stage");
    *stage = next;
}

pub struct ImportOrchestrator<'a, S: ImportStore + ?Sized> {
    store: &'a S,
    companies: CompanyDeduplicator,
    stats: ImportStats,
}

impl<'a, S: ImportStore + ?Sized> ImportOrchestrator<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self::with_run_id(store, Uuid::new_v4())
    }

    pub fn with_run_id(store: &'a S, run_id: Uuid) -> Self {
        Self {
            store,
            companies: CompanyDeduplicator::new(),
            stats: ImportStats::new(run_id),
        }
    }

    pub fn stats(&self) -> &ImportStats {
        &self.stats
    }

    /// Import every record in order and return the run counters
    pub async fn run(mut self, records: &[RawContact]) -> ImportStats {
        let span = info_span!("import_run", run_id = %self.stats.run_id);

        async move {
            info!("Importing {} records", records.len());
            self.stats.records_read = records.len();

            for (index, raw) in records.iter().enumerate() {
                self.process_contact(index, raw).await;
            }

            info!("{}", self.stats.display_string());
            self.stats
        }
        .instrument(span)
        .await
    }

    /// Run one record through every stage
    pub async fn process_contact(&mut self, index: usize, raw: &RawContact) -> ContactOutcome {
        let mut stage = ContactStage::Start;

        let Some(contact) = extract_contact(raw) else {
            warn!(index, "Record has no lead_id; skipped");
            self.stats.contacts_skipped += 1;
            self.stats.record_error(format!("record {}: missing lead_id", index));
            return ContactOutcome::failed();
        };
        let lead_id = contact.lead_id.clone();
        advance(&lead_id, &mut stage, ContactStage::Extracted);

        let contact_id = match self.persist_contact(&contact).await {
            Ok(id) => id,
            Err(err) => {
                advance(&lead_id, &mut stage, ContactStage::ErrorRecorded);
                warn!(lead_id = %lead_id, error = %err, "Failed to save contact; skipped");
                self.stats.contacts_skipped += 1;
                self.stats.record_error(format!("contact {}: {}", lead_id, err));
                return ContactOutcome::failed();
            }
        };
        advance(&lead_id, &mut stage, ContactStage::ContactPersisted);

        let referenced = referenced_companies(raw);
        let (experiences, dropped) = {
            let resolved = self
                .companies
                .resolve_all(self.store, &referenced, &mut self.stats)
                .await;
            extract_experiences(raw, contact_id, resolved)
        };
        advance(&lead_id, &mut stage, ContactStage::CompaniesResolved);

        if dropped > 0 {
            debug!(lead_id = %lead_id, dropped, "Experiences without a resolved company dropped");
            self.stats.experiences_dropped += dropped;
        }

        let store = self.store;
        for experience in &experiences {
            let result = store.insert_experience(experience).await;
            self.record_child(ChildCategory::Experience, &lead_id, &experience.title, result);
        }
        for language in extract_languages(raw, contact_id) {
            let result = store.insert_language(&language).await;
            self.record_child(ChildCategory::Language, &lead_id, &language.language, result);
        }
        for skill in extract_skills(raw, contact_id) {
            let result = store.insert_skill(&skill).await;
            self.record_child(ChildCategory::Skill, &lead_id, &skill.skill_name, result);
        }
        for interest in extract_interests(raw, contact_id) {
            let result = store.insert_interest(&interest).await;
            self.record_child(ChildCategory::Interest, &lead_id, &interest.interest_name, result);
        }
        for education in extract_education(raw, contact_id) {
            let result = store.insert_education(&education).await;
            self.record_child(ChildCategory::Education, &lead_id, &education.institution, result);
        }
        advance(&lead_id, &mut stage, ContactStage::ChildrenPersisted);

        debug!(lead_id = %lead_id, contact_id, "Contact imported");
        advance(&lead_id, &mut stage, ContactStage::Done);

        ContactOutcome {
            stage,
            contact_id: Some(contact_id),
        }
    }

    /// Update in place when the lead_id is known, otherwise insert
    async fn persist_contact(&mut self, contact: &ContactRecord) -> StoreResult<RowId> {
        match self.store.find_contact_id(&contact.lead_id).await? {
            Some(id) => {
                self.store.update_contact(id, contact).await?;
                self.stats.contacts_updated += 1;
                Ok(id)
            }
            None => {
                let id = self.store.insert_contact(contact).await?;
                self.stats.contacts_created += 1;
                Ok(id)
            }
        }
    }

    fn record_child(&mut self, category: ChildCategory, lead_id: &str, item: &str, result: StoreResult<()>) {
        match result {
            Ok(()) => self.stats.category_mut(category).inserted += 1,
            Err(err) => {
                warn!(lead_id, category = %category, item, error = %err, "Failed to insert row");
                self.stats
                    .record_child_failure(category, format!("{} {:?} for {}: {}", category, item, lead_id, err));
            }
        }
    }
}
