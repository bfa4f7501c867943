//! In-process store with the same uniqueness rules as the PostgreSQL schema
//!
//! Used by the test-suite; supports injecting failures into the next
//! insert of a chosen kind.

use super::{ImportStore, StoreError, StoreResult};
use crate::models::{
    CompanyRecord, CompanySnapshot, ContactRecord, EducationRecord, ExperienceRecord,
    InterestRecord, LanguageRecord, RowId, SkillRecord,
};
use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Mutex, MutexGuard};

/// Which operation an injected failure applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultTarget {
    Contact,
    Company,
    Experience,
    Language,
    Skill,
    Interest,
    Education,
}

#[derive(Debug, Default)]
struct Tables {
    next_id: RowId,
    contacts: Vec<(RowId, ContactRecord)>,
    companies: Vec<(RowId, CompanyRecord)>,
    experiences: Vec<ExperienceRecord>,
    languages: Vec<LanguageRecord>,
    skills: Vec<SkillRecord>,
    interests: Vec<InterestRecord>,
    education: Vec<EducationRecord>,
    faults: HashMap<FaultTarget, Vec<StoreError>>,
    statements: usize,
}

impl Tables {
    fn allocate_id(&mut self) -> RowId {
        self.next_id += 1;
        self.next_id
    }

    fn take_fault(&mut self, target: FaultTarget) -> StoreResult<()> {
        self.statements += 1;
        match self.faults.get_mut(&target).and_then(|queue| queue.pop()) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn contact_exists(&self, id: RowId) -> bool {
        self.contacts.iter().any(|(row_id, _)| *row_id == id)
    }

    fn require_contact(&self, id: RowId) -> StoreResult<()> {
        if self.contact_exists(id) {
            Ok(())
        } else {
            Err(StoreError::ConstraintViolation(format!(
                "contact_id {} does not reference a contact",
                id
            )))
        }
    }

    fn company_conflict(&self, company: &CompanyRecord) -> Option<StoreError> {
        self.companies.iter().find_map(|(_, existing)| {
            if company.company_id.is_some() && existing.company_id == company.company_id {
                Some(StoreError::Conflict(format!(
                    "company_id {:?} already exists",
                    company.company_id
                )))
            } else if existing.company_name == company.company_name {
                Some(StoreError::Conflict(format!(
                    "company_name {:?} already exists",
                    company.company_name
                )))
            } else {
                None
            }
        })
    }
}

/// Mutex-guarded tables; every call is a single critical section
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Make the next insert of `target` fail with `error`
    ///
    /// Several faults for one target are consumed in the order they were
    /// queued.
    pub fn fail_next(&self, target: FaultTarget, error: StoreError) {
        let mut tables = self.lock();
        let queue = tables.faults.entry(target).or_default();
        queue.insert(0, error);
    }

    /// Seed a company as if an earlier run had created it
    pub fn seed_company(&self, company: CompanyRecord) -> RowId {
        let mut tables = self.lock();
        let id = tables.allocate_id();
        tables.companies.push((id, company));
        id
    }

    pub fn contacts(&self) -> Vec<(RowId, ContactRecord)> {
        self.lock().contacts.clone()
    }

    pub fn contact_by_lead_id(&self, lead_id: &str) -> Option<(RowId, ContactRecord)> {
        self.lock()
            .contacts
            .iter()
            .find(|(_, c)| c.lead_id == lead_id)
            .cloned()
    }

    pub fn companies(&self) -> Vec<(RowId, CompanyRecord)> {
        self.lock().companies.clone()
    }

    pub fn experiences(&self) -> Vec<ExperienceRecord> {
        self.lock().experiences.clone()
    }

    pub fn languages(&self) -> Vec<LanguageRecord> {
        self.lock().languages.clone()
    }

    pub fn skills(&self) -> Vec<SkillRecord> {
        self.lock().skills.clone()
    }

    pub fn interests(&self) -> Vec<InterestRecord> {
        self.lock().interests.clone()
    }

    pub fn education(&self) -> Vec<EducationRecord> {
        self.lock().education.clone()
    }

    /// Number of store calls issued so far
    pub fn statement_count(&self) -> usize {
        self.lock().statements
    }
}

#[async_trait]
impl ImportStore for MemoryStore {
    async fn find_contact_id(&self, lead_id: &str) -> StoreResult<Option<RowId>> {
        let mut tables = self.lock();
        tables.statements += 1;
        Ok(tables
            .contacts
            .iter()
            .find(|(_, c)| c.lead_id == lead_id)
            .map(|(id, _)| *id))
    }

    async fn insert_contact(&self, contact: &ContactRecord) -> StoreResult<RowId> {
        let mut tables = self.lock();
        tables.take_fault(FaultTarget::Contact)?;
        if tables.contacts.iter().any(|(_, c)| c.lead_id == contact.lead_id) {
            return Err(StoreError::Conflict(format!(
                "lead_id {} already exists",
                contact.lead_id
            )));
        }
        let id = tables.allocate_id();
        tables.contacts.push((id, contact.clone()));
        Ok(id)
    }

    async fn update_contact(&self, id: RowId, contact: &ContactRecord) -> StoreResult<()> {
        let mut tables = self.lock();
        tables.take_fault(FaultTarget::Contact)?;
        match tables.contacts.iter_mut().find(|(row_id, _)| *row_id == id) {
            Some((_, existing)) => {
                *existing = contact.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound(format!("contact {}", id))),
        }
    }

    async fn insert_company(&self, company: &CompanyRecord) -> StoreResult<RowId> {
        let mut tables = self.lock();
        tables.take_fault(FaultTarget::Company)?;
        if let Some(conflict) = tables.company_conflict(company) {
            return Err(conflict);
        }
        let id = tables.allocate_id();
        tables.companies.push((id, company.clone()));
        Ok(id)
    }

    async fn insert_experience(&self, experience: &ExperienceRecord) -> StoreResult<()> {
        let mut tables = self.lock();
        tables.take_fault(FaultTarget::Experience)?;
        tables.require_contact(experience.contact_id)?;
        if !tables
            .companies
            .iter()
            .any(|(id, _)| *id == experience.company_id)
        {
            return Err(StoreError::ConstraintViolation(format!(
                "company_id {} does not reference a company",
                experience.company_id
            )));
        }
        tables.experiences.push(experience.clone());
        Ok(())
    }

    async fn insert_language(&self, language: &LanguageRecord) -> StoreResult<()> {
        let mut tables = self.lock();
        tables.take_fault(FaultTarget::Language)?;
        tables.require_contact(language.contact_id)?;
        tables.languages.push(language.clone());
        Ok(())
    }

    async fn insert_skill(&self, skill: &SkillRecord) -> StoreResult<()> {
        let mut tables = self.lock();
        tables.take_fault(FaultTarget::Skill)?;
        tables.require_contact(skill.contact_id)?;
        tables.skills.push(skill.clone());
        Ok(())
    }

    async fn insert_interest(&self, interest: &InterestRecord) -> StoreResult<()> {
        let mut tables = self.lock();
        tables.take_fault(FaultTarget::Interest)?;
        tables.require_contact(interest.contact_id)?;
        tables.interests.push(interest.clone());
        Ok(())
    }

    async fn insert_education(&self, education: &EducationRecord) -> StoreResult<()> {
        let mut tables = self.lock();
        tables.take_fault(FaultTarget::Education)?;
        tables.require_contact(education.contact_id)?;
        tables.education.push(education.clone());
        Ok(())
    }

    async fn contact_company_snapshots(&self) -> StoreResult<Vec<CompanySnapshot>> {
        let mut tables = self.lock();
        tables.statements += 1;
        let distinct: BTreeSet<(String, String, String)> = tables
            .contacts
            .iter()
            .filter(|(_, c)| !c.current_company_name.is_empty())
            .map(|(_, c)| {
                (
                    c.current_company_name.clone(),
                    c.current_company_industry.clone(),
                    c.current_company_subindustry.clone(),
                )
            })
            .collect();

        Ok(distinct
            .into_iter()
            .map(|(company_name, industry, subindustry)| CompanySnapshot {
                company_name,
                industry,
                subindustry,
            })
            .collect())
    }

    async fn insert_company_if_absent(&self, company: &CompanyRecord) -> StoreResult<bool> {
        let mut tables = self.lock();
        tables.take_fault(FaultTarget::Company)?;
        if tables
            .companies
            .iter()
            .any(|(_, existing)| existing.company_name == company.company_name)
        {
            return Ok(false);
        }
        let id = tables.allocate_id();
        tables.companies.push((id, company.clone()));
        Ok(true)
    }
}
