//! Run-scoped company identity map
//!
//! Maps a [`CompanyKey`] to the surrogate key of the company row created
//! for it during this run. Companies are created lazily on first
//! encounter. When the store reports that the company already exists the
//! key stays unmapped; no lookup against the store is attempted, so
//! experiences pointing at it are dropped.

use crate::models::{CompanyKey, CompanyRecord, RowId};
use crate::stats::ImportStats;
use crate::store::{ImportStore, StoreError};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Identity key → surrogate key, as threaded into experience extraction
pub type ResolvedCompanies = HashMap<CompanyKey, RowId>;

/// Owns the identity map for exactly one run
#[derive(Debug, Default)]
pub struct CompanyDeduplicator {
    resolved: ResolvedCompanies,
}

impl CompanyDeduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolved(&self) -> &ResolvedCompanies {
        &self.resolved
    }

    pub fn len(&self) -> usize {
        self.resolved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty()
    }

    /// Surrogate key for `key`, creating the company on first encounter
    ///
    /// `company` is the snapshot to persist; `None` (an id without a name)
    /// can only be matched against the map. Failures are recorded in
    /// `stats` and yield `None`.
    pub async fn resolve<S>(
        &mut self,
        store: &S,
        key: &CompanyKey,
        company: Option<&CompanyRecord>,
        stats: &mut ImportStats,
    ) -> Option<RowId>
    where
        S: ImportStore + ?Sized,
    {
        if let Some(id) = self.resolved.get(key) {
            return Some(*id);
        }

        let Some(company) = company else {
            debug!(company = %key, "Company has no name, cannot be created");
            return None;
        };

        match store.insert_company(company).await {
            Ok(id) => {
                debug!(company = %key, id, "Company created");
                self.resolved.insert(key.clone(), id);
                stats.companies_created += 1;
                Some(id)
            }
            Err(StoreError::Conflict(message)) => {
                warn!(
                    company = %company.company_name,
                    error = %message,
                    "Company already exists in store; left unmapped for this run"
                );
                stats.companies_conflicted += 1;
                None
            }
            Err(err) => {
                warn!(company = %company.company_name, error = %err, "Failed to create company");
                stats.companies_failed += 1;
                stats.record_error(format!("company {}: {}", company.company_name, err));
                None
            }
        }
    }

    /// Resolve every referenced company in order and return the map
    /// to extract experiences against
    pub async fn resolve_all<S>(
        &mut self,
        store: &S,
        referenced: &[(CompanyKey, Option<CompanyRecord>)],
        stats: &mut ImportStats,
    ) -> &ResolvedCompanies
    where
        S: ImportStore + ?Sized,
    {
        for (key, company) in referenced {
            self.resolve(store, key, company.as_ref(), stats).await;
        }
        &self.resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{FaultTarget, MemoryStore};
    use uuid::Uuid;

    fn company(id: Option<&str>, name: &str) -> CompanyRecord {
        CompanyRecord {
            company_id: id.map(str::to_string),
            company_name: name.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_second_encounter_uses_map_without_store_access() {
        let store = MemoryStore::new();
        let mut dedup = CompanyDeduplicator::new();
        let mut stats = ImportStats::new(Uuid::nil());
        let acme = company(Some("C1"), "Acme");
        let key = CompanyKey::for_company(&acme).unwrap();

        let first = dedup.resolve(&store, &key, Some(&acme), &mut stats).await;
        let statements = store.statement_count();
        let second = dedup.resolve(&store, &key, Some(&acme), &mut stats).await;

        assert_eq!(first, second);
        assert_eq!(store.statement_count(), statements);
        assert_eq!(stats.companies_created, 1);
        assert_eq!(store.companies().len(), 1);
    }

    #[tokio::test]
    async fn test_conflict_leaves_company_unmapped() {
        let store = MemoryStore::new();
        store.seed_company(company(None, "Acme"));
        let mut dedup = CompanyDeduplicator::new();
        let mut stats = ImportStats::new(Uuid::nil());
        let acme = company(None, "Acme");
        let key = CompanyKey::for_company(&acme).unwrap();

        let resolved = dedup.resolve(&store, &key, Some(&acme), &mut stats).await;

        assert_eq!(resolved, None);
        assert!(dedup.is_empty());
        assert_eq!(stats.companies_conflicted, 1);
        assert_eq!(stats.total_errors, 0);
    }

    #[tokio::test]
    async fn test_other_failures_are_counted_as_errors() {
        let store = MemoryStore::new();
        store.fail_next(FaultTarget::Company, StoreError::Connection("reset".into()));
        let mut dedup = CompanyDeduplicator::new();
        let mut stats = ImportStats::new(Uuid::nil());
        let acme = company(None, "Acme");
        let key = CompanyKey::for_company(&acme).unwrap();

        assert_eq!(dedup.resolve(&store, &key, Some(&acme), &mut stats).await, None);
        assert_eq!(stats.companies_failed, 1);
        assert_eq!(stats.total_errors, 1);

        // Not mapped, so the next encounter retries the insert
        assert!(dedup.resolve(&store, &key, Some(&acme), &mut stats).await.is_some());
        assert_eq!(stats.companies_created, 1);
    }

    #[tokio::test]
    async fn test_nameless_company_matches_only_through_map() {
        let store = MemoryStore::new();
        let mut dedup = CompanyDeduplicator::new();
        let mut stats = ImportStats::new(Uuid::nil());
        let key = CompanyKey::ExternalId("C9".to_string());

        assert_eq!(dedup.resolve(&store, &key, None, &mut stats).await, None);
        assert_eq!(store.statement_count(), 0);

        let named = company(Some("C9"), "Nine");
        let id = dedup.resolve(&store, &key, Some(&named), &mut stats).await;
        assert!(id.is_some());
        assert_eq!(dedup.resolve(&store, &key, None, &mut stats).await, id);
    }

    #[tokio::test]
    async fn test_name_keys_are_case_insensitive_within_a_run() {
        let store = MemoryStore::new();
        let mut dedup = CompanyDeduplicator::new();
        let mut stats = ImportStats::new(Uuid::nil());
        let referenced = vec![
            (CompanyKey::Name("acme".into()), Some(company(None, "Acme"))),
            (CompanyKey::Name("acme".into()), Some(company(None, "ACME"))),
        ];

        let resolved = dedup.resolve_all(&store, &referenced, &mut stats).await;

        assert_eq!(resolved.len(), 1);
        assert_eq!(store.companies().len(), 1);
        assert_eq!(store.companies()[0].1.company_name, "Acme");
    }
}
