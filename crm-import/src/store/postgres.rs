//! [`ImportStore`] backed by PostgreSQL

use super::{ImportStore, StoreResult};
use crate::db;
use crate::models::{
    CompanyRecord, CompanySnapshot, ContactRecord, EducationRecord, ExperienceRecord,
    InterestRecord, LanguageRecord, RowId, SkillRecord,
};
use async_trait::async_trait;
use crm_common::config::DatabaseConfig;
use sqlx::PgPool;

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect and make sure the schema exists
    pub async fn connect(config: &DatabaseConfig) -> crm_common::Result<Self> {
        let pool = db::connect(config).await?;
        db::schema::initialize_schema(&pool).await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl ImportStore for PgStore {
    async fn find_contact_id(&self, lead_id: &str) -> StoreResult<Option<RowId>> {
        db::contacts::find_contact_id(&self.pool, lead_id).await
    }

    async fn insert_contact(&self, contact: &ContactRecord) -> StoreResult<RowId> {
        db::contacts::insert_contact(&self.pool, contact).await
    }

    async fn update_contact(&self, id: RowId, contact: &ContactRecord) -> StoreResult<()> {
        db::contacts::update_contact(&self.pool, id, contact).await
    }

    async fn insert_company(&self, company: &CompanyRecord) -> StoreResult<RowId> {
        db::companies::insert_company(&self.pool, company).await
    }

    async fn insert_experience(&self, experience: &ExperienceRecord) -> StoreResult<()> {
        db::experiences::insert_experience(&self.pool, experience).await
    }

    async fn insert_language(&self, language: &LanguageRecord) -> StoreResult<()> {
        db::profile::insert_language(&self.pool, language).await
    }

    async fn insert_skill(&self, skill: &SkillRecord) -> StoreResult<()> {
        db::profile::insert_skill(&self.pool, skill).await
    }

    async fn insert_interest(&self, interest: &InterestRecord) -> StoreResult<()> {
        db::profile::insert_interest(&self.pool, interest).await
    }

    async fn insert_education(&self, education: &EducationRecord) -> StoreResult<()> {
        db::profile::insert_education(&self.pool, education).await
    }

    async fn contact_company_snapshots(&self) -> StoreResult<Vec<CompanySnapshot>> {
        db::contacts::company_snapshots(&self.pool).await
    }

    async fn insert_company_if_absent(&self, company: &CompanyRecord) -> StoreResult<bool> {
        db::companies::insert_company_if_absent(&self.pool, company).await
    }
}
