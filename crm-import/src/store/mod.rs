//! Persistence abstraction for the import
//!
//! The orchestrator only talks to [`ImportStore`]; failures come back as a
//! typed [`StoreError`] so callers branch on the kind of failure instead of
//! driver-specific codes.

pub mod memory;
pub mod postgres;

pub use memory::{FaultTarget, MemoryStore};
pub use postgres::PgStore;

use crate::models::{
    CompanyRecord, CompanySnapshot, ContactRecord, EducationRecord, ExperienceRecord,
    InterestRecord, LanguageRecord, RowId, SkillRecord,
};
use async_trait::async_trait;
use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Store failure, classified by kind
#[derive(Debug, Error)]
pub enum StoreError {
    /// Uniqueness violation: the row already exists
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Expected row is missing
    #[error("Not found: {0}")]
    NotFound(String),

    /// The store could not be reached or the session broke
    #[error("Connection error: {0}")]
    Connection(String),

    /// Foreign-key, not-null, check or data-range violation
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Store error: {0}")]
    Other(String),
}

impl StoreError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Conflict(_))
    }

    /// Classify a PostgreSQL SQLSTATE code
    pub fn from_sqlstate(code: &str, message: String) -> Self {
        match code {
            "23505" => StoreError::Conflict(message),
            "23502" | "23503" | "23514" => StoreError::ConstraintViolation(message),
            c if c.starts_with("22") => StoreError::ConstraintViolation(message),
            c if c.starts_with("08") => StoreError::Connection(message),
            _ => StoreError::Other(message),
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                let message = db_err.message().to_string();
                match db_err.code() {
                    Some(code) => StoreError::from_sqlstate(&code, message),
                    None => StoreError::Other(message),
                }
            }
            sqlx::Error::RowNotFound => StoreError::NotFound("row not found".to_string()),
            sqlx::Error::Io(e) => StoreError::Connection(e.to_string()),
            sqlx::Error::Tls(e) => StoreError::Connection(e.to_string()),
            sqlx::Error::Protocol(msg) => StoreError::Connection(msg),
            sqlx::Error::PoolTimedOut => StoreError::Connection("pool timed out".to_string()),
            sqlx::Error::PoolClosed => StoreError::Connection("pool closed".to_string()),
            sqlx::Error::WorkerCrashed => StoreError::Connection("worker crashed".to_string()),
            other => StoreError::Other(other.to_string()),
        }
    }
}

/// Operations the import needs from the persistence store
///
/// Every call is awaited before the next is issued; implementations need
/// not support concurrent use.
#[async_trait]
pub trait ImportStore: Send + Sync {
    /// Surrogate key of the contact with this `lead_id`
    async fn find_contact_id(&self, lead_id: &str) -> StoreResult<Option<RowId>>;

    async fn insert_contact(&self, contact: &ContactRecord) -> StoreResult<RowId>;

    /// Overwrite every mutable field of an existing contact
    async fn update_contact(&self, id: RowId, contact: &ContactRecord) -> StoreResult<()>;

    /// Create a company; fails with [`StoreError::Conflict`] when its id or
    /// name is already taken
    async fn insert_company(&self, company: &CompanyRecord) -> StoreResult<RowId>;

    async fn insert_experience(&self, experience: &ExperienceRecord) -> StoreResult<()>;

    async fn insert_language(&self, language: &LanguageRecord) -> StoreResult<()>;

    async fn insert_skill(&self, skill: &SkillRecord) -> StoreResult<()>;

    async fn insert_interest(&self, interest: &InterestRecord) -> StoreResult<()>;

    async fn insert_education(&self, education: &EducationRecord) -> StoreResult<()>;

    /// Distinct non-empty current-company snapshots across all contacts,
    /// ordered by company name
    async fn contact_company_snapshots(&self) -> StoreResult<Vec<CompanySnapshot>>;

    /// Create a company unless one with the same name exists; true when a
    /// row was inserted
    async fn insert_company_if_absent(&self, company: &CompanyRecord) -> StoreResult<bool>;
}
