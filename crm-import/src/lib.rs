//! crm-import: JSON contact export → PostgreSQL reconciler
//!
//! Reads an array of loosely structured contact records and upserts them
//! into contacts, companies, experiences and the per-contact profile
//! tables, keeping experiences pointed at the companies created during the
//! run.
//!
//! Data flows one way:
//! [`input`] → [`normalize`] / [`extract`] → [`dedup`] → [`orchestrator`]
//! → [`store`] → [`stats`].

pub mod backfill;
pub mod cli;
pub mod db;
pub mod dedup;
pub mod error;
pub mod extract;
pub mod input;
pub mod models;
pub mod normalize;
pub mod orchestrator;
pub mod stats;
pub mod store;

pub use error::{ImportError, Result};
pub use orchestrator::{ContactOutcome, ContactStage, ImportOrchestrator};
pub use stats::{BackfillStats, ImportStats};
pub use store::{ImportStore, MemoryStore, PgStore, StoreError};
