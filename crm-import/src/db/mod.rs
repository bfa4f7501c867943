//! PostgreSQL access for the import
//!
//! Free functions per table; every query returns a classified
//! [`StoreError`](crate::store::StoreError).

pub mod companies;
pub mod contacts;
pub mod experiences;
pub mod profile;
pub mod schema;

use crm_common::config::DatabaseConfig;
use crm_common::Result;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

/// Open the connection used for a whole run
///
/// The import issues one statement at a time, so the pool holds a single
/// connection.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool> {
    tracing::debug!("Connecting to database: {}", config);

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(config.connect_options())
        .await?;

    Ok(pool)
}
