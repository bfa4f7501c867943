//! Company backfill from contact snapshots
//!
//! Creates a company row for every distinct current-company snapshot held
//! on the contacts table. Names already present are left untouched.

use crate::models::{CompanyRecord, CompanySnapshot};
use crate::stats::BackfillStats;
use crate::store::{ImportStore, StoreResult};
use tracing::{debug, info, warn};

fn company_from_snapshot(snapshot: &CompanySnapshot) -> CompanyRecord {
    CompanyRecord {
        company_name: snapshot.company_name.clone(),
        industry: snapshot.industry.clone(),
        subindustry: snapshot.subindustry.clone(),
        ..Default::default()
    }
}

/// Insert missing companies; per-company failures are counted, not fatal
///
/// Only reading the snapshots can fail the run.
pub async fn backfill_companies<S>(store: &S) -> StoreResult<BackfillStats>
where
    S: ImportStore + ?Sized,
{
    let snapshots = store.contact_company_snapshots().await?;
    info!("Found {} distinct companies on contacts", snapshots.len());

    let mut stats = BackfillStats {
        scanned: snapshots.len(),
        ..Default::default()
    };

    for snapshot in &snapshots {
        match store.insert_company_if_absent(&company_from_snapshot(snapshot)).await {
            Ok(true) => {
                debug!(company = %snapshot.company_name, "Company created");
                stats.inserted += 1;
            }
            Ok(false) => stats.already_present += 1,
            Err(err) => {
                warn!(company = %snapshot.company_name, error = %err, "Failed to create company");
                stats.failed += 1;
            }
        }
    }

    info!("{}", stats.display_string());
    Ok(stats)
}
