//! Company backfill
//!
//! Creates a company row for every distinct current company recorded on
//! contacts that is not yet in the companies table.

use anyhow::{Context, Result};
use clap::Parser;
use crm_common::logging::init_from_config;
use crm_import::backfill::backfill_companies;
use crm_import::cli::{build_info, DatabaseArgs};
use crm_import::PgStore;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "crm-backfill-companies")]
#[command(about = "Create missing companies from contact current-company fields")]
#[command(version)]
struct Args {
    #[command(flatten)]
    database: DatabaseArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let toml_config = init_from_config();

    info!("Starting crm-backfill-companies {}", build_info());

    let db_config = args.database.resolve(&toml_config);
    info!("Database: {}", db_config);

    let store = PgStore::connect(&db_config)
        .await
        .context("Failed to connect to database")?;

    let stats = backfill_companies(&store)
        .await
        .context("Failed to read contact companies")?;
    stats.print_summary();

    store.close().await;
    Ok(())
}
