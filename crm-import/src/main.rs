//! crm-import - contact export importer
//!
//! Usage: `crm-import [INPUT] [--limit N] [--db-host HOST ...]`
//!
//! Exits 1 with a usage message when the input file does not exist;
//! otherwise exits 0 after printing the run summary, whatever the per-row
//! failures were.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use crm_common::logging::init_from_config;
use crm_import::cli::{build_info, DatabaseArgs};
use crm_import::input::load_contacts;
use crm_import::{ImportError, ImportOrchestrator, PgStore};
use std::path::PathBuf;
use tracing::info;

/// Command-line arguments for crm-import
#[derive(Parser, Debug)]
#[command(name = "crm-import")]
#[command(about = "Import a JSON contact export into the CRM database")]
#[command(version)]
struct Args {
    /// JSON file holding an array of contact records
    #[arg(default_value = "all_lemlist_contacts.json")]
    input: PathBuf,

    /// Import only the first N records
    #[arg(long, value_name = "N")]
    limit: Option<usize>,

    #[command(flatten)]
    database: DatabaseArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let toml_config = init_from_config();

    info!("Starting crm-import {}", build_info());

    let records = match load_contacts(&args.input, args.limit) {
        Ok(records) => records,
        Err(ImportError::InputNotFound(path)) => {
            eprintln!("Error: input file not found: {}", path.display());
            eprintln!();
            eprintln!("{}", Args::command().render_usage());
            std::process::exit(1);
        }
        Err(e) => return Err(e).context("Failed to read input"),
    };
    info!("Input: {} ({} records)", args.input.display(), records.len());

    let db_config = args.database.resolve(&toml_config);
    info!("Database: {}", db_config);

    let store = PgStore::connect(&db_config)
        .await
        .context("Failed to connect to database")?;

    let stats = ImportOrchestrator::new(&store).run(&records).await;
    stats.print_summary();

    store.close().await;
    Ok(())
}
