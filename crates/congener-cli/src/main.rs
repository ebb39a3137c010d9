//! Congener harvester binary.
//!
//! Resolves a list of seed drugs against PubChem, walks their 2D-similar
//! neighbourhoods, and accumulates gene-annotated compound rows into a CSV
//! table plus full and cleaned spreadsheet exports.

mod config;

use std::path::Path;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use congener_harvest::{export_spreadsheets, run_harvest, Accumulator};
use congener_pubchem::PubChemClient;

use crate::config::Config;

#[tokio::main]
async fn main() -> congener_common::Result<()> {
    // Initialise structured logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("congener=debug,congener_harvest=debug,congener_pubchem=debug,info")
        }))
        .init();

    info!("Congener v{} starting up", env!("CARGO_PKG_VERSION"));

    let config = Config::load()?;
    info!(
        drugs = config.drugs.len(),
        threshold = config.search.similarity_threshold,
        max_records = config.search.max_records,
        table = %config.output.table,
        "Configuration ready"
    );

    let client = PubChemClient::new()?;
    let mut accumulator = Accumulator::open(&config.output.table)?;

    let result = run_harvest(config.job(), &client, &mut accumulator).await;

    // Export runs whether the harvest completed or stopped early: everything
    // that reached the table is preserved in both spreadsheets.
    let summary = export_spreadsheets(
        accumulator.path(),
        Path::new(&config.output.spreadsheet),
        Path::new(&config.output.cleaned_spreadsheet),
    )?;

    info!(
        run_id = %result.run_id,
        rows_written = result.rows_written,
        total_rows = summary.total_rows,
        cleaned_rows = summary.cleaned_rows,
        errors = result.errors.len(),
        "Data saved"
    );

    if let Some(fatal) = result.fatal {
        warn!("Harvest stopped early: {fatal}");
        return Err(anyhow::anyhow!("harvest stopped early: {fatal}").into());
    }

    Ok(())
}
