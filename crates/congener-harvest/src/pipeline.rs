//! End-to-end harvest pipeline.
//!
//! Orchestrates the full flow for a single harvest run:
//!   1. Resolve each configured drug name to canonical SMILES strings
//!   2. Per structure: identity lookup (logged only), then 2D similarity
//!      search collecting one ordered candidate list
//!   3. Per candidate CID: skip duplicates, pause for the courtesy delay,
//!      fetch properties and gene data, apply the acceptance gate
//!   4. Append accepted rows to the on-disk table, one flush per row
//!
//! The pipeline is non-destructive: per-item errors are logged and counted,
//! and the loop continues. The one fatal path is a table append failure,
//! which stops the run early; spreadsheet export is the caller's job and
//! happens in both outcomes.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use congener_pubchem::CompoundSource;

use crate::accumulator::Accumulator;
use crate::models::CompoundRow;

// ── Job config ────────────────────────────────────────────────────────────────

/// Parameters for a single harvest run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarvestJob {
    pub drugs: Vec<String>,
    /// 2D similarity threshold, 0-100.
    pub similarity_threshold: u8,
    /// Cap on candidates returned per structure.
    pub max_records: u32,
    /// Pause before each candidate enrichment.
    pub courtesy_delay: Duration,
}

impl Default for HarvestJob {
    fn default() -> Self {
        Self {
            drugs: default_drugs(),
            similarity_threshold: 85,
            max_records: 100,
            courtesy_delay: Duration::from_secs(2),
        }
    }
}

/// The drug list harvested when no configuration overrides it.
pub fn default_drugs() -> Vec<String> {
    [
        "Pridopidine",
        "Branaplam",
        "Riluzole",
        "Olanzapine",
        "Quetiapine",
        "Clonazepam",
        "Amantadine",
        "Lonafarnib",
        "Triheptanoin",
        "Edaravone",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

// ── Result summary ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct HarvestResult {
    pub run_id: Uuid,
    pub drugs: usize,
    pub structures_resolved: usize,
    pub candidates_found: usize,
    pub rows_written: usize,
    pub skipped_duplicate: usize,
    pub skipped_incomplete: usize,
    pub errors: Vec<String>,
    /// Set when a table append failure stopped the loop early.
    pub fatal: Option<String>,
    pub duration_ms: u64,
}

// ── Pipeline orchestrator ─────────────────────────────────────────────────────

/// Runs the end-to-end harvest for one job.
#[instrument(skip(source, accumulator))]
pub async fn run_harvest(
    job: HarvestJob,
    source: &dyn CompoundSource,
    accumulator: &mut Accumulator,
) -> HarvestResult {
    let run_id = Uuid::new_v4();
    let t0 = std::time::Instant::now();

    info!(run_id = %run_id, drugs = job.drugs.len(), "Starting harvest");

    let mut result = HarvestResult {
        run_id,
        drugs: job.drugs.len(),
        structures_resolved: 0,
        candidates_found: 0,
        rows_written: 0,
        skipped_duplicate: 0,
        skipped_incomplete: 0,
        errors: Vec::new(),
        fatal: None,
        duration_ms: 0,
    };

    // ── 1. Resolve names to canonical structures ─────────────────────────────
    let mut structures = Vec::new();

    for name in &job.drugs {
        match source.resolve_drug(name).await {
            Ok(smiles) => {
                if smiles.is_empty() {
                    warn!(drug = %name, "Name resolved to no structure");
                }
                structures.extend(smiles);
            }
            Err(e) => {
                let msg = format!("resolve failed for {}: {e}", name);
                warn!("{}", &msg);
                result.errors.push(msg);
            }
        }
    }
    result.structures_resolved = structures.len();

    // ── 2. Collect candidate CIDs per structure ──────────────────────────────
    let mut candidates = Vec::new();

    for smiles in &structures {
        // Logged for parity with historical run output; the result does not
        // seed or filter the candidate list.
        match source.identity_cid(smiles).await {
            Ok(cid) => debug!(smiles = %smiles, cid = ?cid, "Identity lookup"),
            Err(e) => debug!(smiles = %smiles, error = %e, "Identity lookup failed"),
        }

        match source
            .similar_cids(smiles, job.similarity_threshold, job.max_records)
            .await
        {
            Ok(cids) => {
                debug!(smiles = %smiles, n = cids.len(), "Similar compounds found");
                candidates.extend(cids);
            }
            Err(e) => {
                let msg = format!("similarity search failed for {}: {e}", smiles);
                warn!("{}", &msg);
                result.errors.push(msg);
            }
        }
    }
    result.candidates_found = candidates.len();
    info!(run_id = %run_id, candidates = candidates.len(), "All candidate CIDs fetched");

    // ── 3. Enrich candidates and append rows ─────────────────────────────────
    for &cid in &candidates {
        if accumulator.is_done(cid) {
            result.skipped_duplicate += 1;
            continue;
        }

        tokio::time::sleep(job.courtesy_delay).await;

        match enrich_candidate(cid, source).await {
            Ok(Some(row)) => {
                if let Err(e) = accumulator.append(cid, &row) {
                    let msg = format!("table append failed for CID {}: {e}", cid);
                    warn!("{}", &msg);
                    result.fatal = Some(msg);
                    break;
                }
                result.rows_written += 1;
                info!(cid = cid, n = result.rows_written, "Added compound to table");
            }
            Ok(None) => {
                debug!(cid = cid, "Skipped: no meaningful gene data");
                result.skipped_incomplete += 1;
            }
            Err(e) => {
                let msg = format!("enrichment failed for CID {}: {e}", cid);
                warn!("{}", &msg);
                result.errors.push(msg);
            }
        }
    }

    result.duration_ms = t0.elapsed().as_millis() as u64;

    info!(
        run_id = %run_id,
        structures  = result.structures_resolved,
        candidates  = result.candidates_found,
        rows        = result.rows_written,
        skipped_dup = result.skipped_duplicate,
        skipped_inc = result.skipped_incomplete,
        errors      = result.errors.len(),
        duration_ms = result.duration_ms,
        "Harvest complete"
    );

    result
}

// ── Candidate enrichment ──────────────────────────────────────────────────────

/// Fetch properties and gene data for one candidate and build its row.
///
/// Returns `None` when the acceptance gate fails: a compound only makes the
/// table when it has a property record AND its gene cross-reference lookup
/// yielded at least one GeneID. Individual gene summaries that fail or lack
/// a symbol drop out of the genes cell without disqualifying the compound.
async fn enrich_candidate(
    cid: u64,
    source: &dyn CompoundSource,
) -> anyhow::Result<Option<CompoundRow>> {
    let properties = match source.compound_properties(cid).await? {
        Some(p) => p,
        None => return Ok(None),
    };

    let xrefs = source.gene_xrefs(cid).await?;
    if !xrefs.has_ids() {
        debug!(cid = cid, xrefs = ?xrefs, "Gene gate failed");
        return Ok(None);
    }

    let mut symbols = Vec::new();
    for &gene_id in xrefs.ids() {
        match source.gene_summary(gene_id).await {
            Ok(Some(summary)) => {
                if let Some(symbol) = summary.symbol {
                    symbols.push(symbol);
                }
            }
            Ok(None) => debug!(gene_id = gene_id, "No summary for gene"),
            Err(e) => debug!(gene_id = gene_id, error = %e, "Gene summary failed"),
        }
    }

    // Fresh canonical SMILES for the display column; absent data is rendered
    // as the sentinel by the row constructor.
    let smiles = source.canonical_smiles(cid).await?.into_iter().next();

    Ok(Some(CompoundRow::from_parts(&properties, smiles, &symbols)))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_job() {
        let job = HarvestJob::default();
        assert_eq!(job.drugs.len(), 10);
        assert_eq!(job.similarity_threshold, 85);
        assert_eq!(job.max_records, 100);
        assert_eq!(job.courtesy_delay, Duration::from_secs(2));
    }

    #[test]
    fn test_default_drugs_order() {
        let drugs = default_drugs();
        assert_eq!(drugs.first().map(String::as_str), Some("Pridopidine"));
        assert_eq!(drugs.last().map(String::as_str), Some("Edaravone"));
    }
}
