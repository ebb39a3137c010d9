//! Common interface for compound data sources.

use async_trait::async_trait;

use crate::models::{CompoundProperties, GeneSummary, GeneXrefs};

/// The compound-database operations the harvest pipeline depends on.
///
/// Implemented by the live PubChem client; tests drive the pipeline with
/// scripted in-memory sources instead.
#[async_trait]
pub trait CompoundSource: Send + Sync {
    /// Resolve a drug name to canonical SMILES strings.
    async fn resolve_drug(&self, name: &str) -> anyhow::Result<Vec<String>>;

    /// Exact-structure CID for a SMILES string.
    async fn identity_cid(&self, smiles: &str) -> anyhow::Result<Option<u64>>;

    /// CIDs structurally similar to a SMILES string.
    async fn similar_cids(
        &self,
        smiles: &str,
        threshold: u8,
        max_records: u32,
    ) -> anyhow::Result<Vec<u64>>;

    /// Property record for a compound, `None` when it has no property data.
    async fn compound_properties(&self, cid: u64) -> anyhow::Result<Option<CompoundProperties>>;

    /// Gene cross-references for a compound.
    async fn gene_xrefs(&self, cid: u64) -> anyhow::Result<GeneXrefs>;

    /// First summary record for a gene.
    async fn gene_summary(&self, gene_id: u64) -> anyhow::Result<Option<GeneSummary>>;

    /// Canonical SMILES strings for a compound.
    async fn canonical_smiles(&self, cid: u64) -> anyhow::Result<Vec<String>>;
}
