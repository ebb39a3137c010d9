//! PubChem PUG REST client.
//!
//! PubChem is NCBI's open chemistry database. This client covers the calls
//! needed to walk from a drug name to its structural neighbours and their
//! gene annotations:
//!   - name → CID resolution, CID → canonical SMILES
//!   - 2D similarity and same-isotope identity search by SMILES
//!   - compound property tables (title, formula, weight)
//!   - compound → GeneID cross-references and gene summaries
//!
//! API docs: https://pubchem.ncbi.nlm.nih.gov/docs/pug-rest
//! Endpoint: https://pubchem.ncbi.nlm.nih.gov/rest/pug
//!
//! Every lookup treats a non-success status or a missing envelope key as
//! "no data" and returns an empty value; transport and decode errors
//! propagate to the caller.

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};

use congener_common::build_client;

use crate::models::{CompoundProperties, GeneSummary, GeneXrefs};
use crate::source::CompoundSource;

const PUG_REST_URL: &str = "https://pubchem.ncbi.nlm.nih.gov/rest/pug";

/// PubChem client for compound and gene data.
pub struct PubChemClient {
    client: Client,
}

impl PubChemClient {
    /// Client with Congener's default timeout and user agent.
    pub fn new() -> congener_common::Result<Self> {
        Ok(Self { client: build_client()? })
    }

    /// Client reusing an existing HTTP handle.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Resolve a compound name to its CIDs.
    #[instrument(skip(self))]
    pub async fn cids_for_name(&self, name: &str) -> anyhow::Result<Vec<u64>> {
        let url = format!("{}/compound/name/{}/cids/JSON", PUG_REST_URL, name);

        debug!(name = name, "Resolving compound name");

        let resp = self.client.get(&url).send().await?;
        if !resp.status().is_success() {
            debug!(name = name, status = %resp.status(), "Name lookup returned no data");
            return Ok(Vec::new());
        }

        let json: serde_json::Value = resp.json().await?;
        Ok(parse_cid_list(&json))
    }

    /// Canonical SMILES strings for a CID, usually exactly one.
    #[instrument(skip(self))]
    pub async fn canonical_smiles(&self, cid: u64) -> anyhow::Result<Vec<String>> {
        let url = format!(
            "{}/compound/cid/{}/property/CanonicalSMILES/JSON",
            PUG_REST_URL, cid
        );

        let resp = self.client.get(&url).send().await?;
        if !resp.status().is_success() {
            return Ok(Vec::new());
        }

        let json: serde_json::Value = resp.json().await?;
        Ok(parse_smiles_list(&json))
    }

    /// Resolve a drug name to its canonical SMILES strings.
    ///
    /// Takes the first CID the name resolves to, then that compound's
    /// canonical SMILES. Empty when either step finds nothing.
    #[instrument(skip(self))]
    pub async fn resolve_drug(&self, name: &str) -> anyhow::Result<Vec<String>> {
        let cids = self.cids_for_name(name).await?;
        let cid = match cids.first() {
            Some(&cid) => cid,
            None => {
                debug!(name = name, "No CID for name");
                return Ok(Vec::new());
            }
        };
        self.canonical_smiles(cid).await
    }

    /// Search compounds by 2D structural similarity to a SMILES string.
    ///
    /// The SMILES goes in the URL path, so it is percent-encoded first
    /// (`#`, `/`, `(` and friends are all legal SMILES characters).
    #[instrument(skip(self))]
    pub async fn similar_cids(
        &self,
        smiles: &str,
        threshold: u8,
        max_records: u32,
    ) -> anyhow::Result<Vec<u64>> {
        let url = format!(
            "{}/compound/fastsimilarity_2d/smiles/{}/cids/JSON",
            PUG_REST_URL,
            urlencoding::encode(smiles)
        );

        debug!(smiles = smiles, threshold = threshold, "Searching similar compounds");

        let resp = self
            .client
            .get(&url)
            .query(&[
                ("Threshold", threshold.to_string()),
                ("MaxRecords", max_records.to_string()),
            ])
            .send()
            .await?;

        if !resp.status().is_success() {
            debug!(smiles = smiles, status = %resp.status(), "Similarity search returned no data");
            return Ok(Vec::new());
        }

        let json: serde_json::Value = resp.json().await?;
        Ok(parse_cid_list(&json))
    }

    /// Exact-structure CID for a SMILES string (same-isotope match).
    #[instrument(skip(self))]
    pub async fn identity_cid(&self, smiles: &str) -> anyhow::Result<Option<u64>> {
        let url = format!(
            "{}/compound/fastidentity/smiles/{}/cids/JSON",
            PUG_REST_URL,
            urlencoding::encode(smiles)
        );

        let resp = self
            .client
            .get(&url)
            .query(&[("identity_type", "same_isotope")])
            .send()
            .await?;

        if !resp.status().is_success() {
            return Ok(None);
        }

        let json: serde_json::Value = resp.json().await?;
        Ok(parse_cid_list(&json).first().copied())
    }

    /// Title, molecular formula and molecular weight for a CID.
    #[instrument(skip(self))]
    pub async fn compound_properties(&self, cid: u64) -> anyhow::Result<Option<CompoundProperties>> {
        let url = format!(
            "{}/compound/cid/{}/property/Title,MolecularFormula,MolecularWeight/JSON",
            PUG_REST_URL, cid
        );

        debug!(cid = cid, "Fetching compound properties");

        let resp = self.client.get(&url).send().await?;
        if !resp.status().is_success() {
            debug!(cid = cid, status = %resp.status(), "Property lookup returned no data");
            return Ok(None);
        }

        let json: serde_json::Value = resp.json().await?;
        Ok(parse_properties(&json, cid))
    }

    /// GeneID cross-references for a compound.
    #[instrument(skip(self))]
    pub async fn gene_xrefs(&self, cid: u64) -> anyhow::Result<GeneXrefs> {
        let url = format!("{}/compound/cid/{}/xrefs/GeneID/JSON", PUG_REST_URL, cid);

        debug!(cid = cid, "Fetching gene cross-references");

        let resp = self.client.get(&url).send().await?;
        if !resp.status().is_success() {
            debug!(cid = cid, status = %resp.status(), "Gene xref lookup returned no data");
            return Ok(GeneXrefs::Unavailable);
        }

        let json: serde_json::Value = resp.json().await?;
        Ok(parse_gene_xrefs(&json))
    }

    /// First summary record for an NCBI gene.
    #[instrument(skip(self))]
    pub async fn gene_summary(&self, gene_id: u64) -> anyhow::Result<Option<GeneSummary>> {
        let url = format!("{}/gene/geneid/{}/summary/JSON", PUG_REST_URL, gene_id);

        let resp = self.client.get(&url).send().await?;
        if !resp.status().is_success() {
            return Ok(None);
        }

        let json: serde_json::Value = resp.json().await?;
        Ok(parse_gene_summary(&json, gene_id))
    }
}

#[async_trait]
impl CompoundSource for PubChemClient {
    async fn resolve_drug(&self, name: &str) -> anyhow::Result<Vec<String>> {
        PubChemClient::resolve_drug(self, name).await
    }

    async fn identity_cid(&self, smiles: &str) -> anyhow::Result<Option<u64>> {
        PubChemClient::identity_cid(self, smiles).await
    }

    async fn similar_cids(
        &self,
        smiles: &str,
        threshold: u8,
        max_records: u32,
    ) -> anyhow::Result<Vec<u64>> {
        PubChemClient::similar_cids(self, smiles, threshold, max_records).await
    }

    async fn compound_properties(&self, cid: u64) -> anyhow::Result<Option<CompoundProperties>> {
        PubChemClient::compound_properties(self, cid).await
    }

    async fn gene_xrefs(&self, cid: u64) -> anyhow::Result<GeneXrefs> {
        PubChemClient::gene_xrefs(self, cid).await
    }

    async fn gene_summary(&self, gene_id: u64) -> anyhow::Result<Option<GeneSummary>> {
        PubChemClient::gene_summary(self, gene_id).await
    }

    async fn canonical_smiles(&self, cid: u64) -> anyhow::Result<Vec<String>> {
        PubChemClient::canonical_smiles(self, cid).await
    }
}

// ── Envelope parsing ──────────────────────────────────────────────────────────

/// Extract `IdentifierList.CID` as integers.
fn parse_cid_list(json: &serde_json::Value) -> Vec<u64> {
    json["IdentifierList"]["CID"]
        .as_array()
        .map(|arr| arr.iter().filter_map(|v| v.as_u64()).collect())
        .unwrap_or_default()
}

/// Extract every `CanonicalSMILES` in `PropertyTable.Properties`.
fn parse_smiles_list(json: &serde_json::Value) -> Vec<String> {
    json["PropertyTable"]["Properties"]
        .as_array()
        .map(|arr| {
            arr.iter()
                .filter_map(|p| p["CanonicalSMILES"].as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default()
}

/// First record of `PropertyTable.Properties`, fields individually optional.
fn parse_properties(json: &serde_json::Value, cid: u64) -> Option<CompoundProperties> {
    let record = json["PropertyTable"]["Properties"].get(0)?;
    Some(CompoundProperties {
        cid,
        title: record["Title"].as_str().map(String::from),
        molecular_formula: record["MolecularFormula"].as_str().map(String::from),
        molecular_weight: record["MolecularWeight"]
            .as_str()
            .map(String::from)
            .or_else(|| record["MolecularWeight"].as_f64().map(|w| w.to_string())),
    })
}

/// `InformationList.Information[0].GeneID`, with absence kept distinct from
/// an empty list.
fn parse_gene_xrefs(json: &serde_json::Value) -> GeneXrefs {
    let info = match json["InformationList"]["Information"].get(0) {
        Some(info) => info,
        None => return GeneXrefs::Unavailable,
    };
    match info["GeneID"].as_array() {
        Some(ids) if !ids.is_empty() => {
            GeneXrefs::Ids(ids.iter().filter_map(|v| v.as_u64()).collect())
        }
        _ => GeneXrefs::Empty,
    }
}

/// First record of `GeneSummaries.GeneSummary`: symbol, first synonym,
/// description, each individually optional.
fn parse_gene_summary(json: &serde_json::Value, gene_id: u64) -> Option<GeneSummary> {
    let record = json["GeneSummaries"]["GeneSummary"].get(0)?;
    Some(GeneSummary {
        gene_id,
        symbol: record["Symbol"].as_str().map(String::from),
        synonym: record["Synonym"].get(0).and_then(|s| s.as_str()).map(String::from),
        description: record["Description"].as_str().map(String::from),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_cid_list() {
        let json = json!({ "IdentifierList": { "CID": [2244, 2245, 54675779] } });
        assert_eq!(parse_cid_list(&json), vec![2244, 2245, 54675779]);
    }

    #[test]
    fn test_parse_cid_list_missing_envelope() {
        assert!(parse_cid_list(&json!({ "Fault": { "Code": "PUGREST.NotFound" } })).is_empty());
        assert!(parse_cid_list(&json!({ "IdentifierList": {} })).is_empty());
    }

    #[test]
    fn test_parse_smiles_list() {
        let json = json!({
            "PropertyTable": {
                "Properties": [
                    { "CID": 2244, "CanonicalSMILES": "CC(=O)OC1=CC=CC=C1C(=O)O" }
                ]
            }
        });
        assert_eq!(parse_smiles_list(&json), vec!["CC(=O)OC1=CC=CC=C1C(=O)O"]);
    }

    #[test]
    fn test_parse_properties() {
        let json = json!({
            "PropertyTable": {
                "Properties": [{
                    "CID": 2244,
                    "Title": "Aspirin",
                    "MolecularFormula": "C9H8O4",
                    "MolecularWeight": "180.16"
                }]
            }
        });
        let props = parse_properties(&json, 2244).unwrap();
        assert_eq!(props.title.as_deref(), Some("Aspirin"));
        assert_eq!(props.molecular_formula.as_deref(), Some("C9H8O4"));
        assert_eq!(props.molecular_weight.as_deref(), Some("180.16"));
    }

    #[test]
    fn test_parse_properties_partial_record() {
        let json = json!({
            "PropertyTable": { "Properties": [{ "CID": 2244, "Title": "Aspirin" }] }
        });
        let props = parse_properties(&json, 2244).unwrap();
        assert_eq!(props.title.as_deref(), Some("Aspirin"));
        assert!(props.molecular_formula.is_none());
        assert!(props.molecular_weight.is_none());
    }

    #[test]
    fn test_parse_properties_missing_table() {
        assert!(parse_properties(&json!({ "Fault": {} }), 2244).is_none());
        assert!(parse_properties(&json!({ "PropertyTable": { "Properties": [] } }), 2244).is_none());
    }

    #[test]
    fn test_parse_gene_xrefs_ids() {
        let json = json!({
            "InformationList": {
                "Information": [{ "CID": 2244, "GeneID": [5743, 5742] }]
            }
        });
        assert_eq!(parse_gene_xrefs(&json), GeneXrefs::Ids(vec![5743, 5742]));
    }

    #[test]
    fn test_parse_gene_xrefs_empty_list() {
        let json = json!({
            "InformationList": { "Information": [{ "CID": 2244, "GeneID": [] }] }
        });
        assert_eq!(parse_gene_xrefs(&json), GeneXrefs::Empty);

        let json = json!({
            "InformationList": { "Information": [{ "CID": 2244 }] }
        });
        assert_eq!(parse_gene_xrefs(&json), GeneXrefs::Empty);
    }

    #[test]
    fn test_parse_gene_xrefs_missing_envelope() {
        assert_eq!(parse_gene_xrefs(&json!({ "Fault": {} })), GeneXrefs::Unavailable);
        assert_eq!(
            parse_gene_xrefs(&json!({ "InformationList": { "Information": [] } })),
            GeneXrefs::Unavailable
        );
    }

    #[test]
    fn test_parse_gene_summary() {
        let json = json!({
            "GeneSummaries": {
                "GeneSummary": [{
                    "GeneID": 5743,
                    "Symbol": "PTGS2",
                    "Synonym": ["COX-2", "COX2", "PGG/HS"],
                    "Description": "prostaglandin-endoperoxide synthase 2"
                }]
            }
        });
        let summary = parse_gene_summary(&json, 5743).unwrap();
        assert_eq!(summary.symbol.as_deref(), Some("PTGS2"));
        assert_eq!(summary.synonym.as_deref(), Some("COX-2"));
        assert_eq!(
            summary.description.as_deref(),
            Some("prostaglandin-endoperoxide synthase 2")
        );
    }

    #[test]
    fn test_parse_gene_summary_sparse_record() {
        let json = json!({
            "GeneSummaries": { "GeneSummary": [{ "GeneID": 5743 }] }
        });
        let summary = parse_gene_summary(&json, 5743).unwrap();
        assert!(summary.symbol.is_none());
        assert!(summary.synonym.is_none());
        assert!(summary.description.is_none());
    }

    #[test]
    fn test_parse_gene_summary_missing_envelope() {
        assert!(parse_gene_summary(&json!({}), 5743).is_none());
        assert!(parse_gene_summary(&json!({ "GeneSummaries": { "GeneSummary": [] } }), 5743).is_none());
    }

    #[test]
    fn test_smiles_percent_encoding() {
        // '#' would otherwise start a URL fragment, '/' a new path segment.
        let encoded = urlencoding::encode("C1=CC=C(C=C1)/C=C/C#N");
        assert!(!encoded.contains('#'));
        assert!(!encoded.contains('/'));
        assert!(encoded.contains("%23"));
        assert!(encoded.contains("%2F"));
    }
}
