//! Records returned by the PubChem PUG REST endpoints.

use serde::{Deserialize, Serialize};

/// Compound property record from the PubChem property tables.
///
/// PubChem serialises `MolecularWeight` as a JSON string, so it is carried
/// verbatim rather than parsed into a float.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompoundProperties {
    pub cid: u64,
    pub title: Option<String>,
    pub molecular_formula: Option<String>,
    pub molecular_weight: Option<String>,
}

/// First summary record for an NCBI gene.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneSummary {
    pub gene_id: u64,
    pub symbol: Option<String>,
    pub synonym: Option<String>,
    pub description: Option<String>,
}

/// Outcome of a compound → GeneID cross-reference lookup.
///
/// `Unavailable` and `Empty` both fail the acceptance gate, but stay distinct
/// so logs can tell a failed fetch from a compound with no gene records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneXrefs {
    /// Transport failure, non-success status, or missing envelope key.
    Unavailable,
    /// The record exists but lists no genes.
    Empty,
    /// Cross-referenced NCBI GeneIDs.
    Ids(Vec<u64>),
}

impl GeneXrefs {
    /// True when the lookup produced at least one gene identifier.
    pub fn has_ids(&self) -> bool {
        matches!(self, GeneXrefs::Ids(ids) if !ids.is_empty())
    }

    /// Gene identifiers, empty for the non-`Ids` variants.
    pub fn ids(&self) -> &[u64] {
        match self {
            GeneXrefs::Ids(ids) => ids,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compound_properties_serialization() {
        let props = CompoundProperties {
            cid: 2244,
            title: Some("Aspirin".to_string()),
            molecular_formula: Some("C9H8O4".to_string()),
            molecular_weight: Some("180.16".to_string()),
        };
        let json = serde_json::to_string(&props).unwrap();
        assert!(json.contains("Aspirin"));
        assert!(json.contains("C9H8O4"));
        assert!(json.contains("180.16"));
    }

    #[test]
    fn test_gene_summary_serialization() {
        let summary = GeneSummary {
            gene_id: 5743,
            symbol: Some("PTGS2".to_string()),
            synonym: Some("COX-2".to_string()),
            description: Some("prostaglandin-endoperoxide synthase 2".to_string()),
        };
        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("PTGS2"));
        assert!(json.contains("COX-2"));
    }

    #[test]
    fn test_gene_xrefs_has_ids() {
        assert!(GeneXrefs::Ids(vec![5743]).has_ids());
        assert!(!GeneXrefs::Ids(vec![]).has_ids());
        assert!(!GeneXrefs::Empty.has_ids());
        assert!(!GeneXrefs::Unavailable.has_ids());
    }

    #[test]
    fn test_gene_xrefs_ids_accessor() {
        assert_eq!(GeneXrefs::Ids(vec![1, 2]).ids(), &[1, 2]);
        assert!(GeneXrefs::Empty.ids().is_empty());
        assert!(GeneXrefs::Unavailable.ids().is_empty());
    }
}
