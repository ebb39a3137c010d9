//! Output table rows and the missing-data sentinel.

use serde::{Deserialize, Serialize};

use congener_pubchem::CompoundProperties;

/// Literal written wherever the source had no data for a cell.
pub const NO_DATA: &str = "No data available";

/// One row of the output table.
///
/// Field names serialise to the exact CSV header the table has always
/// carried, so existing files keep appending cleanly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompoundRow {
    #[serde(rename = "Drug")]
    pub drug: String,
    #[serde(rename = "Molecular Formula")]
    pub molecular_formula: String,
    #[serde(rename = "Molecular Weight")]
    pub molecular_weight: String,
    #[serde(rename = "SMILES ID")]
    pub smiles: String,
    #[serde(rename = "Associated Genes")]
    pub genes: String,
}

impl CompoundRow {
    /// Assemble a row, rendering absent fields as the sentinel.
    ///
    /// The genes cell joins the resolved symbols and may be empty when none
    /// of the compound's gene summaries carried one.
    pub fn from_parts(
        properties: &CompoundProperties,
        smiles: Option<String>,
        gene_symbols: &[String],
    ) -> Self {
        Self {
            drug: properties
                .title
                .clone()
                .unwrap_or_else(|| NO_DATA.to_string()),
            molecular_formula: properties
                .molecular_formula
                .clone()
                .unwrap_or_else(|| NO_DATA.to_string()),
            molecular_weight: properties
                .molecular_weight
                .clone()
                .unwrap_or_else(|| NO_DATA.to_string()),
            smiles: smiles.unwrap_or_else(|| NO_DATA.to_string()),
            genes: gene_symbols.join(", "),
        }
    }

    /// Cells in header order.
    pub fn cells(&self) -> [&str; 5] {
        [
            &self.drug,
            &self.molecular_formula,
            &self.molecular_weight,
            &self.smiles,
            &self.genes,
        ]
    }

    /// True when any cell carries the sentinel.
    pub fn has_sentinel(&self) -> bool {
        self.cells().iter().any(|cell| *cell == NO_DATA)
    }
}
