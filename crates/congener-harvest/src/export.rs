//! Spreadsheet export of the harvested table.
//!
//! Two workbooks are produced from the same CSV table: a verbatim copy, and
//! a cleaned one from which every row carrying the "No data available"
//! sentinel in any column is dropped whole.

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, XlsxError};
use tracing::info;

use congener_common::{CongenerError, Result};

use crate::accumulator::{read_rows, TABLE_HEADER};
use crate::models::CompoundRow;

/// Row counts of the two exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportSummary {
    pub total_rows: usize,
    pub cleaned_rows: usize,
}

/// Export the table to `spreadsheet` in full and to `cleaned_spreadsheet`
/// with sentinel-carrying rows removed.
///
/// Runs after both normal completion and a fatal harvest error, so whatever
/// the table holds on disk is what gets exported.
pub fn export_spreadsheets(
    table: &Path,
    spreadsheet: &Path,
    cleaned_spreadsheet: &Path,
) -> Result<ExportSummary> {
    let rows = read_rows(table)?;
    let cleaned: Vec<CompoundRow> = rows.iter().filter(|r| !r.has_sentinel()).cloned().collect();

    write_workbook(spreadsheet, &rows)
        .map_err(|e| CongenerError::Export(format!("{:?}: {}", spreadsheet, e)))?;
    write_workbook(cleaned_spreadsheet, &cleaned)
        .map_err(|e| CongenerError::Export(format!("{:?}: {}", cleaned_spreadsheet, e)))?;

    let summary = ExportSummary {
        total_rows: rows.len(),
        cleaned_rows: cleaned.len(),
    };
    info!(
        spreadsheet = ?spreadsheet,
        cleaned_spreadsheet = ?cleaned_spreadsheet,
        total_rows = summary.total_rows,
        cleaned_rows = summary.cleaned_rows,
        "Exported spreadsheets"
    );
    Ok(summary)
}

/// Write one workbook: bold header row, then one sheet row per table row.
fn write_workbook(path: &Path, rows: &[CompoundRow]) -> std::result::Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    let bold = Format::new().set_bold();

    for (col, name) in TABLE_HEADER.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *name, &bold)?;
    }

    for (i, row) in rows.iter().enumerate() {
        for (col, cell) in row.cells().iter().enumerate() {
            sheet.write_string((i + 1) as u32, col as u16, *cell)?;
        }
    }

    workbook.save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accumulator::Accumulator;
    use crate::models::NO_DATA;

    fn row(drug: &str, weight: &str) -> CompoundRow {
        CompoundRow {
            drug: drug.to_string(),
            molecular_formula: "C9H8O4".to_string(),
            molecular_weight: weight.to_string(),
            smiles: "CC(=O)OC1=CC=CC=C1C(=O)O".to_string(),
            genes: "PTGS2".to_string(),
        }
    }

    #[test]
    fn test_export_filters_sentinel_rows() {
        let dir = tempfile::tempdir().unwrap();
        let table = dir.path().join("similar_compounds.csv");
        let xlsx = dir.path().join("similar_compounds.xlsx");
        let cleaned = dir.path().join("similar_compounds_cleaned.xlsx");

        let mut acc = Accumulator::open(&table).unwrap();
        acc.append(111, &row("Aspirin", "180.16")).unwrap();
        acc.append(222, &row("Mystery compound", NO_DATA)).unwrap();
        acc.append(333, &row("Salicylic acid", "138.12")).unwrap();

        let summary = export_spreadsheets(&table, &xlsx, &cleaned).unwrap();

        assert_eq!(summary.total_rows, 3);
        assert_eq!(summary.cleaned_rows, 2);
        assert!(xlsx.exists());
        assert!(cleaned.exists());
        assert!(std::fs::metadata(&xlsx).unwrap().len() > 0);
        assert!(std::fs::metadata(&cleaned).unwrap().len() > 0);
    }

    #[test]
    fn test_export_of_empty_table() {
        let dir = tempfile::tempdir().unwrap();
        let table = dir.path().join("similar_compounds.csv");
        let xlsx = dir.path().join("similar_compounds.xlsx");
        let cleaned = dir.path().join("similar_compounds_cleaned.xlsx");

        Accumulator::open(&table).unwrap();

        let summary = export_spreadsheets(&table, &xlsx, &cleaned).unwrap();
        assert_eq!(summary.total_rows, 0);
        assert_eq!(summary.cleaned_rows, 0);
        assert!(xlsx.exists());
        assert!(cleaned.exists());
    }

    #[test]
    fn test_export_missing_table_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = export_spreadsheets(
            &dir.path().join("absent.csv"),
            &dir.path().join("a.xlsx"),
            &dir.path().join("b.xlsx"),
        );
        assert!(err.is_err());
    }
}
