//! congener-harvest — Table accumulation, spreadsheet export, and the
//! end-to-end harvest pipeline.

pub mod accumulator;
pub mod export;
pub mod models;
pub mod pipeline;

// Re-export commonly used types
pub use accumulator::{read_rows, Accumulator, TABLE_HEADER};
pub use export::{export_spreadsheets, ExportSummary};
pub use models::{CompoundRow, NO_DATA};
pub use pipeline::{default_drugs, run_harvest, HarvestJob, HarvestResult};
