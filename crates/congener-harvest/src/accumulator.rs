//! Append-only CSV table with per-run dedup.
//!
//! The table survives across runs: the header is written once when the file
//! is created and later runs append below whatever is already there. The
//! done-set is per-run only, guarding against duplicate candidate CIDs
//! within one harvest.

use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use congener_common::Result;

use crate::models::CompoundRow;

/// Column header of the output table.
pub const TABLE_HEADER: [&str; 5] = [
    "Drug",
    "Molecular Formula",
    "Molecular Weight",
    "SMILES ID",
    "Associated Genes",
];

/// Append-only on-disk table of harvested compounds plus the per-run
/// done-set.
pub struct Accumulator {
    path: PathBuf,
    writer: csv::Writer<File>,
    done: HashSet<u64>,
    written: usize,
}

impl Accumulator {
    /// Open the table at `path`, writing the header only when the file is
    /// new. An existing table is appended to as-is.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let is_new = !path.exists();

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if is_new {
            writer.write_record(TABLE_HEADER)?;
            writer.flush()?;
            info!(path = ?path, "Created new output table");
        } else {
            debug!(path = ?path, "Appending to existing output table");
        }

        Ok(Self {
            path,
            writer,
            done: HashSet::new(),
            written: 0,
        })
    }

    /// Path of the on-disk table.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True when this run already wrote a row for `cid`.
    pub fn is_done(&self, cid: u64) -> bool {
        self.done.contains(&cid)
    }

    /// Append one row, flush it to disk, and mark `cid` done.
    ///
    /// The done-set is only updated after a successful write, so a candidate
    /// that failed the gate earlier can still be written when it recurs.
    pub fn append(&mut self, cid: u64, row: &CompoundRow) -> Result<()> {
        self.writer.serialize(row)?;
        self.writer.flush()?;
        self.done.insert(cid);
        self.written += 1;
        Ok(())
    }

    /// Rows successfully written in this run.
    pub fn written(&self) -> usize {
        self.written
    }
}

/// Read the whole table back for export.
pub fn read_rows<P: AsRef<Path>>(path: P) -> Result<Vec<CompoundRow>> {
    let mut reader = csv::Reader::from_path(path.as_ref())?;

    let mut rows = Vec::new();
    for result in reader.deserialize() {
        let row: CompoundRow = result?;
        rows.push(row);
    }
    Ok(rows)
}
