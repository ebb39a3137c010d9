//! Configuration for the harvester binary.
//!
//! Settings are read from `congener.toml` in the working directory, or from
//! the path in the `CONGENER_CONFIG` environment variable. Every field has a
//! default matching the historical harvest run, so a missing file simply
//! reproduces that run.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use congener_harvest::{default_drugs, HarvestJob};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Drug names to seed the similarity search with.
    #[serde(default = "default_drugs")]
    pub drugs: Vec<String>,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Tanimoto similarity threshold for the 2D similarity search (0-100).
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: u8,
    /// Maximum candidate CIDs returned per seed structure.
    #[serde(default = "default_max_records")]
    pub max_records: u32,
    /// Pause between PubChem requests while enriching candidates.
    #[serde(default = "default_courtesy_delay_secs")]
    pub courtesy_delay_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// CSV table the harvest appends to.
    #[serde(default = "default_table")]
    pub table: String,
    /// Spreadsheet holding every harvested row.
    #[serde(default = "default_spreadsheet")]
    pub spreadsheet: String,
    /// Spreadsheet holding only rows with no missing fields.
    #[serde(default = "default_cleaned_spreadsheet")]
    pub cleaned_spreadsheet: String,
}

fn default_similarity_threshold() -> u8 {
    85
}
fn default_max_records() -> u32 {
    100
}
fn default_courtesy_delay_secs() -> u64 {
    2
}
fn default_table() -> String {
    "similar_compounds.csv".to_string()
}
fn default_spreadsheet() -> String {
    "similar_compounds.xlsx".to_string()
}
fn default_cleaned_spreadsheet() -> String {
    "similar_compounds_cleaned.xlsx".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            drugs: default_drugs(),
            search: SearchConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: default_similarity_threshold(),
            max_records: default_max_records(),
            courtesy_delay_secs: default_courtesy_delay_secs(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            table: default_table(),
            spreadsheet: default_spreadsheet(),
            cleaned_spreadsheet: default_cleaned_spreadsheet(),
        }
    }
}

impl Config {
    /// Loads the configuration, falling back to defaults when no file exists.
    ///
    /// `CONGENER_CONFIG` overrides the file path. A file that exists but
    /// fails to read or parse is an error; silently harvesting with the
    /// wrong settings would be worse than stopping.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONGENER_CONFIG").unwrap_or_else(|_| "congener.toml".to_string());

        if !Path::new(&path).exists() {
            warn!("Config file not found: {path}, running with built-in defaults");
            warn!("Copy congener.example.toml to congener.toml to customise the harvest");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// The harvest job described by this configuration.
    pub fn job(&self) -> HarvestJob {
        HarvestJob {
            drugs: self.drugs.clone(),
            similarity_threshold: self.search.similarity_threshold,
            max_records: self.search.max_records,
            courtesy_delay: Duration::from_secs(self.search.courtesy_delay_secs),
        }
    }
}
