//! congener-pubchem — PubChem PUG REST client used by the harvest pipeline.

pub mod client;
pub mod models;
pub mod source;

// Re-export commonly used types
pub use client::PubChemClient;
pub use models::{CompoundProperties, GeneSummary, GeneXrefs};
pub use source::CompoundSource;
