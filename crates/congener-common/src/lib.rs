//! congener-common — Shared error type and HTTP client construction used across all Congener crates.

pub mod error;
pub mod http;

// Re-export commonly used types
pub use error::{CongenerError, Result};
pub use http::build_client;
