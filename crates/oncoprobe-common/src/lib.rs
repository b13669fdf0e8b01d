//! oncoprobe-common — Shared types, errors, and the sandboxed HTTP client
//! used across all Oncoprobe crates.

pub mod error;
pub mod records;
pub mod sandbox;

// Re-export commonly used types
pub use error::{OncoprobeError, Result};
pub use records::{DrugReport, PredictionLabel, PubChemRecord};
