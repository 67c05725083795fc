//! Domain types used throughout the pipeline.
//!
//! - per-identity observations (`ContributionDay`)
//! - grid layout choice and cell geometry (`Layout`, `CellStyle`)
//! - resolved run settings (`HeatmapConfig`)

pub mod types;

pub use types::*;
