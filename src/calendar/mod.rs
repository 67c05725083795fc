//! Date handling between fetch and render.
//!
//! - summing identities into one series (`merge`)
//! - week-aligned grids, continuous or per year (`align`)

pub mod align;
pub mod merge;

pub use align::*;
pub use merge::*;
