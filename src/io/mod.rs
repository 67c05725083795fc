//! Output helpers.

pub mod export;

pub use export::*;
