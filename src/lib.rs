//! `contrib-heatmap` library crate.
//!
//! The binary is a thin wrapper around this library so the pipeline stages
//! (merge, align, render) can be tested without network access or spawning
//! processes.

pub mod app;
pub mod calendar;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod render;
pub mod report;
