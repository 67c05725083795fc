//! Heatmap rendering: color bands and SVG layout.

pub mod palette;
pub mod svg;

pub use palette::{BANDS, Band, color_for, level};
pub use svg::{RenderedBlock, render_grid, stack};
