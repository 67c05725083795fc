//! Shared domain types.
//!
//! These are plain values: each pipeline stage takes its input by reference
//! and hands a new value to the next stage.

use std::path::PathBuf;

use chrono::{NaiveDate, Weekday};
use clap::ValueEnum;
use serde::Deserialize;

/// GitHub's calendar starts every week column on Sunday.
pub const WEEK_START: Weekday = Weekday::Sun;

pub const DEFAULT_OUTPUT_PATH: &str = "assets/combined-heatmap.svg";
pub const DEFAULT_CELL_SIZE: u32 = 9;
pub const DEFAULT_CELL_GAP: u32 = 1;

/// One identity's contribution count for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ContributionDay {
    pub date: NaiveDate,
    #[serde(rename = "contributionCount")]
    pub count: u32,
}

impl ContributionDay {
    pub fn new(date: NaiveDate, count: u32) -> Self {
        Self { date, count }
    }
}

/// How the merged series is split into calendar grids.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Layout {
    /// One grid per calendar year, stacked top to bottom.
    ///
    /// Each year is aligned on its own January 1, so the last days of
    /// December can show up again in the first column of the next year.
    #[default]
    Yearly,
    /// A single grid from the first observed day to the last one.
    Continuous,
}

/// Pixel geometry of a heatmap cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub size: u32,
    pub gap: u32,
}

impl CellStyle {
    /// Distance between the origins of two neighbouring cells.
    pub fn pitch(self) -> u32 {
        self.size + self.gap
    }
}

impl Default for CellStyle {
    fn default() -> Self {
        Self {
            size: DEFAULT_CELL_SIZE,
            gap: DEFAULT_CELL_GAP,
        }
    }
}

/// Fully resolved settings for a single run.
#[derive(Clone)]
pub struct HeatmapConfig {
    pub token: String,
    pub user_1: String,
    pub user_2: String,
    pub output: PathBuf,
    pub cell: CellStyle,
    pub layout: Layout,
    /// Earliest day to fetch. Clamped to each account's creation date.
    pub since: Option<NaiveDate>,
    /// Last day to fetch; today's UTC date when absent.
    pub until: Option<NaiveDate>,
}

impl HeatmapConfig {
    pub fn identities(&self) -> [&str; 2] {
        [&self.user_1, &self.user_2]
    }
}

// Hand-written so the credential never ends up in debug logs.
impl std::fmt::Debug for HeatmapConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeatmapConfig")
            .field("token", &"<redacted>")
            .field("user_1", &self.user_1)
            .field("user_2", &self.user_2)
            .field("output", &self.output)
            .field("cell", &self.cell)
            .field("layout", &self.layout)
            .field("since", &self.since)
            .field("until", &self.until)
            .finish()
    }
}
