//! Command-line parsing for the heatmap generator.
//!
//! Every flag is optional: values not given here fall back to the
//! environment (or `.env`), then to built-in defaults. Resolution happens in
//! `app::config_from_args`.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{ArgAction, Parser};

use crate::domain::Layout;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "contrib-heatmap",
    version,
    about = "Render a combined GitHub contribution heatmap for two accounts as SVG"
)]
pub struct Cli {
    /// First GitHub login (overrides USER_1).
    #[arg(long = "user-1", value_name = "LOGIN")]
    pub user_1: Option<String>,

    /// Second GitHub login (overrides USER_2).
    #[arg(long = "user-2", value_name = "LOGIN")]
    pub user_2: Option<String>,

    /// Output SVG path (overrides OUTPUT_PATH).
    #[arg(short = 'o', long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Cell edge length in pixels (overrides CELL_SIZE).
    #[arg(long)]
    pub cell_size: Option<u32>,

    /// Gap between cells in pixels (overrides CELL_GAP).
    #[arg(long)]
    pub cell_gap: Option<u32>,

    /// One grid per year, or a single continuous grid.
    #[arg(long, value_enum, default_value_t = Layout::Yearly)]
    pub layout: Layout,

    /// Earliest day to include; defaults to each account's creation date.
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub since: Option<NaiveDate>,

    /// Last day to include; defaults to today (UTC).
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub until: Option<NaiveDate>,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
