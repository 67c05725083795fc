//! Top-level application orchestration.
//!
//! `src/main.rs` only maps the result to an exit code; this module is the
//! "real main" that:
//! - parses CLI arguments and loads `.env`
//! - resolves the run configuration (before any network call)
//! - runs the fetch/merge/render pipeline
//! - writes the SVG

use std::path::PathBuf;

use chrono::{NaiveDate, Utc};
use clap::Parser;
use log::{debug, info};

use crate::cli::Cli;
use crate::data::{ContributionSource, GitHubClient};
use crate::domain::{CellStyle, DEFAULT_CELL_GAP, DEFAULT_CELL_SIZE, DEFAULT_OUTPUT_PATH, HeatmapConfig};
use crate::error::AppError;

pub mod pipeline;

const ENV_TOKEN: &str = "GH_TOKEN";
const ENV_USER_1: &str = "USER_1";
const ENV_USER_2: &str = "USER_2";
const ENV_OUTPUT_PATH: &str = "OUTPUT_PATH";
const ENV_CELL_SIZE: &str = "CELL_SIZE";
const ENV_CELL_GAP: &str = "CELL_GAP";

/// Entry point for the binary. Returns the path that was written.
pub fn run() -> Result<PathBuf, AppError> {
    let cli = Cli::parse();

    // Load `.env` first so it can also carry RUST_LOG.
    dotenvy::dotenv().ok();
    init_logging(cli.verbose);

    let today = Utc::now().date_naive();
    execute(
        &cli,
        |key: &str| std::env::var(key).ok(),
        today,
        |config: &HeatmapConfig| GitHubClient::new(config.token.clone()),
    )
}

/// Resolve configuration, connect, render and write.
///
/// `connect` is only called once the configuration is known to be valid, so
/// a missing credential never reaches the network.
pub fn execute<L, C, S>(cli: &Cli, lookup: L, today: NaiveDate, connect: C) -> Result<PathBuf, AppError>
where
    L: Fn(&str) -> Option<String>,
    C: FnOnce(&HeatmapConfig) -> Result<S, AppError>,
    S: ContributionSource,
{
    let config = config_from_args(cli, lookup)?;
    debug!("resolved {config:?}");

    let source = connect(&config)?;
    let run = pipeline::run_heatmap(&config, &source, today)?;
    info!("{}", crate::report::format_summary(&run.stats, run.grids.len()));

    crate::io::write_svg(&config.output, &run.svg)?;
    Ok(config.output)
}

/// Merge CLI flags over environment values over defaults.
pub fn config_from_args<L>(cli: &Cli, lookup: L) -> Result<HeatmapConfig, AppError>
where
    L: Fn(&str) -> Option<String>,
{
    let env = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    let token = env(ENV_TOKEN).ok_or_else(|| AppError::config(format!("{ENV_TOKEN} not set.")))?;
    let user_1 = cli
        .user_1
        .clone()
        .or_else(|| env(ENV_USER_1))
        .ok_or_else(|| AppError::config(format!("{ENV_USER_1} not set (or pass --user-1).")))?;
    let user_2 = cli
        .user_2
        .clone()
        .or_else(|| env(ENV_USER_2))
        .ok_or_else(|| AppError::config(format!("{ENV_USER_2} not set (or pass --user-2).")))?;

    let output = cli
        .output
        .clone()
        .or_else(|| env(ENV_OUTPUT_PATH).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH));

    let size = match cli.cell_size {
        Some(v) => v,
        None => parse_env_u32(env(ENV_CELL_SIZE), ENV_CELL_SIZE, DEFAULT_CELL_SIZE)?,
    };
    let gap = match cli.cell_gap {
        Some(v) => v,
        None => parse_env_u32(env(ENV_CELL_GAP), ENV_CELL_GAP, DEFAULT_CELL_GAP)?,
    };
    if size == 0 {
        return Err(AppError::config("Cell size must be > 0."));
    }
    if size.checked_add(gap).is_none() {
        return Err(AppError::config(format!(
            "Cell size ({size}) plus cell gap ({gap}) is too large."
        )));
    }

    if let (Some(since), Some(until)) = (cli.since, cli.until) {
        if since > until {
            return Err(AppError::config(format!(
                "--since ({since}) is after --until ({until})."
            )));
        }
    }

    Ok(HeatmapConfig {
        token,
        user_1: user_1.trim().to_string(),
        user_2: user_2.trim().to_string(),
        output,
        cell: CellStyle { size, gap },
        layout: cli.layout,
        since: cli.since,
        until: cli.until,
    })
}

fn parse_env_u32(raw: Option<String>, key: &str, default: u32) -> Result<u32, AppError> {
    match raw {
        None => Ok(default),
        Some(v) => v
            .trim()
            .parse()
            .map_err(|e| AppError::config(format!("Invalid {key} '{v}': {e}"))),
    }
}

fn init_logging(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    // `try_init` so a second initialization is a no-op instead of a panic.
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .try_init();
}
