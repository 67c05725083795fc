//! The heatmap pipeline: fetch -> merge -> align -> render -> stack.
//!
//! Nothing here touches the filesystem or the process environment, so the
//! whole flow can be driven by a fake `ContributionSource` in tests.

use chrono::NaiveDate;
use log::info;

use crate::calendar::{CalendarGrid, MergedSeries, combine, continuous_grid, yearly_grids};
use crate::data::ContributionSource;
use crate::domain::{CellStyle, ContributionDay, HeatmapConfig, Layout, WEEK_START};
use crate::error::AppError;
use crate::render::{RenderedBlock, render_grid, stack};
use crate::report::SeriesStats;

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct HeatmapRun {
    pub merged: MergedSeries,
    pub grids: Vec<CalendarGrid>,
    pub blocks: Vec<RenderedBlock>,
    pub stats: SeriesStats,
    pub svg: String,
}

/// Fetch both identities and render the combined heatmap.
pub fn run_heatmap<S: ContributionSource>(
    config: &HeatmapConfig,
    source: &S,
    today: NaiveDate,
) -> Result<HeatmapRun, AppError> {
    let end = config.until.unwrap_or(today);
    let [user_1, user_2] = config.identities();

    let days_1 = fetch_identity(source, user_1, config.since, end)?;
    let days_2 = fetch_identity(source, user_2, config.since, end)?;

    let merged = combine(&days_1, &days_2);
    Ok(render_merged(merged, config.layout, config.cell))
}

/// Render an already merged series.
pub fn render_merged(merged: MergedSeries, layout: Layout, cell: CellStyle) -> HeatmapRun {
    let grids = build_grids(&merged, layout);
    let blocks: Vec<RenderedBlock> = grids
        .iter()
        .map(|grid| render_grid(grid, &merged, cell))
        .collect();
    let svg = stack(&blocks);
    let stats = SeriesStats::from_series(&merged);

    HeatmapRun {
        merged,
        grids,
        blocks,
        stats,
        svg,
    }
}

pub fn build_grids(merged: &MergedSeries, layout: Layout) -> Vec<CalendarGrid> {
    match layout {
        Layout::Yearly => yearly_grids(merged, WEEK_START),
        Layout::Continuous => continuous_grid(merged, WEEK_START).into_iter().collect(),
    }
}

fn fetch_identity<S: ContributionSource>(
    source: &S,
    login: &str,
    since: Option<NaiveDate>,
    end: NaiveDate,
) -> Result<Vec<ContributionDay>, AppError> {
    let created = source.account_created(login)?;
    let start = since.map_or(created, |s| s.max(created));
    if start > end {
        info!("skipping {login}: nothing between {start} and {end}");
        return Ok(Vec::new());
    }

    let days = source.contributions(login, start, end)?;
    info!("fetched {} days for {login} ({start}..{end})", days.len());
    Ok(days)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    /// In-memory source that records every range it is asked for.
    #[derive(Default)]
    pub(crate) struct FakeSource {
        pub accounts: HashMap<String, (NaiveDate, Vec<ContributionDay>)>,
        pub requests: RefCell<Vec<(String, NaiveDate, NaiveDate)>>,
    }

    impl FakeSource {
        pub(crate) fn with_account(mut self, login: &str, created: NaiveDate, days: Vec<ContributionDay>) -> Self {
            self.accounts.insert(login.to_string(), (created, days));
            self
        }
    }

    impl ContributionSource for FakeSource {
        fn account_created(&self, login: &str) -> Result<NaiveDate, AppError> {
            self.accounts
                .get(login)
                .map(|(created, _)| *created)
                .ok_or_else(|| AppError::fetch(format!("GitHub user '{login}' not found.")))
        }

        fn contributions(
            &self,
            login: &str,
            from: NaiveDate,
            to: NaiveDate,
        ) -> Result<Vec<ContributionDay>, AppError> {
            self.requests.borrow_mut().push((login.to_string(), from, to));
            let (_, days) = self
                .accounts
                .get(login)
                .ok_or_else(|| AppError::fetch(format!("GitHub user '{login}' not found.")))?;
            Ok(days
                .iter()
                .filter(|x| x.date >= from && x.date <= to)
                .copied()
                .collect())
        }
    }

    fn config(layout: Layout) -> HeatmapConfig {
        HeatmapConfig {
            token: "token".to_string(),
            user_1: "alice".to_string(),
            user_2: "bob".to_string(),
            output: PathBuf::from("unused.svg"),
            cell: CellStyle::default(),
            layout,
            since: None,
            until: None,
        }
    }

    #[test]
    fn two_accounts_merge_into_one_grid() {
        let source = FakeSource::default()
            .with_account("alice", d(2023, 6, 1), vec![ContributionDay::new(d(2024, 1, 1), 2)])
            .with_account(
                "bob",
                d(2020, 1, 1),
                vec![
                    ContributionDay::new(d(2024, 1, 1), 3),
                    ContributionDay::new(d(2024, 1, 2), 1),
                ],
            );

        let run = run_heatmap(&config(Layout::Continuous), &source, d(2024, 1, 2)).unwrap();

        assert_eq!(run.merged.len(), 2);
        assert_eq!(run.merged.get(d(2024, 1, 1)), 5);
        assert_eq!(run.merged.get(d(2024, 1, 2)), 1);

        assert_eq!(run.grids.len(), 1);
        assert_eq!(run.grids[0].days(), &[d(2023, 12, 31), d(2024, 1, 1), d(2024, 1, 2)]);

        assert!(run.svg.contains("fill='#ebedf0'><title>2023-12-31: 0 contributions</title>"));
        assert!(run.svg.contains("fill='#40c463'><title>2024-01-01: 5 contributions</title>"));
        assert!(run.svg.contains("fill='#9be9a8'><title>2024-01-02: 1 contributions</title>"));
        assert_eq!(run.svg.matches("<rect").count(), 3);
    }

    #[test]
    fn each_account_is_fetched_from_creation_to_today() {
        let source = FakeSource::default()
            .with_account("alice", d(2019, 4, 2), Vec::new())
            .with_account("bob", d(2021, 8, 9), Vec::new());

        run_heatmap(&config(Layout::Yearly), &source, d(2024, 10, 1)).unwrap();

        let requests = source.requests.borrow();
        assert_eq!(
            *requests,
            vec![
                ("alice".to_string(), d(2019, 4, 2), d(2024, 10, 1)),
                ("bob".to_string(), d(2021, 8, 9), d(2024, 10, 1)),
            ]
        );
    }

    #[test]
    fn since_is_clamped_to_account_creation() {
        let source = FakeSource::default()
            .with_account("alice", d(2019, 4, 2), Vec::new())
            .with_account("bob", d(2023, 8, 9), Vec::new());

        let mut cfg = config(Layout::Yearly);
        cfg.since = Some(d(2022, 1, 1));
        cfg.until = Some(d(2023, 1, 1));
        run_heatmap(&cfg, &source, d(2024, 10, 1)).unwrap();

        // bob did not exist yet within the window, so only alice is queried.
        let requests = source.requests.borrow();
        assert_eq!(*requests, vec![("alice".to_string(), d(2022, 1, 1), d(2023, 1, 1))]);
    }

    #[test]
    fn empty_history_renders_an_empty_document() {
        let source = FakeSource::default()
            .with_account("alice", d(2024, 1, 1), Vec::new())
            .with_account("bob", d(2024, 1, 1), Vec::new());

        for layout in [Layout::Yearly, Layout::Continuous] {
            let run = run_heatmap(&config(layout), &source, d(2024, 1, 5)).unwrap();
            assert!(run.merged.is_empty());
            assert!(run.grids.is_empty());
            assert_eq!(run.svg.matches("<rect").count(), 0);
            assert!(run.svg.starts_with("<svg xmlns='http://www.w3.org/2000/svg' width='100' height='0'"));
            assert!(run.svg.trim_end().ends_with("</svg>"));
        }
    }

    #[test]
    fn yearly_layout_stacks_one_block_per_year() {
        let source = FakeSource::default()
            .with_account(
                "alice",
                d(2022, 1, 1),
                vec![
                    ContributionDay::new(d(2023, 12, 31), 20),
                    ContributionDay::new(d(2024, 3, 1), 1),
                ],
            )
            .with_account("bob", d(2022, 1, 1), Vec::new());

        let run = run_heatmap(&config(Layout::Yearly), &source, d(2024, 3, 1)).unwrap();

        assert_eq!(run.blocks.len(), 2);
        assert!(run.svg.contains("<g transform='translate(0,0)'>"));
        let second_offset = run.blocks[0].height + 6;
        assert!(run.svg.contains(&format!("<g transform='translate(0,{second_offset})'>")));

        // The shared Sunday shows its real count in both years.
        assert_eq!(
            run.svg.matches("<title>2023-12-31: 20 contributions</title>").count(),
            2
        );
    }

    #[test]
    fn fetch_errors_abort_the_run() {
        let source = FakeSource::default().with_account("alice", d(2024, 1, 1), Vec::new());
        let err = run_heatmap(&config(Layout::Yearly), &source, d(2024, 1, 5)).unwrap_err();
        assert_eq!(err.exit_code(), 4);
        assert_eq!(err.message(), "GitHub user 'bob' not found.");
    }

    #[test]
    fn rendering_twice_is_byte_identical() {
        let days = vec![
            ContributionDay::new(d(2022, 5, 4), 9),
            ContributionDay::new(d(2023, 7, 1), 16),
        ];
        let merged = combine(&days, &[]);
        let first = render_merged(merged.clone(), Layout::Yearly, CellStyle::default());
        let second = render_merged(merged, Layout::Yearly, CellStyle::default());
        assert_eq!(first.svg, second.svg);
    }
}
