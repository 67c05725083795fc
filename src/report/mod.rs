//! Run summary for the merged series.

use chrono::NaiveDate;

use crate::calendar::MergedSeries;

/// Headline numbers for a merged series.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeriesStats {
    pub total: u64,
    pub active_days: usize,
    /// Highest single-day count; the earliest date wins ties.
    pub busiest: Option<(NaiveDate, u64)>,
    pub span: Option<(NaiveDate, NaiveDate)>,
}

impl SeriesStats {
    pub fn from_series(series: &MergedSeries) -> Self {
        let mut stats = Self::default();
        for (date, count) in series.iter() {
            stats.total += count;
            if count > 0 {
                stats.active_days += 1;
            }
            if count > 0 && stats.busiest.is_none_or(|(_, best)| count > best) {
                stats.busiest = Some((date, count));
            }
        }
        stats.span = series.first_date().zip(series.last_date());
        stats
    }
}

/// One-line description of the merged series, e.g. for logging.
pub fn format_summary(stats: &SeriesStats, grids: usize) -> String {
    let mut out = format!(
        "{} contributions over {} active days in {} grid(s)",
        stats.total, stats.active_days, grids
    );
    if let Some((first, last)) = stats.span {
        out.push_str(&format!(" | span {first}..{last}"));
    }
    if let Some((date, count)) = stats.busiest {
        out.push_str(&format!(" | busiest {date} ({count})"));
    }
    out
}
