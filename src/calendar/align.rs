//! Week-aligned day sequences and their grid positions.
//!
//! A grid always starts on the week-start weekday, so the row of a date is
//! just its offset from the boundary modulo 7 and the column is the offset
//! divided by 7.

use chrono::{Datelike, Days, NaiveDate, Weekday};

use super::merge::MergedSeries;

pub const DAYS_PER_WEEK: usize = 7;

/// Cell coordinates inside a calendar grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPos {
    pub column: usize,
    pub row: usize,
}

impl GridPos {
    pub fn from_offset(offset: usize) -> Self {
        Self {
            column: offset / DAYS_PER_WEEK,
            row: offset % DAYS_PER_WEEK,
        }
    }
}

/// Gap-free run of dates starting at a week boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarGrid {
    pub label: String,
    days: Vec<NaiveDate>,
}

impl CalendarGrid {
    /// Grid covering `first..=last`, extended backwards to the week start.
    pub fn new(label: impl Into<String>, first: NaiveDate, last: NaiveDate, week_start: Weekday) -> Self {
        Self {
            label: label.into(),
            days: align(first, last, week_start),
        }
    }

    pub fn days(&self) -> &[NaiveDate] {
        &self.days
    }

    pub fn boundary(&self) -> Option<NaiveDate> {
        self.days.first().copied()
    }

    /// Number of week columns, counting a trailing partial week.
    pub fn columns(&self) -> usize {
        self.days.len().div_ceil(DAYS_PER_WEEK)
    }

    pub fn cells(&self) -> impl Iterator<Item = (GridPos, NaiveDate)> + '_ {
        self.days
            .iter()
            .enumerate()
            .map(|(offset, date)| (GridPos::from_offset(offset), *date))
    }
}

/// Latest date on or before `date` that falls on `week_start`.
pub fn week_boundary(date: NaiveDate, week_start: Weekday) -> NaiveDate {
    let back = (7 + date.weekday().num_days_from_sunday() - week_start.num_days_from_sunday()) % 7;
    date - Days::new(u64::from(back))
}

/// Every date from the week boundary of `first` through `last`, ascending.
///
/// When `last` precedes the boundary the sequence is empty.
pub fn align(first: NaiveDate, last: NaiveDate, week_start: Weekday) -> Vec<NaiveDate> {
    let start = week_boundary(first, week_start);
    start.iter_days().take_while(|d| *d <= last).collect()
}

/// One grid spanning the whole series, labelled with its year range.
pub fn continuous_grid(series: &MergedSeries, week_start: Weekday) -> Option<CalendarGrid> {
    let first = series.first_date()?;
    let last = series.last_date()?;
    let label = if first.year() == last.year() {
        first.year().to_string()
    } else {
        format!("{}-{}", first.year(), last.year())
    };
    Some(CalendarGrid::new(label, first, last, week_start))
}

/// One grid per year present in the series.
///
/// Each year is aligned on its own January 1 and runs to December 31, so a
/// handful of late-December dates are repeated at the start of the following
/// year's grid.
pub fn yearly_grids(series: &MergedSeries, week_start: Weekday) -> Vec<CalendarGrid> {
    series
        .years()
        .into_iter()
        .filter_map(|year| {
            let jan_1 = NaiveDate::from_ymd_opt(year, 1, 1)?;
            let dec_31 = NaiveDate::from_ymd_opt(year, 12, 31)?;
            Some(CalendarGrid::new(year.to_string(), jan_1, dec_31, week_start))
        })
        .collect()
}
