//! Summing several identities' daily counts into one series.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::domain::ContributionDay;

/// Total contributions per calendar date across all merged identities.
///
/// Dates that no identity reported are simply absent; `get` treats them as
/// zero, which is indistinguishable from an explicit zero-count day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedSeries {
    counts: BTreeMap<NaiveDate, u64>,
}

impl MergedSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge any number of series. The result does not depend on their order.
    pub fn from_series<'a, I>(series: I) -> Self
    where
        I: IntoIterator<Item = &'a [ContributionDay]>,
    {
        let mut merged = Self::new();
        for days in series {
            merged.add_all(days);
        }
        merged
    }

    pub fn add(&mut self, day: ContributionDay) {
        *self.counts.entry(day.date).or_insert(0) += u64::from(day.count);
    }

    pub fn add_all(&mut self, days: &[ContributionDay]) {
        for day in days {
            self.add(*day);
        }
    }

    pub fn get(&self, date: NaiveDate) -> u64 {
        self.counts.get(&date).copied().unwrap_or(0)
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.counts.keys().next().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.counts.keys().next_back().copied()
    }

    /// Distinct calendar years with at least one entry, ascending.
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.counts.keys().map(|d| d.year()).collect();
        years.dedup();
        years
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Entries in ascending date order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, u64)> + '_ {
        self.counts.iter().map(|(d, c)| (*d, *c))
    }
}

/// Merge two identities' series by summing counts per date.
pub fn combine(a: &[ContributionDay], b: &[ContributionDay]) -> MergedSeries {
    MergedSeries::from_series([a, b])
}
