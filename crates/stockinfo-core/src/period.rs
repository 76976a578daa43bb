//! Year ranges and requested year lists.
//!
//! This module defines [`YearRange`], the span of years with data in a
//! record, and [`requested_years`] for building the list of fiscal years to
//! scrape.

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

/// Default number of fiscal years requested per ticker.
pub const DEFAULT_YEAR_COUNT: usize = 10;

/// Inclusive span of years.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct YearRange {
    /// Earliest year.
    pub min: i32,
    /// Latest year.
    pub max: i32,
}

impl YearRange {
    /// Creates a range, swapping the bounds if given out of order.
    #[must_use]
    pub const fn new(a: i32, b: i32) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    /// Smallest range covering every year in `years`, or `None` if empty.
    pub fn covering(years: impl IntoIterator<Item = i32>) -> Option<Self> {
        years.into_iter().fold(None, |range, year| match range {
            None => Some(Self::new(year, year)),
            Some(r) => Some(r.union(Self::new(year, year))),
        })
    }

    /// Smallest range covering both ranges.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Returns true if `year` lies within the range.
    #[must_use]
    pub const fn contains(&self, year: i32) -> bool {
        self.min <= year && year <= self.max
    }

    /// Years of the range, latest first.
    #[must_use]
    pub fn descending(&self) -> Vec<i32> {
        (self.min..=self.max).rev().collect()
    }
}

/// Ordering of a requested year list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum YearOrder {
    /// Latest year first.
    #[default]
    Descending,
    /// Earliest year first.
    Ascending,
}

/// Build `count` consecutive years starting at `start`.
///
/// `start` defaults to the current calendar year. Years that would overflow
/// `i32` are not produced.
#[must_use]
pub fn requested_years(start: Option<i32>, count: usize, order: YearOrder) -> Vec<i32> {
    let start = start.unwrap_or_else(|| Utc::now().year());
    let room = match order {
        YearOrder::Descending => start.abs_diff(i32::MIN),
        YearOrder::Ascending => start.abs_diff(i32::MAX),
    };
    let count = i32::try_from(count.min(room as usize + 1)).unwrap_or(i32::MAX);
    (0..count)
        .map(|i| match order {
            YearOrder::Descending => start - i,
            YearOrder::Ascending => start + i,
        })
        .collect()
}
