//! Core data types for scraped financial metrics.
//!
//! This module defines the fundamental data structures:
//!
//! - [`Symbol`] - Trading symbol/ticker
//! - [`MetricValue`] - A single scraped value, absent when there is no data
//! - [`TickerRecord`] - All metrics scraped for one ticker
//! - [`SourceHtmls`] - Raw markup fetched for one ticker

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use crate::{
    metric::{MetricKind, SourcePage},
    period::YearRange,
};

/// A trading symbol/ticker.
///
/// Symbols are automatically uppercased on creation.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Symbol(String);

impl Symbol {
    /// Creates a new symbol from a string, converting to uppercase.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into().to_uppercase())
    }

    /// Returns the symbol as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Symbol {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// A scraped value. `None` means the source had no data, which is not zero.
pub type MetricValue = Option<f64>;

/// Values of one metric keyed by fiscal year.
pub type YearSeries = BTreeMap<i32, MetricValue>;

/// Every metric scraped for a single ticker.
///
/// Each time-series metric holds a key for every requested year, present
/// even when its value is absent.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TickerRecord {
    /// Stock symbol.
    pub symbol: Symbol,
    /// Company name, when the source page shows one.
    pub company: Option<String>,
    /// Per-year values of the time-series metrics.
    pub series: BTreeMap<MetricKind, YearSeries>,
    /// Growth estimate for the next five years.
    pub growth_estimate_5y: MetricValue,
    /// Lowest P/E ratio.
    pub pe_ratio_min: MetricValue,
    /// Highest P/E ratio.
    pub pe_ratio_max: MetricValue,
}

impl TickerRecord {
    /// Creates an empty record for a symbol.
    #[must_use]
    pub fn new(symbol: Symbol) -> Self {
        Self {
            symbol,
            ..Default::default()
        }
    }

    /// Sets the company name.
    #[must_use]
    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    /// Returns the per-year values of a time-series metric.
    #[must_use]
    pub fn series(&self, kind: MetricKind) -> Option<&YearSeries> {
        self.series.get(&kind)
    }

    /// Returns the value of a time-series metric for a year.
    #[must_use]
    pub fn value(&self, kind: MetricKind, year: i32) -> MetricValue {
        self.series.get(&kind).and_then(|s| s.get(&year).copied().flatten())
    }

    /// Returns the value of a scalar metric. Time-series metrics yield `None`.
    #[must_use]
    pub const fn scalar(&self, kind: MetricKind) -> MetricValue {
        match kind {
            MetricKind::GrowthEstimate5Y => self.growth_estimate_5y,
            MetricKind::PeRatioMin => self.pe_ratio_min,
            MetricKind::PeRatioMax => self.pe_ratio_max,
            _ => None,
        }
    }

    /// Sets the value of a scalar metric. Time-series metrics are ignored.
    pub fn set_scalar(&mut self, kind: MetricKind, value: MetricValue) {
        match kind {
            MetricKind::GrowthEstimate5Y => self.growth_estimate_5y = value,
            MetricKind::PeRatioMin => self.pe_ratio_min = value,
            MetricKind::PeRatioMax => self.pe_ratio_max = value,
            _ => {}
        }
    }

    /// Years for which at least one time-series metric has a value.
    ///
    /// Returns `None` when no metric has a value for any year.
    #[must_use]
    pub fn year_range(&self) -> Option<YearRange> {
        YearRange::covering(
            self.series
                .values()
                .flat_map(|series| series.iter())
                .filter(|(_, value)| value.is_some())
                .map(|(year, _)| *year),
        )
    }
}

/// Raw markup fetched for one ticker, keyed by source page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SourceHtmls {
    /// Ticker the pages belong to.
    pub symbol: Symbol,
    pages: HashMap<SourcePage, String>,
}

impl SourceHtmls {
    /// Creates an empty page set for a symbol.
    #[must_use]
    pub fn new(symbol: Symbol) -> Self {
        Self {
            symbol,
            pages: HashMap::new(),
        }
    }

    /// Adds the markup of a page.
    #[must_use]
    pub fn with_page(mut self, page: SourcePage, html: impl Into<String>) -> Self {
        self.insert(page, html);
        self
    }

    /// Adds the markup of a page, replacing any previous markup.
    pub fn insert(&mut self, page: SourcePage, html: impl Into<String>) {
        self.pages.insert(page, html.into());
    }

    /// Returns the markup of a page, if it was fetched.
    #[must_use]
    pub fn get(&self, page: SourcePage) -> Option<&str> {
        self.pages.get(&page).map(String::as_str)
    }

    /// Iterates over the fetched pages.
    pub fn iter(&self) -> impl Iterator<Item = (SourcePage, &str)> {
        self.pages.iter().map(|(page, html)| (*page, html.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(values: &[(i32, MetricValue)]) -> YearSeries {
        values.iter().copied().collect()
    }

    #[test]
    fn test_symbol_uppercases() {
        assert_eq!(Symbol::new("meta").as_str(), "META");
        assert_eq!("lly".parse::<Symbol>().unwrap(), Symbol::new("LLY"));
    }

    #[test]
    fn test_year_range_ignores_absent_values() {
        let mut record = TickerRecord::new(Symbol::new("GOOG"));
        let requested = (2000..=2023).map(|year| {
            let value = (2018..=2022).contains(&year).then_some(1.0);
            (year, value)
        });
        record
            .series
            .insert(MetricKind::Revenue, requested.collect());
        record.series.insert(
            MetricKind::EpsDiluted,
            series(&[(2023, None), (2019, Some(2.5)), (2000, None)]),
        );

        assert_eq!(record.year_range(), Some(YearRange::new(2018, 2022)));
    }

    #[test]
    fn test_year_range_undefined_without_values() {
        let mut record = TickerRecord::new(Symbol::new("GOOG"));
        record
            .series
            .insert(MetricKind::Revenue, series(&[(2023, None), (2022, None)]));

        assert_eq!(record.year_range(), None);
    }

    #[test]
    fn test_zero_is_a_value() {
        let mut record = TickerRecord::new(Symbol::new("XYZ"));
        record
            .series
            .insert(MetricKind::FreeCashFlowPerShare, series(&[(2021, Some(0.0))]));

        assert_eq!(record.value(MetricKind::FreeCashFlowPerShare, 2021), Some(0.0));
        assert_eq!(record.year_range(), Some(YearRange::new(2021, 2021)));
    }

    #[test]
    fn test_scalars() {
        let mut record = TickerRecord::new(Symbol::new("META"));
        record.set_scalar(MetricKind::PeRatioMin, Some(8.476));
        record.set_scalar(MetricKind::Revenue, Some(1.0));

        assert_eq!(record.scalar(MetricKind::PeRatioMin), Some(8.476));
        assert_eq!(record.scalar(MetricKind::PeRatioMax), None);
        assert_eq!(record.scalar(MetricKind::Revenue), None);
    }

    #[test]
    fn test_record_serializes() {
        let record = TickerRecord::new(Symbol::new("META")).with_company("Meta Platforms, Inc.");
        let json = serde_json::to_string(&record).unwrap();

        assert!(json.contains("\"symbol\":\"META\""));
        assert!(json.contains("Meta Platforms, Inc."));
    }
}
