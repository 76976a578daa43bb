//! Metric registry and source page definitions.
//!
//! Every scraped metric is a [`MetricKind`]. Its fixed properties (the row or
//! section label used to find it, how its text is normalized, which page it
//! lives on and how it is extracted) are described by a `const`
//! [`MetricSpec`] returned from [`MetricKind::spec`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{
    error::Result,
    normalize::{normalize_number, normalize_percent},
    types::Symbol,
};

/// A metric scraped for every ticker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MetricKind {
    /// Return on invested capital, in percent.
    ReturnOnCapital,
    /// Book value per share.
    BookValuePerShare,
    /// Diluted earnings per share.
    EpsDiluted,
    /// Total revenue, reported in billions.
    Revenue,
    /// Free cash flow per share.
    FreeCashFlowPerShare,
    /// Analyst growth estimate for the next five years.
    GrowthEstimate5Y,
    /// Lowest P/E ratio over the source's lookback window.
    PeRatioMin,
    /// Highest P/E ratio over the source's lookback window.
    PeRatioMax,
}

/// How raw cell text is turned into a number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Normalizer {
    /// Plain number with optional thousands separators.
    Number,
    /// Number with a trailing percent sign.
    Percent,
}

impl Normalizer {
    /// Apply this normalizer to trimmed cell text.
    pub fn apply(self, raw: &str) -> Result<Option<f64>> {
        match self {
            Self::Number => normalize_number(raw),
            Self::Percent => normalize_percent(raw),
        }
    }
}

/// Unit conversion applied after extraction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    /// Use the value as reported.
    AsReported,
    /// Source reports millions; divide by 1000 and round to 2 decimals.
    Thousands,
}

impl Unit {
    /// Convert an extracted value. Absence passes through unchanged.
    #[must_use]
    pub fn convert(self, value: Option<f64>) -> Option<f64> {
        match self {
            Self::AsReported => value,
            Self::Thousands => value.map(|v| (v / 1000.0 * 100.0).round() / 100.0),
        }
    }
}

/// The bespoke layouts used by scalar metrics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScalarLayout {
    /// Label/value rows inside the earnings growth estimates panel.
    GrowthPanel,
    /// The key-statistic card labelled "Minimum".
    KeyStatMinimum,
    /// The key-statistic card labelled "Maximum".
    KeyStatMaximum,
}

/// Extraction strategy for a metric.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Extraction {
    /// One value per year, read from a row/column financial table.
    TimeSeries,
    /// One year-independent value, read from a bespoke layout.
    Scalar(ScalarLayout),
}

/// A page fetched per ticker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SourcePage {
    /// stockanalysis.com ratios table.
    Ratios,
    /// stockanalysis.com balance sheet.
    BalanceSheet,
    /// stockanalysis.com income statement.
    IncomeStatement,
    /// stockanalysis.com cash flow statement.
    CashFlowStatement,
    /// Zacks detailed earning estimates.
    EarningsEstimates,
    /// YCharts P/E ratio overview.
    PeRatio,
}

/// stockanalysis.com stock pages.
const STOCK_ANALYSIS_BASE_URL: &str = "https://stockanalysis.com/stocks";

/// Zacks quote pages.
const ZACKS_BASE_URL: &str = "https://www.zacks.com/stock/quote";

/// YCharts company pages.
const YCHARTS_BASE_URL: &str = "https://ycharts.com/companies";

impl SourcePage {
    /// All pages, in fetch order.
    pub const ALL: [Self; 6] = [
        Self::Ratios,
        Self::BalanceSheet,
        Self::IncomeStatement,
        Self::CashFlowStatement,
        Self::EarningsEstimates,
        Self::PeRatio,
    ];

    /// Build the page URL for a ticker.
    #[must_use]
    pub fn url(&self, symbol: &Symbol) -> String {
        let ticker = symbol.as_str();
        match self {
            Self::Ratios => format!("{STOCK_ANALYSIS_BASE_URL}/{ticker}/financials/ratios/"),
            Self::BalanceSheet => {
                format!("{STOCK_ANALYSIS_BASE_URL}/{ticker}/financials/balance-sheet/")
            }
            Self::IncomeStatement => format!("{STOCK_ANALYSIS_BASE_URL}/{ticker}/financials/"),
            Self::CashFlowStatement => {
                format!("{STOCK_ANALYSIS_BASE_URL}/{ticker}/financials/cash-flow-statement/")
            }
            Self::EarningsEstimates => {
                format!("{ZACKS_BASE_URL}/{ticker}/detailed-earning-estimates")
            }
            Self::PeRatio => format!("{YCHARTS_BASE_URL}/{ticker}/pe_ratio"),
        }
    }

    /// Whether header column 1 of this page's table is a "Current" column.
    ///
    /// Offset addressing counts from column 1, so callers reading these
    /// pages by offset shift by one to land on closed years.
    #[must_use]
    pub const fn has_current_column(&self) -> bool {
        matches!(self, Self::Ratios)
    }

    /// Short identifier used in logs and errors.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Ratios => "ratios",
            Self::BalanceSheet => "balance-sheet",
            Self::IncomeStatement => "income-statement",
            Self::CashFlowStatement => "cash-flow-statement",
            Self::EarningsEstimates => "earnings-estimates",
            Self::PeRatio => "pe-ratio",
        }
    }
}

impl fmt::Display for SourcePage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fixed description of a metric.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MetricSpec {
    /// The metric described.
    pub kind: MetricKind,
    /// Canonical row or section label in the source markup.
    pub label: &'static str,
    /// How cell text is normalized.
    pub normalizer: Normalizer,
    /// Unit conversion applied to extracted values.
    pub unit: Unit,
    /// How the value is located.
    pub extraction: Extraction,
    /// Page the value is read from.
    pub page: SourcePage,
}

const RETURN_ON_CAPITAL: MetricSpec = MetricSpec {
    kind: MetricKind::ReturnOnCapital,
    label: "Return on Capital (ROIC)",
    normalizer: Normalizer::Percent,
    unit: Unit::AsReported,
    extraction: Extraction::TimeSeries,
    page: SourcePage::Ratios,
};

const BOOK_VALUE_PER_SHARE: MetricSpec = MetricSpec {
    kind: MetricKind::BookValuePerShare,
    label: "Book Value per Share",
    normalizer: Normalizer::Number,
    unit: Unit::AsReported,
    extraction: Extraction::TimeSeries,
    page: SourcePage::BalanceSheet,
};

const EPS_DILUTED: MetricSpec = MetricSpec {
    kind: MetricKind::EpsDiluted,
    label: "EPS (Diluted)",
    normalizer: Normalizer::Number,
    unit: Unit::AsReported,
    extraction: Extraction::TimeSeries,
    page: SourcePage::IncomeStatement,
};

const REVENUE: MetricSpec = MetricSpec {
    kind: MetricKind::Revenue,
    label: "Revenue",
    normalizer: Normalizer::Number,
    unit: Unit::Thousands,
    extraction: Extraction::TimeSeries,
    page: SourcePage::IncomeStatement,
};

const FREE_CASH_FLOW_PER_SHARE: MetricSpec = MetricSpec {
    kind: MetricKind::FreeCashFlowPerShare,
    label: "Free Cash Flow Per Share",
    normalizer: Normalizer::Number,
    unit: Unit::AsReported,
    extraction: Extraction::TimeSeries,
    page: SourcePage::CashFlowStatement,
};

const GROWTH_ESTIMATE_5Y: MetricSpec = MetricSpec {
    kind: MetricKind::GrowthEstimate5Y,
    label: "Growth Estimates - Next 5 Years",
    normalizer: Normalizer::Percent,
    unit: Unit::AsReported,
    extraction: Extraction::Scalar(ScalarLayout::GrowthPanel),
    page: SourcePage::EarningsEstimates,
};

const PE_RATIO_MIN: MetricSpec = MetricSpec {
    kind: MetricKind::PeRatioMin,
    label: "PE Ratio Min",
    normalizer: Normalizer::Number,
    unit: Unit::AsReported,
    extraction: Extraction::Scalar(ScalarLayout::KeyStatMinimum),
    page: SourcePage::PeRatio,
};

const PE_RATIO_MAX: MetricSpec = MetricSpec {
    kind: MetricKind::PeRatioMax,
    label: "PE Ratio Max",
    normalizer: Normalizer::Number,
    unit: Unit::AsReported,
    extraction: Extraction::Scalar(ScalarLayout::KeyStatMaximum),
    page: SourcePage::PeRatio,
};

impl MetricKind {
    /// All metrics, in report order.
    pub const ALL: [Self; 8] = [
        Self::ReturnOnCapital,
        Self::BookValuePerShare,
        Self::EpsDiluted,
        Self::Revenue,
        Self::FreeCashFlowPerShare,
        Self::GrowthEstimate5Y,
        Self::PeRatioMin,
        Self::PeRatioMax,
    ];

    /// Metrics read per year from a financial table, in report order.
    pub const TIME_SERIES: [Self; 5] = [
        Self::ReturnOnCapital,
        Self::BookValuePerShare,
        Self::EpsDiluted,
        Self::Revenue,
        Self::FreeCashFlowPerShare,
    ];

    /// Year-independent metrics, in report order.
    pub const SCALARS: [Self; 3] = [Self::GrowthEstimate5Y, Self::PeRatioMin, Self::PeRatioMax];

    /// Returns the fixed description of this metric.
    #[must_use]
    pub const fn spec(self) -> &'static MetricSpec {
        match self {
            Self::ReturnOnCapital => &RETURN_ON_CAPITAL,
            Self::BookValuePerShare => &BOOK_VALUE_PER_SHARE,
            Self::EpsDiluted => &EPS_DILUTED,
            Self::Revenue => &REVENUE,
            Self::FreeCashFlowPerShare => &FREE_CASH_FLOW_PER_SHARE,
            Self::GrowthEstimate5Y => &GROWTH_ESTIMATE_5Y,
            Self::PeRatioMin => &PE_RATIO_MIN,
            Self::PeRatioMax => &PE_RATIO_MAX,
        }
    }

    /// Canonical label used to find this metric in the source markup.
    #[must_use]
    pub const fn label(self) -> &'static str {
        self.spec().label
    }

    /// Page this metric is read from.
    #[must_use]
    pub const fn page(self) -> SourcePage {
        self.spec().page
    }

    /// Returns true if this metric has one value per year.
    #[must_use]
    pub const fn is_time_series(self) -> bool {
        matches!(self.spec().extraction, Extraction::TimeSeries)
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_is_consistent() {
        for kind in MetricKind::ALL {
            assert_eq!(kind.spec().kind, kind);
            assert_eq!(
                kind.is_time_series(),
                MetricKind::TIME_SERIES.contains(&kind)
            );
        }
        assert_eq!(
            MetricKind::TIME_SERIES.len() + MetricKind::SCALARS.len(),
            MetricKind::ALL.len()
        );
    }

    #[test]
    fn test_percent_metrics() {
        for kind in MetricKind::ALL {
            let expected = if matches!(
                kind,
                MetricKind::ReturnOnCapital | MetricKind::GrowthEstimate5Y
            ) {
                Normalizer::Percent
            } else {
                Normalizer::Number
            };
            assert_eq!(kind.spec().normalizer, expected, "{kind}");
        }
    }

    #[test]
    fn test_thousands_conversion() {
        assert_eq!(Unit::Thousands.convert(Some(85965.0)), Some(85.97));
        assert_eq!(Unit::Thousands.convert(Some(28541.4)), Some(28.54));
        assert_eq!(Unit::Thousands.convert(Some(0.0)), Some(0.0));
        assert_eq!(Unit::Thousands.convert(None), None);
        assert_eq!(Unit::AsReported.convert(Some(85965.0)), Some(85965.0));
    }

    #[test]
    fn test_page_urls() {
        let symbol = Symbol::new("meta");

        assert_eq!(
            SourcePage::Ratios.url(&symbol),
            "https://stockanalysis.com/stocks/META/financials/ratios/"
        );
        assert_eq!(
            SourcePage::EarningsEstimates.url(&symbol),
            "https://www.zacks.com/stock/quote/META/detailed-earning-estimates"
        );
        assert_eq!(
            SourcePage::PeRatio.url(&symbol),
            "https://ycharts.com/companies/META/pe_ratio"
        );
    }

    #[test]
    fn test_shared_pages() {
        assert_eq!(MetricKind::EpsDiluted.page(), MetricKind::Revenue.page());
        assert_eq!(MetricKind::PeRatioMin.page(), MetricKind::PeRatioMax.page());
        assert!(SourcePage::Ratios.has_current_column());
        assert!(!SourcePage::BalanceSheet.has_current_column());
    }
}
