//! Error types for scraping operations.
//!
//! This module defines [`ScrapeError`]. Missing data is never an error here:
//! an absent row, column or placeholder cell is an `Option::None` value.
//! Only malformed numbers and unusable documents surface as errors.

use thiserror::Error;

use crate::metric::MetricKind;

/// Errors that can occur while fetching, extracting or reporting metrics.
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// Cell text is not a sentinel and does not parse as a number.
    #[error("Malformed number: {0:?}")]
    MalformedNumber(String),

    /// A source page could not be fetched or parsed for a ticker.
    #[error("Document unavailable for {ticker} ({page}): {reason}")]
    DocumentUnavailable {
        /// The ticker whose document is missing.
        ticker: String,
        /// The source page that could not be produced.
        page: String,
        /// Why the document is unavailable.
        reason: String,
    },

    /// A field-level failure, tagged with the metric and year it belongs to.
    #[error("{metric}{} for {ticker}: {source}", year_suffix(.year))]
    Field {
        /// The ticker being processed.
        ticker: String,
        /// The metric being extracted.
        metric: MetricKind,
        /// The requested year, for time-series metrics.
        year: Option<i32>,
        /// The underlying error.
        source: Box<ScrapeError>,
    },

    /// Network-related errors (connection failures, exhausted retries).
    #[error("Network error: {0}")]
    Network(String),

    /// Error building or writing the report.
    #[error("Report error: {0}")]
    Report(String),

    /// I/O error while reading tickers or writing output.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ScrapeError {
    /// Attach metric and year context to an extraction error.
    #[must_use]
    pub fn in_field(self, ticker: &str, metric: MetricKind, year: Option<i32>) -> Self {
        Self::Field {
            ticker: ticker.to_string(),
            metric,
            year,
            source: Box::new(self),
        }
    }

    /// Returns true if this error (or the error it wraps) is a malformed number.
    #[must_use]
    pub fn is_malformed_number(&self) -> bool {
        match self {
            Self::MalformedNumber(_) => true,
            Self::Field { source, .. } => source.is_malformed_number(),
            _ => false,
        }
    }
}

fn year_suffix(year: &Option<i32>) -> String {
    year.map(|year| format!(" ({year})")).unwrap_or_default()
}

/// Result type alias using [`ScrapeError`].
pub type Result<T> = std::result::Result<T, ScrapeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_error_display() {
        let err = ScrapeError::MalformedNumber("12,3x".to_string()).in_field(
            "META",
            MetricKind::Revenue,
            Some(2022),
        );

        assert_eq!(
            err.to_string(),
            "Revenue (2022) for META: Malformed number: \"12,3x\""
        );
        assert!(err.is_malformed_number());

        let scalar = ScrapeError::MalformedNumber("x".to_string()).in_field(
            "META",
            MetricKind::PeRatioMax,
            None,
        );
        assert_eq!(scalar.to_string(), "PE Ratio Max for META: Malformed number: \"x\"");
    }

    #[test]
    fn test_document_unavailable_is_not_malformed() {
        let err = ScrapeError::DocumentUnavailable {
            ticker: "LLY".to_string(),
            page: "ratios".to_string(),
            reason: "HTTP 404".to_string(),
        };

        assert!(!err.is_malformed_number());
        assert!(err.to_string().contains("LLY"));
    }
}
