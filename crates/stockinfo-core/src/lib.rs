#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/stockinfo/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core traits and types for scraping per-ticker financial metrics.
//!
//! This crate provides the foundational pieces shared by every other crate:
//!
//! - [`MetricKind`](metric::MetricKind) - The closed registry of scraped metrics
//! - [`SourcePage`](metric::SourcePage) - The pages each metric is read from
//! - [`normalize_number`](normalize::normalize_number) - Cell text to numbers
//! - [`TickerRecord`](types::TickerRecord) - The per-ticker aggregate
//! - [`HtmlFetcher`](provider::HtmlFetcher) - Fetcher abstraction for raw markup

/// Error types for scraping operations.
pub mod error;
/// Metric registry and source page definitions.
pub mod metric;
/// Numeric normalization of raw cell text.
pub mod normalize;
/// Year ranges and requested year lists.
pub mod period;
/// Fetcher trait for retrieving page markup.
pub mod provider;
/// Core data types (Symbol, TickerRecord, SourceHtmls).
pub mod types;

// Re-export commonly used items at crate root
pub use error::{Result, ScrapeError};
pub use metric::{Extraction, MetricKind, MetricSpec, Normalizer, ScalarLayout, SourcePage, Unit};
pub use normalize::{normalize_number, normalize_percent};
pub use period::{DEFAULT_YEAR_COUNT, YearOrder, YearRange, requested_years};
pub use provider::HtmlFetcher;
pub use types::{MetricValue, SourceHtmls, Symbol, TickerRecord, YearSeries};
