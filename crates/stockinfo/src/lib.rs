#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/stockinfo/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Financial metrics scraper.
//!
//! This crate ties the workspace together. It re-exports the core types,
//! the extraction functions and the HTTP fetcher, and provides:
//!
//! - [`Scraper`] - Fetches every source page of a ticker and builds its record
//! - [`write_csv`] / [`write_json`] - Report output
//! - [`load_tickers`] - Ticker list files
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use stockinfo::{PageFetcher, Scraper, Symbol};
//!
//! let scraper = Scraper::new(Arc::new(PageFetcher::new()));
//! let record = scraper.scrape(&Symbol::new("META"), &[2023, 2022, 2021]).await?;
//! println!("{:?}", record.year_range());
//! ```

// Core types and traits
pub use stockinfo_core::*;

// Extraction
pub use stockinfo_extract::{Documents, YearSelector, build_record, extract_cell};

// Fetchers
pub use stockinfo_sources::PageFetcher;

/// Report building and output.
pub mod report;
/// Per-ticker scraping over a fetcher.
pub mod scraper;
/// Ticker list parsing.
pub mod tickers;

pub use report::{default_output_name, report_years, to_dataframe, write_csv, write_json};
pub use scraper::{Batch, Scraper};
pub use tickers::{load_tickers, parse_tickers};
