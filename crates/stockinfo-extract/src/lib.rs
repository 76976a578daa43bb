#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/stockinfo/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Extraction of metric values from parsed source pages.
//!
//! All functions here are synchronous and perform no I/O. Documents are
//! parsed with [`scraper::Html`] and read through CSS selectors:
//!
//! - [`table`] - Row lookup and year-column resolution in financial tables
//! - [`cell`] - Single cell extraction with placeholder detection
//! - [`layout`] - Growth panel, key-statistic cards and company name
//! - [`aggregate`] - Per-ticker record assembly

/// Per-ticker record assembly.
pub mod aggregate;
/// Single cell extraction.
pub mod cell;
/// Bespoke page layouts.
pub mod layout;
/// Financial table navigation.
pub mod table;

pub use aggregate::{Documents, build_record};
pub use cell::{PAYWALL_MARKER, YearSelector, extract_cell};
pub use layout::{StatBound, company_name, growth_estimate, pe_ratio_bound};
pub use table::{Row, find_row, find_year_column, find_year_column_by_offset, header_labels};
