//! Report building and output.
//!
//! The report has one row per ticker and one column per (metric, year)
//! pair, years latest first, followed by the scalar metrics. Absent values
//! are nulls and render as empty CSV fields.

use std::io::Write;

use polars::prelude::*;
use stockinfo_core::{MetricKind, Result, ScrapeError, Symbol, TickerRecord, YearRange};

/// Years covered by the report, latest first.
///
/// This is the union of the year ranges of `records`. When no record has
/// any value, the `requested` years are used instead.
#[must_use]
pub fn report_years(records: &[TickerRecord], requested: &[i32]) -> Vec<i32> {
    records
        .iter()
        .filter_map(TickerRecord::year_range)
        .reduce(YearRange::union)
        .map(|range| range.descending())
        .unwrap_or_else(|| {
            let mut years = requested.to_vec();
            years.sort_unstable_by(|a, b| b.cmp(a));
            years.dedup();
            years
        })
}

/// Report header of a metric column.
#[must_use]
pub fn column_name(kind: MetricKind, year: Option<i32>) -> String {
    let title = match kind {
        MetricKind::ReturnOnCapital => "Return On Capital",
        MetricKind::PeRatioMin => "PE Ratio (Min)",
        MetricKind::PeRatioMax => "PE Ratio (Max)",
        other => other.label(),
    };
    match year {
        Some(year) => format!("{title} ({year})"),
        None => title.to_string(),
    }
}

/// Build the report as a [`DataFrame`].
///
/// Year columns span [`report_years`] of the records.
///
/// # Errors
///
/// Returns [`ScrapeError::Report`] if the frame cannot be assembled.
pub fn to_dataframe(records: &[TickerRecord], requested: &[i32]) -> Result<DataFrame> {
    let years = report_years(records, requested);

    let tickers: Vec<String> = records.iter().map(|r| r.symbol.to_string()).collect();
    let companies: Vec<Option<String>> = records.iter().map(|r| r.company.clone()).collect();

    let mut columns = vec![
        Column::new("Ticker".into(), tickers),
        Column::new("Company".into(), companies),
    ];

    for kind in MetricKind::TIME_SERIES {
        for &year in &years {
            let values: Vec<Option<f64>> = records.iter().map(|r| r.value(kind, year)).collect();
            columns.push(Column::new(column_name(kind, Some(year)).into(), values));
        }
    }

    for kind in MetricKind::SCALARS {
        let values: Vec<Option<f64>> = records.iter().map(|r| r.scalar(kind)).collect();
        columns.push(Column::new(column_name(kind, None).into(), values));
    }

    DataFrame::new(columns).map_err(|e| ScrapeError::Report(e.to_string()))
}

/// Write the report as CSV with a header row.
///
/// # Errors
///
/// Returns [`ScrapeError::Report`] if the frame cannot be built or written.
pub fn write_csv<W: Write>(
    records: &[TickerRecord],
    requested: &[i32],
    mut writer: W,
) -> Result<()> {
    let mut df = to_dataframe(records, requested)?;

    CsvWriter::new(&mut writer)
        .include_header(true)
        .finish(&mut df)
        .map_err(|e| ScrapeError::Report(e.to_string()))
}

/// Write the records as a JSON array.
///
/// # Errors
///
/// Returns [`ScrapeError::Report`] if serialization or writing fails.
pub fn write_json<W: Write>(records: &[TickerRecord], writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, records).map_err(|e| ScrapeError::Report(e.to_string()))
}

/// Default report file name, e.g. `numbers_META-LLY.csv`.
#[must_use]
pub fn default_output_name(symbols: &[Symbol], extension: &str) -> String {
    let joined = symbols
        .iter()
        .map(Symbol::as_str)
        .collect::<Vec<_>>()
        .join("-");
    format!("numbers_{joined}.{extension}")
}
