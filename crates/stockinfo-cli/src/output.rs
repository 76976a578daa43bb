//! Report output.

use anyhow::{Context, Result};
use clap::ValueEnum;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use stockinfo::{TickerRecord, write_csv, write_json};

/// Output format for the report.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub(crate) enum Format {
    /// One row per ticker, one column per metric and year.
    Csv,
    /// The scraped records as a JSON array.
    Json,
}

impl Format {
    /// Returns the file extension for this format.
    pub(crate) const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Write the report for `records` to `path`.
pub(crate) fn write_report(
    path: &Path,
    format: Format,
    records: &[TickerRecord],
    years: &[i32],
) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    let written = match format {
        Format::Csv => write_csv(records, years, &mut writer),
        Format::Json => write_json(records, &mut writer),
    };
    written.with_context(|| format!("Failed to write {format} report to {}", path.display()))?;

    writer
        .flush()
        .with_context(|| format!("Failed to flush {}", path.display()))
}
