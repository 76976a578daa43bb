//! stockinfo CLI - Scrape financial metrics for a list of tickers.

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::{path::PathBuf, sync::Arc, time::Duration};
use stockinfo::{
    DEFAULT_YEAR_COUNT, PageFetcher, Scraper, YearOrder, default_output_name, load_tickers,
    requested_years,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod output;

use output::Format;

#[derive(Parser)]
#[command(name = "stockinfo")]
#[command(about = "Scrape financial metrics for a list of stock tickers", long_about = None)]
#[command(version)]
struct Cli {
    /// Ticker list, one per line ('#' starts a comment)
    #[arg(default_value = "tickers.txt")]
    tickers: PathBuf,

    /// Output file path. Defaults to numbers_<TICKERS>.<format>
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    format: Format,

    /// Number of fiscal years to request
    #[arg(long, default_value_t = DEFAULT_YEAR_COUNT)]
    years: usize,

    /// Most recent fiscal year to request. Defaults to the current year.
    #[arg(long)]
    start_year: Option<i32>,

    /// Maximum tickers scraped at once
    #[arg(long, default_value = "1")]
    concurrency: usize,

    /// Seconds to wait before retrying a non-success response
    #[arg(long, default_value = "10")]
    retry_delay: u64,

    /// Give up on a page after this many attempts (retries forever if omitted)
    #[arg(long)]
    max_attempts: Option<u32>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long)]
    quiet: bool,
}

/// Install the log subscriber. `RUST_LOG` overrides the flag-derived level.
fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let tickers = load_tickers(&cli.tickers)
        .with_context(|| format!("Failed to read tickers from {}", cli.tickers.display()))?;
    if tickers.is_empty() {
        bail!("No tickers found in {}", cli.tickers.display());
    }
    info!(count = tickers.len(), "Tickers loaded");

    let years = requested_years(cli.start_year, cli.years, YearOrder::Descending);

    let mut fetcher = PageFetcher::new().with_retry_delay(Duration::from_secs(cli.retry_delay));
    if let Some(attempts) = cli.max_attempts {
        fetcher = fetcher.with_max_attempts(attempts);
    }
    let scraper = Scraper::new(Arc::new(fetcher)).with_concurrency(cli.concurrency);

    let batch = scraper.scrape_all(&tickers, &years).await;

    let path = cli.output.unwrap_or_else(|| {
        PathBuf::from(default_output_name(&tickers, cli.format.extension()))
    });
    output::write_report(&path, cli.format, &batch.records, &years)?;
    info!(
        path = %path.display(),
        records = batch.records.len(),
        "Report written"
    );

    if !batch.is_complete() {
        for (symbol, e) in &batch.failures {
            error!(ticker = %symbol, "{e}");
        }
        bail!(
            "{} of {} tickers failed",
            batch.failures.len(),
            tickers.len()
        );
    }

    Ok(())
}
