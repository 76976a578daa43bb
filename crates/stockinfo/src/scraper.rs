//! Per-ticker scraping over an [`HtmlFetcher`].

use std::sync::Arc;

use futures::{StreamExt, future::try_join_all, stream};
use stockinfo_core::{
    HtmlFetcher, Result, ScrapeError, SourceHtmls, SourcePage, Symbol, TickerRecord,
};
use stockinfo_extract::{Documents, build_record};
use tracing::{debug, info, warn};

/// Default number of tickers scraped at once.
const DEFAULT_CONCURRENCY: usize = 1;

/// Outcome of scraping a list of tickers.
///
/// A failing ticker does not stop the batch; it is reported in `failures`.
#[derive(Debug, Default)]
pub struct Batch {
    /// Records of the tickers that succeeded, in input order.
    pub records: Vec<TickerRecord>,
    /// Tickers that failed, in input order, with the reason.
    pub failures: Vec<(Symbol, ScrapeError)>,
}

impl Batch {
    /// Returns true if every ticker succeeded.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Fetches the source pages of tickers and builds their records.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use stockinfo::{PageFetcher, Scraper, Symbol};
///
/// let scraper = Scraper::new(Arc::new(PageFetcher::new())).with_concurrency(4);
/// let batch = scraper.scrape_all(&[Symbol::new("META")], &[2023, 2022]).await;
/// ```
pub struct Scraper {
    fetcher: Arc<dyn HtmlFetcher>,
    concurrency: usize,
}

impl std::fmt::Debug for Scraper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scraper")
            .field("fetcher", &self.fetcher.name())
            .field("concurrency", &self.concurrency)
            .finish()
    }
}

impl Scraper {
    /// Create a scraper that processes one ticker at a time.
    #[must_use]
    pub fn new(fetcher: Arc<dyn HtmlFetcher>) -> Self {
        Self {
            fetcher,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Set how many tickers are scraped at once. Values below 1 are treated as 1.
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Number of tickers scraped at once.
    #[must_use]
    pub const fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Fetch every source page of a ticker.
    ///
    /// Each page is fetched once, even when several metrics read it.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::DocumentUnavailable`] naming the first page
    /// that could not be fetched.
    pub async fn fetch_sources(&self, symbol: &Symbol) -> Result<SourceHtmls> {
        let pages = try_join_all(SourcePage::ALL.into_iter().map(|page| async move {
            let url = page.url(symbol);
            debug!(ticker = %symbol, %page, url = %url, "Fetching source page");
            self.fetcher
                .fetch(&url)
                .await
                .map(|html| (page, html))
                .map_err(|e| ScrapeError::DocumentUnavailable {
                    ticker: symbol.to_string(),
                    page: page.to_string(),
                    reason: e.to_string(),
                })
        }))
        .await?;

        Ok(pages
            .into_iter()
            .fold(SourceHtmls::new(symbol.clone()), |sources, (page, html)| {
                sources.with_page(page, html)
            }))
    }

    /// Scrape the record of one ticker for the requested `years`.
    ///
    /// # Errors
    ///
    /// Returns an error if a page cannot be fetched or a cell holds a
    /// malformed number.
    pub async fn scrape(&self, symbol: &Symbol, years: &[i32]) -> Result<TickerRecord> {
        let sources = self.fetch_sources(symbol).await?;
        let record = build_record(&Documents::parse(&sources), years)?;

        info!(
            ticker = %symbol,
            company = record.company.as_deref().unwrap_or("-"),
            years = ?record.year_range(),
            "Scraped ticker"
        );
        Ok(record)
    }

    /// Scrape every ticker, keeping the input order.
    ///
    /// Up to [`concurrency`](Self::with_concurrency) tickers are in flight at
    /// once. Failures are logged and collected; the remaining tickers are
    /// still scraped.
    pub async fn scrape_all(&self, symbols: &[Symbol], years: &[i32]) -> Batch {
        let results: Vec<_> = stream::iter(symbols)
            .map(|symbol| async move { (symbol, self.scrape(symbol, years).await) })
            .buffered(self.concurrency)
            .collect()
            .await;

        let mut batch = Batch::default();
        for (symbol, result) in results {
            match result {
                Ok(record) => batch.records.push(record),
                Err(e) => {
                    warn!(ticker = %symbol, error = %e, "Failed to scrape ticker");
                    batch.failures.push((symbol.clone(), e));
                }
            }
        }
        batch
    }
}
