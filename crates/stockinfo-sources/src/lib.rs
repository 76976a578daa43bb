#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/stockinfo/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! HTTP page fetcher.
//!
//! This crate provides [`PageFetcher`], which implements [`HtmlFetcher`]
//! from `stockinfo-core` on top of `reqwest`.
//!
//! # Features
//!
//! - Browser-like `User-Agent` so statement pages serve full markup
//! - Fixed-delay retry on non-success HTTP status
//! - Optional cap on the number of attempts
//! - Custom HTTP client injection

use std::time::Duration;

use async_trait::async_trait;
use stockinfo_core::{HtmlFetcher, Result, ScrapeError};
use tokio::time::sleep;
use tracing::{debug, warn};

/// Default wait between attempts.
const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(10);

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// User agent for HTTP requests.
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/54.0.2840.90 Safari/537.36";

/// Fetches page markup over HTTP.
///
/// A response with a non-success status is logged and requested again after
/// [`retry_delay`](Self::with_retry_delay). Without a
/// [`max_attempts`](Self::with_max_attempts) limit this repeats until the
/// server answers successfully. Transport errors fail immediately.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: reqwest::Client,
    retry_delay: Duration,
    max_attempts: Option<u32>,
}

impl PageFetcher {
    /// Create a fetcher with default settings.
    ///
    /// Retries forever, waiting 10 seconds between attempts.
    #[must_use]
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            retry_delay: DEFAULT_RETRY_DELAY,
            max_attempts: None,
        }
    }

    /// Use a pre-configured HTTP client.
    ///
    /// The client is used as is; set its user agent if the target pages
    /// require one.
    #[must_use]
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Set the wait between attempts.
    #[must_use]
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Give up after `attempts` requests. Values below 1 are treated as 1.
    #[must_use]
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = Some(attempts.max(1));
        self
    }

    /// The wait between attempts.
    #[must_use]
    pub const fn retry_delay(&self) -> Duration {
        self.retry_delay
    }

    /// The attempt limit, if any.
    #[must_use]
    pub const fn max_attempts(&self) -> Option<u32> {
        self.max_attempts
    }
}

impl Default for PageFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HtmlFetcher for PageFetcher {
    fn name(&self) -> &str {
        "HTTP"
    }

    async fn fetch(&self, url: &str) -> Result<String> {
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            debug!(url, attempt, "Fetching page");

            let response = self
                .client
                .get(url)
                .send()
                .await
                .map_err(|e| ScrapeError::Network(format!("Failed to fetch {url}: {e}")))?;

            let status = response.status();
            if status.is_success() {
                return response.text().await.map_err(|e| {
                    ScrapeError::Network(format!("Failed to read body of {url}: {e}"))
                });
            }

            if self.max_attempts.is_some_and(|max| attempt >= max) {
                return Err(ScrapeError::Network(format!(
                    "HTTP {status} from {url} after {attempt} attempts"
                )));
            }

            warn!(
                url,
                %status,
                attempt,
                delay = ?self.retry_delay,
                "Non-success response, retrying"
            );
            sleep(self.retry_delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
    };

    /// Serve `statuses` in order, one connection each, then stop.
    async fn serve(statuses: Vec<u16>, body: &'static str) -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/financials/", listener.local_addr().unwrap());
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);

        tokio::spawn(async move {
            for status in statuses {
                let (mut socket, _) = listener.accept().await.unwrap();
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    let n = socket.read(&mut buf).await.unwrap();
                    if n == 0 {
                        break;
                    }
                    request.extend_from_slice(&buf[..n]);
                }
                counter.fetch_add(1, Ordering::SeqCst);

                let payload = if status == 200 { body } else { "" };
                let response = format!(
                    "HTTP/1.1 {status} Status\r\nContent-Type: text/html\r\n\
                     Content-Length: {}\r\nConnection: close\r\n\r\n{payload}",
                    payload.len()
                );
                socket.write_all(response.as_bytes()).await.unwrap();
                socket.shutdown().await.unwrap();
            }
        });

        (url, hits)
    }

    fn local_fetcher() -> PageFetcher {
        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        PageFetcher::new()
            .with_client(client)
            .with_retry_delay(Duration::from_millis(10))
    }

    #[test]
    fn test_defaults() {
        let fetcher = PageFetcher::default();

        assert_eq!(fetcher.name(), "HTTP");
        assert_eq!(fetcher.retry_delay(), Duration::from_secs(10));
        assert_eq!(fetcher.max_attempts(), None);
    }

    #[test]
    fn test_builder() {
        let fetcher = PageFetcher::new()
            .with_retry_delay(Duration::from_millis(250))
            .with_max_attempts(0);

        assert_eq!(fetcher.retry_delay(), Duration::from_millis(250));
        assert_eq!(fetcher.max_attempts(), Some(1));
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let (url, hits) = serve(vec![200], "<h1>Meta Platforms, Inc. (META)</h1>").await;

        let html = local_fetcher().fetch(&url).await.unwrap();

        assert_eq!(html, "<h1>Meta Platforms, Inc. (META)</h1>");
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fetch_retries_until_success() {
        let (url, hits) = serve(vec![503, 429, 200], "<table></table>").await;

        let html = local_fetcher().fetch(&url).await.unwrap();

        assert_eq!(html, "<table></table>");
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_fetch_gives_up_after_max_attempts() {
        let (url, hits) = serve(vec![500, 500, 500], "").await;

        let err = local_fetcher()
            .with_max_attempts(2)
            .fetch(&url)
            .await
            .unwrap_err();

        assert!(matches!(err, ScrapeError::Network(ref msg) if msg.contains("after 2 attempts")));
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }
}
