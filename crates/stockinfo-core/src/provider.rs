//! Fetcher trait for retrieving page markup.
//!
//! Extraction never performs I/O. Everything network-facing sits behind
//! [`HtmlFetcher`], which hands back the raw markup of a page that was
//! fetched successfully.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::error::Result;

/// Source of raw page markup.
///
/// Implementations own the retry policy: a returned `Ok` is taken to be the
/// complete markup of a successful response.
#[async_trait]
pub trait HtmlFetcher: Send + Sync + Debug {
    /// Returns the name of this fetcher (e.g., "HTTP").
    fn name(&self) -> &str;

    /// Fetches the markup at `url`.
    ///
    /// # Errors
    ///
    /// Returns an error once the implementation's retry policy gives up.
    async fn fetch(&self, url: &str) -> Result<String>;
}
