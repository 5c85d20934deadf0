//! Image fetching
//!
//! Resolves URLs to raw bytes with a bounded timeout. Failures never
//! propagate past this boundary as panics; callers always get either bytes
//! or a [`ScoutError::FetchFailed`](crate::error::ScoutError). Fetched
//! payloads stay in memory for their whole lifetime.

use crate::error::{Result, ScoutError};
use crate::types::config::SearchConfig;

/// URL-to-bytes resolver used for grid tiles, selections, and direct sends
pub trait FetchUrl {
    /// Fetch the resource at `url`, applying the configured timeout
    fn fetch(&self, url: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
}

impl<F: FetchUrl + Send + Sync> FetchUrl for std::sync::Arc<F> {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        (**self).fetch(url).await
    }
}

/// Production [`FetchUrl`] backed by reqwest
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a fetcher from the feature configuration
    pub fn new(config: &SearchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.fetch_timeout())
            .build()?;
        Ok(Self { client })
    }
}

impl FetchUrl for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ScoutError::fetch_failed(url, e))?
            .error_for_status()
            .map_err(|e| ScoutError::fetch_failed(url, e))?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ScoutError::fetch_failed(url, e))?;

        Ok(bytes.to_vec())
    }
}

/// Fetch several URLs concurrently, keeping only the successes
///
/// Each fetch fails independently; a slow or broken URL neither blocks nor
/// fails its siblings. Successes come back in input order.
pub async fn fetch_batch<F: FetchUrl>(fetcher: &F, urls: &[String]) -> Vec<Vec<u8>> {
    let fetched = futures::future::join_all(urls.iter().map(|url| async move {
        match fetcher.fetch(url).await {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                log::warn!("dropping {url}: {e}");
                None
            }
        }
    }))
    .await;

    fetched.into_iter().flatten().collect()
}
