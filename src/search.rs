//! Search API client
//!
//! Thin wrapper over the remote image search endpoint. The API is a black
//! box: one request with a query and a result cap, one ordered list of image
//! URLs back. The [`SearchApi`] trait is the seam tests and alternative
//! backends plug into.

use serde_json::Value;

use crate::error::{Result, ScoutError};
use crate::types::config::SearchConfig;

/// One-shot image search returning URLs in relevance order
pub trait SearchApi {
    /// Query the search backend for up to `cap` image URLs.
    ///
    /// An empty list is a valid outcome ("no results"); a response without
    /// a usable result list is `SearchUnavailable`.
    fn search(
        &self,
        query: &str,
        cap: u32,
    ) -> impl std::future::Future<Output = Result<Vec<String>>> + Send;
}

impl<S: SearchApi + Send + Sync> SearchApi for std::sync::Arc<S> {
    async fn search(&self, query: &str, cap: u32) -> Result<Vec<String>> {
        (**self).search(query, cap).await
    }
}

/// Production [`SearchApi`] backed by an HTTP JSON endpoint
///
/// Expects a response shaped like `{ "results": ["https://...", ...] }`.
pub struct HttpSearchClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSearchClient {
    /// Build a client from the feature configuration
    pub fn new(config: &SearchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.search_timeout())
            .build()?;
        Ok(Self {
            client,
            endpoint: config.api_endpoint.clone(),
        })
    }
}

impl SearchApi for HttpSearchClient {
    async fn search(&self, query: &str, cap: u32) -> Result<Vec<String>> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("query", query), ("num", &cap.to_string())])
            .send()
            .await?
            .error_for_status()?;

        let body: Value = response.json().await?;
        let urls = parse_result_list(&body)?;
        log::debug!("search \"{}\" returned {} urls", query, urls.len());
        Ok(urls)
    }
}

/// Extract the ordered URL list from an API response body
///
/// Non-string entries are skipped; a missing or non-array `results` field
/// means the response is unusable.
pub(crate) fn parse_result_list(body: &Value) -> Result<Vec<String>> {
    let results = body
        .get("results")
        .and_then(Value::as_array)
        .ok_or_else(|| ScoutError::search_unavailable("response carries no result list"))?;

    Ok(results
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect())
}
