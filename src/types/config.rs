//! Search feature configuration
//!
//! `SearchConfig` carries the search API endpoint, paging parameters, and
//! canvas geometry. Hosts either deserialize it from their own config file
//! or assemble one with [`SearchConfig::builder()`].

use std::time::Duration;

use serde::Deserialize;

use crate::error::{Result, ScoutError};

/// Hard ceiling on the result count requested from the search API
pub const MAX_RESULT_CAP: u32 = 200;

fn default_result_cap() -> u32 {
    90
}

fn default_page_size() -> usize {
    21
}

fn default_canvas_width() -> u32 {
    800
}

fn default_canvas_height() -> u32 {
    1600
}

fn default_columns() -> usize {
    3
}

fn default_padding() -> u32 {
    15
}

fn default_header_height() -> u32 {
    100
}

fn default_search_timeout_secs() -> u64 {
    30
}

fn default_fetch_timeout_secs() -> u64 {
    120
}

fn default_session_ttl_secs() -> u64 {
    600
}

fn default_sweep_interval_secs() -> u64 {
    60
}

/// Configuration for the image search feature
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Search API endpoint returning `{ "results": [url, ...] }`
    pub api_endpoint: String,

    /// Result count requested from the search API per query
    #[serde(default = "default_result_cap")]
    pub result_cap: u32,

    /// Number of candidate images offered to each page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Canvas width in pixels
    #[serde(default = "default_canvas_width")]
    pub canvas_width: u32,

    /// Canvas height in pixels
    #[serde(default = "default_canvas_height")]
    pub canvas_height: u32,

    /// Number of masonry columns
    #[serde(default = "default_columns")]
    pub columns: usize,

    /// Padding between and around columns, in pixels
    #[serde(default = "default_padding")]
    pub padding: u32,

    /// Height of the header region; columns accumulate from this offset
    #[serde(default = "default_header_height")]
    pub header_height: u32,

    /// Timeout for the search API call, in seconds
    #[serde(default = "default_search_timeout_secs")]
    pub search_timeout_secs: u64,

    /// Timeout for each individual image fetch, in seconds
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// How long an abandoned session binding survives before eviction
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,

    /// Interval of the background eviction sweep
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

impl SearchConfig {
    /// Create a new builder for `SearchConfig`
    #[must_use]
    pub fn builder() -> SearchConfigBuilder {
        SearchConfigBuilder::default()
    }

    /// Timeout for the search API call
    #[must_use]
    pub fn search_timeout(&self) -> Duration {
        Duration::from_secs(self.search_timeout_secs)
    }

    /// Timeout for each individual image fetch
    #[must_use]
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// TTL applied to abandoned session bindings
    #[must_use]
    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    /// Interval of the background eviction sweep
    #[must_use]
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    /// Validate bounds that the layout and paging math rely on
    pub fn validate(&self) -> Result<()> {
        if self.api_endpoint.is_empty() {
            return Err(ScoutError::invalid_config("api_endpoint must not be empty"));
        }
        if self.result_cap == 0 || self.result_cap > MAX_RESULT_CAP {
            return Err(ScoutError::invalid_config(format!(
                "result_cap must be in 1..={MAX_RESULT_CAP}"
            )));
        }
        if self.page_size == 0 {
            return Err(ScoutError::invalid_config("page_size must be positive"));
        }
        if self.columns == 0 {
            return Err(ScoutError::invalid_config("columns must be positive"));
        }
        let gutters = self.padding * (self.columns as u32 + 1);
        if self.canvas_width <= gutters {
            return Err(ScoutError::invalid_config(
                "canvas_width leaves no room for columns after padding",
            ));
        }
        if self.canvas_height <= self.header_height {
            return Err(ScoutError::invalid_config(
                "canvas_height must exceed header_height",
            ));
        }
        Ok(())
    }
}

/// Builder for [`SearchConfig`]
#[derive(Debug, Default)]
pub struct SearchConfigBuilder {
    api_endpoint: Option<String>,
    result_cap: Option<u32>,
    page_size: Option<usize>,
    canvas_width: Option<u32>,
    canvas_height: Option<u32>,
    columns: Option<usize>,
    padding: Option<u32>,
    header_height: Option<u32>,
    search_timeout: Option<Duration>,
    fetch_timeout: Option<Duration>,
    session_ttl: Option<Duration>,
    sweep_interval: Option<Duration>,
}

impl SearchConfigBuilder {
    /// Set the search API endpoint
    #[must_use]
    pub fn api_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.api_endpoint = Some(endpoint.into());
        self
    }

    /// Set the result count requested per query
    #[must_use]
    pub fn result_cap(mut self, cap: u32) -> Self {
        self.result_cap = Some(cap);
        self
    }

    /// Set the number of candidates per page
    #[must_use]
    pub fn page_size(mut self, size: usize) -> Self {
        self.page_size = Some(size);
        self
    }

    /// Set the canvas dimensions in pixels
    #[must_use]
    pub fn canvas_size(mut self, width: u32, height: u32) -> Self {
        self.canvas_width = Some(width);
        self.canvas_height = Some(height);
        self
    }

    /// Set the number of masonry columns
    #[must_use]
    pub fn columns(mut self, columns: usize) -> Self {
        self.columns = Some(columns);
        self
    }

    /// Set the padding between and around columns
    #[must_use]
    pub fn padding(mut self, padding: u32) -> Self {
        self.padding = Some(padding);
        self
    }

    /// Set the header region height
    #[must_use]
    pub fn header_height(mut self, height: u32) -> Self {
        self.header_height = Some(height);
        self
    }

    /// Set the search API timeout
    #[must_use]
    pub fn search_timeout(mut self, timeout: Duration) -> Self {
        self.search_timeout = Some(timeout);
        self
    }

    /// Set the per-image fetch timeout
    #[must_use]
    pub fn fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = Some(timeout);
        self
    }

    /// Set the session binding TTL
    #[must_use]
    pub fn session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = Some(ttl);
        self
    }

    /// Set the eviction sweep interval
    #[must_use]
    pub fn sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = Some(interval);
        self
    }

    /// Build the configuration, validating bounds
    pub fn build(self) -> Result<SearchConfig> {
        let config = SearchConfig {
            api_endpoint: self
                .api_endpoint
                .ok_or_else(|| ScoutError::invalid_config("api_endpoint is required"))?,
            result_cap: self.result_cap.unwrap_or_else(default_result_cap),
            page_size: self.page_size.unwrap_or_else(default_page_size),
            canvas_width: self.canvas_width.unwrap_or_else(default_canvas_width),
            canvas_height: self.canvas_height.unwrap_or_else(default_canvas_height),
            columns: self.columns.unwrap_or_else(default_columns),
            padding: self.padding.unwrap_or_else(default_padding),
            header_height: self.header_height.unwrap_or_else(default_header_height),
            search_timeout_secs: self
                .search_timeout
                .map_or_else(default_search_timeout_secs, |d| d.as_secs()),
            fetch_timeout_secs: self
                .fetch_timeout
                .map_or_else(default_fetch_timeout_secs, |d| d.as_secs()),
            session_ttl_secs: self
                .session_ttl
                .map_or_else(default_session_ttl_secs, |d| d.as_secs()),
            sweep_interval_secs: self
                .sweep_interval
                .map_or_else(default_sweep_interval_secs, |d| d.as_secs()),
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> SearchConfigBuilder {
        SearchConfig::builder().api_endpoint("http://localhost/api/pin")
    }

    #[test]
    fn test_defaults() {
        let config = base().build().unwrap();
        assert_eq!(config.result_cap, 90);
        assert_eq!(config.page_size, 21);
        assert_eq!(config.canvas_width, 800);
        assert_eq!(config.canvas_height, 1600);
        assert_eq!(config.columns, 3);
        assert_eq!(config.padding, 15);
    }

    #[test]
    fn test_missing_endpoint_rejected() {
        assert!(SearchConfig::builder().build().is_err());
    }

    #[test]
    fn test_zero_page_size_rejected() {
        assert!(base().page_size(0).build().is_err());
    }

    #[test]
    fn test_canvas_narrower_than_gutters_rejected() {
        assert!(base().canvas_size(50, 1600).columns(3).padding(15).build().is_err());
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: SearchConfig =
            serde_json::from_str(r#"{"api_endpoint":"http://localhost/api/pin"}"#).unwrap();
        assert_eq!(config.page_size, 21);
        assert_eq!(config.session_ttl(), Duration::from_secs(600));
    }
}
