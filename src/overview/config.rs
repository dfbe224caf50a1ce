// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for AI overview retrieval

use scraper::Selector;
use std::env;

pub const DEFAULT_SERP_API_URL: &str = "https://serpapi.com/search.json";

/// Marker attribute of the AI overview region of the results page
pub const DEFAULT_OVERVIEW_MARKER: &str = "[data-subtree='aimc']";
/// Marker attribute of "aquarium" style answer panels
pub const DEFAULT_AQUARIUM_MARKER: &str = "[data-aquarium]";
/// Style class carried by individual overview content blocks
pub const DEFAULT_CONTENT_SELECTOR: &str = ".LGOjhe";

/// Configuration for overview batches
#[derive(Debug, Clone)]
pub struct OverviewConfig {
    /// SerpApi credential. Checked once per batch, not at startup.
    pub serp_api_key: Option<String>,
    /// SerpApi search endpoint
    pub serp_api_url: String,
    /// SerpApi engine parameter
    pub engine: String,
    /// Upstream API request timeout in milliseconds
    pub request_timeout_ms: u64,
    /// Download the raw HTML snapshot to backfill missing blocks
    pub fetch_html: bool,
    /// Timeout for the HTML snapshot download in seconds
    pub html_timeout_secs: u64,
    /// Maximum queries in flight per batch
    pub max_concurrent_queries: usize,
    /// Deadline for one query, end to end, in seconds
    pub query_timeout_secs: u64,
    /// Maximum queries accepted in one request
    pub max_queries_per_request: usize,
    pub selectors: ExtractorSelectors,
}

/// CSS selectors used to locate overview content in the raw HTML
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractorSelectors {
    pub overview_marker: String,
    pub aquarium_marker: String,
    pub content: String,
}

impl Default for ExtractorSelectors {
    fn default() -> Self {
        Self {
            overview_marker: DEFAULT_OVERVIEW_MARKER.to_string(),
            aquarium_marker: DEFAULT_AQUARIUM_MARKER.to_string(),
            content: DEFAULT_CONTENT_SELECTOR.to_string(),
        }
    }
}

impl OverviewConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            serp_api_key: env::var("SERP_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            serp_api_url: env::var("SERP_API_URL").unwrap_or(defaults.serp_api_url),
            engine: env::var("SERP_ENGINE").unwrap_or(defaults.engine),
            request_timeout_ms: env::var("SERP_REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_ms),
            fetch_html: env::var("OVERVIEW_FETCH_HTML")
                .map(|v| v.to_lowercase() != "false")
                .unwrap_or(true),
            html_timeout_secs: env::var("OVERVIEW_HTML_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.html_timeout_secs),
            max_concurrent_queries: env::var("OVERVIEW_MAX_CONCURRENT_QUERIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_concurrent_queries),
            query_timeout_secs: env::var("OVERVIEW_QUERY_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.query_timeout_secs),
            max_queries_per_request: env::var("OVERVIEW_MAX_QUERIES_PER_REQUEST")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_queries_per_request),
            selectors: ExtractorSelectors {
                overview_marker: env::var("OVERVIEW_MARKER_SELECTOR")
                    .unwrap_or(defaults.selectors.overview_marker),
                aquarium_marker: env::var("AQUARIUM_MARKER_SELECTOR")
                    .unwrap_or(defaults.selectors.aquarium_marker),
                content: env::var("OVERVIEW_CONTENT_SELECTOR")
                    .unwrap_or(defaults.selectors.content),
            },
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.serp_api_url.trim().is_empty() {
            return Err("serp_api_url must not be empty".to_string());
        }
        if self.request_timeout_ms == 0 {
            return Err("request_timeout_ms must be greater than 0".to_string());
        }
        if self.html_timeout_secs == 0 {
            return Err("html_timeout_secs must be at least 1".to_string());
        }
        if self.max_concurrent_queries == 0 {
            return Err("max_concurrent_queries must be at least 1".to_string());
        }
        if self.query_timeout_secs == 0 {
            return Err("query_timeout_secs must be at least 1".to_string());
        }
        if self.max_queries_per_request == 0 {
            return Err("max_queries_per_request must be at least 1".to_string());
        }
        for selector in [
            &self.selectors.overview_marker,
            &self.selectors.aquarium_marker,
            &self.selectors.content,
        ] {
            if Selector::parse(selector).is_err() {
                return Err(format!("invalid CSS selector: {}", selector));
            }
        }
        Ok(())
    }
}

impl Default for OverviewConfig {
    fn default() -> Self {
        Self {
            serp_api_key: None,
            serp_api_url: DEFAULT_SERP_API_URL.to_string(),
            engine: "google".to_string(),
            request_timeout_ms: 30_000,
            fetch_html: true,
            html_timeout_secs: 10,
            max_concurrent_queries: 8,
            query_timeout_secs: 60,
            max_queries_per_request: 50,
            selectors: ExtractorSelectors::default(),
        }
    }
}
