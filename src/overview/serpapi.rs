// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! SerpApi search provider
//!
//! Calls the SerpApi JSON endpoint and decodes the AI overview section.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::config::OverviewConfig;
use super::provider::OverviewProvider;
use super::types::{OverviewError, SerpResponse};

/// SerpApi provider
pub struct SerpApiProvider {
    client: Client,
    base_url: String,
    engine: String,
    timeout_ms: u64,
}

impl SerpApiProvider {
    /// Create a new SerpApi provider
    ///
    /// # Arguments
    /// * `base_url` - Search endpoint, normally `https://serpapi.com/search.json`
    /// * `engine` - SerpApi engine parameter
    /// * `timeout_ms` - Request timeout
    pub fn new(base_url: impl Into<String>, engine: impl Into<String>, timeout_ms: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into(),
            engine: engine.into(),
            timeout_ms,
        }
    }

    pub fn from_config(config: &OverviewConfig) -> Self {
        Self::new(
            config.serp_api_url.clone(),
            config.engine.clone(),
            config.request_timeout_ms,
        )
    }
}

#[async_trait]
impl OverviewProvider for SerpApiProvider {
    async fn search(&self, query: &str, api_key: &str) -> Result<SerpResponse, OverviewError> {
        let response = self
            .client
            .get(&self.base_url)
            .header("Accept", "application/json")
            .query(&[("engine", self.engine.as_str()), ("q", query), ("api_key", api_key)])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    OverviewError::Timeout {
                        timeout_ms: self.timeout_ms,
                    }
                } else {
                    OverviewError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(OverviewError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let data: SerpResponse = response
            .json()
            .await
            .map_err(|e| OverviewError::MalformedResponse(e.to_string()))?;

        if let Some(error) = &data.error {
            return Err(OverviewError::Upstream(error.clone()));
        }

        Ok(data)
    }

    fn name(&self) -> &'static str {
        "serpapi"
    }
}
