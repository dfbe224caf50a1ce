// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Upstream overview provider trait definition

use async_trait::async_trait;

use super::types::{OverviewError, SerpResponse};

/// Trait for upstream search APIs that return AI overviews
///
/// The credential is passed per call so a single provider can serve
/// batches configured with different keys.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OverviewProvider: Send + Sync {
    /// Run one search and return the decoded response
    ///
    /// # Arguments
    /// * `query` - The search query string
    /// * `api_key` - Upstream API credential
    async fn search(&self, query: &str, api_key: &str) -> Result<SerpResponse, OverviewError>;

    /// Get the provider name for logging
    fn name(&self) -> &'static str;
}
