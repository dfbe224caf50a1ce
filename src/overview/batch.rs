// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Batch orchestration
//!
//! Runs one query processor per query concurrently against a shared report
//! sink and returns the finished report. Only a missing credential fails the
//! whole batch.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use super::config::OverviewConfig;
use super::extractor::FragmentExtractor;
use super::fetcher::{HttpPageSource, PageSource};
use super::processor::QueryProcessor;
use super::provider::OverviewProvider;
use super::report::{QueryOutcome, Report, ReportSink};
use super::serpapi::SerpApiProvider;
use super::types::OverviewError;

/// Coordinates concurrent query processing for one request at a time
pub struct BatchCoordinator {
    processor: QueryProcessor,
    api_key: Option<String>,
    max_concurrent: usize,
    query_timeout: Duration,
}

impl BatchCoordinator {
    /// Create a coordinator with explicit collaborators
    pub fn new(
        config: &OverviewConfig,
        provider: Arc<dyn OverviewProvider>,
        pages: Arc<dyn PageSource>,
    ) -> Result<Self, String> {
        config.validate()?;
        let extractor = FragmentExtractor::new(&config.selectors)?;
        let processor = QueryProcessor::new(provider, pages, Arc::new(extractor), config.fetch_html);

        Ok(Self {
            processor,
            api_key: config.serp_api_key.clone(),
            max_concurrent: config.max_concurrent_queries,
            query_timeout: Duration::from_secs(config.query_timeout_secs),
        })
    }

    /// Create a coordinator talking to SerpApi over HTTP
    pub fn from_config(config: &OverviewConfig) -> Result<Self, String> {
        Self::new(
            config,
            Arc::new(SerpApiProvider::from_config(config)),
            Arc::new(HttpPageSource::new(config.html_timeout_secs)),
        )
    }

    /// Check if a credential is configured
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Process all queries and return the finished report
    ///
    /// Records appear in completion order.
    pub async fn run(&self, queries: &[String]) -> Result<Report, OverviewError> {
        let api_key = self.api_key.as_deref().ok_or(OverviewError::MissingApiKey)?;

        let batch_id = Uuid::new_v4();
        let span = info_span!("overview_batch", %batch_id, queries = queries.len());

        async move {
            let start = Instant::now();
            let sink = ReportSink::new()?;
            let permits = Semaphore::new(self.max_concurrent);

            let futures: Vec<_> = queries
                .iter()
                .map(|query| self.run_one(query, api_key, &sink, &permits))
                .collect();
            futures::future::join_all(futures).await;

            let report = sink.finish().await?;
            info!(
                "Batch complete: {} records in {}ms",
                report.record_count,
                start.elapsed().as_millis()
            );
            Ok(report)
        }
        .instrument(span)
        .await
    }

    async fn run_one(&self, query: &str, api_key: &str, sink: &ReportSink, permits: &Semaphore) {
        // The semaphore is never closed
        let _permit = permits.acquire().await.ok();

        let outcome =
            match tokio::time::timeout(self.query_timeout, self.processor.process(query, api_key))
                .await
            {
                Ok(outcome) => outcome,
                Err(_) => {
                    warn!(
                        "Query '{}' timed out after {}s",
                        query,
                        self.query_timeout.as_secs()
                    );
                    QueryOutcome::Failed
                }
            };

        self.processor.write(query, &outcome, sink).await;
    }
}
