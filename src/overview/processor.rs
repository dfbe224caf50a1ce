// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Per-query pipeline: API call, optional HTML backfill, merge, report write
//!
//! A processor never fails past its own boundary. Every error is logged with
//! the query text and becomes a "no result" record.

use std::sync::Arc;
use tracing::{debug, error, info, warn};

use super::extractor::FragmentExtractor;
use super::fetcher::PageSource;
use super::merger::merge_overview;
use super::provider::OverviewProvider;
use super::references::ReferenceIndex;
use super::report::{format_record, QueryOutcome, ReportSink};
use super::types::{AiOverview, Fragment, OverviewError};

/// Runs the fetch/merge/format pipeline for single queries
#[derive(Clone)]
pub struct QueryProcessor {
    provider: Arc<dyn OverviewProvider>,
    pages: Arc<dyn PageSource>,
    extractor: Arc<FragmentExtractor>,
    fetch_html: bool,
}

impl QueryProcessor {
    pub fn new(
        provider: Arc<dyn OverviewProvider>,
        pages: Arc<dyn PageSource>,
        extractor: Arc<FragmentExtractor>,
        fetch_html: bool,
    ) -> Self {
        Self {
            provider,
            pages,
            extractor,
            fetch_html,
        }
    }

    /// Process one query and append its record to the report
    pub async fn run(&self, query: &str, api_key: &str, sink: &ReportSink) {
        let outcome = self.process(query, api_key).await;
        self.write(query, &outcome, sink).await;
    }

    /// Append a record for an already decided outcome
    pub async fn write(&self, query: &str, outcome: &QueryOutcome, sink: &ReportSink) {
        let record = format_record(query, outcome);
        if let Err(e) = sink.append(&record).await {
            error!("Failed to write report record for query '{}': {}", query, e);
        }
    }

    /// Compute the outcome for one query without touching the report
    pub async fn process(&self, query: &str, api_key: &str) -> QueryOutcome {
        match self.fetch_outcome(query, api_key).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(
                    "An error occurred with query '{}' via {}: {}",
                    query,
                    self.provider.name(),
                    e
                );
                QueryOutcome::Failed
            }
        }
    }

    async fn fetch_outcome(&self, query: &str, api_key: &str) -> Result<QueryOutcome, OverviewError> {
        let response = self.provider.search(query, api_key).await?;

        let raw_html_url = response.raw_html_url().map(str::to_owned);
        let Some(raw_overview) = response.ai_overview else {
            info!("No AI overview for query '{}'", query);
            return Ok(QueryOutcome::NoOverview);
        };
        let overview = AiOverview::from(raw_overview);

        let fragments = if overview.blocks.iter().any(|b| b.content.is_missing()) {
            self.fragments_for(query, raw_html_url.as_deref()).await
        } else {
            debug!("All blocks complete for query '{}', skipping HTML snapshot", query);
            Vec::new()
        };

        let references = ReferenceIndex::build(&overview.references);
        let blocks = merge_overview(overview.blocks, &fragments);

        if blocks.is_empty() {
            info!("AI overview for query '{}' had no usable content", query);
            return Ok(QueryOutcome::NothingRetained);
        }

        info!(
            "Processed query '{}': {} blocks, {} fragments",
            query,
            blocks.len(),
            fragments.len()
        );
        Ok(QueryOutcome::Overview { blocks, references })
    }

    /// Download and parse the page snapshot. Failures yield no fragments.
    async fn fragments_for(&self, query: &str, raw_html_url: Option<&str>) -> Vec<Fragment> {
        if !self.fetch_html {
            return Vec::new();
        }
        let Some(url) = raw_html_url else {
            debug!("No raw HTML snapshot for query '{}'", query);
            return Vec::new();
        };

        match self.pages.fetch_html(url).await {
            Ok(html) => self.extractor.extract(&html),
            Err(e) => {
                warn!("HTML snapshot unavailable for query '{}': {}", query, e);
                Vec::new()
            }
        }
    }
}
