// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! AI overview retrieval and reporting
//!
//! Turns a batch of search queries into one plain-text report:
//! - AI overview content fetched from SerpApi per query
//! - Missing blocks backfilled from the raw HTML snapshot of the results page
//! - Concurrent per-query processing with one shared, append-only report
//!
//! ```text
//! queries → BatchCoordinator → QueryProcessor (×N) → ReportSink → Report
//!                                   │
//!               SerpApi ── merge ── FragmentExtractor ← raw HTML
//! ```

pub mod batch;
pub mod config;
pub mod extractor;
pub mod fetcher;
pub mod merger;
pub mod processor;
pub mod provider;
pub mod references;
pub mod report;
pub mod serpapi;
pub mod types;

// Re-export commonly used types
pub use batch::BatchCoordinator;
pub use config::{ExtractorSelectors, OverviewConfig};
pub use extractor::FragmentExtractor;
pub use fetcher::{FetchError, HttpPageSource, PageSource};
pub use merger::merge_overview;
pub use processor::QueryProcessor;
pub use provider::OverviewProvider;
pub use references::ReferenceIndex;
pub use report::{format_record, QueryOutcome, Report, ReportSink, REPORT_FILENAME};
pub use serpapi::SerpApiProvider;
pub use types::{
    AiOverview, BlockContent, ContentBlock, Fragment, ListItem, OverviewError, Reference,
    SerpResponse,
};
