// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! End-to-end batch tests against a local fake SerpApi
//!
//! These tests verify that:
//! - Each query yields exactly one delimiter-bracketed record
//! - Missing blocks are backfilled from the raw HTML snapshot
//! - Upstream and snapshot failures degrade per query, never per batch
//! - Records are written in completion order without interleaving

use ai_overview_node::overview::report::{
    NO_OVERVIEW_MESSAGE, NO_RESULT_MESSAGE, RECORD_BEGIN, RECORD_END,
};
use ai_overview_node::overview::{BatchCoordinator, OverviewConfig, OverviewError};

use crate::common::{config_for, spawn_fake_serpapi};

fn queries(items: &[&str]) -> Vec<String> {
    items.iter().map(|q| q.to_string()).collect()
}

async fn run_batch(config: &OverviewConfig, items: &[&str]) -> String {
    let coordinator = BatchCoordinator::from_config(config).expect("valid config");
    coordinator
        .run(&queries(items))
        .await
        .expect("batch succeeds")
        .contents
}

/// Split a report into its records
fn records(report: &str) -> Vec<String> {
    let terminator = format!("{}\n\n", RECORD_END);
    report
        .split_terminator(terminator.as_str())
        .map(|r| format!("{}{}", r, terminator))
        .collect()
}

#[tokio::test]
async fn test_absent_overview_record() {
    let base = spawn_fake_serpapi().await;
    let report = run_batch(&config_for(&base), &["x"]).await;

    let expected = format!(
        "{}\nKeyword:\n x\n\n{}\n\n{}\n\n",
        RECORD_BEGIN, NO_OVERVIEW_MESSAGE, RECORD_END
    );
    assert_eq!(report, expected);
}

#[tokio::test]
async fn test_paragraph_with_reference() {
    let base = spawn_fake_serpapi().await;
    let report = run_batch(&config_for(&base), &["y"]).await;

    assert!(report.contains("Response:\nhello\n\nReferences:\n- T (S): L\n"));
}

#[tokio::test]
async fn test_missing_blocks_filled_from_snapshot() {
    let base = spawn_fake_serpapi().await;
    let report = run_batch(&config_for(&base), &["fill"]).await;

    assert!(report.contains("Response:\nfilled\n\n"));
    assert!(report.contains("References:\n- Doc (example.com): https://example.com\n"));
    assert!(report.contains("- first\n- second\n"));
}

#[tokio::test]
async fn test_snapshot_404_keeps_api_content() {
    let base = spawn_fake_serpapi().await;
    let report = run_batch(&config_for(&base), &["missing-html"]).await;

    assert_eq!(records(&report).len(), 1);
    assert!(report.contains("Response:\nkept\n\n"));
}

#[tokio::test]
async fn test_html_disabled_leaves_blocks_unfilled() {
    let base = spawn_fake_serpapi().await;
    let config = OverviewConfig {
        fetch_html: false,
        ..config_for(&base)
    };
    let report = run_batch(&config, &["fill"]).await;

    assert!(!report.contains("filled"));
    // The paragraph survives through its reference only
    assert!(report.contains("Response:\nReferences:\n- Doc (example.com): https://example.com\n"));
}

#[tokio::test]
async fn test_upstream_failures_become_no_result_records() {
    let base = spawn_fake_serpapi().await;
    let report = run_batch(
        &config_for(&base),
        &["server-error", "in-band-error", "malformed", "y"],
    )
    .await;

    assert_eq!(records(&report).len(), 4);
    assert_eq!(report.matches(NO_RESULT_MESSAGE).count(), 3);
    assert!(report.contains("hello"));
}

#[tokio::test]
async fn test_wrong_key_fails_queries_not_batch() {
    let base = spawn_fake_serpapi().await;
    let config = OverviewConfig {
        serp_api_key: Some("wrong".to_string()),
        ..config_for(&base)
    };
    let report = run_batch(&config, &["x", "y"]).await;

    assert_eq!(records(&report).len(), 2);
    assert_eq!(report.matches(NO_RESULT_MESSAGE).count(), 2);
}

#[tokio::test]
async fn test_missing_key_fails_batch() {
    let base = spawn_fake_serpapi().await;
    let config = OverviewConfig {
        serp_api_key: None,
        ..config_for(&base)
    };
    let coordinator = BatchCoordinator::from_config(&config).unwrap();

    let result = coordinator.run(&queries(&["x"])).await;
    assert!(matches!(result, Err(OverviewError::MissingApiKey)));
}

#[tokio::test]
async fn test_concurrent_records_complete_and_separate() {
    let base = spawn_fake_serpapi().await;
    let report = run_batch(&config_for(&base), &["slow", "fast"]).await;

    let records = records(&report);
    assert_eq!(records.len(), 2);
    for record in &records {
        assert!(record.starts_with(RECORD_BEGIN));
        assert_eq!(record.matches(RECORD_BEGIN).count(), 1);
        assert_eq!(record.matches(RECORD_END).count(), 1);
    }

    // Completion order: the fast query finishes first
    assert!(records[0].contains("fast answer"));
    assert!(records[1].contains("slow answer"));
}

#[tokio::test]
async fn test_one_record_per_query() {
    let base = spawn_fake_serpapi().await;
    let items = ["a", "b", "c", "d", "e", "y", "fill", "x"];
    let report = run_batch(&config_for(&base), &items).await;

    assert_eq!(records(&report).len(), items.len());
    for q in items {
        assert_eq!(report.matches(&format!("Keyword:\n {}\n", q)).count(), 1);
    }
}
