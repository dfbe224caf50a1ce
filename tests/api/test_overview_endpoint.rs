// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Route tests for /api/v1/search and /health
//!
//! These tests verify that:
//! - Repeated `queries` parameters produce a downloadable text report
//! - A missing credential is a 500 configuration error, before any work
//! - Invalid requests are rejected with 400
//! - The health route answers

use ai_overview_node::{
    api::{create_app, AppState, ErrorResponse},
    overview::{report::RECORD_BEGIN, BatchCoordinator, OverviewConfig},
};
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use tower::util::ServiceExt; // for `oneshot`

use crate::common::{config_for, spawn_fake_serpapi};

fn app_for(config: &OverviewConfig) -> Router {
    let coordinator = BatchCoordinator::from_config(config).expect("valid config");
    create_app(AppState::new(coordinator, config))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_search_returns_report_attachment() {
    let base = spawn_fake_serpapi().await;
    let app = app_for(&config_for(&base));

    let response = app
        .oneshot(get("/api/v1/search?queries=x&queries=y"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"ai_overview.txt\""
    );
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/plain"));

    let body = body_string(response).await;
    assert_eq!(body.matches(RECORD_BEGIN).count(), 2);
    assert!(body.contains("No AI overview found, Skipping...."));
    assert!(body.contains("- T (S): L"));
}

#[tokio::test]
async fn test_missing_api_key_is_server_error() {
    let config = OverviewConfig {
        serp_api_key: None,
        // Unroutable: the request must fail before any upstream call
        serp_api_url: "http://127.0.0.1:1/search.json".to_string(),
        ..OverviewConfig::default()
    };
    let app = app_for(&config);

    let response = app.oneshot(get("/api/v1/search?queries=x")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let error: ErrorResponse = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(error.error_type, "configuration_error");
    assert_eq!(error.message, "API key for SERP API is not configured.");
}

#[tokio::test]
async fn test_no_queries_rejected() {
    let app = app_for(&OverviewConfig {
        serp_api_key: Some("key".to_string()),
        ..OverviewConfig::default()
    });

    let response = app.oneshot(get("/api/v1/search")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_too_many_queries_rejected() {
    let app = app_for(&OverviewConfig {
        serp_api_key: Some("key".to_string()),
        max_queries_per_request: 1,
        ..OverviewConfig::default()
    });

    let response = app
        .oneshot(get("/api/v1/search?queries=a&queries=b"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: ErrorResponse = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(error.error_type, "validation_error");
}

#[tokio::test]
async fn test_health_route() {
    let app = app_for(&OverviewConfig::default());

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["status"], "healthy");
}
