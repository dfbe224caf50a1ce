// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Overview search endpoint handler

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Query;
use tracing::{debug, info, warn};

use super::request::OverviewSearchRequest;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::overview::REPORT_FILENAME;

/// GET /api/v1/search - Build an AI overview report
///
/// # Request
/// - `queries`: repeated query parameter, one per search (required)
///
/// # Response
/// A `text/plain` attachment named `ai_overview.txt` with one
/// delimiter-bracketed record per query, in completion order.
///
/// # Errors
/// - 400 Bad Request: no queries, empty or oversized query, too many queries
/// - 500 Internal Server Error: SerpApi credential not configured
pub async fn overview_search_handler(
    State(state): State<AppState>,
    Query(request): Query<OverviewSearchRequest>,
) -> Result<Response, ApiError> {
    debug!("Overview search request: {:?}", request.queries);

    if let Err((field, message)) = request.validate(state.max_queries_per_request) {
        warn!("Overview search validation failed: {}", message);
        return Err(ApiError::ValidationError { field, message });
    }

    let report = state.coordinator.run(&request.queries).await.map_err(|e| {
        warn!("Overview batch failed: {}", e);
        ApiError::from(e)
    })?;

    info!(
        "Overview report ready: {} records, {} bytes",
        report.record_count,
        report.contents.len()
    );

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", REPORT_FILENAME),
            ),
        ],
        report.contents,
    )
        .into_response())
}
