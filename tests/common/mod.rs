// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Local stand-in for SerpApi and its raw HTML snapshots
//!
//! Responses are keyed by the `q` parameter so each test picks its scenario
//! through the query text.

#![allow(dead_code)]

use ai_overview_node::overview::OverviewConfig;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::collections::HashMap;
use std::time::Duration;

pub const TEST_API_KEY: &str = "test-key";

pub const SNAPSHOT_HTML: &str = r#"
    <!DOCTYPE html>
    <html>
    <body>
        <div data-subtree="aimc">
            <div class="LGOjhe"><span>filled</span></div>
            <div class="LGOjhe"><ul><li>first</li><li>second</li></ul></div>
        </div>
    </body>
    </html>
"#;

/// Start the fake upstream on an ephemeral port and return its base URL
pub async fn spawn_fake_serpapi() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fake upstream");
    let base = format!("http://{}", listener.local_addr().expect("local addr"));

    let app = Router::new()
        .route("/search.json", get(search))
        .route("/raw.html", get(|| async { SNAPSHOT_HTML }))
        .route(
            "/missing.html",
            get(|| async { (StatusCode::NOT_FOUND, "gone") }),
        )
        .with_state(base.clone());

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fake upstream");
    });

    base
}

/// Configuration pointing at the fake upstream
pub fn config_for(base: &str) -> OverviewConfig {
    OverviewConfig {
        serp_api_key: Some(TEST_API_KEY.to_string()),
        serp_api_url: format!("{}/search.json", base),
        request_timeout_ms: 5_000,
        html_timeout_secs: 5,
        query_timeout_secs: 10,
        ..OverviewConfig::default()
    }
}

async fn search(
    State(base): State<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if params.get("api_key").map(String::as_str) != Some(TEST_API_KEY) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Invalid API key."})),
        )
            .into_response();
    }

    let query = params.get("q").cloned().unwrap_or_default();
    let metadata = |file: &str| json!({"id": "search-1", "raw_html_file": format!("{}/{}", base, file)});

    let body = match query.as_str() {
        "y" => json!({
            "ai_overview": {
                "text_blocks": [
                    {"type": "paragraph", "snippet": "hello", "reference_indexes": [1]}
                ],
                "references": [{"index": 1, "title": "T", "source": "S", "link": "L"}]
            },
            "search_metadata": metadata("raw.html")
        }),
        "fill" => json!({
            "ai_overview": {
                "text_blocks": [
                    {"type": "paragraph", "reference_indexes": [2]},
                    {"type": "list", "list": []}
                ],
                "references": [{"index": 2, "title": "Doc", "source": "example.com", "link": "https://example.com"}]
            },
            "search_metadata": metadata("raw.html")
        }),
        "missing-html" => json!({
            "ai_overview": {
                "text_blocks": [
                    {"type": "paragraph", "snippet": "kept"},
                    {"type": "paragraph"}
                ]
            },
            "search_metadata": metadata("missing.html")
        }),
        "server-error" => {
            return (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response()
        }
        "in-band-error" => json!({"error": "Google hasn't returned any results for this query."}),
        "malformed" => json!({"ai_overview": {"text_blocks": "not a list"}}),
        "slow" => {
            tokio::time::sleep(Duration::from_millis(300)).await;
            json!({
                "ai_overview": {"text_blocks": [{"type": "paragraph", "snippet": "slow answer"}]}
            })
        }
        "fast" => json!({
            "ai_overview": {"text_blocks": [{"type": "paragraph", "snippet": "fast answer"}]}
        }),
        // Anything else, including "x", has no overview
        _ => json!({"search_metadata": metadata("raw.html")}),
    };

    Json(body).into_response()
}
