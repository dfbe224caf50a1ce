// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Overview search request types

use serde::{Deserialize, Serialize};

/// Maximum length of a single query string
pub const MAX_QUERY_CHARS: usize = 500;

/// Query string of GET /api/v1/search, e.g. `?queries=a&queries=b`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OverviewSearchRequest {
    /// Search query strings, one record per entry in the report
    #[serde(default)]
    pub queries: Vec<String>,
}

impl OverviewSearchRequest {
    /// Validate the request
    ///
    /// Returns the offending field and reason on failure.
    pub fn validate(&self, max_queries: usize) -> Result<(), (String, String)> {
        if self.queries.is_empty() {
            return Err((
                "queries".to_string(),
                "at least one query is required".to_string(),
            ));
        }
        if self.queries.len() > max_queries {
            return Err((
                "queries".to_string(),
                format!("too many queries (max {})", max_queries),
            ));
        }
        for query in &self.queries {
            if query.trim().is_empty() {
                return Err(("queries".to_string(), "query cannot be empty".to_string()));
            }
            if query.chars().count() > MAX_QUERY_CHARS {
                return Err((
                    "queries".to_string(),
                    format!("query too long (max {} characters)", MAX_QUERY_CHARS),
                ));
            }
        }
        Ok(())
    }
}
