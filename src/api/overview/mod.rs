// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! AI overview report endpoint
//!
//! Provides the `/api/v1/search` HTTP endpoint.

pub mod handler;
pub mod request;

pub use handler::overview_search_handler;
pub use request::OverviewSearchRequest;
