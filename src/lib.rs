// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod overview;
pub mod version;

// Re-export main types
pub use overview::{BatchCoordinator, OverviewConfig, OverviewError, Report};
