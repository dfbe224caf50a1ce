// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Citation lookup by reference index

use std::collections::HashMap;

use super::types::Reference;

/// Mapping from citation index to reference metadata
#[derive(Debug, Clone, Default)]
pub struct ReferenceIndex {
    by_index: HashMap<i64, Reference>,
}

impl ReferenceIndex {
    /// Build the index. Later records win on duplicate indexes.
    pub fn build(references: &[Reference]) -> Self {
        let by_index = references
            .iter()
            .map(|r| (r.index, r.clone()))
            .collect();
        Self { by_index }
    }

    fn get(&self, index: i64) -> Option<&Reference> {
        self.by_index.get(&index)
    }

    /// Format one reference line, or None when the index is unknown
    pub fn resolve(&self, index: i64) -> Option<String> {
        self.get(index)
            .map(|r| format!("- {} ({}): {}", r.title, r.source, r.link))
    }
}
