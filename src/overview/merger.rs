// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Reconciles API content blocks with fragments scraped from the page
//!
//! Blocks and fragments are paired by position, not by content. A block is
//! only ever filled when its own content is missing and the fragment at the
//! same position has the same shape.

use tracing::debug;

use super::types::{BlockContent, ContentBlock, Fragment, ListItem};

/// Fill missing block content from positionally aligned fragments, then
/// drop blocks with neither content nor references.
pub fn merge_overview(blocks: Vec<ContentBlock>, fragments: &[Fragment]) -> Vec<ContentBlock> {
    blocks
        .into_iter()
        .enumerate()
        .map(|(position, mut block)| {
            if block.content.is_missing() {
                if let Some(fragment) = fragments.get(position) {
                    if fill_block(&mut block.content, fragment) {
                        debug!("Filled block {} from page fragment", position);
                    }
                }
            }
            block
        })
        .filter(is_retained)
        .collect()
}

/// Copy fragment content into a block of the same shape. Returns whether
/// anything was filled.
fn fill_block(content: &mut BlockContent, fragment: &Fragment) -> bool {
    match (content, fragment) {
        (BlockContent::Paragraph { snippet }, Fragment::Paragraph { snippet: text })
            if !text.is_empty() =>
        {
            *snippet = Some(text.clone());
            true
        }
        (BlockContent::List { items }, Fragment::List { items: texts }) if !texts.is_empty() => {
            *items = texts.iter().map(ListItem::untitled).collect();
            true
        }
        _ => false,
    }
}

fn is_retained(block: &ContentBlock) -> bool {
    block.content.has_display_content() || block.has_references()
}
