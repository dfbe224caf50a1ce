// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTML fragment extraction
//!
//! Recovers overview content blocks from the raw HTML snapshot of a results
//! page. Fragments come out in document order so they can be paired by
//! position with the blocks returned by the API.

use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;

use super::config::ExtractorSelectors;
use super::types::Fragment;

/// Compiled selectors for locating overview content
#[derive(Debug, Clone)]
pub struct FragmentExtractor {
    markers: Selector,
    content: Selector,
    lists: Selector,
    list_items: Selector,
}

impl FragmentExtractor {
    /// Compile the extractor from configured selectors
    pub fn new(selectors: &ExtractorSelectors) -> Result<Self, String> {
        // A selector group matches in document order
        let markers = format!(
            "{}, {}",
            selectors.overview_marker, selectors.aquarium_marker
        );
        Ok(Self {
            markers: parse_selector(&markers)?,
            content: parse_selector(&selectors.content)?,
            lists: parse_selector("ul, ol")?,
            list_items: parse_selector("li")?,
        })
    }

    /// Extract fragments from a raw HTML document
    pub fn extract(&self, html: &str) -> Vec<Fragment> {
        let document = Html::parse_document(html);
        let mut seen = HashSet::new();
        let mut fragments = Vec::new();

        for region in document.select(&self.markers) {
            for element in region.select(&self.content) {
                // Marker regions may nest; emit each content element once
                if !seen.insert(element.id()) {
                    continue;
                }
                fragments.push(self.fragment_from(&element));
            }
        }

        fragments
    }

    fn fragment_from(&self, element: &ElementRef) -> Fragment {
        if element.select(&self.lists).next().is_some() {
            let items = element
                .select(&self.list_items)
                .map(|li| clean_text(&extract_text_from_element(&li)))
                .collect();
            Fragment::List { items }
        } else {
            Fragment::Paragraph {
                snippet: clean_text(&extract_text_from_element(element)),
            }
        }
    }
}

impl Default for FragmentExtractor {
    fn default() -> Self {
        Self::new(&ExtractorSelectors::default()).expect("Default extractor selectors must parse")
    }
}

fn parse_selector(selector: &str) -> Result<Selector, String> {
    Selector::parse(selector).map_err(|e| format!("invalid CSS selector '{}': {:?}", selector, e))
}

/// Extract text from an HTML element, stripping tags
fn extract_text_from_element(element: &ElementRef) -> String {
    element.text().collect::<Vec<_>>().join(" ")
}

/// Normalize whitespace
fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
