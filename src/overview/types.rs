// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Core types for AI overview retrieval
//!
//! The upstream payload is decoded into optional-field `Raw*` structures and
//! then validated into the typed [`ContentBlock`] model. Absence of any
//! nested section is a normal branch, never a decode error.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Decode an explicit `null` the same as an absent field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One item of a list block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    /// Bold lead-in text, when the overview has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Item text
    #[serde(default, deserialize_with = "null_as_default")]
    pub snippet: String,
}

impl ListItem {
    pub fn untitled(snippet: impl Into<String>) -> Self {
        Self {
            title: None,
            snippet: snippet.into(),
        }
    }
}

/// Displayable content of a block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockContent {
    Paragraph { snippet: Option<String> },
    List { items: Vec<ListItem> },
    /// A block type that carries no fillable content (headings, tables, ...)
    Other { kind: String },
}

impl BlockContent {
    /// True when the primary content is absent and could be backfilled
    pub fn is_missing(&self) -> bool {
        match self {
            BlockContent::Paragraph { snippet } => snippet
                .as_deref()
                .map(|s| s.trim().is_empty())
                .unwrap_or(true),
            BlockContent::List { items } => items.is_empty(),
            BlockContent::Other { .. } => false,
        }
    }

    /// True when there is something to print for this block
    pub fn has_display_content(&self) -> bool {
        match self {
            BlockContent::Other { .. } => false,
            _ => !self.is_missing(),
        }
    }
}

/// A typed unit of overview content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentBlock {
    pub content: BlockContent,
    /// Citation pointers into the overview's reference list
    pub reference_indexes: Vec<i64>,
}

impl ContentBlock {
    pub fn paragraph(snippet: Option<&str>, reference_indexes: Vec<i64>) -> Self {
        Self {
            content: BlockContent::Paragraph {
                snippet: snippet.map(str::to_string),
            },
            reference_indexes,
        }
    }

    pub fn list(items: Vec<ListItem>, reference_indexes: Vec<i64>) -> Self {
        Self {
            content: BlockContent::List { items },
            reference_indexes,
        }
    }

    pub fn has_references(&self) -> bool {
        !self.reference_indexes.is_empty()
    }
}

/// A block recovered from the raw HTML of the results page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    Paragraph { snippet: String },
    List { items: Vec<String> },
}

/// A citation record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reference {
    pub index: i64,
    pub title: String,
    pub source: String,
    pub link: String,
}

/// A citation as received. Records without an index cannot be cited.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawReference {
    #[serde(default)]
    pub index: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub source: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub link: String,
}

impl RawReference {
    fn into_reference(self) -> Option<Reference> {
        Some(Reference {
            index: self.index?,
            title: self.title,
            source: self.source,
            link: self.link,
        })
    }
}

/// Top-level search response as returned by SerpApi
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SerpResponse {
    #[serde(default)]
    pub ai_overview: Option<RawAiOverview>,
    #[serde(default)]
    pub search_metadata: Option<SearchMetadata>,
    /// In-band error reported with a 2xx status
    #[serde(default)]
    pub error: Option<String>,
}

impl SerpResponse {
    /// URL of the raw HTML snapshot of the results page, if any
    pub fn raw_html_url(&self) -> Option<&str> {
        self.search_metadata
            .as_ref()
            .and_then(|m| m.raw_html_file.as_deref())
            .filter(|url| !url.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchMetadata {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub raw_html_file: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAiOverview {
    #[serde(default)]
    pub text_blocks: Option<Vec<RawTextBlock>>,
    #[serde(default)]
    pub references: Option<Vec<RawReference>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTextBlock {
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub list: Option<Vec<ListItem>>,
    #[serde(default)]
    pub reference_indexes: Option<Vec<i64>>,
}

impl From<RawTextBlock> for ContentBlock {
    fn from(raw: RawTextBlock) -> Self {
        let reference_indexes = raw.reference_indexes.unwrap_or_default();
        let content = match raw.kind.as_str() {
            "paragraph" => BlockContent::Paragraph {
                snippet: raw.snippet,
            },
            "list" => BlockContent::List {
                items: raw.list.unwrap_or_default(),
            },
            _ => BlockContent::Other { kind: raw.kind },
        };
        ContentBlock {
            content,
            reference_indexes,
        }
    }
}

/// Validated overview section of one response
#[derive(Debug, Clone, Default)]
pub struct AiOverview {
    pub blocks: Vec<ContentBlock>,
    pub references: Vec<Reference>,
}

impl From<RawAiOverview> for AiOverview {
    fn from(raw: RawAiOverview) -> Self {
        Self {
            blocks: raw
                .text_blocks
                .unwrap_or_default()
                .into_iter()
                .map(ContentBlock::from)
                .collect(),
            references: raw
                .references
                .unwrap_or_default()
                .into_iter()
                .filter_map(RawReference::into_reference)
                .collect(),
        }
    }
}

/// Errors from the upstream search API
#[derive(Debug, Error)]
pub enum OverviewError {
    /// No credential configured for the upstream API
    #[error("API key for SERP API is not configured.")]
    MissingApiKey,

    /// Non-success HTTP status from the upstream API
    #[error("SERP API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Error reported in the body of a successful response
    #[error("SERP API reported an error: {0}")]
    Upstream(String),

    #[error("SERP API timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed SERP API response: {0}")]
    MalformedResponse(String),

    /// The report artifact could not be written
    #[error("Report I/O error: {0}")]
    Report(#[from] std::io::Error),
}
