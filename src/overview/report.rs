// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Report formatting and the shared report sink
//!
//! Every query produces one record bracketed by begin/end delimiter lines.
//! Records are formatted in full before the sink lock is taken, so the lock
//! only covers a single write-and-flush.

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::NamedTempFile;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use super::references::ReferenceIndex;
use super::types::{BlockContent, ContentBlock};

pub const RECORD_BEGIN: &str = "------------------------Query Begins------------------------";
pub const RECORD_END: &str = "------------------------Query Ends------------------------";

pub const NO_OVERVIEW_MESSAGE: &str = "No AI overview found, Skipping....";
pub const NOTHING_RETAINED_MESSAGE: &str =
    "No AI overview content could be processed, Skipping....";
pub const NO_RESULT_MESSAGE: &str = "No result found for this query, Skipping....";

/// Download name of the finished report
pub const REPORT_FILENAME: &str = "ai_overview.txt";

/// Result of processing one query
#[derive(Debug, Clone)]
pub enum QueryOutcome {
    /// The response had no overview section
    NoOverview,
    /// Every block was dropped by the merge
    NothingRetained,
    /// Merged overview ready to print
    Overview {
        blocks: Vec<ContentBlock>,
        references: ReferenceIndex,
    },
    /// The query failed; detail is logged, not printed
    Failed,
}

/// Format one complete delimiter-bracketed record
pub fn format_record(query: &str, outcome: &QueryOutcome) -> String {
    let mut out = String::new();
    out.push_str(RECORD_BEGIN);
    out.push('\n');
    out.push_str(&format!("Keyword:\n {}\n\n", query));

    match outcome {
        QueryOutcome::NoOverview => push_line(&mut out, NO_OVERVIEW_MESSAGE),
        QueryOutcome::NothingRetained => push_line(&mut out, NOTHING_RETAINED_MESSAGE),
        QueryOutcome::Failed => push_line(&mut out, NO_RESULT_MESSAGE),
        QueryOutcome::Overview { blocks, references } => {
            out.push_str("Response:\n");
            for block in blocks {
                format_block(&mut out, block, references);
            }
        }
    }

    out.push('\n');
    out.push_str(RECORD_END);
    out.push_str("\n\n");
    out
}

fn format_block(out: &mut String, block: &ContentBlock, references: &ReferenceIndex) {
    match &block.content {
        BlockContent::Paragraph {
            snippet: Some(snippet),
        } if !snippet.trim().is_empty() => {
            out.push_str(&format!("{}\n\n", snippet));
        }
        BlockContent::List { items } if !items.is_empty() => {
            for item in items {
                let line = match &item.title {
                    Some(title) => format!("- {}: {}", title, item.snippet),
                    None => format!("- {}", item.snippet),
                };
                push_line(out, &line);
            }
            out.push('\n');
        }
        _ => {}
    }

    if block.has_references() {
        out.push_str("References:\n");
        for index in &block.reference_indexes {
            // Unknown indexes are skipped
            if let Some(line) = references.resolve(*index) {
                push_line(out, &line);
            }
        }
    }
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

/// Append-only report shared by all queries of one batch
pub struct ReportSink {
    file: Mutex<File>,
    temp: NamedTempFile,
    records: AtomicUsize,
}

impl ReportSink {
    /// Create a sink backed by a fresh temporary file
    pub fn new() -> io::Result<Self> {
        let temp = tempfile::Builder::new()
            .prefix("ai_overview_")
            .suffix(".txt")
            .tempfile()?;
        let file = File::from_std(temp.reopen()?);
        Ok(Self {
            file: Mutex::new(file),
            temp,
            records: AtomicUsize::new(0),
        })
    }

    /// Append one formatted record and flush it
    pub async fn append(&self, record: &str) -> io::Result<()> {
        let mut file = self.file.lock().await;
        file.write_all(record.as_bytes()).await?;
        file.flush().await?;
        self.records.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    /// Read the finished artifact back; the temporary file is removed
    pub async fn finish(self) -> io::Result<Report> {
        let mut file = self.file.into_inner();
        file.sync_all().await?;
        drop(file);

        let contents = tokio::fs::read_to_string(self.temp.path()).await?;
        Ok(Report {
            contents,
            record_count: self.records.into_inner(),
        })
    }
}

/// Finished report artifact
#[derive(Debug, Clone)]
pub struct Report {
    pub contents: String,
    pub record_count: usize,
}
