//! Result payloads handed to the coordination layer.
//!
//! The engine itself always produces a Markdown string; these types are
//! the message shapes the surrounding coordination layer relays onward
//! (success with word count and timestamp, or failure with diagnostics).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Successful scrape payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeReport {
    /// The normalized Markdown document.
    pub markdown: String,

    /// Number of whitespace-separated words in the document.
    pub word_count: usize,

    /// Completion timestamp.
    pub timestamp: DateTime<Utc>,
}

impl ScrapeReport {
    /// Assemble a report from finished markup, deriving the word count.
    #[must_use]
    pub fn new(markdown: String, timestamp: DateTime<Utc>) -> Self {
        let word_count = crate::markdown::word_count(&markdown);
        Self {
            markdown,
            word_count,
            timestamp,
        }
    }
}

/// Failure payload relayed when a run could not produce content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeFailure {
    /// Human-readable error message.
    pub message: String,

    /// Diagnostic detail (source error chain, context).
    pub detail: Option<String>,
}
