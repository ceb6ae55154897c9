//! Error types for markscrape.
//!
//! This module defines the error types used by the extraction pipeline.
//! Note that the public `scrape_*` functions never surface these to the
//! caller; a whole-run failure becomes a synthesized error document.

/// Error type for extraction operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTML parsing produced no usable document.
    #[error("HTML parsing failed: {0}")]
    Parse(String),

    /// General extraction failure.
    #[error("Extraction failed: {0}")]
    Extraction(String),

    /// A page driver operation (scroll, click, snapshot) failed.
    #[error("Page driver failed: {0}")]
    Driver(String),
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;
