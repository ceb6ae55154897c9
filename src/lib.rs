//! # markscrape
//!
//! Web page to Markdown content extraction engine.
//!
//! This library converts the readable content of a web page into a linear
//! Markdown document: it locates the main content area, walks it in
//! document order serializing headings, paragraphs, lists, tables, code
//! blocks, images, links, and blockquotes, and normalizes the assembled
//! markup. Reddit pages bypass the generic path and go through a
//! dedicated post/comment extractor with heuristic fallbacks.
//!
//! ## Quick Start
//!
//! ```rust
//! use markscrape::{scrape_page, Settings};
//!
//! let html = r#"<html><head><title>My Article</title></head>
//! <body><main><p>The opening paragraph of the article body.</p></main></body></html>"#;
//!
//! let markdown = scrape_page(html, "https://example.com/article", &Settings::default());
//! assert!(markdown.starts_with("# My Article"));
//! assert!(markdown.contains("The opening paragraph of the article body."));
//! ```
//!
//! ## Live pages
//!
//! Lazy-loaded threads need scrolling and expanding before the DOM holds
//! anything worth extracting. [`scrape_live`] drives that through the
//! [`PageDriver`] trait, so any automation channel (devtools, an
//! extension bridge, a test double) can supply the page.
//!
//! Extraction never fails past its boundary: a run that goes wrong
//! produces a short error document instead of an `Err`.

mod error;
mod scrape;
mod settings;

/// DOM read adapter over `dom_query`.
pub mod dom;

/// Content Locator: ranked content-area rules and fallbacks.
pub mod locate;

/// Markdown text utilities (cleaning, opt-in escaping, word count).
pub mod markdown;

/// Idempotent markup normalizer.
pub mod normalize;

/// Shared pattern tables and compiled regexes.
pub mod patterns;

/// Site-specific Reddit extractor.
pub mod reddit;

/// Coordination-layer result payloads.
pub mod report;

/// Incremental reveal loop and the page driver seam.
pub mod reveal;

/// Ranked matcher (selector cascade) infrastructure.
pub mod rules;

/// Element serializer: node-kind dispatch to Markdown handlers.
pub mod serializer;

/// Skip Rule shared by locator, walker, and fallbacks.
pub mod skip;

/// Tree walker with per-run visited tracking.
pub mod walker;

// Public API - re-exports
pub use error::{Error, Result};
pub use report::{ScrapeFailure, ScrapeReport};
pub use reveal::PageDriver;
pub use scrape::{error_document, scrape_live, scrape_page, scrape_page_at, scrape_report,
    scrape_selection, scrape_selection_at};
pub use settings::Settings;
