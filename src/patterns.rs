//! Shared pattern tables and compiled regexes.
//!
//! Regexes are compiled once at startup using `LazyLock`. The token tables
//! drive the Skip Rule and locator validation; matching is lowercase
//! substring containment against tag, class string, and id.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Boilerplate Detection Tokens
// =============================================================================

/// Tags that never carry readable content.
pub const SKIP_TAGS: &[&str] = &["script", "style", "noscript", "iframe", "embed", "object"];

/// Marker tokens that disqualify an element in the walker's Skip Rule.
pub const SKIP_TOKENS: &[&str] = &[
    "nav",
    "navigation",
    "menu",
    "header",
    "footer",
    "sidebar",
    "breadcrumb",
    "pagination",
    "social",
    "share",
    "related",
    "advertisement",
    "ads",
    "banner",
    "popup",
    "modal",
    "search",
    "filter",
    "sort",
    "toolbar",
    "controls",
    "skip",
    "hidden",
    "sr-only",
    "screen-reader",
];

/// Shorter marker list used when validating a located content area.
pub const VALIDATION_TOKENS: &[&str] = &[
    "nav",
    "header",
    "footer",
    "sidebar",
    "menu",
    "breadcrumb",
    "advertisement",
    "ads",
    "social",
    "share",
    "related",
];

// =============================================================================
// Code Language Detection
// =============================================================================

/// Languages recognized in code block class tokens, either as a bare token
/// or as `language-<name>`.
pub const KNOWN_LANGUAGES: &[&str] = &[
    "javascript", "js", "typescript", "ts", "python", "py", "java", "cpp", "c++", "c", "csharp",
    "c#", "php", "ruby", "go", "rust", "html", "css", "scss", "sass", "json", "xml", "yaml", "yml",
    "bash", "shell", "sh", "sql", "markdown", "md",
];

// =============================================================================
// Comment Heuristics
// =============================================================================

/// Matches "username 2 hours ago" style comment prefixes.
pub static RELATIVE_TIME_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\w+\s+\d+\s+(hour|minute|day|week|month|year)s?\s+ago")
        .expect("RELATIVE_TIME_PREFIX regex")
});
