//! Markdown text utilities.
//!
//! `clean_text` is the cleaning rule applied to all extracted text before
//! emission. `escape_markdown` is the opt-in escaping variant: the default
//! emission path deliberately does NOT escape body text, so the function is
//! exported for export-layer callers that need literal-safe output.

/// Characters with Markdown meaning that `escape_markdown` protects.
const MARKDOWN_SPECIAL_CHARS: &[char] = &[
    '\\', '*', '_', '`', '~', '[', ']', '(', ')', '>', '#', '+', '-', '.', '!', '|',
];

/// Collapse whitespace runs (including newlines) to single spaces and trim.
///
/// This is the cleaning rule for every text fragment the serializer emits,
/// except raw code block bodies, which keep their layout.
#[must_use]
pub fn clean_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_whitespace = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            in_whitespace = true;
        } else {
            if in_whitespace && !out.is_empty() {
                out.push(' ');
            }
            in_whitespace = false;
            out.push(ch);
        }
    }
    out
}

/// Escape Markdown special characters in text content.
///
/// Not used by the default serialization path (body text is emitted
/// raw-clean); downstream format converters call this when literal
/// fidelity matters more than readable markup.
///
/// # Example
///
/// ```rust
/// use markscrape::markdown::escape_markdown;
///
/// assert_eq!(escape_markdown("*bold* [link]"), r"\*bold\* \[link\]");
/// ```
#[must_use]
pub fn escape_markdown(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut result = String::with_capacity(text.len() + text.len() / 4);
    for ch in text.chars() {
        if MARKDOWN_SPECIAL_CHARS.contains(&ch) {
            result.push('\\');
        }
        result.push(ch);
    }
    result
}

/// Count whitespace-separated words, as reported to the coordination layer.
#[must_use]
pub fn word_count(markdown: &str) -> usize {
    markdown.split_whitespace().count()
}
