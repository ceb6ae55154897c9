//! Content Locator.
//!
//! Finds the root element holding the page's primary readable content.
//! A ranked rule cascade is tried first (semantic landmarks, then common
//! content class/id conventions); every hit must pass
//! [`crate::skip::is_valid_content_area`]. When the cascade is exhausted,
//! the largest validated block-level candidate wins.

use dom_query::Selection;
use log::debug;

use crate::dom;
use crate::markdown::clean_text;
use crate::reddit;
use crate::rules::{self, Rule};
use crate::skip::is_valid_content_area;

/// Content area rules in priority order. More specific and more semantic
/// rules come first; first validated match wins.
pub static CONTENT_RULES: &[Rule] = &[
    rule_main_tag,
    rule_role_main,
    rule_main_content_class,
    rule_content_class,
    rule_post_content_class,
    rule_entry_content_class,
    rule_article_content_class,
    rule_page_content_class,
    rule_article_tag,
    rule_container_content_class,
    rule_content_id,
    rule_main_id,
    rule_main_class,
];

fn rule_main_tag(sel: &Selection) -> bool {
    rules::tag(sel) == "main"
}

fn rule_role_main(sel: &Selection) -> bool {
    rules::attr(sel, "role") == "main"
}

fn rule_main_content_class(sel: &Selection) -> bool {
    rules::has_class_token(sel, "main-content")
}

fn rule_content_class(sel: &Selection) -> bool {
    rules::has_class_token(sel, "content")
}

fn rule_post_content_class(sel: &Selection) -> bool {
    rules::has_class_token(sel, "post-content")
}

fn rule_entry_content_class(sel: &Selection) -> bool {
    rules::has_class_token(sel, "entry-content")
}

fn rule_article_content_class(sel: &Selection) -> bool {
    rules::has_class_token(sel, "article-content")
}

fn rule_page_content_class(sel: &Selection) -> bool {
    rules::has_class_token(sel, "page-content")
}

fn rule_article_tag(sel: &Selection) -> bool {
    rules::tag(sel) == "article"
}

/// `content` class nested under a `container` class wrapper.
fn rule_container_content_class(sel: &Selection) -> bool {
    rules::has_class_token(sel, "content") && rules::has_ancestor_class_token(sel, "container")
}

fn rule_content_id(sel: &Selection) -> bool {
    rules::id(sel) == "content"
}

fn rule_main_id(sel: &Selection) -> bool {
    rules::id(sel) == "main"
}

fn rule_main_class(sel: &Selection) -> bool {
    rules::has_class_token(sel, "main")
}

/// Locate the main content area under `root`, or `None` if nothing
/// validates.
///
/// On a Reddit host the site's container cascade is consulted before the
/// generic rules; this is how the generic fallback path still lands on
/// the post when the dedicated extractor has failed.
#[must_use]
pub fn locate<'a>(root: &Selection<'a>, host: &str) -> Option<Selection<'a>> {
    if reddit::is_reddit_host(host) {
        if let Some((index, found)) = rules::cascade(root, reddit::rules::POST_CONTAINER_RULES) {
            debug!("located reddit container via cascade rule {index}");
            return Some(found);
        }
    }

    for (index, rule) in CONTENT_RULES.iter().enumerate() {
        let Some(found) = rules::query(root, *rule) else {
            continue;
        };
        if is_valid_content_area(&found) {
            debug!("located content area via cascade rule {index}");
            return Some(found);
        }
    }

    largest_content_area(root)
}

/// Fallback: the validated `div`/`section`/`article` with the greatest
/// extracted text length.
#[must_use]
pub fn largest_content_area<'a>(root: &Selection<'a>) -> Option<Selection<'a>> {
    let mut largest: Option<Selection<'a>> = None;
    let mut max_len = 0usize;

    for candidate in rules::query_all(root, is_block_candidate) {
        if !is_valid_content_area(&candidate) {
            continue;
        }
        let len = clean_text(&dom::text_content(&candidate)).chars().count();
        if len > max_len {
            max_len = len;
            largest = Some(candidate);
        }
    }

    if largest.is_some() {
        debug!("located content area via largest-block fallback ({max_len} chars)");
    }
    largest
}

fn is_block_candidate(sel: &Selection) -> bool {
    matches!(rules::tag(sel).as_str(), "div" | "section" | "article")
}
