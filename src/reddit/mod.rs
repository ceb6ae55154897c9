//! Site-specific extractor for Reddit post/comment pages.
//!
//! Generic extraction handles article-shaped pages poorly on Reddit, so a
//! matched host bypasses it: the post and its comment thread are located
//! through dedicated cascades (see [`rules`]), and when every cascade
//! misses, heuristic text-block scoring recovers the best candidates.

pub mod rules;

use dom_query::Selection;
use log::debug;

use crate::dom;
use crate::markdown::clean_text;
use crate::patterns::RELATIVE_TIME_PREFIX;
use crate::rules::{cascade, query, query_all};
use crate::skip;

/// Host fragment that routes a page to this extractor.
pub const REDDIT_HOST: &str = "reddit.com";

/// Comments processed from the cascade match list.
pub const MAX_COMMENTS: usize = 20;

/// Candidates emitted by the heuristic comment fallback.
pub const MAX_FALLBACK_COMMENTS: usize = 10;

/// Post body text must exceed this length to be accepted.
const MIN_POST_BODY_LEN: usize = 10;

/// Comment body text must exceed this length to be accepted.
const MIN_COMMENT_BODY_LEN: usize = 5;

/// Minimum block length considered by the heuristic post fallback.
const FALLBACK_BLOCK_MIN_LEN: usize = 50;

/// The longest fallback block must exceed this to become the post body.
const FALLBACK_MAIN_MIN_LEN: usize = 100;

/// Secondary fallback blocks must exceed this fraction of the longest.
const FALLBACK_EXTRA_RATIO: f64 = 0.3;

// Heuristic comment scoring weights. Empirically tuned against observed
// Reddit markup; tunable constants, not invariants.
const SCORE_COMMENT_CLASS: i32 = 10;
const SCORE_REPLY_CLASS: i32 = 8;
const SCORE_TIMESTAMP_CHILD: i32 = 5;
const SCORE_RELATIVE_TIME: i32 = 7;
const SCORE_BODY_LENGTH: i32 = 3;
const PENALTY_NAV_CLASS: i32 = -10;
const PENALTY_HEADER_CLASS: i32 = -10;
const PENALTY_FOOTER_CLASS: i32 = -10;
const PENALTY_AD_CLASS: i32 = -15;

/// Check whether a page host belongs to Reddit.
#[must_use]
pub fn is_reddit_host(host: &str) -> bool {
    host.contains(REDDIT_HOST)
}

/// Extract the post and comment thread from a (fully revealed) document
/// body. Returns the body markup without the page header; empty when the
/// page holds neither a recognizable post nor comments.
#[must_use]
pub fn extract(body: &Selection) -> String {
    let mut out = String::new();

    out.push_str(&extract_post(body));

    let comments = extract_comments(body);
    if !comments.is_empty() {
        out.push_str("\n\n## Comments\n\n");
        out.push_str(&comments);
    }

    out
}

/// Locate the post container and pull title, body, and timestamp out of
/// it, each through its own cascade. Falls back to text-block heuristics
/// when no container matches.
#[must_use]
pub fn extract_post(root: &Selection) -> String {
    let Some((index, container)) = cascade(root, rules::POST_CONTAINER_RULES) else {
        debug!("no post container matched, trying fallback extraction");
        return extract_post_fallback(root);
    };
    debug!("found post container via cascade rule {index}");

    let mut out = String::new();

    // Title: first cascade hit with any text.
    for rule in rules::POST_TITLE_RULES {
        let Some(found) = query(&container, *rule) else {
            continue;
        };
        let title = clean_text(&dom::text_content(&found));
        if !title.is_empty() {
            out.push_str(&format!("## {title}\n\n"));
            break;
        }
    }

    // Body: first cascade hit above the length floor.
    for rule in rules::POST_BODY_RULES {
        let Some(found) = query(&container, *rule) else {
            continue;
        };
        let body = clean_text(&dom::text_content(&found));
        if body.chars().count() > MIN_POST_BODY_LEN {
            out.push_str(&format!("{body}\n\n"));
            break;
        }
    }

    // Timestamp metadata.
    for rule in rules::POST_TIMESTAMP_RULES {
        let Some(found) = query(&container, *rule) else {
            continue;
        };
        let meta = clean_text(&dom::text_content(&found));
        if !meta.is_empty() {
            out.push_str(&format!("*Posted: {meta}*\n\n"));
            break;
        }
    }

    out
}

/// Heuristic post recovery: rank text blocks by length and synthesize a
/// post section from the longest, plus up to two runners-up that are
/// substantial relative to it.
fn extract_post_fallback(root: &Selection) -> String {
    let mut blocks: Vec<(String, usize)> = Vec::new();

    for element in query_all(root, is_fallback_text_block) {
        if skip::should_skip(&element) {
            continue;
        }
        let text = clean_text(&dom::text_content(&element));
        let len = text.chars().count();
        if len > FALLBACK_BLOCK_MIN_LEN {
            blocks.push((text, len));
        }
    }

    blocks.sort_by(|a, b| b.1.cmp(&a.1));

    let mut out = String::new();
    let Some((main_text, main_len)) = blocks.first() else {
        return out;
    };

    if *main_len > FALLBACK_MAIN_MIN_LEN {
        out.push_str(&format!("## Post Content\n\n{main_text}\n\n"));
    }

    let extra_floor = (*main_len as f64 * FALLBACK_EXTRA_RATIO) as usize;
    for (text, len) in blocks.iter().skip(1).take(2) {
        if *len > FALLBACK_MAIN_MIN_LEN && *len > extra_floor {
            out.push_str(&format!("{text}\n\n"));
        }
    }

    out
}

fn is_fallback_text_block(sel: &Selection) -> bool {
    matches!(
        dom::tag_name(sel).as_deref(),
        Some("p" | "div" | "span")
    )
}

/// Extract the comment thread: first cascade rule with any matches
/// supplies the list, capped at [`MAX_COMMENTS`] in document order.
/// Cascade exhaustion falls back to candidate scoring.
#[must_use]
pub fn extract_comments(root: &Selection) -> String {
    let mut comments = Vec::new();
    for rule in rules::COMMENT_RULES {
        comments = query_all(root, *rule);
        if !comments.is_empty() {
            debug!("found {} comment element(s)", comments.len());
            break;
        }
    }

    if comments.is_empty() {
        debug!("no comment elements matched, trying fallback scoring");
        return extract_comments_fallback(root);
    }

    let mut out = String::new();
    for (index, comment) in comments.iter().take(MAX_COMMENTS).enumerate() {
        if let Some(markup) = extract_single_comment(comment, index + 1) {
            out.push_str(&markup);
            out.push_str("\n\n");
        }
    }

    out
}

/// One comment: author and body through their cascades; emitted only when
/// a body above the length floor was found.
fn extract_single_comment(comment: &Selection, number: usize) -> Option<String> {
    let mut author = String::new();
    for rule in rules::COMMENT_AUTHOR_RULES {
        let Some(found) = query(comment, *rule) else {
            continue;
        };
        author = clean_text(&dom::text_content(&found));
        if !author.is_empty() {
            break;
        }
    }

    let mut body = String::new();
    for rule in rules::COMMENT_BODY_RULES {
        let Some(found) = query(comment, *rule) else {
            continue;
        };
        let candidate = clean_text(&dom::text_content(&found));
        if candidate.chars().count() > MIN_COMMENT_BODY_LEN {
            body = candidate;
            break;
        }
    }

    if body.is_empty() {
        return None;
    }

    let mut markup = format!("### Comment {number}");
    if !author.is_empty() {
        markup.push_str(&format!(" by {author}"));
    }
    markup.push_str(&format!("\n\n{body}\n\n---"));
    Some(markup)
}

/// A scored candidate produced by the heuristic comment fallback.
struct CommentCandidate {
    text: String,
    score: i32,
}

/// Heuristic comment recovery: scan plausible blocks, keep comment-shaped
/// candidates, rank by score, and emit the best few.
fn extract_comments_fallback(root: &Selection) -> String {
    let mut candidates: Vec<CommentCandidate> = Vec::new();

    for element in query_all(root, is_fallback_comment_block) {
        if skip::should_skip(&element) {
            continue;
        }

        let text = clean_text(&dom::text_content(&element));
        let len = text.chars().count();
        if len <= 20 || len >= 1000 {
            continue;
        }

        let class = dom::class_name(&element).unwrap_or_default().to_lowercase();
        let has_timestamp = element.select("time").length() > 0;
        let looks_dated = RELATIVE_TIME_PREFIX.is_match(&text);
        if !(class.contains("comment") || class.contains("reply") || has_timestamp || looks_dated) {
            continue;
        }

        let score = comment_score(&class, has_timestamp, looks_dated, len);
        candidates.push(CommentCandidate { text, score });
    }

    candidates.sort_by(|a, b| b.score.cmp(&a.score));

    let mut out = String::new();
    for (index, candidate) in candidates.iter().take(MAX_FALLBACK_COMMENTS).enumerate() {
        out.push_str(&format!(
            "### Comment {}\n\n{}\n\n---\n\n",
            index + 1,
            candidate.text
        ));
    }

    out
}

fn is_fallback_comment_block(sel: &Selection) -> bool {
    matches!(
        dom::tag_name(sel).as_deref(),
        Some("div" | "p" | "article")
    )
}

fn comment_score(class: &str, has_timestamp: bool, looks_dated: bool, len: usize) -> i32 {
    let mut score = 0;

    if class.contains("comment") {
        score += SCORE_COMMENT_CLASS;
    }
    if class.contains("reply") {
        score += SCORE_REPLY_CLASS;
    }
    if has_timestamp {
        score += SCORE_TIMESTAMP_CHILD;
    }
    if looks_dated {
        score += SCORE_RELATIVE_TIME;
    }
    if len > 50 && len < 500 {
        score += SCORE_BODY_LENGTH;
    }

    if class.contains("nav") {
        score += PENALTY_NAV_CLASS;
    }
    if class.contains("header") {
        score += PENALTY_HEADER_CLASS;
    }
    if class.contains("footer") {
        score += PENALTY_FOOTER_CLASS;
    }
    if class.contains("ad") {
        score += PENALTY_AD_CLASS;
    }

    score
}
