//! Skip Rule shared by the locator, walker, and site-specific fallbacks.
//!
//! An element is skipped when its tag is a non-content tag, when its tag,
//! class string, or id carries a boilerplate marker token, or when it is
//! hidden. Token matching is lowercase substring containment.

use dom_query::Selection;

use crate::dom;
use crate::markdown::clean_text;
use crate::patterns::{SKIP_TAGS, SKIP_TOKENS, VALIDATION_TOKENS};

/// Minimum extracted text length for a candidate content area.
pub const MIN_CONTENT_AREA_LEN: usize = 100;

fn identity_strings(sel: &Selection) -> (String, String, String) {
    let tag = dom::tag_name(sel).unwrap_or_default();
    let class = dom::class_name(sel).unwrap_or_default().to_lowercase();
    let id = dom::id(sel).unwrap_or_default().to_lowercase();
    (tag, class, id)
}

/// The walker's Skip Rule.
#[must_use]
pub fn should_skip(sel: &Selection) -> bool {
    let (tag, class, id) = identity_strings(sel);

    if SKIP_TAGS.contains(&tag.as_str()) {
        return true;
    }

    if SKIP_TOKENS
        .iter()
        .any(|token| tag.contains(token) || class.contains(token) || id.contains(token))
    {
        return true;
    }

    dom::is_hidden(sel)
}

/// Check whether the element or any ancestor matches the Skip Rule.
///
/// The walker iterates descendants flat, so subtree pruning is expressed
/// as an ancestor lookup here.
#[must_use]
pub fn in_skipped_subtree(sel: &Selection) -> bool {
    if should_skip(sel) {
        return true;
    }
    dom::ancestors(sel).iter().any(should_skip)
}

/// Validation used by the Content Locator on candidate content areas.
///
/// Rejects candidates with too little text or with a boilerplate marker
/// in tag, class string, or id.
#[must_use]
pub fn is_valid_content_area(sel: &Selection) -> bool {
    let text = clean_text(&dom::text_content(sel));
    if text.chars().count() < MIN_CONTENT_AREA_LEN {
        return false;
    }

    let (tag, class, id) = identity_strings(sel);
    !VALIDATION_TOKENS
        .iter()
        .any(|token| tag.contains(token) || class.contains(token) || id.contains(token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skips_script_and_style_tags() {
        let doc = dom::parse("<script>var x;</script><style>.a{}</style><p>text</p>");
        assert!(should_skip(&doc.select("script")));
        assert!(should_skip(&doc.select("style")));
        assert!(!should_skip(&doc.select("p")));
    }

    #[test]
    fn test_skips_landmark_tags_by_token() {
        let doc = dom::parse("<nav>links</nav><footer>legal</footer><article>ok</article>");
        assert!(should_skip(&doc.select("nav")));
        assert!(should_skip(&doc.select("footer")));
        assert!(!should_skip(&doc.select("article")));
    }

    #[test]
    fn test_skips_boilerplate_class_tokens() {
        let doc = dom::parse(
            r#"<div class="site-navigation">x</div>
               <div class="Sidebar-item">x</div>
               <div id="page-footer">x</div>
               <div class="article-text">x</div>"#,
        );
        assert!(should_skip(&doc.select(".site-navigation")));
        assert!(should_skip(&doc.select(".Sidebar-item")));
        assert!(should_skip(&doc.select("#page-footer")));
        assert!(!should_skip(&doc.select(".article-text")));
    }

    #[test]
    fn test_skips_hidden_elements() {
        let doc = dom::parse(r#"<div style="display:none" class="story">x</div>"#);
        assert!(should_skip(&doc.select(".story")));
    }

    #[test]
    fn test_in_skipped_subtree_checks_ancestors() {
        let doc = dom::parse(r#"<div class="sidebar"><p id="inner">deep text</p></div>"#);
        let inner = doc.select("#inner");
        assert!(!should_skip(&inner));
        assert!(in_skipped_subtree(&inner));
    }

    #[test]
    fn test_valid_content_area_needs_length() {
        let doc = dom::parse("<article>short</article>");
        assert!(!is_valid_content_area(&doc.select("article")));

        let long = format!("<article>{}</article>", "real content ".repeat(20));
        let doc = dom::parse(&long);
        assert!(is_valid_content_area(&doc.select("article")));
    }

    #[test]
    fn test_valid_content_area_rejects_marked_containers() {
        let long_text = "plenty of words in this block ".repeat(10);
        let html = format!(r#"<div class="related-posts">{long_text}</div>"#);
        let doc = dom::parse(&html);
        assert!(!is_valid_content_area(&doc.select("div")));
    }
}
