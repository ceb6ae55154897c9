//! Tree walker and deduplicator.
//!
//! Drives the serializer over a located root in document order. Each
//! element is visited at most once; an element whose serialization was
//! emitted is recorded in the per-run Visited Set, and containment is
//! enforced by ancestor lookup against that set rather than by pruning
//! the traversal.

use std::collections::HashSet;

use dom_query::{NodeId, Selection};

use crate::dom;
use crate::serializer::{self, SerializeContext};
use crate::skip;

/// Walk `root`'s descendant elements and collect their markup fragments.
///
/// Skip-Rule matches (on the element or any ancestor up to `root`) are
/// dropped entirely. An element that serializes to empty markup is not
/// marked visited, so its children stay independently eligible.
#[must_use]
pub fn walk(root: &Selection, ctx: &SerializeContext) -> Vec<String> {
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut fragments = Vec::new();
    let root_id = dom::node_id(root);

    for element in dom::descendant_elements(root) {
        if skip::should_skip(&element) {
            continue;
        }

        let chain = ancestor_ids_within(&element, root_id);
        if chain.matched_skip || chain.ids.iter().any(|id| visited.contains(id)) {
            continue;
        }
        if let Some(id) = dom::node_id(&element) {
            if visited.contains(&id) {
                continue;
            }
        }

        let fragment = serializer::serialize(&element, ctx);
        if fragment.is_empty() {
            continue;
        }

        if let Some(id) = dom::node_id(&element) {
            visited.insert(id);
        }
        fragments.push(fragment);
    }

    fragments
}

struct AncestorChain {
    ids: Vec<NodeId>,
    matched_skip: bool,
}

/// Collect ancestor node ids between the element and `root` (exclusive),
/// noting whether any of them matches the Skip Rule.
fn ancestor_ids_within(element: &Selection, root_id: Option<NodeId>) -> AncestorChain {
    let mut ids = Vec::new();
    let mut matched_skip = false;

    for ancestor in dom::ancestors(element) {
        let id = dom::node_id(&ancestor);
        if id == root_id {
            break;
        }
        if skip::should_skip(&ancestor) {
            matched_skip = true;
            break;
        }
        if let Some(id) = id {
            ids.push(id);
        }
    }

    AncestorChain { ids, matched_skip }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    fn walk_html(html: &str) -> String {
        let doc = dom::parse(html);
        let body = doc.select("body");
        let settings = Settings::default();
        let ctx = SerializeContext::new(&settings, None);
        walk(&body, &ctx).concat()
    }

    #[test]
    fn test_emits_in_document_order() {
        let out = walk_html(
            "<body><h1>Title</h1>\
             <p>First paragraph with enough text here.</p>\
             <p>Second paragraph with enough text too.</p></body>",
        );
        let title = out.find("# Title").unwrap();
        let first = out.find("First paragraph").unwrap();
        let second = out.find("Second paragraph").unwrap();
        assert!(title < first && first < second);
    }

    #[test]
    fn test_skips_boilerplate_subtrees() {
        let out = walk_html(
            r#"<body>
                <nav class="nav"><p>Navigation link text that is long enough.</p></nav>
                <div class="sidebar"><p>Sidebar text that is long enough too.</p></div>
                <p>Real body text that is long enough to pass.</p>
            </body>"#,
        );
        assert!(!out.contains("Navigation link text"));
        assert!(!out.contains("Sidebar text"));
        assert!(out.contains("Real body text"));
    }

    #[test]
    fn test_no_descendant_emitted_after_parent() {
        // The blockquote serializes whole, so its inner paragraph must not
        // be emitted a second time.
        let out = walk_html(
            "<body><blockquote><p>Quoted words repeated nowhere else here.</p></blockquote></body>",
        );
        assert_eq!(out.matches("Quoted words").count(), 1);
        assert!(out.contains("> Quoted words"));
    }

    #[test]
    fn test_empty_serialization_leaves_children_eligible() {
        // The outer div has no direct text, serializes empty, and must not
        // block its child paragraph.
        let out = walk_html(
            "<body><div><p>Nested paragraph body with plenty of text.</p></div></body>",
        );
        assert!(out.contains("Nested paragraph body"));
    }

    #[test]
    fn test_short_paragraph_children_still_emit() {
        // A short <p> serializes empty; an image inside it must still be
        // emitted independently.
        let out = walk_html(
            r#"<body><p>tiny <img src="https://example.com/pic.png" alt="pic"></p></body>"#,
        );
        assert!(out.contains("![pic](https://example.com/pic.png)"));
    }
}
