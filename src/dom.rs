//! DOM read adapter.
//!
//! Thin helpers over the `dom_query` crate. The engine treats the document
//! as externally owned: everything here is a read, and the handful of
//! helpers below establish the consistent access API the rest of the
//! pipeline is written against.

// Re-export core types for external use
pub use dom_query::{Document, NodeId, Selection};

// Re-export StrTendril so callers can hold zero-copy text
pub use tendril::StrTendril;

/// Parse an HTML string into a document.
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

// === Attribute Operations ===

/// Get element ID attribute.
#[inline]
#[must_use]
pub fn id(sel: &Selection) -> Option<String> {
    sel.attr("id").map(|s| s.to_string())
}

/// Get element class attribute as one string.
#[inline]
#[must_use]
pub fn class_name(sel: &Selection) -> Option<String> {
    sel.attr("class").map(|s| s.to_string())
}

/// Get any attribute value.
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

/// Check if attribute exists.
#[inline]
#[must_use]
pub fn has_attribute(sel: &Selection, name: &str) -> bool {
    sel.has_attr(name)
}

// === Tag/Node Information ===

/// Get tag name (lowercase).
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes()
        .first()
        .and_then(dom_query::NodeRef::node_name)
        .map(|t| t.to_lowercase())
}

/// Get the node id of the selection's first node.
#[inline]
#[must_use]
pub fn node_id(sel: &Selection) -> Option<NodeId> {
    sel.nodes().first().map(|node| node.id)
}

// === Text Content ===

/// Get all text content of node and descendants.
///
/// Returns `StrTendril` for zero-copy passing; convert with `.to_string()`
/// only when owned storage is needed.
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

/// Get the text of direct text-node children only, excluding any text
/// nested inside child elements.
#[must_use]
pub fn direct_text(sel: &Selection) -> String {
    let Some(node) = sel.nodes().first() else {
        return String::new();
    };

    let mut text = String::new();
    for child in node.children() {
        if child.is_text() {
            text.push_str(&child.text());
        }
    }
    text
}

// === Tree Navigation ===

/// Get parent element.
#[inline]
#[must_use]
pub fn parent<'a>(sel: &Selection<'a>) -> Selection<'a> {
    sel.parent()
}

/// All ancestor elements from nearest to furthest, stopping at `html`.
#[must_use]
pub fn ancestors<'a>(sel: &Selection<'a>) -> Vec<Selection<'a>> {
    let mut chain = Vec::new();
    let mut current = sel.parent();
    while current.length() > 0 {
        let tag = tag_name(&current);
        chain.push(current.clone());
        if tag.as_deref() == Some("html") {
            break;
        }
        current = current.parent();
    }
    chain
}

/// Check whether the element sits inside an ancestor with the given tag.
#[must_use]
pub fn has_ancestor_tag(sel: &Selection, tag: &str) -> bool {
    ancestors(sel)
        .iter()
        .any(|a| tag_name(a).as_deref() == Some(tag))
}

/// All descendant elements of the selection's first node, in document order.
#[must_use]
pub fn descendant_elements<'a>(sel: &Selection<'a>) -> Vec<Selection<'a>> {
    let Some(root) = sel.nodes().first() else {
        return Vec::new();
    };

    root.descendants()
        .into_iter()
        .filter(dom_query::NodeRef::is_element)
        .map(Selection::from)
        .collect()
}

/// Direct element children, in order.
#[must_use]
pub fn child_elements<'a>(sel: &Selection<'a>) -> Vec<Selection<'a>> {
    let Some(node) = sel.nodes().first() else {
        return Vec::new();
    };

    node.children()
        .into_iter()
        .filter(dom_query::NodeRef::is_element)
        .map(Selection::from)
        .collect()
}

// === Visibility ===

/// Inline-style hidden check.
///
/// The engine sees a static DOM with no layout, so "computed-style hidden"
/// reduces to the inline `style` attribute and the `hidden` attribute.
#[must_use]
pub fn is_hidden(sel: &Selection) -> bool {
    if has_attribute(sel, "hidden") {
        return true;
    }

    let Some(style) = get_attribute(sel, "style") else {
        return false;
    };
    let style: String = style
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    style.contains("display:none")
        || style.contains("visibility:hidden")
        || style.contains("opacity:0;")
        || style.ends_with("opacity:0")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_name_lowercase() {
        let doc = parse("<DIV>text</DIV>");
        let div = doc.select("div");
        assert_eq!(tag_name(&div), Some("div".to_string()));
    }

    #[test]
    fn test_direct_text_excludes_children() {
        let doc = parse("<div> outer <span>inner</span> tail </div>");
        let div = doc.select("div");
        let text = crate::markdown::clean_text(&direct_text(&div));
        assert_eq!(text, "outer tail");
    }

    #[test]
    fn test_descendant_elements_document_order() {
        let doc = parse("<div><section><p>a</p></section><p>b</p></div>");
        let div = doc.select("div");
        let tags: Vec<_> = descendant_elements(&div)
            .iter()
            .filter_map(tag_name)
            .collect();
        assert_eq!(tags, vec!["section", "p", "p"]);
    }

    #[test]
    fn test_has_ancestor_tag() {
        let doc = parse("<nav><ul><li id='x'>item</li></ul></nav>");
        let li = doc.select("#x");
        assert!(has_ancestor_tag(&li, "nav"));
        assert!(!has_ancestor_tag(&li, "article"));
    }

    #[test]
    fn test_is_hidden_inline_style() {
        let doc = parse(
            r#"<div id="a" style="display: none">x</div>
               <div id="b" style="visibility:hidden">x</div>
               <div id="c" style="opacity: 0">x</div>
               <div id="d" hidden>x</div>
               <div id="e" style="color: red">x</div>"#,
        );
        assert!(is_hidden(&doc.select("#a")));
        assert!(is_hidden(&doc.select("#b")));
        assert!(is_hidden(&doc.select("#c")));
        assert!(is_hidden(&doc.select("#d")));
        assert!(!is_hidden(&doc.select("#e")));
    }

    #[test]
    fn test_node_id_distinct() {
        let doc = parse("<div><p>one</p><p>two</p></div>");
        let ids: Vec<_> = doc.select("p").nodes().iter().map(|n| n.id).collect();
        assert_eq!(ids.len(), 2);
        assert_ne!(ids[0], ids[1]);
    }
}
