//! Ranked matcher infrastructure.
//!
//! Selector cascades throughout the engine are ordered lists of predicate
//! rules tried in sequence, first success wins. Rules are plain functions
//! that test one element, which keeps the cascade independent of any query
//! language and lets site-specific modules define their own chains.

use dom_query::Selection;

use crate::dom;

/// A matcher rule that tests if a selection satisfies certain criteria.
pub type Rule = fn(&Selection) -> bool;

/// Query for the first descendant matching the rule, in document order.
#[must_use]
pub fn query<'a>(root: &Selection<'a>, rule: Rule) -> Option<Selection<'a>> {
    dom::descendant_elements(root)
        .into_iter()
        .find(|sel| rule(sel))
}

/// Query for all descendants matching the rule, in document order.
#[must_use]
pub fn query_all<'a>(root: &Selection<'a>, rule: Rule) -> Vec<Selection<'a>> {
    dom::descendant_elements(root)
        .into_iter()
        .filter(|sel| rule(sel))
        .collect()
}

/// Run a cascade: try each rule in priority order, returning the first
/// rule's first match together with the rule's index.
#[must_use]
pub fn cascade<'a>(root: &Selection<'a>, rules: &[Rule]) -> Option<(usize, Selection<'a>)> {
    for (index, rule) in rules.iter().enumerate() {
        if let Some(found) = query(root, *rule) {
            return Some((index, found));
        }
    }
    None
}

// === Rule helpers ===

/// Get tag name (empty string if missing).
#[inline]
#[must_use]
pub fn tag(sel: &Selection) -> String {
    dom::tag_name(sel).unwrap_or_default()
}

/// Get element id attribute (empty string if missing).
#[inline]
#[must_use]
pub fn id(sel: &Selection) -> String {
    dom::id(sel).unwrap_or_default()
}

/// Get element class attribute (empty string if missing).
#[inline]
#[must_use]
pub fn class(sel: &Selection) -> String {
    dom::class_name(sel).unwrap_or_default()
}

/// Get any attribute (empty string if missing).
#[inline]
#[must_use]
pub fn attr(sel: &Selection, name: &str) -> String {
    dom::get_attribute(sel, name).unwrap_or_default()
}

/// Check whether the class attribute carries `token` as a whole class.
#[must_use]
pub fn has_class_token(sel: &Selection, token: &str) -> bool {
    class(sel).split_whitespace().any(|c| c == token)
}

/// Check whether any ancestor carries `token` as a whole class.
#[must_use]
pub fn has_ancestor_class_token(sel: &Selection, token: &str) -> bool {
    dom::ancestors(sel)
        .iter()
        .any(|a| has_class_token(a, token))
}
