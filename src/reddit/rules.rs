//! Reddit selector cascades.
//!
//! Reddit has shipped several frontends (old Reddit, the React redesign,
//! the shreddit web components), so every field is located through a
//! priority-ordered rule cascade covering all of them, newest markup
//! conventions first where they are the most specific.

use dom_query::Selection;

use crate::dom;
use crate::rules::{self, Rule};

fn has_ancestor_attr(sel: &Selection, name: &str, value: &str) -> bool {
    dom::ancestors(sel)
        .iter()
        .any(|a| rules::attr(a, name) == value)
}

fn has_ancestor_tag(sel: &Selection, tag: &str) -> bool {
    dom::has_ancestor_tag(sel, tag)
}

// === Post container ===

/// Post container rules, most specific frontend markers first.
pub static POST_CONTAINER_RULES: &[Rule] = &[
    post_container_testid,
    post_container_post_class,
    post_container_click_body,
    post_container_old_thing,
    post_container_shreddit,
    post_container_article_tag,
    post_container_article_role,
    post_container_main_content,
];

fn post_container_testid(sel: &Selection) -> bool {
    rules::attr(sel, "data-testid") == "post-container"
}

fn post_container_post_class(sel: &Selection) -> bool {
    rules::has_class_token(sel, "Post")
}

fn post_container_click_body(sel: &Selection) -> bool {
    rules::attr(sel, "data-click-id") == "body"
}

fn post_container_old_thing(sel: &Selection) -> bool {
    rules::has_class_token(sel, "thing") && rules::has_class_token(sel, "link")
}

fn post_container_shreddit(sel: &Selection) -> bool {
    rules::tag(sel) == "shreddit-post"
}

fn post_container_article_tag(sel: &Selection) -> bool {
    rules::tag(sel) == "article"
}

fn post_container_article_role(sel: &Selection) -> bool {
    rules::attr(sel, "role") == "article"
}

fn post_container_main_content(sel: &Selection) -> bool {
    rules::has_class_token(sel, "content") && rules::attr(sel, "role") == "main"
}

// === Post fields (evaluated inside the container) ===

/// Post title rules.
pub static POST_TITLE_RULES: &[Rule] = &[
    title_testid_h1,
    title_post_h3,
    title_click_body_h3,
    title_slot,
    title_old_link,
    title_shreddit_h1,
];

fn title_testid_h1(sel: &Selection) -> bool {
    rules::tag(sel) == "h1" && has_ancestor_attr(sel, "data-testid", "post-content")
}

fn title_post_h3(sel: &Selection) -> bool {
    rules::tag(sel) == "h3" && rules::has_ancestor_class_token(sel, "Post")
}

fn title_click_body_h3(sel: &Selection) -> bool {
    rules::tag(sel) == "h3" && has_ancestor_attr(sel, "data-click-id", "body")
}

fn title_slot(sel: &Selection) -> bool {
    rules::tag(sel) == "h1" && rules::attr(sel, "slot") == "title"
}

fn title_old_link(sel: &Selection) -> bool {
    rules::tag(sel) == "a" && rules::has_ancestor_class_token(sel, "title")
}

fn title_shreddit_h1(sel: &Selection) -> bool {
    rules::tag(sel) == "h1" && has_ancestor_tag(sel, "shreddit-post")
}

/// Post body rules.
pub static POST_BODY_RULES: &[Rule] = &[
    body_testid_text,
    body_post_text,
    body_usertext_md,
    body_text_slot,
    body_expando_usertext,
    body_shreddit_slot,
    body_richtext,
];

fn body_testid_text(sel: &Selection) -> bool {
    rules::attr(sel, "data-click-id") == "text" && has_ancestor_attr(sel, "data-testid", "post-content")
}

fn body_post_text(sel: &Selection) -> bool {
    rules::attr(sel, "data-click-id") == "text" && rules::has_ancestor_class_token(sel, "Post")
}

fn body_usertext_md(sel: &Selection) -> bool {
    rules::has_class_token(sel, "md") && rules::has_ancestor_class_token(sel, "usertext-body")
}

fn body_text_slot(sel: &Selection) -> bool {
    rules::attr(sel, "slot") == "text-body"
}

fn body_expando_usertext(sel: &Selection) -> bool {
    rules::has_class_token(sel, "usertext-body") && rules::has_ancestor_class_token(sel, "expando")
}

fn body_shreddit_slot(sel: &Selection) -> bool {
    rules::attr(sel, "slot") == "text-body" && has_ancestor_tag(sel, "shreddit-post")
}

fn body_richtext(sel: &Selection) -> bool {
    rules::has_class_token(sel, "RichTextJSON-root") && rules::has_ancestor_class_token(sel, "Post")
}

/// Post timestamp rules.
pub static POST_TIMESTAMP_RULES: &[Rule] = &[
    timestamp_testid,
    timestamp_post_time,
    timestamp_tagline_time,
    timestamp_shreddit_time,
];

fn timestamp_testid(sel: &Selection) -> bool {
    rules::attr(sel, "data-click-id") == "timestamp"
        && has_ancestor_attr(sel, "data-testid", "post-content")
}

fn timestamp_post_time(sel: &Selection) -> bool {
    rules::tag(sel) == "time" && rules::has_ancestor_class_token(sel, "Post")
}

fn timestamp_tagline_time(sel: &Selection) -> bool {
    rules::tag(sel) == "time" && rules::has_ancestor_class_token(sel, "tagline")
}

fn timestamp_shreddit_time(sel: &Selection) -> bool {
    rules::tag(sel) == "time" && has_ancestor_tag(sel, "shreddit-post")
}

// === Comments ===

/// Comment element rules; the first rule with any matches supplies the
/// whole comment list.
pub static COMMENT_RULES: &[Rule] = &[
    comment_testid,
    comment_redesign_class,
    comment_plain_class,
    comment_old_thing,
    comment_shreddit,
];

fn comment_testid(sel: &Selection) -> bool {
    rules::attr(sel, "data-testid") == "comment"
}

fn comment_redesign_class(sel: &Selection) -> bool {
    rules::has_class_token(sel, "Comment")
}

fn comment_plain_class(sel: &Selection) -> bool {
    rules::has_class_token(sel, "comment")
}

fn comment_old_thing(sel: &Selection) -> bool {
    rules::has_class_token(sel, "thing") && rules::has_ancestor_class_token(sel, "commentarea")
}

fn comment_shreddit(sel: &Selection) -> bool {
    rules::tag(sel) == "shreddit-comment"
}

/// Comment author rules (evaluated inside one comment element).
pub static COMMENT_AUTHOR_RULES: &[Rule] = &[
    author_testid,
    author_redesign_class,
    author_plain_class,
    author_slot,
];

fn author_testid(sel: &Selection) -> bool {
    rules::attr(sel, "data-testid") == "comment_author_link"
}

fn author_redesign_class(sel: &Selection) -> bool {
    rules::has_class_token(sel, "Comment__author")
}

fn author_plain_class(sel: &Selection) -> bool {
    rules::has_class_token(sel, "author")
}

fn author_slot(sel: &Selection) -> bool {
    rules::attr(sel, "slot") == "author" && has_ancestor_tag(sel, "shreddit-comment")
}

/// Comment body rules (evaluated inside one comment element).
pub static COMMENT_BODY_RULES: &[Rule] = &[
    comment_body_click_text,
    comment_body_redesign,
    comment_body_usertext_md,
    comment_body_slot,
    comment_body_old_usertext,
];

fn comment_body_click_text(sel: &Selection) -> bool {
    rules::attr(sel, "data-click-id") == "text" && has_ancestor_attr(sel, "data-testid", "comment")
}

fn comment_body_redesign(sel: &Selection) -> bool {
    rules::has_class_token(sel, "Comment__body")
}

fn comment_body_usertext_md(sel: &Selection) -> bool {
    rules::has_class_token(sel, "md") && rules::has_ancestor_class_token(sel, "usertext-body")
}

fn comment_body_slot(sel: &Selection) -> bool {
    rules::attr(sel, "slot") == "comment" && has_ancestor_tag(sel, "shreddit-comment")
}

fn comment_body_old_usertext(sel: &Selection) -> bool {
    rules::has_class_token(sel, "usertext-body") && rules::has_ancestor_class_token(sel, "comment")
}
