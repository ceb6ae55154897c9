//! Element serializer.
//!
//! Converts one DOM element into its Markdown fragment. Dispatch goes
//! through a closed set of recognized node kinds; each handler is
//! independent, and a handler that cannot produce sound output logs and
//! returns an empty or placeholder fragment instead of aborting the run.

use dom_query::Selection;
use log::warn;
use url::Url;

use crate::dom;
use crate::markdown::clean_text;
use crate::patterns::KNOWN_LANGUAGES;
use crate::rules;
use crate::settings::Settings;

/// Minimum cleaned length for paragraph and container text; shorter
/// fragments are treated as noise and left unemitted.
pub const MIN_TEXT_FRAGMENT_LEN: usize = 20;

/// Per-run serialization context.
pub struct SerializeContext<'a> {
    /// Toggles controlling which kinds are serialized.
    pub settings: &'a Settings,
    /// Page location used to absolutize image and link targets.
    pub base_url: Option<&'a Url>,
}

impl<'a> SerializeContext<'a> {
    /// Build a context for one run.
    #[must_use]
    pub fn new(settings: &'a Settings, base_url: Option<&'a Url>) -> Self {
        Self { settings, base_url }
    }
}

/// The closed set of recognized node categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// `h1`..`h6`, with level 1..=6.
    Heading(u8),
    /// `p`
    Paragraph,
    /// `blockquote`
    Blockquote,
    /// `pre`
    Code,
    /// `table`
    Table,
    /// `img`
    Image,
    /// `a`
    Link,
    /// `ul`
    UnorderedList,
    /// `ol`
    OrderedList,
    /// `hr`
    HorizontalRule,
    /// `div`, `section`, `article`
    Container,
    /// Everything else: no fragment, never marked visited.
    Unrecognized,
}

/// Classify a lowercase tag name.
#[must_use]
pub fn classify(tag: &str) -> NodeKind {
    match tag {
        "h1" => NodeKind::Heading(1),
        "h2" => NodeKind::Heading(2),
        "h3" => NodeKind::Heading(3),
        "h4" => NodeKind::Heading(4),
        "h5" => NodeKind::Heading(5),
        "h6" => NodeKind::Heading(6),
        "p" => NodeKind::Paragraph,
        "blockquote" => NodeKind::Blockquote,
        "pre" => NodeKind::Code,
        "table" => NodeKind::Table,
        "img" => NodeKind::Image,
        "a" => NodeKind::Link,
        "ul" => NodeKind::UnorderedList,
        "ol" => NodeKind::OrderedList,
        "hr" => NodeKind::HorizontalRule,
        "div" | "section" | "article" => NodeKind::Container,
        _ => NodeKind::Unrecognized,
    }
}

/// Serialize one element into its markup fragment (possibly empty).
#[must_use]
pub fn serialize(sel: &Selection, ctx: &SerializeContext) -> String {
    let tag = dom::tag_name(sel).unwrap_or_default();

    match classify(&tag) {
        NodeKind::Heading(level) => heading(sel, level),
        NodeKind::Paragraph => paragraph(sel),
        NodeKind::Blockquote => blockquote(sel),
        NodeKind::Code if ctx.settings.include_code_blocks => code_block(sel),
        NodeKind::Table if ctx.settings.include_tables => table(sel),
        NodeKind::Image if ctx.settings.include_images => image(sel, ctx.base_url),
        NodeKind::Link => link(sel, ctx.base_url),
        NodeKind::UnorderedList if list_eligible(sel, ctx) => {
            wrap_block(&render_list(sel, false, 0))
        }
        NodeKind::OrderedList if list_eligible(sel, ctx) => wrap_block(&render_list(sel, true, 0)),
        NodeKind::HorizontalRule => "\n---\n".to_string(),
        NodeKind::Container => container(sel),
        _ => String::new(),
    }
}

fn wrap_block(body: &str) -> String {
    if body.is_empty() {
        String::new()
    } else {
        format!("\n{body}\n")
    }
}

fn heading(sel: &Selection, level: u8) -> String {
    let text = clean_text(&dom::text_content(sel));
    if text.is_empty() {
        return String::new();
    }
    let marker = "#".repeat(usize::from(level));
    format!("\n{marker} {text}\n")
}

fn paragraph(sel: &Selection) -> String {
    let text = clean_text(&dom::text_content(sel));
    if text.chars().count() > MIN_TEXT_FRAGMENT_LEN {
        wrap_block(&text)
    } else {
        String::new()
    }
}

fn blockquote(sel: &Selection) -> String {
    let text = clean_text(&dom::text_content(sel));
    if text.is_empty() {
        return String::new();
    }
    let quoted: Vec<String> = text.lines().map(|line| format!("> {line}")).collect();
    wrap_block(&quoted.join("\n"))
}

fn code_block(sel: &Selection) -> String {
    // Raw text, not cleaned: code keeps its layout.
    let code = dom::text_content(sel);
    let code = code.trim_end_matches('\n');
    match detect_code_language(sel) {
        Some(lang) => format!("\n```{lang}\n{code}\n```\n"),
        None => format!("\n```\n{code}\n```\n"),
    }
}

/// Scan the element's class tokens against the known-language list.
/// A token matches exactly or as `language-<name>`.
#[must_use]
pub fn detect_code_language(sel: &Selection) -> Option<&'static str> {
    let class = rules::class(sel).to_lowercase();
    let tokens: Vec<&str> = class.split_whitespace().collect();

    for lang in KNOWN_LANGUAGES {
        let prefixed = format!("language-{lang}");
        if tokens
            .iter()
            .any(|token| token == lang || *token == prefixed)
        {
            return Some(lang);
        }
    }
    None
}

fn table(sel: &Selection) -> String {
    let row_sels = sel.select("tr");
    let mut row_cells: Vec<Vec<String>> = Vec::new();
    for row in row_sels.iter() {
        let cells: Vec<String> = row
            .select("th, td")
            .iter()
            .map(|cell| clean_text(&dom::text_content(&cell)))
            .collect();
        row_cells.push(cells);
    }

    let Some(headers) = row_cells.first() else {
        return String::new();
    };
    if headers.is_empty() {
        return String::new();
    }

    let header_line = format!("| {} |", headers.join(" | "));
    let separator_line = format!(
        "| {} |",
        headers.iter().map(|_| "---").collect::<Vec<_>>().join(" | ")
    );

    let mut lines = vec![header_line, separator_line];
    for cells in &row_cells[1..] {
        lines.push(format!("| {} |", cells.join(" | ")));
    }

    wrap_block(&lines.join("\n"))
}

fn image(sel: &Selection, base_url: Option<&Url>) -> String {
    // Lazy-load attributes are consulted in priority order after src.
    let source = ["src", "data-src", "data-lazy-src"]
        .into_iter()
        .find_map(|name| dom::get_attribute(sel, name).filter(|value| !value.is_empty()));
    let Some(source) = source else {
        return String::new();
    };

    let Some(resolved) = resolve_url(&source, base_url) else {
        warn!("image source not resolvable: {source}");
        return String::new();
    };

    let alt = dom::get_attribute(sel, "alt")
        .filter(|value| !value.is_empty())
        .or_else(|| dom::get_attribute(sel, "title"))
        .unwrap_or_default();
    let title = dom::get_attribute(sel, "title").unwrap_or_default();

    if title.is_empty() {
        format!("\n![{alt}]({resolved})\n")
    } else {
        format!("\n![{alt}]({resolved} \"{title}\")\n")
    }
}

fn link(sel: &Selection, base_url: Option<&Url>) -> String {
    let text = clean_text(&dom::text_content(sel));
    let href = dom::get_attribute(sel, "href").unwrap_or_default();

    if href.is_empty() || href == text {
        return text;
    }
    let href = resolve_url(&href, base_url).map_or(href, |url| url.to_string());
    if href == text {
        return text;
    }

    let title = dom::get_attribute(sel, "title").unwrap_or_default();
    if title.is_empty() {
        format!("[{text}]({href})")
    } else {
        format!("[{text}]({href} \"{title}\")")
    }
}

fn resolve_url(raw: &str, base_url: Option<&Url>) -> Option<Url> {
    match base_url {
        Some(base) => base.join(raw).ok(),
        None => Url::parse(raw).ok(),
    }
}

fn list_eligible(sel: &Selection, ctx: &SerializeContext) -> bool {
    ctx.settings.include_lists && !dom::has_ancestor_tag(sel, "nav")
}

/// Recursively render a list. Each direct `li` child becomes one line at
/// a 2-space indent per depth; nested `ul`/`ol` children are rendered as
/// sub-lists after the item's own inline text. Non-`li` children of the
/// list are ignored.
fn render_list(sel: &Selection, ordered: bool, depth: usize) -> String {
    let indent = "  ".repeat(depth);
    let mut lines: Vec<String> = Vec::new();
    let mut index = 0usize;

    for item in dom::child_elements(sel) {
        if dom::tag_name(&item).as_deref() != Some("li") {
            continue;
        }
        index += 1;

        let mut inline = String::new();
        let mut nested = String::new();
        if let Some(item_node) = item.nodes().first() {
            for child in item_node.children() {
                if child.is_text() {
                    inline.push_str(&child.text());
                    continue;
                }
                if !child.is_element() {
                    continue;
                }
                let child_sel = Selection::from(child);
                match dom::tag_name(&child_sel).as_deref() {
                    Some("ul") => {
                        nested.push('\n');
                        nested.push_str(&render_list(&child_sel, false, depth + 1));
                    }
                    Some("ol") => {
                        nested.push('\n');
                        nested.push_str(&render_list(&child_sel, true, depth + 1));
                    }
                    _ => inline.push_str(&dom::text_content(&child_sel)),
                }
            }
        }

        let prefix = if ordered {
            format!("{index}. ")
        } else {
            "- ".to_string()
        };
        lines.push(format!("{indent}{prefix}{}{nested}", clean_text(&inline)));
    }

    lines.join("\n")
}

fn container(sel: &Selection) -> String {
    // Direct text only; structured children are the walker's business.
    let text = clean_text(&dom::direct_text(sel));
    if text.chars().count() > MIN_TEXT_FRAGMENT_LEN {
        wrap_block(&text)
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn serialize_first(html: &str, selector: &str) -> String {
        let settings = Settings::default();
        let ctx = SerializeContext::new(&settings, None);
        let doc = dom::parse(html);
        serialize(&doc.select(selector), &ctx)
    }

    fn serialize_with(html: &str, selector: &str, settings: &Settings, base: Option<&Url>) -> String {
        let ctx = SerializeContext::new(settings, base);
        let doc = dom::parse(html);
        serialize(&doc.select(selector), &ctx)
    }

    #[test]
    fn test_heading_levels() {
        assert_eq!(serialize_first("<h1>Top</h1>", "h1"), "\n# Top\n");
        assert_eq!(serialize_first("<h3>Sub</h3>", "h3"), "\n### Sub\n");
        assert_eq!(serialize_first("<h6>Deep</h6>", "h6"), "\n###### Deep\n");
    }

    #[test]
    fn test_paragraph_threshold() {
        assert_eq!(serialize_first("<p>too short</p>", "p"), "");
        let out = serialize_first("<p>this paragraph is long enough to keep</p>", "p");
        assert_eq!(out, "\nthis paragraph is long enough to keep\n");
    }

    #[test]
    fn test_blockquote_prefixes_lines() {
        let out = serialize_first("<blockquote>wise words</blockquote>", "blockquote");
        assert_eq!(out, "\n> wise words\n");
    }

    #[test]
    fn test_code_block_with_language() {
        let out = serialize_first(
            "<pre class=\"language-python\">def f():\n    pass</pre>",
            "pre",
        );
        assert_eq!(out, "\n```python\ndef f():\n    pass\n```\n");
    }

    #[test]
    fn test_code_block_without_language() {
        let out = serialize_first("<pre class=\"highlight\">raw text</pre>", "pre");
        assert_eq!(out, "\n```\nraw text\n```\n");
    }

    #[test]
    fn test_code_language_exact_token_only() {
        // "js-widget" must not count as a js language token.
        let doc = dom::parse("<pre class=\"js-widget\">x</pre>");
        assert_eq!(detect_code_language(&doc.select("pre")), None);

        let doc = dom::parse("<pre class=\"rust\">x</pre>");
        assert_eq!(detect_code_language(&doc.select("pre")), Some("rust"));
    }

    #[test]
    fn test_table_layout() {
        let out = serialize_first(
            "<table><tr><th>Name</th><th>Age</th></tr>\
             <tr><td>Alice</td><td>30</td></tr></table>",
            "table",
        );
        assert_eq!(
            out,
            "\n| Name | Age |\n| --- | --- |\n| Alice | 30 |\n"
        );
    }

    #[test]
    fn test_table_empty_cases() {
        assert_eq!(serialize_first("<table></table>", "table"), "");
        assert_eq!(serialize_first("<table><tr></tr></table>", "table"), "");
    }

    #[test]
    fn test_image_resolves_relative_source() {
        let base = Url::parse("https://example.com/page").unwrap();
        let settings = Settings::default();
        let out = serialize_with(
            r#"<img src="/a.png" alt="x">"#,
            "img",
            &settings,
            Some(&base),
        );
        assert_eq!(out, "\n![x](https://example.com/a.png)\n");
    }

    #[test]
    fn test_image_lazy_source_and_title() {
        let base = Url::parse("https://example.com/").unwrap();
        let settings = Settings::default();
        let out = serialize_with(
            r#"<img data-lazy-src="pic.jpg" alt="cat" title="A cat">"#,
            "img",
            &settings,
            Some(&base),
        );
        assert_eq!(out, "\n![cat](https://example.com/pic.jpg \"A cat\")\n");
    }

    #[test]
    fn test_image_without_source_is_empty() {
        assert_eq!(serialize_first("<img alt=\"x\">", "img"), "");
    }

    #[test]
    fn test_link_forms() {
        let out = serialize_first(r#"<a href="https://a.example/">docs here</a>"#, "a");
        assert_eq!(out, "[docs here](https://a.example/)");

        // href identical to the text collapses to bare text
        let out = serialize_first(
            r#"<a href="https://a.example/">https://a.example/</a>"#,
            "a",
        );
        assert_eq!(out, "https://a.example/");

        let out = serialize_first("<a>anchor with no href</a>", "a");
        assert_eq!(out, "anchor with no href");
    }

    #[test]
    fn test_nested_unordered_list() {
        let out = serialize_first(
            "<ul><li>A<ul><li>B</li><li>C</li></ul></li></ul>",
            "ul",
        );
        assert_eq!(out, "\n- A\n  - B\n  - C\n");
    }

    #[test]
    fn test_ordered_list_numbers_each_level_from_one() {
        let out = serialize_first(
            "<ol><li>first</li><li>second<ol><li>inner</li></ol></li></ol>",
            "ol",
        );
        assert_eq!(out, "\n1. first\n2. second\n  1. inner\n");
    }

    #[test]
    fn test_list_inside_nav_is_suppressed() {
        let out = serialize_first("<nav><ul><li>Home</li></ul></nav>", "ul");
        assert_eq!(out, "");
    }

    #[test]
    fn test_horizontal_rule() {
        assert_eq!(serialize_first("<hr>", "hr"), "\n---\n");
    }

    #[test]
    fn test_container_direct_text_only() {
        let out = serialize_first(
            "<div>direct container text long enough<p>child paragraph text is separate</p></div>",
            "div",
        );
        assert_eq!(out, "\ndirect container text long enough\n");

        // Only-child-element containers emit nothing themselves.
        let out = serialize_first(
            "<div><p>child paragraph text is separate and long</p></div>",
            "div",
        );
        assert_eq!(out, "");
    }

    #[test]
    fn test_toggles_gate_kinds() {
        let settings = Settings {
            include_tables: false,
            include_images: false,
            include_lists: false,
            include_code_blocks: false,
            ..Settings::default()
        };
        let table = "<table><tr><th>H</th></tr></table>";
        let img = r#"<img src="https://e.example/a.png">"#;
        let list = "<ul><li>item</li></ul>";
        let pre = "<pre>code</pre>";
        assert_eq!(serialize_with(table, "table", &settings, None), "");
        assert_eq!(serialize_with(img, "img", &settings, None), "");
        assert_eq!(serialize_with(list, "ul", &settings, None), "");
        assert_eq!(serialize_with(pre, "pre", &settings, None), "");
    }

    #[test]
    fn test_unrecognized_tag_is_empty() {
        assert_eq!(serialize_first("<aside>anything at all</aside>", "aside"), "");
        assert_eq!(classify("span"), NodeKind::Unrecognized);
    }
}
