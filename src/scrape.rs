//! Extraction pipeline.
//!
//! Assembles the output document: metadata header, host dispatch between
//! the generic locate-and-walk path and the Reddit extractor, top-level
//! failure containment, and report assembly. The public functions here
//! always return a document string; a failure that escapes every local
//! handler becomes a synthesized error document instead of an `Err`.

use chrono::{DateTime, SecondsFormat, Utc};
use log::{debug, error, warn};
use url::Url;

use crate::dom;
use crate::error::Result;
use crate::locate;
use crate::markdown::clean_text;
use crate::normalize::normalize;
use crate::reddit;
use crate::report::ScrapeReport;
use crate::reveal::{self, PageDriver};
use crate::serializer::SerializeContext;
use crate::settings::Settings;
use crate::walker;

/// Title used when the document has none.
const UNTITLED: &str = "Untitled Page";

/// Extract a full page into a normalized Markdown document.
///
/// Never fails: a whole-run failure yields a `# Scraping Error` document.
#[must_use]
pub fn scrape_page(html: &str, url: &str, settings: &Settings) -> String {
    scrape_page_at(html, url, settings, Utc::now())
}

/// As [`scrape_page`], with an explicit timestamp for the header.
#[must_use]
pub fn scrape_page_at(
    html: &str,
    url: &str,
    settings: &Settings,
    timestamp: DateTime<Utc>,
) -> String {
    match try_scrape(html, url, settings, timestamp, true) {
        Ok(markdown) => markdown,
        Err(e) => {
            error!("scrape failed: {e}");
            error_document(&e.to_string())
        }
    }
}

/// Extract a selection fragment: minimal metadata header plus the
/// fragment's cleaned text, skipping full-page discovery.
#[must_use]
pub fn scrape_selection(raw_html: &str, url: &str, settings: &Settings) -> String {
    scrape_selection_at(raw_html, url, settings, Utc::now())
}

/// As [`scrape_selection`], with an explicit timestamp for the header.
#[must_use]
pub fn scrape_selection_at(
    raw_html: &str,
    url: &str,
    _settings: &Settings,
    timestamp: DateTime<Utc>,
) -> String {
    let mut markdown = format!(
        "# Selected Content\n\n**Source:** {url}\n**Scraped:** {}\n\n---\n\n",
        format_timestamp(timestamp)
    );

    let doc = dom::parse(raw_html);
    let text = clean_text(&dom::text_content(&doc.select("body")));
    markdown.push_str(&text);
    markdown.push('\n');

    normalize(&markdown)
}

/// Extract from a live page through its driver.
///
/// On a Reddit host the incremental reveal loop runs before the DOM
/// snapshot; a reveal failure demotes the run to the generic path over
/// whatever has materialized, and a snapshot failure yields the error
/// document.
#[must_use]
pub fn scrape_live(driver: &mut dyn PageDriver, settings: &Settings) -> String {
    let url = driver.url();

    let mut allow_reddit = true;
    if reddit::is_reddit_host(&host_of(&url)) {
        if let Err(e) = reveal::reveal(driver) {
            warn!("incremental reveal failed, falling back to generic extraction: {e}");
            allow_reddit = false;
        }
    }

    let html = match driver.html() {
        Ok(html) => html,
        Err(e) => {
            error!("page snapshot failed: {e}");
            return error_document(&e.to_string());
        }
    };

    match try_scrape(&html, &url, settings, Utc::now(), allow_reddit) {
        Ok(markdown) => markdown,
        Err(e) => {
            error!("scrape failed: {e}");
            error_document(&e.to_string())
        }
    }
}

/// Extract a full page and package the coordination-layer payload.
#[must_use]
pub fn scrape_report(html: &str, url: &str, settings: &Settings) -> ScrapeReport {
    let timestamp = Utc::now();
    let markdown = scrape_page_at(html, url, settings, timestamp);
    ScrapeReport::new(markdown, timestamp)
}

fn try_scrape(
    html: &str,
    url: &str,
    settings: &Settings,
    timestamp: DateTime<Utc>,
    allow_reddit: bool,
) -> Result<String> {
    let doc = dom::parse(html);
    let body = doc.select("body");

    let title = page_title(&doc);
    let mut markdown = page_header(&title, url, timestamp);

    let host = host_of(url);
    if allow_reddit && reddit::is_reddit_host(&host) {
        markdown.push_str(&reddit::extract(&body));
        return Ok(normalize(&markdown));
    }

    let base_url = Url::parse(url).ok();
    let ctx = SerializeContext::new(settings, base_url.as_ref());

    let root = match locate::locate(&body, &host) {
        Some(root) => root,
        None => {
            debug!("no main content found, using document body as fallback");
            body.clone()
        }
    };

    for fragment in walker::walk(&root, &ctx) {
        markdown.push_str(&fragment);
    }

    Ok(normalize(&markdown))
}

fn page_title(doc: &dom::Document) -> String {
    let title = clean_text(&dom::text_content(&doc.select("title")));
    if title.is_empty() {
        UNTITLED.to_string()
    } else {
        title
    }
}

fn page_header(title: &str, url: &str, timestamp: DateTime<Utc>) -> String {
    format!(
        "# {title}\n\n**URL:** {url}\n**Scraped:** {}\n\n---\n\n",
        format_timestamp(timestamp)
    )
}

fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn host_of(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(ToString::to_string))
        .unwrap_or_default()
}

/// Synthesized document returned when a run fails outright.
#[must_use]
pub fn error_document(message: &str) -> String {
    normalize(&format!(
        "# Scraping Error\n\nAn error occurred while scraping this page: {message}\n\n\
         Please try again or report this issue.\n"
    ))
}
