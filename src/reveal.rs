//! Incremental reveal.
//!
//! Lazy-loaded threads only materialize after scrolling and expanding, so
//! the site-specific extractor drives the live page through a bounded
//! scroll-and-expand loop before snapshotting the DOM. The engine owns the
//! ordering (scroll, settle, click-if-any, settle again, measure); how a
//! driver actually waits during `settle` is its own business, which keeps
//! the engine free of any particular runtime.

use std::time::Duration;

use log::debug;

use crate::error::Result;

/// Maximum number of scroll passes per reveal.
pub const MAX_SCROLL_PASSES: usize = 5;

/// Fixed settle delay after a scroll or an expand click.
pub const SETTLE_DELAY: Duration = Duration::from_millis(1500);

/// Consecutive unchanged height measurements that end the loop early.
pub const STABLE_PASSES_TO_STOP: usize = 2;

/// Selector cascade for visible "load more" controls, tried in order on
/// every pass.
pub const LOAD_MORE_SELECTORS: &[&str] = &[
    ".CommentTree__load-more-button",
    "[data-testid=\"load-more-comments-button\"]",
    "shreddit-comment-tree [kind=\"more-comments\"] button",
    "faceplate-partial[src*=\"/more-comments/\"]",
];

/// Handle to a live page.
///
/// The engine never touches the page directly; all side effects during
/// incremental reveal go through this trait. Implementations wrap whatever
/// automation channel is available (a devtools connection, an extension
/// messaging bridge, a test double).
pub trait PageDriver {
    /// Current page URL.
    fn url(&self) -> String;

    /// Current scrollable document height.
    fn scroll_height(&mut self) -> Result<u64>;

    /// Scroll to the bottom of the document.
    fn scroll_to_bottom(&mut self) -> Result<()>;

    /// Scroll back to the top of the document.
    fn scroll_to_top(&mut self) -> Result<()>;

    /// Wait for lazy content to load. The suspension point of the engine.
    fn settle(&mut self, delay: Duration) -> Result<()>;

    /// Click every currently visible element matching `selector`,
    /// returning how many clicks happened.
    fn click_visible(&mut self, selector: &str) -> Result<usize>;

    /// Snapshot the current DOM as an HTML string.
    fn html(&mut self) -> Result<String>;
}

/// Run the incremental reveal loop against a live page.
///
/// Per pass: scroll to bottom, settle, click visible load-more controls,
/// settle again if anything was clicked, then measure. Two consecutive
/// unchanged heights end the loop before the pass bound. The page is
/// always scrolled back to the top before returning.
pub fn reveal(driver: &mut dyn PageDriver) -> Result<()> {
    let mut last_height: Option<u64> = None;
    let mut stable_passes = 0usize;

    for pass in 0..MAX_SCROLL_PASSES {
        let height = driver.scroll_height()?;
        driver.scroll_to_bottom()?;
        debug!("reveal pass {}/{MAX_SCROLL_PASSES}, height {height}", pass + 1);

        driver.settle(SETTLE_DELAY)?;

        let mut clicked = 0usize;
        for selector in LOAD_MORE_SELECTORS {
            clicked += driver.click_visible(selector)?;
        }
        if clicked > 0 {
            debug!("clicked {clicked} load-more control(s)");
            driver.settle(SETTLE_DELAY)?;
        }

        let new_height = driver.scroll_height()?;
        if Some(new_height) == last_height {
            stable_passes += 1;
            if stable_passes >= STABLE_PASSES_TO_STOP {
                debug!("page height stable, ending reveal");
                break;
            }
        } else {
            stable_passes = 0;
        }
        last_height = Some(new_height);
    }

    driver.scroll_to_top()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Eq, Clone)]
    enum Call {
        Height,
        Bottom,
        Top,
        Settle,
        Click(String),
    }

    struct FakeDriver {
        heights: Vec<u64>,
        height_index: usize,
        clicks_per_pass: usize,
        calls: Vec<Call>,
    }

    impl FakeDriver {
        fn new(heights: Vec<u64>) -> Self {
            Self {
                heights,
                height_index: 0,
                clicks_per_pass: 0,
                calls: Vec::new(),
            }
        }
    }

    impl PageDriver for FakeDriver {
        fn url(&self) -> String {
            "https://www.reddit.com/r/rust/comments/x".to_string()
        }

        fn scroll_height(&mut self) -> Result<u64> {
            self.calls.push(Call::Height);
            let height = self
                .heights
                .get(self.height_index)
                .copied()
                .or_else(|| self.heights.last().copied())
                .unwrap_or(0);
            self.height_index += 1;
            Ok(height)
        }

        fn scroll_to_bottom(&mut self) -> Result<()> {
            self.calls.push(Call::Bottom);
            Ok(())
        }

        fn scroll_to_top(&mut self) -> Result<()> {
            self.calls.push(Call::Top);
            Ok(())
        }

        fn settle(&mut self, _delay: Duration) -> Result<()> {
            self.calls.push(Call::Settle);
            Ok(())
        }

        fn click_visible(&mut self, selector: &str) -> Result<usize> {
            self.calls.push(Call::Click(selector.to_string()));
            Ok(self.clicks_per_pass)
        }

        fn html(&mut self) -> Result<String> {
            Ok("<html></html>".to_string())
        }
    }

    #[test]
    fn test_stops_early_when_height_stable() {
        // Heights measured at pass ends: 1000, 1000 -> stable after 2.
        let mut driver = FakeDriver::new(vec![900, 1000, 1000, 1000]);
        reveal(&mut driver).unwrap();

        let bottoms = driver.calls.iter().filter(|c| **c == Call::Bottom).count();
        assert!(bottoms < MAX_SCROLL_PASSES);
        assert_eq!(bottoms, 3);
        assert_eq!(driver.calls.last(), Some(&Call::Top));
    }

    #[test]
    fn test_runs_all_passes_when_growing() {
        let mut driver = FakeDriver::new(vec![100, 200, 300, 400, 500, 600, 700, 800, 900, 1000]);
        reveal(&mut driver).unwrap();

        let bottoms = driver.calls.iter().filter(|c| **c == Call::Bottom).count();
        assert_eq!(bottoms, MAX_SCROLL_PASSES);
        assert_eq!(driver.calls.last(), Some(&Call::Top));
    }

    #[test]
    fn test_ordering_within_a_pass() {
        let mut driver = FakeDriver::new(vec![100, 100, 100]);
        reveal(&mut driver).unwrap();

        // First pass: height, bottom, settle, clicks (one per cascade
        // entry), height again.
        assert_eq!(driver.calls[0], Call::Height);
        assert_eq!(driver.calls[1], Call::Bottom);
        assert_eq!(driver.calls[2], Call::Settle);
        for (i, selector) in LOAD_MORE_SELECTORS.iter().enumerate() {
            assert_eq!(driver.calls[3 + i], Call::Click((*selector).to_string()));
        }
        assert_eq!(driver.calls[3 + LOAD_MORE_SELECTORS.len()], Call::Height);
    }

    #[test]
    fn test_click_triggers_second_settle() {
        let mut driver = FakeDriver::new(vec![100, 100, 100]);
        driver.clicks_per_pass = 1;
        reveal(&mut driver).unwrap();

        let first_height = 0;
        let second_height = driver
            .calls
            .iter()
            .enumerate()
            .skip(first_height + 1)
            .find(|(_, c)| **c == Call::Height)
            .map(|(i, _)| i)
            .unwrap();
        let settles_before_measure = driver.calls[..second_height]
            .iter()
            .filter(|c| **c == Call::Settle)
            .count();
        assert_eq!(settles_before_measure, 2);
    }
}
