//! Simple CLI that reads HTML from stdin and writes the scrape report as
//! JSON to stdout. The page URL may be passed as the first argument.

use std::io::{self, Read};

use markscrape::{scrape_report, Settings};

fn main() {
    env_logger::init();

    let url = std::env::args().nth(1).unwrap_or_default();

    let mut html = String::new();
    if io::stdin().read_to_string(&mut html).is_err() {
        eprintln!("Failed to read from stdin");
        std::process::exit(1);
    }

    let report = scrape_report(&html, &url, &Settings::default());
    println!("{}", serde_json::to_string(&report).unwrap_or_default());
}
