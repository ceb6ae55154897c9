//! Markup normalizer.
//!
//! Post-processes the assembled markup: per-line trailing whitespace is
//! stripped, headings get blank-line spacing on both sides, runs of four
//! or more newlines collapse to exactly three, and the document ends with
//! a single trailing newline. The pass is line-based so that normalizing
//! already-normalized markup is a no-op.

/// Maximum number of consecutive blank lines kept between blocks.
const MAX_BLANK_RUN: usize = 2;

fn is_heading_line(line: &str) -> bool {
    let marker_len = line.chars().take_while(|c| *c == '#').count();
    (1..=6).contains(&marker_len) && line[marker_len..].starts_with(' ')
}

/// Normalize assembled markup. Idempotent.
#[must_use]
pub fn normalize(markup: &str) -> String {
    let stripped: Vec<&str> = markup.lines().map(str::trim_end).collect();

    // Blank-line spacing around headings.
    let mut spaced: Vec<String> = Vec::with_capacity(stripped.len());
    for (i, line) in stripped.iter().enumerate() {
        if is_heading_line(line) {
            if spaced.last().is_some_and(|prev| !prev.is_empty()) {
                spaced.push(String::new());
            }
            spaced.push((*line).to_string());
            let next_non_blank = stripped.get(i + 1).is_some_and(|next| !next.is_empty());
            if next_non_blank {
                spaced.push(String::new());
            }
        } else {
            spaced.push((*line).to_string());
        }
    }

    // Collapse blank-line runs and drop leading blanks.
    let mut out_lines: Vec<String> = Vec::with_capacity(spaced.len());
    let mut blank_run = 0usize;
    for line in spaced {
        if line.is_empty() {
            blank_run += 1;
            if out_lines.is_empty() || blank_run > MAX_BLANK_RUN {
                continue;
            }
        } else {
            blank_run = 0;
        }
        out_lines.push(line);
    }

    // Exactly one trailing newline.
    while out_lines.last().is_some_and(String::is_empty) {
        out_lines.pop();
    }
    let mut out = out_lines.join("\n");
    out.push('\n');
    out
}
