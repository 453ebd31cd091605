//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use pretty_csv::{read_and_format, BorderStyle, FormatOptions, FormattedTable};

/// Options with ASCII glyphs and the given border
pub fn ascii_options(border: BorderStyle) -> FormatOptions {
    FormatOptions {
        force_ascii_borders: true,
        border_style: border,
        ..Default::default()
    }
}

/// Format `content` and panic on failure
pub fn format(content: &str, options: &FormatOptions) -> FormattedTable {
    read_and_format(content.as_bytes(), options).expect("input should format")
}

/// Rendered lines as owned strings
pub fn lines_of(table: &FormattedTable) -> Vec<String> {
    table.lines().map(|line| line.to_string()).collect()
}

/// Format with ASCII glyphs and return the lines
pub fn render(content: &str, border: BorderStyle) -> Vec<String> {
    lines_of(&format(content, &ascii_options(border)))
}

/// Display width of a rendered line
pub fn width(line: &str) -> usize {
    pretty_csv::util::display_width(line.as_bytes(), false)
}
