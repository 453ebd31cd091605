//! Display width measurement for field text
//!
//! Fields are raw bytes. In multi-byte mode they are decoded as UTF-8 (lossy:
//! malformed sequences count as one replacement cell) and measured in
//! terminal cells; in single-byte mode every byte is one cell.

use bstr::ByteSlice;
use unicode_width::UnicodeWidthChar;

/// Number of bytes a UTF-8 sequence occupies, judged from its leading byte.
///
/// Continuation and invalid bytes report 1 so the caller never stalls.
pub fn utf8_char_len(lead: u8) -> usize {
    if lead & 0x80 == 0 {
        1
    } else if lead & 0xe0 == 0xc0 {
        2
    } else if lead & 0xf0 == 0xe0 {
        3
    } else if lead & 0xf8 == 0xf0 {
        4
    } else {
        1
    }
}

/// Cells occupied by one decoded character (control characters count as one)
pub fn char_width(ch: char) -> usize {
    ch.width().unwrap_or(1)
}

/// Bytes that do not count toward a column's "text" total when guessing types
pub fn is_structural(ch: char) -> bool {
    matches!(ch, '-' | ' ' | ':')
}

/// Display width of a single-line string
pub fn display_width(text: &[u8], single_byte: bool) -> usize {
    if single_byte {
        text.len()
    } else {
        text.chars().map(char_width).sum()
    }
}

/// Statistics gathered from one field while it is stored
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldMeasure {
    /// Widest embedded line
    pub width: usize,
    /// Field contains at least one line break
    pub multiline: bool,
    /// Characters that are ASCII digits
    pub digits: u64,
    /// Characters that are neither digits nor structural
    pub total: u64,
}

/// Measure a whole field: widest line, line breaks, digit and text counts.
pub fn measure_field(text: &[u8], single_byte: bool) -> FieldMeasure {
    let mut measure = FieldMeasure::default();
    let mut current = 0;

    let mut observe = |ch: char, cells: usize, measure: &mut FieldMeasure| {
        if ch.is_ascii_digit() {
            measure.digits += 1;
        } else if !is_structural(ch) {
            measure.total += 1;
        }

        if ch == '\n' {
            measure.multiline = true;
            measure.width = measure.width.max(current);
            current = 0;
        } else {
            current += cells;
        }
    };

    if single_byte {
        for &b in text {
            observe(b as char, 1, &mut measure);
        }
    } else {
        for ch in text.chars() {
            observe(ch, char_width(ch), &mut measure);
        }
    }

    measure.width = measure.width.max(current);
    measure
}
