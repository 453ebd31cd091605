//! Table rendering
//!
//! Walks the row store once and emits fixed-width text lines:
//! optional title, top frame, rows (a multi-line row yields one physical
//! line per embedded line), header rule after the first row when a header
//! was detected, bottom frame and a `(N rows)` footer.

use bstr::ByteSlice;

use super::layout::{BorderStyle, RulePosition, TableLayout};
use super::print_buffer::{LineList, PrintBuffer};
use crate::csv::{ColumnProfile, Row, RowStore, TableProfile};
use crate::error::FormatError;
use crate::util::text::display_width;

/// Output of one rendering pass
#[derive(Debug)]
pub struct RenderedTable {
    pub lines: LineList,
    /// Number of physical lines emitted
    pub flushed_rows: usize,
    /// A header rule followed the first row
    pub printed_headline: bool,
    /// Byte length of the longest line
    pub maxbytes: usize,
    /// Data rows reported in the footer (header row excluded)
    pub data_rows: usize,
    /// Physical lines taken by the header row, 0 without header
    pub header_lines: usize,
    pub title_rows: usize,
}

/// Render `rows` as a table according to `profile` and `layout`.
pub fn render_table(
    rows: &RowStore,
    profile: &TableProfile,
    layout: &TableLayout,
    single_byte: bool,
    title: Option<&str>,
) -> Result<RenderedTable, FormatError> {
    let mut printer = TablePrinter {
        buf: PrintBuffer::new()?,
        profile,
        layout,
        single_byte,
    };

    let mut title_rows = 0;
    if let Some(title) = title {
        printer.buf.write_str(title)?;
        printer.buf.flush_line()?;
        title_rows = 1;
    }

    printer.print_rule(RulePosition::Top)?;

    let mut printed_headline = false;
    let mut header_lines = 0;
    let mut data_rows = 0;

    for (index, row) in rows.iter().enumerate() {
        let is_header = index == 0 && profile.has_header();
        let lines = printer.print_row(row, is_header)?;

        if is_header {
            printer.print_rule(RulePosition::Header)?;
            printed_headline = true;
            header_lines = lines;
        } else {
            data_rows += 1;
        }
    }

    printer.print_rule(RulePosition::Bottom)?;

    printer.buf.write_str(&format!("({} rows)", data_rows))?;
    printer.buf.flush_line()?;

    let flushed_rows = printer.buf.flushed_rows();
    let maxbytes = printer.buf.maxbytes();

    tracing::debug!(
        lines = flushed_rows,
        data_rows,
        printed_headline,
        maxbytes,
        "rendered table"
    );

    Ok(RenderedTable {
        lines: printer.buf.into_lines(),
        flushed_rows,
        printed_headline,
        maxbytes,
        data_rows,
        header_lines,
        title_rows,
    })
}

struct TablePrinter<'a> {
    buf: PrintBuffer,
    profile: &'a TableProfile,
    layout: &'a TableLayout,
    single_byte: bool,
}

impl TablePrinter<'_> {
    fn border(&self) -> BorderStyle {
        self.layout.border
    }

    fn print_rule(&mut self, position: RulePosition) -> Result<(), FormatError> {
        if !self.layout.draws_rule(position) {
            return Ok(());
        }

        let glyphs = self.layout.rule_glyphs(position);
        let border = self.border();

        match border {
            BorderStyle::DoubleRule => {
                self.buf.write_str(glyphs.left)?;
                self.buf.write_str(glyphs.horizontal)?;
            }
            BorderStyle::SingleRule => self.buf.write_str(glyphs.horizontal)?,
            BorderStyle::None => {}
        }

        for (i, column) in self.profile.columns().iter().enumerate() {
            if i > 0 {
                if border == BorderStyle::None {
                    self.buf.put_spaces(1)?;
                } else {
                    self.buf.write_str(glyphs.horizontal)?;
                    self.buf.write_str(glyphs.middle)?;
                    self.buf.write_str(glyphs.horizontal)?;
                }
            }
            self.buf.write_repeat(column.width, glyphs.horizontal)?;
        }

        match border {
            BorderStyle::DoubleRule => {
                self.buf.write_str(glyphs.horizontal)?;
                self.buf.write_str(glyphs.right)?;
            }
            BorderStyle::SingleRule => self.buf.write_str(glyphs.horizontal)?,
            BorderStyle::None if self.profile.is_last_column_multiline() => {
                self.buf.put_spaces(1)?;
            }
            BorderStyle::None => {}
        }

        self.buf.flush_line()
    }

    fn print_separator(&mut self) -> Result<(), FormatError> {
        if self.border() != BorderStyle::None {
            self.buf.write_str(self.layout.vertical())?;
            self.buf.put_spaces(1)?;
        }
        Ok(())
    }

    /// Whether a cell of column `index` ends with a space
    fn trailing_space(&self, index: usize) -> bool {
        self.border() != BorderStyle::None
            || index + 1 < self.profile.column_count()
            || self.profile.is_last_column_multiline()
    }

    /// Emit one row; returns the number of physical lines it took.
    fn print_row(&mut self, row: &Row, is_header: bool) -> Result<usize, FormatError> {
        let columns = self.profile.column_count();
        let multiline = row.is_multiline();

        // remaining text of each field; a multi-line field advances one
        // embedded line per physical line
        let mut pending: Vec<Option<&[u8]>> = row
            .fields()
            .take(columns)
            .map(|field| Some(field.as_bytes()))
            .collect();
        let present = pending.len();

        let mut physical = 0;
        loop {
            let mut more_lines = false;

            match self.border() {
                BorderStyle::DoubleRule => {
                    self.buf.write_str(self.layout.vertical())?;
                    self.buf.put_spaces(1)?;
                }
                BorderStyle::SingleRule => self.buf.put_spaces(1)?,
                BorderStyle::None => {}
            }

            for (j, slot) in pending.iter_mut().enumerate() {
                if j > 0 {
                    self.print_separator()?;
                }

                let column = self.profile.columns()[j];
                let continues = match slot.filter(|field| !field.is_empty()) {
                    Some(field) => {
                        let rest = self.print_cell(field, &column, is_header, multiline)?;
                        if multiline {
                            *slot = rest;
                        }
                        rest.is_some()
                    }
                    None => {
                        self.buf.put_spaces(column.width)?;
                        false
                    }
                };

                if continues {
                    more_lines = true;
                    self.buf.write_str(self.layout.continuation())?;
                } else if self.trailing_space(j) {
                    self.buf.put_spaces(1)?;
                }
            }

            for j in present..columns {
                if j > 0 {
                    self.print_separator()?;
                }
                let width = self.profile.columns()[j].width;
                let extra = usize::from(self.trailing_space(j));
                self.buf.put_spaces(width + extra)?;
            }

            if self.border() == BorderStyle::DoubleRule {
                self.buf.write_str(self.layout.vertical())?;
            }

            self.buf.flush_line()?;
            physical += 1;

            if !more_lines {
                return Ok(physical);
            }
        }
    }

    /// Write one padded cell; returns the text left for following lines.
    fn print_cell<'f>(
        &mut self,
        field: &'f [u8],
        column: &ColumnProfile,
        is_header: bool,
        multiline: bool,
    ) -> Result<Option<&'f [u8]>, FormatError> {
        let (segment, rest) = if multiline {
            match field.find_byte(b'\n') {
                Some(end) => (&field[..end], Some(&field[end + 1..])),
                None => (field, None),
            }
        } else {
            (field, None)
        };

        let width = display_width(segment, self.single_byte);

        // clamped: a width miscount must not underflow the padding
        let spaces = column.width.saturating_sub(width);
        let (left, right) = if is_header {
            (spaces / 2, spaces - spaces / 2)
        } else if column.is_numeric() {
            (spaces, 0)
        } else {
            (0, spaces)
        };

        self.buf.put_spaces(left)?;
        self.buf.write(segment)?;
        self.buf.put_spaces(right)?;

        Ok(rest)
    }
}
