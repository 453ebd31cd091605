//! Structural metadata of a rendered table
//!
//! Tells a downstream viewer which output lines are borders, header, data
//! and footer, and maps display columns back to logical fields.

use bstr::ByteSlice;
use serde::Serialize;

use super::layout::{BorderStyle, LineStyle, TableLayout};
use super::table::RenderedTable;
use crate::csv::TableProfile;
use crate::util::text::{char_width, display_width};

/// Role of one display column of the header rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HeadlineCode {
    /// Left frame corner
    #[serde(rename = "L")]
    Left,
    /// Right frame corner
    #[serde(rename = "R")]
    Right,
    /// Boundary between two columns
    #[serde(rename = "I")]
    Boundary,
    /// Column body
    #[serde(rename = "d")]
    Body,
}

impl HeadlineCode {
    pub fn as_char(self) -> char {
        match self {
            HeadlineCode::Left => 'L',
            HeadlineCode::Right => 'R',
            HeadlineCode::Boundary => 'I',
            HeadlineCode::Body => 'd',
        }
    }
}

/// Display-column span of one logical column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnRange {
    /// First display column of the header text, when a header exists
    pub name_pos: Option<usize>,
    /// Display width of the header text
    pub name_size: Option<usize>,
    pub xmin: usize,
    pub xmax: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableMetadata {
    pub filename: Option<String>,
    pub title: Option<String>,
    pub title_rows: usize,
    pub border_style: BorderStyle,
    pub line_style: LineStyle,

    pub border_top_row: Option<usize>,
    /// The header rule line
    pub border_head_row: Option<usize>,
    pub border_bottom_row: Option<usize>,
    /// First line of the header text
    pub names_row: Option<usize>,
    pub first_data_row: Option<usize>,
    pub last_data_row: Option<usize>,
    pub footer_row: Option<usize>,
    pub footer_rows: usize,

    pub total_rows: usize,
    pub last_row: Option<usize>,
    pub maxy: Option<usize>,
    /// Longest line in bytes
    pub maxbytes: usize,
    /// Widest line in display columns
    pub maxx: usize,
    /// Data rows reported by the footer
    pub data_rows: usize,

    pub headline: Option<String>,
    pub headline_size: usize,
    pub headline_char_size: usize,
    pub headline_transl: Vec<HeadlineCode>,

    pub columns: usize,
    pub cranges: Vec<ColumnRange>,
}

impl TableMetadata {
    /// The translation table as a compact string such as `LdddIdddR`
    pub fn headline_transl_string(&self) -> String {
        self.headline_transl.iter().map(|c| c.as_char()).collect()
    }
}

/// Derive metadata from a finished rendering pass.
pub fn assemble(
    rendered: &RenderedTable,
    profile: &TableProfile,
    layout: &TableLayout,
    single_byte: bool,
    title: Option<&str>,
) -> TableMetadata {
    let framed = layout.border.is_framed();
    let title_rows = rendered.title_rows;
    let total_rows = rendered.flushed_rows;
    let last_row = total_rows.checked_sub(1);

    let has_data = rendered.data_rows > 0;

    let border_top_row = framed.then_some(title_rows);
    // the footer follows the bottom frame, which follows the last data line
    let border_bottom_row = if framed {
        total_rows.checked_sub(2)
    } else {
        None
    };
    let last_data_row = if has_data {
        total_rows.checked_sub(if framed { 3 } else { 2 })
    } else {
        None
    };

    let mut metadata = TableMetadata {
        filename: None,
        title: title.map(str::to_string),
        title_rows,
        border_style: layout.border,
        line_style: layout.line_style,
        border_top_row,
        border_head_row: None,
        border_bottom_row,
        names_row: None,
        first_data_row: None,
        last_data_row,
        footer_row: last_row,
        footer_rows: 1,
        total_rows,
        last_row,
        maxy: last_row,
        maxbytes: rendered.maxbytes,
        maxx: 0,
        data_rows: rendered.data_rows,
        headline: None,
        headline_size: 0,
        headline_char_size: 0,
        headline_transl: Vec::new(),
        columns: profile.column_count(),
        cranges: Vec::new(),
    };

    if rendered.printed_headline {
        let names_row = title_rows + usize::from(framed);
        let head_row = names_row + rendered.header_lines;

        if let Some(headline) = rendered.lines.get(head_row) {
            let transl = translate_headline(headline, layout, single_byte);
            let mut cranges = ranges_from_transl(&transl, profile.column_count());

            if let Some(names) = rendered.lines.get(names_row) {
                locate_names(&mut cranges, names, layout, single_byte);
            }

            metadata.names_row = Some(names_row);
            metadata.border_head_row = Some(head_row);
            metadata.first_data_row = has_data.then_some(head_row + 1);
            metadata.headline_size = headline.len();
            metadata.headline_char_size = transl.len();
            metadata.maxx = display_width(headline, single_byte);
            metadata.headline = Some(headline.to_str_lossy().into_owned());
            metadata.headline_transl = transl;
            metadata.cranges = cranges;
        }
    } else {
        let transl = synthesize_headline(profile, layout.border);

        metadata.first_data_row = has_data.then_some(title_rows + usize::from(framed));
        metadata.headline_char_size = transl.len();
        metadata.maxx = transl.len();
        metadata.cranges = ranges_from_transl(&transl, profile.column_count());
        metadata.headline_transl = transl;
    }

    tracing::debug!(
        total_rows,
        columns = metadata.columns,
        header = rendered.printed_headline,
        "assembled table metadata"
    );

    metadata
}

/// Build the translation table from column widths when no header exists.
fn synthesize_headline(profile: &TableProfile, border: BorderStyle) -> Vec<HeadlineCode> {
    use HeadlineCode::*;

    let mut transl = Vec::new();

    match border {
        BorderStyle::SingleRule => transl.push(Body),
        BorderStyle::DoubleRule => transl.extend([Left, Body]),
        BorderStyle::None => {}
    }

    for (i, column) in profile.columns().iter().enumerate() {
        if i > 0 {
            if border == BorderStyle::None {
                transl.push(Boundary);
            } else {
                transl.extend([Body, Boundary, Body]);
            }
        }
        transl.extend(std::iter::repeat(Body).take(column.width));
    }

    match border {
        BorderStyle::SingleRule => transl.push(Body),
        BorderStyle::DoubleRule => transl.extend([Body, Right]),
        BorderStyle::None => {}
    }

    transl
}

/// Translate a rendered header rule into per-display-column codes.
///
/// Trailing pad spaces after the last column are not part of the table.
fn translate_headline(headline: &[u8], layout: &TableLayout, single_byte: bool) -> Vec<HeadlineCode> {
    let mut chars: Vec<char> = if single_byte {
        headline.iter().map(|&b| b as char).collect()
    } else {
        headline.chars().collect()
    };
    while chars.last() == Some(&' ') {
        chars.pop();
    }

    let framed = layout.border.is_framed();
    let last = chars.len().saturating_sub(1);

    chars
        .iter()
        .enumerate()
        .map(|(pos, &ch)| match ch {
            '+' | ':' | '├' | '┼' | '┤' | '╞' | '╪' | '╡' if framed && pos == 0 => {
                HeadlineCode::Left
            }
            '+' | ':' | '├' | '┼' | '┤' | '╞' | '╪' | '╡' if framed && pos == last => {
                HeadlineCode::Right
            }
            '+' | ':' | '├' | '┼' | '┤' | '╞' | '╪' | '╡' => HeadlineCode::Boundary,
            ' ' if pos > 0 && pos < last => HeadlineCode::Boundary,
            _ => HeadlineCode::Body,
        })
        .collect()
}

/// Split the translation table into one range per column at boundary codes.
fn ranges_from_transl(transl: &[HeadlineCode], columns: usize) -> Vec<ColumnRange> {
    if columns == 0 || transl.is_empty() {
        return Vec::new();
    }

    let mut ranges = Vec::with_capacity(columns);
    let mut xmin = 0;

    for (pos, code) in transl.iter().enumerate() {
        if *code == HeadlineCode::Boundary && ranges.len() + 1 < columns {
            ranges.push(ColumnRange {
                name_pos: None,
                name_size: None,
                xmin,
                xmax: pos,
            });
            xmin = pos;
        }
    }

    ranges.push(ColumnRange {
        name_pos: None,
        name_size: None,
        xmin,
        xmax: transl.len() - 1,
    });

    ranges
}

/// Fill in where each column's header text sits on the names line.
fn locate_names(ranges: &mut [ColumnRange], names: &[u8], layout: &TableLayout, single_byte: bool) {
    // one entry per display column: the character starting there, or `None`
    // for the trailing cells of a wide character
    let mut cells: Vec<Option<char>> = Vec::new();
    let mut push = |ch: char, width: usize| {
        cells.push(Some(ch));
        cells.extend(std::iter::repeat(None).take(width.saturating_sub(1)));
    };
    if single_byte {
        names.iter().for_each(|&b| push(b as char, 1));
    } else {
        names.chars().for_each(|ch| push(ch, char_width(ch)));
    }

    let vertical = layout.vertical();
    let is_blank = |cell: &Option<char>| match cell {
        Some(ch) => *ch == ' ' || vertical.starts_with(*ch),
        None => false,
    };

    for range in ranges.iter_mut() {
        let end = range.xmax.min(cells.len().saturating_sub(1));
        if range.xmin > end {
            continue;
        }

        let span = &cells[range.xmin..=end];
        let first = span.iter().position(|c| !is_blank(c));
        let last = span.iter().rposition(|c| !is_blank(c));

        if let (Some(first), Some(last)) = (first, last) {
            range.name_pos = Some(range.xmin + first);
            range.name_size = Some(last - first + 1);
        }
    }
}
