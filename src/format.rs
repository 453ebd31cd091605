//! Import and format entry points
//!
//! ```text
//! read_and_format / read_file_and_format
//! └── format_source(CsvSource | MemorySource)
//!     └── format_rows(rows, profile)
//!         ├── render_table
//!         └── assemble (metadata)
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;

use bstr::{BStr, ByteSlice};

use crate::config::FormatOptions;
use crate::csv::{RowStore, TableProfile};
use crate::error::FormatError;
use crate::render::{assemble, render_table, LineList, TableMetadata};
use crate::source::{CsvSource, LoadedRows, RowSource};

const MAX_FILENAME_CHARS: usize = 64;

/// Rendered lines plus the metadata describing them
#[derive(Debug)]
pub struct FormattedTable {
    pub lines: LineList,
    pub metadata: TableMetadata,
}

impl FormattedTable {
    pub fn lines(&self) -> impl Iterator<Item = &BStr> + '_ {
        self.lines.iter().map(|line| line.as_bstr())
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

/// Parse CSV from `input` and render it.
pub fn read_and_format<R: Read>(
    input: R,
    options: &FormatOptions,
) -> Result<FormattedTable, FormatError> {
    format_source(CsvSource::new(input), options)
}

/// Like [`read_and_format`], recording the file's name in the metadata.
pub fn read_file_and_format(
    path: &Path,
    options: &FormatOptions,
) -> Result<FormattedTable, FormatError> {
    let file = File::open(path)?;
    let mut table = read_and_format(file, options)?;

    table.metadata.filename = path
        .file_name()
        .map(|name| name.to_string_lossy().chars().take(MAX_FILENAME_CHARS).collect());

    Ok(table)
}

pub fn format_source<S: RowSource>(
    source: S,
    options: &FormatOptions,
) -> Result<FormattedTable, FormatError> {
    let LoadedRows { rows, profile } = source.load(options)?;
    format_rows(&rows, &profile, options)
}

/// Render rows that were stored and profiled elsewhere.
///
/// Reads `rows` and `profile` only, so calling it twice yields identical
/// output.
pub fn format_rows(
    rows: &RowStore,
    profile: &TableProfile,
    options: &FormatOptions,
) -> Result<FormattedTable, FormatError> {
    let layout = options.layout();
    let single_byte = options.force_single_byte;
    let title = options.title.as_deref();

    let rendered = render_table(rows, profile, &layout, single_byte, title)?;
    let metadata = assemble(&rendered, profile, &layout, single_byte, title);

    Ok(FormattedTable {
        lines: rendered.lines,
        metadata,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::BorderStyle;
    use crate::source::MemorySource;
    use std::io::Write;

    fn ascii() -> FormatOptions {
        FormatOptions {
            force_ascii_borders: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_read_and_format() {
        let table = read_and_format("a;b\n1;2\n".as_bytes(), &ascii()).unwrap();
        let lines: Vec<String> = table.lines().map(|l| l.to_string()).collect();

        assert_eq!(lines, [" a | b ", "---+---", " 1 | 2 ", "(1 rows)"]);
        assert_eq!(table.metadata.total_rows, 4);
        assert_eq!(table.line_count(), 4);
        assert_eq!(table.metadata.filename, None);
    }

    #[test]
    fn test_file_name_recorded() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "x,y").unwrap();
        writeln!(file, "1,2").unwrap();

        let table = read_file_and_format(file.path(), &ascii()).unwrap();
        let expected = file.path().file_name().unwrap().to_string_lossy().to_string();
        assert_eq!(table.metadata.filename, Some(expected));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = read_file_and_format(Path::new("/nonexistent/data.csv"), &ascii()).unwrap_err();
        assert!(matches!(err, FormatError::Io(_)));
    }

    #[test]
    fn test_format_rows_is_repeatable() {
        let options = FormatOptions {
            border_style: BorderStyle::DoubleRule,
            ..Default::default()
        };
        let loaded = MemorySource::from_strs(&[&["id", "name"], &["1", "x\ny"]])
            .load(&options)
            .unwrap();

        let first = format_rows(&loaded.rows, &loaded.profile, &options).unwrap();
        let second = format_rows(&loaded.rows, &loaded.profile, &options).unwrap();

        assert_eq!(
            first.lines().collect::<Vec<_>>(),
            second.lines().collect::<Vec<_>>()
        );
        assert_eq!(first.metadata, second.metadata);
    }
}
