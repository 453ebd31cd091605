//! Row producers
//!
//! Everything that can feed the renderer implements [`RowSource`]: it yields
//! stored rows plus the column profile derived from them.

use std::io::Read;

use crate::config::FormatOptions;
use crate::csv::{parse_csv, ColumnStats, Row, RowStore, TableProfile};
use crate::error::FormatError;

/// Rows ready for rendering
#[derive(Debug)]
pub struct LoadedRows {
    pub rows: RowStore,
    pub profile: TableProfile,
}

pub trait RowSource {
    fn load(self, options: &FormatOptions) -> Result<LoadedRows, FormatError>;
}

/// Delimited text read from any byte stream
pub struct CsvSource<R> {
    input: R,
}

impl<R: Read> CsvSource<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }
}

impl<R: Read> RowSource for CsvSource<R> {
    fn load(self, options: &FormatOptions) -> Result<LoadedRows, FormatError> {
        let parsed = parse_csv(self.input, &options.parse_options())?;
        let profile = TableProfile::build(&parsed.rows, &parsed.stats);

        Ok(LoadedRows {
            rows: parsed.rows,
            profile,
        })
    }
}

/// Records already split into fields, e.g. a query result
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    records: Vec<Vec<Vec<u8>>>,
}

impl MemorySource {
    pub fn new(records: Vec<Vec<Vec<u8>>>) -> Self {
        Self { records }
    }

    pub fn from_strs(records: &[&[&str]]) -> Self {
        Self::new(
            records
                .iter()
                .map(|record| record.iter().map(|f| f.as_bytes().to_vec()).collect())
                .collect(),
        )
    }
}

impl RowSource for MemorySource {
    fn load(self, options: &FormatOptions) -> Result<LoadedRows, FormatError> {
        let single_byte = options.force_single_byte;
        let mut stats = ColumnStats::new();
        let mut rows = RowStore::new();

        for record in &self.records {
            if record.len() > options.max_columns {
                return Err(FormatError::TooManyColumns {
                    limit: options.max_columns,
                });
            }

            // same rule as a blank input line: no bytes, no row
            if record.iter().any(|field| !field.is_empty()) {
                let fields: Vec<&[u8]> = record.iter().map(Vec::as_slice).collect();
                let multiline = stats.observe_fields(&fields, single_byte);
                rows.push(Row::from_slices(&fields, multiline)?)
                    .map_err(FormatError::oom("import rows"))?;
            }
            stats.end_record();
        }
        // the stream parser also counts its end-of-input boundary
        stats.end_record();

        tracing::debug!(
            rows = rows.len(),
            columns = stats.max_fields(),
            "loaded in-memory rows"
        );

        let profile = TableProfile::build(&rows, &stats);
        Ok(LoadedRows { rows, profile })
    }
}
