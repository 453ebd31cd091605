//! Byte accumulator for the row being parsed, and running column statistics
//!
//! The accumulator is reset after every record; the statistics live for the
//! whole parse and feed the column profile once all rows are stored.

use super::model::Row;
use crate::error::FormatError;
use crate::util::text::measure_field;

/// Default ceiling on distinct columns
pub const DEFAULT_MAX_COLUMNS: usize = 1024;

const INITIAL_CAPACITY: usize = 10 * 1024;
const MAX_GROW_STEP: usize = 10 * 1024;

/// Location of one closed field inside the accumulator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldBounds {
    /// `None` when the field held nothing but skipped leading spaces
    pub start: Option<usize>,
    pub len: usize,
}

impl FieldBounds {
    pub const ABSENT: FieldBounds = FieldBounds {
        start: None,
        len: 0,
    };
}

/// Raw bytes and field bounds of the current row
#[derive(Debug)]
pub struct LineAccumulator {
    buffer: Vec<u8>,
    fields: Vec<FieldBounds>,
    max_columns: usize,
}

impl LineAccumulator {
    pub fn new(max_columns: usize) -> Result<Self, FormatError> {
        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(INITIAL_CAPACITY)
            .map_err(FormatError::oom("import csv data"))?;

        Ok(Self {
            buffer,
            fields: Vec::new(),
            max_columns,
        })
    }

    /// Bytes accumulated for the current row
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn push(&mut self, byte: u8) -> Result<(), FormatError> {
        if self.buffer.len() == self.buffer.capacity() {
            // double while small, then grow in fixed steps
            let step = self.buffer.capacity().clamp(1, MAX_GROW_STEP);
            self.buffer
                .try_reserve_exact(step)
                .map_err(FormatError::oom("import csv data"))?;
        }
        self.buffer.push(byte);
        Ok(())
    }

    /// Record a closed field; fails once the column ceiling is exceeded.
    pub fn close_field(&mut self, bounds: FieldBounds) -> Result<(), FormatError> {
        if self.fields.len() >= self.max_columns {
            return Err(FormatError::TooManyColumns {
                limit: self.max_columns,
            });
        }
        self.fields.push(bounds);
        Ok(())
    }

    fn slice(&self, bounds: &FieldBounds) -> &[u8] {
        match bounds.start {
            Some(start) => &self.buffer[start..start + bounds.len],
            None => &[],
        }
    }

    /// Move the accumulated row out as an immutable [`Row`] and update `stats`.
    ///
    /// A row without any accumulated byte is dropped (blank line). The
    /// accumulator is cleared in both cases.
    pub fn take_row(
        &mut self,
        stats: &mut ColumnStats,
        single_byte: bool,
    ) -> Result<Option<Row>, FormatError> {
        if self.buffer.is_empty() {
            self.clear();
            return Ok(None);
        }

        let fields: Vec<&[u8]> = self.fields.iter().map(|f| self.slice(f)).collect();
        let multiline = stats.observe_fields(&fields, single_byte);
        let row = Row::from_slices(&fields, multiline)?;

        self.clear();
        Ok(Some(row))
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.fields.clear();
    }
}

/// Running statistics of one column
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnStat {
    /// Digit characters seen (header record excluded)
    pub digits: u64,
    /// Non-digit, non-structural characters seen (header record excluded)
    pub total: u64,
    /// Records whose field starts with a digit (header record excluded)
    pub first_digit: u64,
    /// Widest display width over all records
    pub width: usize,
    pub multiline: bool,
}

/// Statistics accumulated across every record of one parse
#[derive(Debug, Clone, Default)]
pub struct ColumnStats {
    columns: Vec<ColumnStat>,
    max_fields: usize,
    records_seen: usize,
}

impl ColumnStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one accepted record into the statistics; returns whether any of
    /// its fields spans several lines.
    ///
    /// Type counters skip the very first record boundary, which is the
    /// header candidate.
    pub fn observe_fields(&mut self, fields: &[&[u8]], single_byte: bool) -> bool {
        if fields.len() > self.columns.len() {
            self.columns.resize_with(fields.len(), ColumnStat::default);
        }

        let count_types = self.records_seen > 0;
        let mut multiline = false;

        for (stat, field) in self.columns.iter_mut().zip(fields) {
            let measure = measure_field(field, single_byte);

            if count_types {
                stat.total += measure.total;
                stat.digits += measure.digits;
                if field.first().is_some_and(u8::is_ascii_digit) {
                    stat.first_digit += 1;
                }
            }

            stat.width = stat.width.max(measure.width);
            stat.multiline |= measure.multiline;
            multiline |= measure.multiline;
        }

        self.max_fields = self.max_fields.max(fields.len());
        multiline
    }

    /// Count a record boundary, accepted or blank.
    pub fn end_record(&mut self) {
        self.records_seen += 1;
    }

    pub fn column(&self, index: usize) -> Option<&ColumnStat> {
        self.columns.get(index)
    }

    pub fn columns(&self) -> &[ColumnStat] {
        &self.columns[..self.max_fields]
    }

    /// Widest record seen, in fields
    pub fn max_fields(&self) -> usize {
        self.max_fields
    }

    /// Record boundaries crossed, including blank lines and end of stream
    pub fn records_seen(&self) -> usize {
        self.records_seen
    }
}
