//! Column profile: width, multi-line flag and alignment type per column
//!
//! Built once after every row is stored. Header detection and type
//! inference are heuristics; they never fail.

use bstr::BStr;

use super::accumulator::{ColumnStat, ColumnStats};
use super::model::{ColumnType, RowStore};

/// Rendering parameters of one column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnProfile {
    pub width: usize,
    pub multiline: bool,
    pub kind: ColumnType,
}

impl ColumnProfile {
    pub fn is_numeric(&self) -> bool {
        self.kind == ColumnType::Numeric
    }
}

/// Profile of every column plus the header decision
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableProfile {
    columns: Vec<ColumnProfile>,
    has_header: bool,
}

impl TableProfile {
    /// Profile supplied directly by an external row producer
    pub fn new(columns: Vec<ColumnProfile>, has_header: bool) -> Self {
        Self {
            columns,
            has_header,
        }
    }

    /// Derive the profile from stored rows and the statistics gathered while
    /// storing them.
    pub fn build(rows: &RowStore, stats: &ColumnStats) -> Self {
        let has_header = detect_header(rows);
        let records_seen = stats.records_seen();

        let columns: Vec<ColumnProfile> = stats
            .columns()
            .iter()
            .map(|stat| ColumnProfile {
                width: stat.width,
                multiline: stat.multiline,
                kind: infer_type(stat, records_seen),
            })
            .collect();

        tracing::debug!(
            columns = columns.len(),
            has_header,
            numeric = columns.iter().filter(|c| c.is_numeric()).count(),
            "built column profile"
        );

        Self {
            columns,
            has_header,
        }
    }

    pub fn columns(&self) -> &[ColumnProfile] {
        &self.columns
    }

    pub fn column(&self, index: usize) -> Option<&ColumnProfile> {
        self.columns.get(index)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn has_header(&self) -> bool {
        self.has_header
    }

    pub fn is_last_column_multiline(&self) -> bool {
        self.columns.last().is_some_and(|c| c.multiline)
    }
}

fn starts_with_digit(field: &BStr) -> bool {
    field.first().is_some_and(u8::is_ascii_digit)
}

/// The first row is a header when all its fields are non-empty text and the
/// second row has at least one empty or digit-led field.
pub fn detect_header(rows: &RowStore) -> bool {
    let mut iter = rows.iter();
    let (Some(first), Some(second)) = (iter.next(), iter.next()) else {
        return false;
    };

    first
        .fields()
        .all(|field| !field.is_empty() && !starts_with_digit(field))
        && second
            .fields()
            .any(|field| field.is_empty() || starts_with_digit(field))
}

/// Guess whether a column holds numbers.
///
/// `records_seen` counts every record boundary of the parse, so
/// `records_seen - 1` is the data-row baseline. Blank lines and the final
/// end-of-stream boundary are part of that count.
pub fn infer_type(stat: &ColumnStat, records_seen: usize) -> ColumnType {
    let data_records = records_seen as i64 - 1;

    if (stat.total == 0 && stat.digits > 0) || (stat.first_digit > 0 && data_records == 1) {
        return ColumnType::Numeric;
    }

    let first_digit_ratio = stat.first_digit as f64 / data_records as f64;
    let digit_ratio = stat.digits as f64 / stat.total as f64;

    if first_digit_ratio > 0.8 && digit_ratio > 0.5 {
        ColumnType::Numeric
    } else {
        ColumnType::Text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv::parser::{parse_csv, ParseOptions};

    fn profile(content: &str) -> TableProfile {
        let parsed = parse_csv(content.as_bytes(), &ParseOptions::default()).unwrap();
        TableProfile::build(&parsed.rows, &parsed.stats)
    }

    #[test]
    fn test_header_detected() {
        assert!(profile("name,age\nbob,30\n").has_header());
    }

    #[test]
    fn test_numeric_first_row_is_not_header() {
        assert!(!profile("1,2\n3,4\n").has_header());
    }

    #[test]
    fn test_empty_header_field_is_not_header() {
        assert!(!profile("name,\nbob,30\n").has_header());
    }

    #[test]
    fn test_all_text_second_row_is_not_header() {
        assert!(!profile("name,city\nbob,Prague\n").has_header());
    }

    #[test]
    fn test_empty_field_in_second_row_confirms_header() {
        assert!(profile("name,city\nbob,\n").has_header());
    }

    #[test]
    fn test_single_row_has_no_header() {
        assert!(!profile("name,age\n").has_header());
    }

    #[test]
    fn test_column_types() {
        let p = profile("name,age,joined\nbob,30,2019-01-01\nalice,41,2020-12-31\neve,27,2021-06-15\n");

        assert_eq!(p.column(0).unwrap().kind, ColumnType::Text);
        assert_eq!(p.column(1).unwrap().kind, ColumnType::Numeric);
        assert_eq!(p.column(2).unwrap().kind, ColumnType::Numeric);
    }

    #[test]
    fn test_mostly_numeric_column() {
        // 5 of 6 data records start with a digit; digits dominate the text
        let content = "v\n10\n20\n30\n40\n50\nn/a";
        let p = profile(content);
        assert_eq!(p.column(0).unwrap().kind, ColumnType::Numeric);
    }

    #[test]
    fn test_mixed_column_is_text() {
        let p = profile("v\n10 apples\npears\nplums\n");
        assert_eq!(p.column(0).unwrap().kind, ColumnType::Text);
    }

    #[test]
    fn test_single_data_record_without_trailing_newline() {
        let stat = ColumnStat {
            digits: 2,
            total: 3,
            first_digit: 1,
            width: 5,
            multiline: false,
        };
        assert_eq!(infer_type(&stat, 2), ColumnType::Numeric);
        assert_eq!(infer_type(&stat, 3), ColumnType::Text);
    }

    #[test]
    fn test_widths_and_multiline() {
        let p = profile("a,b\nxyz,\"1\n22\"\n");

        assert_eq!(p.column_count(), 2);
        assert_eq!(p.column(0).unwrap().width, 3);
        assert_eq!(p.column(1).unwrap().width, 2);
        assert!(p.is_last_column_multiline());
    }

    #[test]
    fn test_empty_input() {
        let p = profile("");
        assert_eq!(p.column_count(), 0);
        assert!(!p.has_header());
        assert!(!p.is_last_column_multiline());
    }
}
