//! Row storage types
//!
//! A row is one immutable byte block plus `(offset, length)` slices into it,
//! so a record costs one text allocation regardless of its field count.

use std::fmt;
use std::str::FromStr;

use bstr::BStr;
use serde::{Deserialize, Serialize};

use super::bucket::BucketList;
use crate::error::FormatError;

/// Field separator: fixed, or fixed by the first `,` `;` `|` seen outside quotes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Separator {
    #[default]
    Auto,
    Byte(u8),
}

impl Separator {
    /// Bytes that auto-detection accepts as a separator
    pub const CANDIDATES: [u8; 3] = [b',', b';', b'|'];

    /// Separator implied by a file extension, `Auto` when unknown
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "tsv" | "tab" => Separator::Byte(b'\t'),
            "psv" => Separator::Byte(b'|'),
            "csv" => Separator::Byte(b','),
            _ => Separator::Auto,
        }
    }

    pub fn byte(self) -> Option<u8> {
        match self {
            Separator::Auto => None,
            Separator::Byte(b) => Some(b),
        }
    }
}

impl FromStr for Separator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" | "" => Ok(Separator::Auto),
            "tab" | "\\t" | "\t" => Ok(Separator::Byte(b'\t')),
            _ => match s.as_bytes() {
                [b] if b.is_ascii() && *b != b'"' && *b != b'\n' => Ok(Separator::Byte(*b)),
                _ => Err(format!(
                    "invalid separator '{}': expected 'auto', 'tab' or one ASCII character",
                    s
                )),
            },
        }
    }
}

impl fmt::Display for Separator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Separator::Auto => write!(f, "auto"),
            Separator::Byte(b'\t') => write!(f, "tab"),
            Separator::Byte(b) => write!(f, "{}", *b as char),
        }
    }
}

impl TryFrom<String> for Separator {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Separator> for String {
    fn from(value: Separator) -> Self {
        value.to_string()
    }
}

/// Alignment class inferred for a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Right aligned
    Numeric,
    /// Left aligned
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FieldSpan {
    start: usize,
    len: usize,
}

/// One parsed record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    data: Box<[u8]>,
    spans: Box<[FieldSpan]>,
    multiline: bool,
}

impl Row {
    /// Copy `fields` into a single freshly allocated block.
    pub fn from_slices(fields: &[&[u8]], multiline: bool) -> Result<Self, FormatError> {
        let size: usize = fields.iter().map(|f| f.len()).sum();

        let mut data = Vec::new();
        data.try_reserve_exact(size)
            .map_err(FormatError::oom("import csv data"))?;
        let mut spans = Vec::new();
        spans
            .try_reserve_exact(fields.len())
            .map_err(FormatError::oom("import csv data"))?;

        for field in fields {
            spans.push(FieldSpan {
                start: data.len(),
                len: field.len(),
            });
            data.extend_from_slice(field);
        }

        Ok(Self {
            data: data.into_boxed_slice(),
            spans: spans.into_boxed_slice(),
            multiline,
        })
    }

    pub fn field_count(&self) -> usize {
        self.spans.len()
    }

    pub fn field(&self, index: usize) -> Option<&BStr> {
        self.spans
            .get(index)
            .map(|span| BStr::new(&self.data[span.start..span.start + span.len]))
    }

    pub fn fields(&self) -> impl Iterator<Item = &BStr> + '_ {
        self.spans
            .iter()
            .map(|span| BStr::new(&self.data[span.start..span.start + span.len]))
    }

    /// Some field of this row contains an embedded line break
    pub fn is_multiline(&self) -> bool {
        self.multiline
    }

    /// Total bytes of field text
    pub fn byte_len(&self) -> usize {
        self.data.len()
    }
}

/// Bucketed list of rows; appending never moves earlier rows
pub type RowStore = BucketList<Row>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_slices_share_one_block() {
        let row = Row::from_slices(&[b"alpha".as_slice(), b"", b"gamma"], false).unwrap();

        assert_eq!(row.field_count(), 3);
        assert_eq!(row.field(0).unwrap(), "alpha");
        assert_eq!(row.field(1).unwrap(), "");
        assert_eq!(row.field(2).unwrap(), "gamma");
        assert_eq!(row.field(3), None);
        assert_eq!(row.byte_len(), 10);
        assert!(!row.is_multiline());
    }

    #[test]
    fn test_separator_parse() {
        assert_eq!("auto".parse::<Separator>(), Ok(Separator::Auto));
        assert_eq!(";".parse::<Separator>(), Ok(Separator::Byte(b';')));
        assert_eq!("tab".parse::<Separator>(), Ok(Separator::Byte(b'\t')));
        assert_eq!("\\t".parse::<Separator>(), Ok(Separator::Byte(b'\t')));
        assert!("ab".parse::<Separator>().is_err());
        assert!("\"".parse::<Separator>().is_err());
    }

    #[test]
    fn test_separator_display_roundtrips() {
        for sep in [Separator::Auto, Separator::Byte(b'\t'), Separator::Byte(b'|')] {
            assert_eq!(sep.to_string().parse::<Separator>(), Ok(sep));
        }
    }

    #[test]
    fn test_separator_from_extension() {
        assert_eq!(Separator::from_extension("TSV"), Separator::Byte(b'\t'));
        assert_eq!(Separator::from_extension("psv"), Separator::Byte(b'|'));
        assert_eq!(Separator::from_extension("csv"), Separator::Byte(b','));
        assert_eq!(Separator::from_extension("txt"), Separator::Auto);
    }
}
