//! CSV import
//!
//! Turns a delimited byte stream into stored rows and a column profile:
//!
//! ```text
//! input bytes
//! └── CsvParser
//!     ├── LineAccumulator (current row bytes, field bounds)
//!     ├── ColumnStats     (digits, widths, multi-line flags; whole parse)
//!     └── RowStore        (bucketed immutable rows)
//!             └── TableProfile (widths, types, header decision)
//! ```

mod accumulator;
mod bucket;
mod model;
mod parser;
mod profile;

pub use accumulator::{
    ColumnStat, ColumnStats, FieldBounds, LineAccumulator, DEFAULT_MAX_COLUMNS,
};
pub use bucket::{BucketList, BUCKET_CAPACITY};
pub use model::{ColumnType, Row, RowStore, Separator};
pub use parser::{parse_csv, CsvParser, ParseOptions, ParsedCsv};
pub use profile::{detect_header, infer_type, ColumnProfile, TableProfile};
