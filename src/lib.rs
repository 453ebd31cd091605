//! pretty-csv - CSV import and fixed-width table rendering
//!
//! Reads delimited text (separator auto-detected or configured), stores
//! every record, guesses a header row and column alignment, and renders the
//! rows as a bordered text table together with metadata that tells a pager
//! which lines are borders, header, data and footer.

pub mod cli;
pub mod config;
pub mod config_paths;
pub mod csv;
pub mod error;
pub mod format;
pub mod render;
pub mod source;
pub mod tracing;
pub mod util;

// Re-export commonly used types
pub use config::FormatOptions;
pub use error::FormatError;
pub use format::{format_rows, format_source, read_and_format, read_file_and_format, FormattedTable};
pub use render::{BorderStyle, LineStyle, TableMetadata};
pub use source::{CsvSource, LoadedRows, MemorySource, RowSource};
