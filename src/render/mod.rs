//! Table rendering
//!
//! ```text
//! RowStore + TableProfile + TableLayout
//! └── render_table  -> RenderedTable (LineList, counters)
//!     └── assemble  -> TableMetadata (row roles, headline, column ranges)
//! ```

mod layout;
mod metadata;
mod print_buffer;
mod table;

pub use layout::{BorderStyle, LineStyle, RuleGlyphs, RulePosition, TableLayout};
pub use metadata::{assemble, ColumnRange, HeadlineCode, TableMetadata};
pub use print_buffer::{LineList, PrintBuffer};
pub use table::{render_table, RenderedTable};
