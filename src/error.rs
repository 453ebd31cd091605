//! Errors raised while importing and formatting a table
//!
//! Every variant is fatal for the current pass: the core never recovers
//! locally and no partial output is returned. Soft conditions (ragged rows,
//! blank lines, ambiguous headers) are handled by padding or skipping and
//! never surface here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormatError {
    /// Reading the input stream failed
    #[error("cannot read input: {0}")]
    Io(#[from] std::io::Error),

    /// A row has more fields than the configured column ceiling
    #[error("too many columns (limit is {limit})")]
    TooManyColumns { limit: usize },

    /// End of stream arrived in the middle of a multi-byte character
    #[error("unexpected quit, broken unicode char at byte {offset}")]
    BrokenMultibyte { offset: u64 },

    /// A buffer could not grow
    #[error("out of memory while {context}")]
    OutOfMemory { context: &'static str },
}

impl FormatError {
    pub(crate) fn oom(context: &'static str) -> impl FnOnce(std::collections::TryReserveError) -> Self {
        move |_| FormatError::OutOfMemory { context }
    }
}
