//! Streaming CSV parser
//!
//! A single pass over the input bytes with one byte of lookahead:
//! - `"` opens a quoted field, `""` inside it is a literal quote, and any
//!   other byte after a quote closes the field and is reprocessed
//! - leading spaces of a field are skipped, trailing unquoted spaces trimmed
//! - without a configured separator the first `,` `;` or `|` outside quotes
//!   fixes it for the rest of the stream
//! - in multi-byte mode the bytes of a UTF-8 sequence are copied verbatim
//! - blank records are dropped

use std::io::{BufRead, BufReader, ErrorKind, Read};

use super::accumulator::{ColumnStats, FieldBounds, LineAccumulator, DEFAULT_MAX_COLUMNS};
use super::model::{RowStore, Separator};
use crate::error::FormatError;
use crate::util::text::utf8_char_len;

/// Parser settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    pub separator: Separator,
    /// Treat every byte as one character
    pub single_byte: bool,
    pub max_columns: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            separator: Separator::Auto,
            single_byte: false,
            max_columns: DEFAULT_MAX_COLUMNS,
        }
    }
}

/// Everything one parse produces
#[derive(Debug)]
pub struct ParsedCsv {
    pub rows: RowStore,
    pub stats: ColumnStats,
    /// Separator in effect at the end of the stream; `Auto` if none was found
    pub separator: Separator,
}

/// Parse a whole stream into rows plus running column statistics
pub fn parse_csv<R: Read>(input: R, options: &ParseOptions) -> Result<ParsedCsv, FormatError> {
    CsvParser::new(input, options)?.run()
}

/// Byte reader with a single byte of push-back
struct ByteStream<R> {
    reader: BufReader<R>,
    pending: Option<u8>,
    offset: u64,
}

impl<R: Read> ByteStream<R> {
    fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            pending: None,
            offset: 0,
        }
    }

    fn next(&mut self) -> Result<Option<u8>, FormatError> {
        if let Some(byte) = self.pending.take() {
            self.offset += 1;
            return Ok(Some(byte));
        }

        loop {
            match self.reader.fill_buf() {
                Ok([]) => return Ok(None),
                Ok(buf) => {
                    let byte = buf[0];
                    self.reader.consume(1);
                    self.offset += 1;
                    return Ok(Some(byte));
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn unread(&mut self, byte: Option<u8>) {
        if let Some(byte) = byte {
            debug_assert!(self.pending.is_none());
            self.pending = Some(byte);
            self.offset -= 1;
        }
    }
}

pub struct CsvParser<R> {
    input: ByteStream<R>,
    line: LineAccumulator,
    stats: ColumnStats,
    rows: RowStore,
    separator: Option<u8>,
    single_byte: bool,

    in_quotes: bool,
    skip_leading: bool,
    /// Offset of the first byte of the current field
    first_nw: usize,
    /// Offset just past its last significant byte
    last_nw: usize,
}

impl<R: Read> CsvParser<R> {
    pub fn new(input: R, options: &ParseOptions) -> Result<Self, FormatError> {
        Ok(Self {
            input: ByteStream::new(input),
            line: LineAccumulator::new(options.max_columns)?,
            stats: ColumnStats::new(),
            rows: RowStore::new(),
            separator: options.separator.byte(),
            single_byte: options.single_byte,
            in_quotes: false,
            skip_leading: true,
            first_nw: 0,
            last_nw: 0,
        })
    }

    pub fn run(mut self) -> Result<ParsedCsv, FormatError> {
        loop {
            let mut c = self.input.next()?;

            if c == Some(b'\r') && !self.in_quotes {
                match self.input.next()? {
                    Some(b'\n') => c = Some(b'\n'),
                    other => self.input.unread(other),
                }
            }

            match c {
                Some(byte) if byte != b'\n' || self.in_quotes => self.consume(byte)?,
                _ => {
                    self.finish_row()?;
                    if c.is_none() {
                        break;
                    }
                }
            }
        }

        tracing::debug!(
            rows = self.rows.len(),
            columns = self.stats.max_fields(),
            records = self.stats.records_seen(),
            separator = ?self.separator.map(char::from),
            "parsed csv input"
        );

        Ok(ParsedCsv {
            rows: self.rows,
            stats: self.stats,
            separator: self.separator.map_or(Separator::Auto, Separator::Byte),
        })
    }

    fn consume(&mut self, byte: u8) -> Result<(), FormatError> {
        if self.skip_leading {
            if byte == b' ' {
                return Ok(());
            }
            self.skip_leading = false;
            self.last_nw = self.first_nw;
        }

        if byte == b'"' {
            if self.in_quotes {
                match self.input.next()? {
                    Some(b'"') => self.line.push(b'"')?,
                    other => {
                        self.input.unread(other);
                        self.in_quotes = false;
                    }
                }
            } else {
                self.in_quotes = true;
            }
        } else {
            self.line.push(byte)?;
        }

        if self.separator.is_none() && !self.in_quotes && Separator::CANDIDATES.contains(&byte) {
            tracing::debug!(separator = %char::from(byte), "detected separator");
            self.separator = Some(byte);
        }

        if self.separator == Some(byte) && !self.in_quotes {
            self.close_field()?;
            self.skip_leading = true;
            self.first_nw = self.line.len();
        } else if self.in_quotes || byte != b' ' {
            self.last_nw = self.line.len();
        }

        if !self.single_byte {
            let len = utf8_char_len(byte);
            if len > 1 {
                for _ in 1..len {
                    match self.input.next()? {
                        Some(next) => self.line.push(next)?,
                        None => {
                            return Err(FormatError::BrokenMultibyte {
                                offset: self.input.offset,
                            })
                        }
                    }
                }
                self.last_nw = self.line.len();
            }
        }

        Ok(())
    }

    fn close_field(&mut self) -> Result<(), FormatError> {
        let bounds = if self.skip_leading {
            FieldBounds::ABSENT
        } else {
            FieldBounds {
                start: Some(self.first_nw),
                len: self.last_nw - self.first_nw,
            }
        };
        self.line.close_field(bounds)
    }

    fn finish_row(&mut self) -> Result<(), FormatError> {
        self.close_field()?;

        if let Some(row) = self.line.take_row(&mut self.stats, self.single_byte)? {
            self.rows
                .push(row)
                .map_err(FormatError::oom("import csv data"))?;
        }
        self.stats.end_record();

        self.in_quotes = false;
        self.skip_leading = true;
        self.first_nw = 0;
        self.last_nw = 0;
        Ok(())
    }
}
