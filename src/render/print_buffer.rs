//! Growable line buffer feeding the output line list

use bstr::BString;

use crate::csv::BucketList;
use crate::error::FormatError;

const GROW_STEP: usize = 10 * 1024;
const CONTEXT: &str = "serialize csv output";

/// Rendered output, one entry per terminal line
pub type LineList = BucketList<BString>;

/// Accumulates the current output line; each flush appends one line.
#[derive(Debug)]
pub struct PrintBuffer {
    buffer: Vec<u8>,
    lines: LineList,
    flushed_rows: usize,
    maxbytes: usize,
}

impl PrintBuffer {
    pub fn new() -> Result<Self, FormatError> {
        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(GROW_STEP)
            .map_err(FormatError::oom(CONTEXT))?;

        Ok(Self {
            buffer,
            lines: LineList::new(),
            flushed_rows: 0,
            maxbytes: 0,
        })
    }

    fn reserve(&mut self, additional: usize) -> Result<(), FormatError> {
        let free = self.buffer.capacity() - self.buffer.len();
        if free < additional {
            let steps = (additional - free).div_ceil(GROW_STEP);
            self.buffer
                .try_reserve_exact(steps * GROW_STEP + free)
                .map_err(FormatError::oom(CONTEXT))?;
        }
        Ok(())
    }

    pub fn write(&mut self, bytes: &[u8]) -> Result<(), FormatError> {
        self.reserve(bytes.len())?;
        self.buffer.extend_from_slice(bytes);
        Ok(())
    }

    pub fn write_str(&mut self, text: &str) -> Result<(), FormatError> {
        self.write(text.as_bytes())
    }

    pub fn write_repeat(&mut self, count: usize, text: &str) -> Result<(), FormatError> {
        self.reserve(count * text.len())?;
        for _ in 0..count {
            self.buffer.extend_from_slice(text.as_bytes());
        }
        Ok(())
    }

    pub fn put_spaces(&mut self, count: usize) -> Result<(), FormatError> {
        self.reserve(count)?;
        self.buffer.resize(self.buffer.len() + count, b' ');
        Ok(())
    }

    /// Move the current line into the line list.
    pub fn flush_line(&mut self) -> Result<(), FormatError> {
        debug_assert!(!self.buffer.contains(&b'\n'));

        let mut line = Vec::new();
        line.try_reserve_exact(self.buffer.len())
            .map_err(FormatError::oom(CONTEXT))?;
        line.extend_from_slice(&self.buffer);

        self.maxbytes = self.maxbytes.max(line.len());
        self.lines
            .push(BString::from(line))
            .map_err(FormatError::oom(CONTEXT))?;

        self.buffer.clear();
        self.flushed_rows += 1;
        Ok(())
    }

    /// Lines flushed so far
    pub fn flushed_rows(&self) -> usize {
        self.flushed_rows
    }

    /// Byte length of the longest flushed line
    pub fn maxbytes(&self) -> usize {
        self.maxbytes
    }

    pub fn into_lines(self) -> LineList {
        self.lines
    }
}
