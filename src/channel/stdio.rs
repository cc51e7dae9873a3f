//! [`LineChannel`] over any buffered reader and writer pair.

use std::io::{BufRead, Write};

use super::LineChannel;
use crate::{AppError, Result};

/// Line channel backed by a reader and a writer, typically stdin/stdout.
#[derive(Debug)]
pub struct StdioChannel<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> StdioChannel<R, W> {
    /// Wrap a reader and writer.
    #[must_use]
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Consume the channel, returning the writer.
    #[must_use]
    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<R: BufRead, W: Write> LineChannel for StdioChannel<R, W> {
    fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        let read = self
            .reader
            .read_line(&mut line)
            .map_err(|err| AppError::Channel(format!("read failed: {err}")))?;
        if read == 0 {
            return Err(AppError::EndOfInput);
        }

        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(line)
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.writer, "{line}")
            .and_then(|()| self.writer.flush())
            .map_err(|err| AppError::Channel(format!("write failed: {err}")))
    }
}
