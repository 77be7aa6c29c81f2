//! Quote-balance tracking for CSV input.
//!
//! The `csv` reader closes a quoted field that is still open at end of input
//! without reporting it, swallowing every following row into one cell.
//! [`QuoteTracker`] sits between the file and the reader and follows the same
//! quoting rules byte by byte, so the loader can tell afterwards whether the
//! input ended inside a quoted field.

use std::io::{self, Read};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    FieldStart,
    Unquoted,
    Quoted,
    /// A quote seen inside a quoted field: either the closing quote or the
    /// first half of an escaped `""`.
    QuoteInQuoted,
}

/// Wraps a reader and records where the last still-open quoted field began.
#[derive(Debug)]
pub(crate) struct QuoteTracker<R> {
    inner: R,
    state: State,
    line: u64,
    opened_at: u64,
    /// Bytes of a leading byte-order mark consumed so far, `None` once past it.
    bom_matched: Option<usize>,
}

impl<R: Read> QuoteTracker<R> {
    pub(crate) fn new(inner: R) -> Self {
        Self {
            inner,
            state: State::FieldStart,
            line: 1,
            opened_at: 1,
            bom_matched: Some(0),
        }
    }

    /// Line of the quoted field left open at end of input, if any.
    ///
    /// Only meaningful once the wrapped reader has been read to the end.
    pub(crate) fn unterminated_since(&self) -> Option<u64> {
        (self.state == State::Quoted).then_some(self.opened_at)
    }

    fn scan(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            if let Some(matched) = self.bom_matched {
                if UTF8_BOM.get(matched) == Some(&byte) {
                    self.bom_matched = Some(matched + 1);
                    continue;
                }
                self.bom_matched = None;
            }
            let separator = matches!(byte, b',' | b'\n' | b'\r');
            self.state = match (self.state, byte) {
                (State::FieldStart, b'"') => {
                    self.opened_at = self.line;
                    State::Quoted
                }
                (State::FieldStart | State::Unquoted, _) if separator => State::FieldStart,
                (State::FieldStart | State::Unquoted, _) => State::Unquoted,
                (State::Quoted, b'"') => State::QuoteInQuoted,
                (State::Quoted, _) => State::Quoted,
                (State::QuoteInQuoted, b'"') => State::Quoted,
                (State::QuoteInQuoted, _) if separator => State::FieldStart,
                (State::QuoteInQuoted, _) => State::Unquoted,
            };
            if byte == b'\n' {
                self.line += 1;
            }
        }
    }
}

impl<R: Read> Read for QuoteTracker<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let read = self.inner.read(buf)?;
        self.scan(&buf[..read]);
        Ok(read)
    }
}
