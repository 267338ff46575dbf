//! Comma splitting over a borrowed line.
//!
//! Fields are located with `memchr` and handed out as spans into the line;
//! the line itself is never modified or copied. There is no quoting: every
//! comma is a delimiter.

use memchr::memchr;

/// Field delimiter.
pub const DELIMITER: u8 = b',';

/// Location of one field inside a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpan {
    /// Zero-based column index.
    pub index: usize,
    /// Byte offset of the first byte of the field.
    pub start: usize,
    /// Field length in bytes, excluding the delimiter.
    pub len: usize,
}

impl FieldSpan {
    /// Borrow the field's bytes from the line it was produced from.
    pub fn bytes<'a>(&self, line: &'a [u8]) -> &'a [u8] {
        &line[self.start..self.start + self.len]
    }
}

/// Lazy iterator over the fields of one line.
///
/// A line with `k` delimiters yields exactly `k + 1` fields, so an empty
/// line yields a single empty field.
#[derive(Debug, Clone)]
pub struct RowTokenizer<'a> {
    line: &'a [u8],
    pos: usize,
    index: usize,
    done: bool,
}

impl<'a> RowTokenizer<'a> {
    pub fn new(line: &'a [u8]) -> Self {
        Self {
            line,
            pos: 0,
            index: 0,
            done: false,
        }
    }

    /// Iterate `(index, bytes)` pairs instead of spans.
    pub fn fields(self) -> impl Iterator<Item = (usize, &'a [u8])> {
        let line = self.line;
        self.map(move |span| (span.index, span.bytes(line)))
    }
}

impl Iterator for RowTokenizer<'_> {
    type Item = FieldSpan;

    fn next(&mut self) -> Option<FieldSpan> {
        if self.done {
            return None;
        }

        let rest = &self.line[self.pos..];
        let span = match memchr(DELIMITER, rest) {
            Some(len) => {
                let span = FieldSpan {
                    index: self.index,
                    start: self.pos,
                    len,
                };
                self.pos += len + 1;
                span
            }
            None => {
                self.done = true;
                FieldSpan {
                    index: self.index,
                    start: self.pos,
                    len: rest.len(),
                }
            }
        };
        self.index += 1;
        Some(span)
    }
}
