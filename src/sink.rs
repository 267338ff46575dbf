//! Fixed-capacity output buffer.
//!
//! Every byte written by an extraction run goes through one `OutputSink`.
//! Fields are copied into a buffer of fixed size which is written out only
//! when completely full, so the destination sees a handful of large writes
//! instead of one per field. A field may straddle a flush: the buffer is
//! filled to the brim, written, and the tail starts the next chunk.

use std::io::Write;

use tracing::trace;

use crate::error::ExtractError;

/// Buffered, comma-joining writer over a single destination.
pub struct OutputSink<W: Write> {
    dest: W,
    buf: Box<[u8]>,
    offset: usize,
    written: u64,
}

impl<W: Write> OutputSink<W> {
    /// Wrap `dest` with a buffer of `capacity` bytes.
    pub fn with_capacity(dest: W, capacity: usize) -> Result<Self, ExtractError> {
        if capacity == 0 {
            return Err(ExtractError::InvalidBufferCapacity);
        }
        Ok(Self {
            dest,
            buf: vec![0; capacity].into_boxed_slice(),
            offset: 0,
            written: 0,
        })
    }

    /// Total buffer size in bytes; also the largest field that can be appended.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Bytes currently held in the buffer.
    pub fn buffered(&self) -> usize {
        self.offset
    }

    /// Bytes handed to the destination so far.
    pub fn bytes_written(&self) -> u64 {
        self.written
    }

    /// Append one field, preceded by a comma when `leading_comma` is set.
    ///
    /// Fails without writing anything if the field plus its comma is larger
    /// than the whole buffer.
    pub fn append_field(&mut self, field: &[u8], leading_comma: bool) -> Result<(), ExtractError> {
        let capacity = self.capacity();
        let total = field.len() + usize::from(leading_comma);
        if total > capacity {
            return Err(ExtractError::FieldTooLarge {
                len: total,
                capacity,
            });
        }

        if self.offset == capacity {
            self.drain()?;
        }

        if leading_comma {
            self.buf[self.offset] = b',';
            self.offset += 1;
        }

        if self.offset + field.len() > capacity {
            let (head, tail) = field.split_at(capacity - self.offset);
            self.buf[self.offset..].copy_from_slice(head);
            self.offset = capacity;
            self.drain()?;
            self.buf[..tail.len()].copy_from_slice(tail);
            self.offset = tail.len();
        } else {
            self.buf[self.offset..self.offset + field.len()].copy_from_slice(field);
            self.offset += field.len();
        }
        Ok(())
    }

    /// Append raw bytes with no separator, e.g. the row terminator.
    pub fn append_literal(&mut self, bytes: &[u8]) -> Result<(), ExtractError> {
        self.append_field(bytes, false)
    }

    /// End the current row.
    pub fn end_row(&mut self) -> Result<(), ExtractError> {
        self.append_literal(b"\n")
    }

    /// Write out whatever is buffered and flush the destination.
    pub fn flush_final(&mut self) -> Result<(), ExtractError> {
        if self.offset > 0 {
            self.drain()?;
        }
        self.dest.flush().map_err(ExtractError::Write)
    }

    /// Give back the destination. Buffered bytes are discarded, so call
    /// `flush_final` first.
    pub fn into_inner(self) -> W {
        self.dest
    }

    fn drain(&mut self) -> Result<(), ExtractError> {
        trace!(bytes = self.offset, "flushing output buffer");
        self.dest
            .write_all(&self.buf[..self.offset])
            .map_err(ExtractError::Write)?;
        self.written += self.offset as u64;
        self.offset = 0;
        Ok(())
    }
}
