//! Byte cursor threaded through the recursive decoders.

use meterlink_core::{DecodeError, DecodeResult};

/// Position over an immutable byte view.
///
/// A single cursor is passed by mutable borrow through the whole decode call
/// tree (frame header, payload grouping, nested values), so recursive
/// decoding stays composable without shared state.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor at the start of `buf`.
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Create a cursor at offset `pos` into `buf`.
    pub fn with_position(buf: &'a [u8], pos: usize) -> Self {
        Self { buf, pos }
    }

    /// Current offset into the underlying buffer.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left before the end of the buffer.
    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    /// Read the byte at the current position without advancing.
    pub fn peek(&self) -> DecodeResult<u8> {
        self.peek_at(0)
    }

    /// Read the byte `ahead` positions past the cursor without advancing.
    pub fn peek_at(&self, ahead: usize) -> DecodeResult<u8> {
        self.buf
            .get(self.pos + ahead)
            .copied()
            .ok_or(DecodeError::UnexpectedEnd(self.pos + ahead))
    }

    /// Read one byte and advance.
    pub fn read_u8(&mut self) -> DecodeResult<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Ok(byte)
    }

    /// Take `n` bytes and advance past them.
    pub fn take(&mut self, n: usize) -> DecodeResult<&'a [u8]> {
        let end = self
            .pos
            .checked_add(n)
            .ok_or(DecodeError::UnexpectedEnd(self.pos))?;
        if end > self.buf.len() {
            return Err(DecodeError::UnexpectedEnd(self.buf.len()));
        }
        let slice = &self.buf[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    /// Advance past `n` bytes.
    pub fn skip(&mut self, n: usize) -> DecodeResult<()> {
        self.take(n).map(|_| ())
    }
}
