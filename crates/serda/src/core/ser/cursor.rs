// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Read/write cursors for CDR buffer manipulation.
//!
//! Both cursors carry the stream's byte order, so a decoder fed by a peer of
//! the opposite endianness swaps the `uint32` fields instead of misreading them.

use super::{Endianness, SerError, SerResult};

/// Generate common cursor methods (offset, remaining, align)
macro_rules! impl_cursor_common {
    ($error_variant:ident, $align_err_msg:expr) => {
        pub fn offset(&self) -> usize {
            self.offset
        }

        pub fn remaining(&self) -> usize {
            self.buffer.len().saturating_sub(self.offset)
        }

        pub fn align(&mut self, alignment: u8) -> SerResult<()> {
            if alignment <= 1 {
                return Ok(());
            }
            let mask = (alignment as usize) - 1;
            let aligned = (self.offset + mask) & !mask;
            if aligned > self.buffer.len() {
                return Err(SerError::$error_variant {
                    offset: aligned,
                    reason: $align_err_msg.into(),
                });
            }
            self.advance_to(aligned);
            Ok(())
        }
    };
}

/// Mutable cursor for writing (bounds-checked)
pub struct CursorMut<'a> {
    buffer: &'a mut [u8],
    offset: usize,
    endianness: Endianness,
}

impl<'a> CursorMut<'a> {
    pub fn new(buffer: &'a mut [u8], endianness: Endianness) -> Self {
        Self {
            buffer,
            offset: 0,
            endianness,
        }
    }

    pub fn write_u32(&mut self, value: u32) -> SerResult<()> {
        let bytes = match self.endianness {
            Endianness::Little => value.to_le_bytes(),
            Endianness::Big => value.to_be_bytes(),
        };
        self.write_bytes(&bytes)
    }

    pub fn write_bytes(&mut self, data: &[u8]) -> SerResult<()> {
        if self.offset + data.len() > self.buffer.len() {
            return Err(SerError::WriteFailed {
                offset: self.offset,
                reason: "buffer too small".into(),
            });
        }
        self.buffer[self.offset..self.offset + data.len()].copy_from_slice(data);
        self.offset += data.len();
        Ok(())
    }

    // Alignment slots are zeroed so stale buffer content never reaches the wire.
    fn advance_to(&mut self, aligned: usize) {
        self.buffer[self.offset..aligned].fill(0);
        self.offset = aligned;
    }

    impl_cursor_common!(WriteFailed, "buffer too small");
}

/// Immutable cursor for reading (bounds-checked, zero-copy)
pub struct Cursor<'a> {
    buffer: &'a [u8],
    offset: usize,
    endianness: Endianness,
}

impl<'a> Cursor<'a> {
    pub fn new(buffer: &'a [u8], endianness: Endianness) -> Self {
        Self {
            buffer,
            offset: 0,
            endianness,
        }
    }

    pub fn read_u32(&mut self) -> SerResult<u32> {
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(self.read_bytes(4)?);
        Ok(match self.endianness {
            Endianness::Little => u32::from_le_bytes(bytes),
            Endianness::Big => u32::from_be_bytes(bytes),
        })
    }

    pub fn read_bytes(&mut self, len: usize) -> SerResult<&'a [u8]> {
        if len > self.remaining() {
            return Err(SerError::ReadFailed {
                offset: self.offset,
                reason: "unexpected end of buffer".into(),
            });
        }
        let slice = &self.buffer[self.offset..self.offset + len];
        self.offset += len;
        Ok(slice)
    }

    fn advance_to(&mut self, aligned: usize) {
        self.offset = aligned;
    }

    impl_cursor_common!(ReadFailed, "unexpected end of buffer");
}
