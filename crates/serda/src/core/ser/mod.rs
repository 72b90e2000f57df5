// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! CDR serialization helpers shared by the serdata codecs.

pub mod cursor;

pub use cursor::{Cursor, CursorMut};

use crate::config::{CDR_BE, CDR_LE, STRING_ALIGNMENT};
use std::fmt;

/// Byte order of the `uint32` fields inside a CDR stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endianness {
    Little,
    Big,
}

impl Endianness {
    /// Byte order of the host.
    #[cfg(target_endian = "little")]
    pub const NATIVE: Endianness = Endianness::Little;
    #[cfg(target_endian = "big")]
    pub const NATIVE: Endianness = Endianness::Big;

    /// Encapsulation identifier written into `byte1` of the CDR header.
    pub fn encapsulation_id(self) -> u8 {
        match self {
            Endianness::Little => CDR_LE,
            Endianness::Big => CDR_BE,
        }
    }

    /// Parse the 4-byte encapsulation header.
    pub fn from_header(header: [u8; 4]) -> SerResult<Self> {
        match (header[0], header[1]) {
            (0, CDR_LE) => Ok(Endianness::Little),
            (0, CDR_BE) => Ok(Endianness::Big),
            (b0, b1) => Err(SerError::DecoderFailed {
                reason: format!("unsupported encapsulation {:#04x}{:02x}", b0, b1),
            }),
        }
    }
}

/// Padding needed after a CDR string of `len` bytes: 0 when already aligned,
/// else `4 - len % 4`.
#[inline]
pub fn string_padding(len: u32) -> u32 {
    let align = u32::from(STRING_ALIGNMENT);
    if len % align == 0 {
        0
    } else {
        align - len % align
    }
}

/// Serialization error used within core::ser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SerError {
    DecoderFailed { reason: String },
    WriteFailed { offset: usize, reason: String },
    ReadFailed { offset: usize, reason: String },
    InvalidData { reason: String },
}

impl fmt::Display for SerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SerError::DecoderFailed { reason } => write!(f, "decoder failed: {}", reason),
            SerError::WriteFailed { offset, reason } => {
                write!(f, "write failed at offset {}: {}", offset, reason)
            }
            SerError::ReadFailed { offset, reason } => {
                write!(f, "read failed at offset {}: {}", offset, reason)
            }
            SerError::InvalidData { reason } => write!(f, "invalid data: {}", reason),
        }
    }
}

impl std::error::Error for SerError {}

impl From<SerError> for crate::Error {
    fn from(err: SerError) -> Self {
        crate::Error::Malformed(err)
    }
}

pub type SerResult<T> = core::result::Result<T, SerError>;
