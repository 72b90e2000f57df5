// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use crate::core::ser::SerError;

/// Errors returned by serda operations.
///
/// Contract violations (partial serialization ranges, scatter/gather into a
/// caller arena, multi-fragment input where one fragment is assumed,
/// fragments overflowing the declared size) are not represented here: they
/// panic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Wire data could not be decoded (truncated, bad header, bad string).
    Malformed(SerError),
    /// Application sample cannot be encoded (e.g. interior NUL in a string).
    InvalidSample(String),
    /// Destination buffer cannot hold the serialized datum.
    BufferTooSmall { needed: usize, available: usize },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Malformed(err) => write!(f, "Malformed serialized data: {}", err),
            Error::InvalidSample(msg) => write!(f, "Invalid sample: {}", msg),
            Error::BufferTooSmall { needed, available } => write!(
                f,
                "Buffer too small for encoding: need {} bytes, have {}",
                needed, available
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Malformed(e) => Some(e),
            _ => None,
        }
    }
}

/// Convenient alias for API results using the public `Error` type.
pub type Result<T> = core::result::Result<T, Error>;
