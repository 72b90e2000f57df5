// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! RTPS keyhash for unbounded keys.
//!
//! The 16-byte `KeyHash_t` cannot hold a variable-length string, so the key
//! is digested: MD5 over the big-endian CDR length followed by the key bytes
//! (terminator included), as DDS-RTPS Sec.9.6.3.8 prescribes.

use crate::config::KEYHASH_SIZE;
use md5::{Digest, Md5};
use std::fmt;

/// Wire-level instance identity.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Keyhash([u8; KEYHASH_SIZE]);

impl Keyhash {
    /// Keyhash of a keyless instance.
    pub const fn zero() -> Self {
        Self([0u8; KEYHASH_SIZE])
    }

    pub const fn from_bytes(bytes: [u8; KEYHASH_SIZE]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; KEYHASH_SIZE] {
        &self.0
    }

    /// Digest a CDR string key. `key` must include its terminating NUL.
    pub fn md5_of_string_key(key: &[u8]) -> Self {
        let len_be = (key.len() as u32).to_be_bytes();
        let mut hasher = Md5::new();
        hasher.update(len_be);
        hasher.update(key);
        let digest = hasher.finalize();
        let mut bytes = [0u8; KEYHASH_SIZE];
        bytes.copy_from_slice(&digest);
        Self(bytes)
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }
}

impl fmt::Debug for Keyhash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keyhash(")?;
        for byte in &self.0[..4] {
            write!(f, "{:02x}", byte)?;
        }
        write!(f, "...)")
    }
}

impl fmt::Display for Keyhash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

/// Per-codec seed XORed into every datum hash.
///
/// Derived from the codec's registered name so that equal keys of unrelated
/// types do not collide in the same bucket.
pub fn serdata_basehash(ops_name: &str) -> u32 {
    let digest = Md5::digest(ops_name.as_bytes());
    u32::from_le_bytes([digest[0], digest[1], digest[2], digest[3]])
}
