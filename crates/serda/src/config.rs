// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Wire-format constants - single source of truth.
//!
//! Every size, identifier and alignment used by the codecs lives here.
//! **NEVER hardcode them elsewhere!**

// =======================================================================
// CDR encapsulation header (DDS-RTPS Sec.10.2)
// =======================================================================

/// Size of the encapsulation header preceding key/value payloads.
pub const CDR_HEADER_SIZE: usize = 4;

/// Encapsulation identifier for plain CDR, big-endian (`byte1` of the header).
pub const CDR_BE: u8 = 0x00;

/// Encapsulation identifier for plain CDR, little-endian (`byte1` of the header).
pub const CDR_LE: u8 = 0x01;

/// Encapsulation identifier matching the host byte order.
#[cfg(target_endian = "little")]
pub const CDR_NATIVE: u8 = CDR_LE;
#[cfg(target_endian = "big")]
pub const CDR_NATIVE: u8 = CDR_BE;

// =======================================================================
// CDR strings
// =======================================================================

/// Size of the `uint32` length prefix in front of every CDR string.
pub const STRING_LENGTH_PREFIX: usize = 4;

/// Alignment a CDR string field is padded to.
pub const STRING_ALIGNMENT: u8 = 4;

// =======================================================================
// Instance identity
// =======================================================================

/// Size of an RTPS keyhash (`KeyHash_t`, DDS-RTPS Sec.9.6.3.8).
pub const KEYHASH_SIZE: usize = 16;

/// Seed for the MurmurHash3 content hash.
pub const CONTENT_HASH_SEED: u32 = 0;

/// Source timestamp value meaning "not set".
pub const TIMESTAMP_INVALID_NANOS: i64 = i64::MIN;
