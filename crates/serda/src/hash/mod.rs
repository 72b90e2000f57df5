// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Identity hashing.
//!
//! - [`mh3`]: fast content hash cached in every datum (dedup, bucket placement)
//! - [`Keyhash`]: 16-byte wire-level instance identity (MD5 for unbounded keys)

pub mod keyhash;
pub mod mh3;

pub use keyhash::{serdata_basehash, Keyhash};
pub use mh3::mh3;
