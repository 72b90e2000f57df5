// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type descriptor (`Sertopic`) and the per-type sample-buffer operations.
//!
//! A `Sertopic` is created once when an application registers a topic with a
//! custom type. It is owned by the topic registry through an `Arc` and every
//! datum built for the topic holds a reference to it.

use crate::hash::{mh3, serdata_basehash};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::BitOr;

/// What `free_samples` must release (DDS `dds_free_op_t`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreeOp(u32);

impl FreeOp {
    pub const KEY_BIT: FreeOp = FreeOp(1);
    pub const CONTENTS_BIT: FreeOp = FreeOp(2);
    pub const ALL_BIT: FreeOp = FreeOp(4);

    /// Release key fields only.
    pub const FREE_KEY: FreeOp = FreeOp(1);
    /// Release every owned field, keep the sample array.
    pub const FREE_CONTENTS: FreeOp = FreeOp(1 | 2);
    /// Release every owned field and the sample array itself.
    pub const FREE_ALL: FreeOp = FreeOp(1 | 2 | 4);

    pub const fn contains(self, other: FreeOp) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn bits(self) -> u32 {
        self.0
    }
}

impl BitOr for FreeOp {
    type Output = FreeOp;

    fn bitor(self, rhs: FreeOp) -> FreeOp {
        FreeOp(self.0 | rhs.0)
    }
}

/// Type-specific half of a topic descriptor.
///
/// Everything that distinguishes one custom type from another lives in the
/// implementor; the common fields (names, basehash) live in [`Sertopic`].
pub trait SertopicOps: Send + Sync + 'static {
    /// Application-level sample type.
    type Sample: Default + Send;

    /// Registered name of the serdata codec, seeds the basehash.
    const SERDATA_OPS_NAME: &'static str;

    /// True when the type only supports the reduced (keyless) lifecycle.
    const TOPICKIND_NO_KEY: bool;

    /// Compare the type-specific fields. Names have already matched.
    fn equal(&self, other: &Self) -> bool;

    /// Hash of the type-specific fields.
    fn hash(&self) -> u32;

    /// Release type-specific state. Runs when the descriptor is dropped.
    fn free(&mut self) {}

    /// Leave `samples` in a state the decoder can overwrite field by field.
    fn zero_samples(&self, samples: &mut [Self::Sample]);

    /// Resize a contiguous sample array to `count` elements.
    fn realloc_samples(&self, old: Vec<Self::Sample>, count: usize) -> Vec<Self::Sample>;

    /// Release owned fields of the first `count` samples; drop the array too
    /// when `op` contains [`FreeOp::ALL_BIT`].
    fn free_samples(&self, samples: &mut Vec<Self::Sample>, count: usize, op: FreeOp);
}

/// Topic descriptor for a custom serdata type.
pub struct Sertopic<T: SertopicOps> {
    name: String,
    type_name: String,
    ops: T,
    topickind_no_key: bool,
    serdata_basehash: u32,
}

impl<T: SertopicOps> Sertopic<T> {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>, ops: T) -> Self {
        let name = name.into();
        let type_name = type_name.into();
        let serdata_basehash = serdata_basehash(T::SERDATA_OPS_NAME);
        log::debug!(
            "[sertopic] init topic={} type={} ops={} no_key={} basehash={:#010x}",
            name,
            type_name,
            T::SERDATA_OPS_NAME,
            T::TOPICKIND_NO_KEY,
            serdata_basehash
        );
        Self {
            name,
            type_name,
            ops,
            topickind_no_key: T::TOPICKIND_NO_KEY,
            serdata_basehash,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn ops(&self) -> &T {
        &self.ops
    }

    pub fn topickind_no_key(&self) -> bool {
        self.topickind_no_key
    }

    pub fn serdata_basehash(&self) -> u32 {
        self.serdata_basehash
    }

    /// Stable 32-bit descriptor hash: common fields combined with the
    /// type-specific [`SertopicOps::hash`].
    pub fn hash32(&self) -> u32 {
        mh3(self.name.as_bytes(), 0) ^ mh3(self.type_name.as_bytes(), 1) ^ self.ops.hash()
    }

    pub fn zero_samples(&self, samples: &mut [T::Sample]) {
        self.ops.zero_samples(samples);
    }

    pub fn realloc_samples(&self, old: Vec<T::Sample>, count: usize) -> Vec<T::Sample> {
        self.ops.realloc_samples(old, count)
    }

    pub fn free_samples(&self, samples: &mut Vec<T::Sample>, count: usize, op: FreeOp) {
        self.ops.free_samples(samples, count, op);
    }
}

impl<T: SertopicOps> PartialEq for Sertopic<T> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.type_name == other.type_name
            && self.topickind_no_key == other.topickind_no_key
            && self.ops.equal(&other.ops)
    }
}

impl<T: SertopicOps> Eq for Sertopic<T> {}

impl<T: SertopicOps> Hash for Sertopic<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(self.hash32());
    }
}

impl<T: SertopicOps> fmt::Debug for Sertopic<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sertopic")
            .field("name", &self.name)
            .field("type_name", &self.type_name)
            .field("ops", &T::SERDATA_OPS_NAME)
            .field("topickind_no_key", &self.topickind_no_key)
            .finish()
    }
}

impl<T: SertopicOps> Drop for Sertopic<T> {
    fn drop(&mut self) {
        log::trace!("[sertopic] free topic={}", self.name);
        self.ops.free();
    }
}
