// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # Serialized samples
//!
//! A *datum* is the runtime form of one sample, independent of whether it was
//! decoded from the wire or encoded from an application sample. The
//! middleware moves datums around without knowing the sample type; it only
//! talks to them through the [`Serdata`] capability set.
//!
//! ## Data flow
//!
//! ```text
//!  send:    Sample --from_sample--> Datum --to_ser / to_ser_ref--> wire bytes
//!  receive: wire bytes --from_ser / from_ser_iov--> Datum --to_sample--> Sample
//!  dispose: Datum --to_topicless--> key-only Datum --get_keyhash--> Keyhash
//! ```
//!
//! ## Variants
//!
//! | Type | Key | Wire format |
//! |------|-----|-------------|
//! | [`BlobDatum`] | none (equal-by-key always true) | raw payload |
//! | [`KeyValueDatum`] | `key` string | CDR header + two padded CDR strings |
//!
//! Datums are shared through `Arc`: the last reference dropped releases the
//! owned buffers.

pub mod blob;
pub mod keyvalue;

pub use blob::{BlobDatum, BlobTopic};
pub use keyvalue::{KeyValueDatum, KeyValueSample, KeyValueTopic};

use crate::config::TIMESTAMP_INVALID_NANOS;
use crate::core::types::{Sertopic, SertopicOps};
use crate::hash::Keyhash;
use crate::{Error, Result};
use std::borrow::Cow;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// What a datum carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SerdataKind {
    /// No payload at all.
    Empty,
    /// Full sample.
    Data,
    /// Key fields only (dispose/unregister).
    Key,
}

/// Source timestamp in nanoseconds since the epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(i64);

impl Timestamp {
    pub const INVALID: Timestamp = Timestamp(TIMESTAMP_INVALID_NANOS);

    pub const fn from_nanos(nanos: i64) -> Self {
        Self(nanos)
    }

    pub const fn as_nanos(self) -> i64 {
        self.0
    }

    pub const fn is_valid(self) -> bool {
        self.0 != TIMESTAMP_INVALID_NANOS
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::INVALID
    }
}

/// Fields every datum carries regardless of its variant.
pub struct SerdataCommon<T: SertopicOps> {
    topic: Option<Arc<Sertopic<T>>>,
    kind: SerdataKind,
    hash: u32,
    timestamp: Timestamp,
}

impl<T: SertopicOps> SerdataCommon<T> {
    pub(crate) fn new(topic: Option<Arc<Sertopic<T>>>, kind: SerdataKind, hash: u32) -> Self {
        Self {
            topic,
            kind,
            hash,
            timestamp: Timestamp::INVALID,
        }
    }

    pub fn topic(&self) -> Option<&Arc<Sertopic<T>>> {
        self.topic.as_ref()
    }

    pub fn kind(&self) -> SerdataKind {
        self.kind
    }

    pub fn hash(&self) -> u32 {
        self.hash
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}

impl<T: SertopicOps> fmt::Debug for SerdataCommon<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerdataCommon")
            .field("topic", &self.topic.as_ref().map(|tp| tp.name()))
            .field("kind", &self.kind)
            .field("hash", &format_args!("{:#010x}", self.hash))
            .field("timestamp", &self.timestamp)
            .finish()
    }
}

/// One fragment of a received sample (`nn_rdata`): the payload bytes plus a
/// link to the next fragment, if any.
#[derive(Debug, Clone, Copy)]
pub struct FragChain<'a> {
    payload: &'a [u8],
    next: Option<&'a FragChain<'a>>,
}

impl<'a> FragChain<'a> {
    pub fn new(payload: &'a [u8]) -> Self {
        Self {
            payload,
            next: None,
        }
    }

    pub fn with_next(payload: &'a [u8], next: &'a FragChain<'a>) -> Self {
        Self {
            payload,
            next: Some(next),
        }
    }

    pub fn payload(&self) -> &'a [u8] {
        self.payload
    }

    pub fn next(&self) -> Option<&'a FragChain<'a>> {
        self.next
    }
}

/// Serialized bytes handed out by [`Serdata::to_ser_ref`].
///
/// The holder owns the reference until it is passed back to
/// [`Serdata::to_ser_unref`]. Dropping it releases the bytes as well.
#[must_use = "a WireRef must be released with Serdata::to_ser_unref"]
#[derive(Debug)]
pub struct WireRef<'a> {
    bytes: Cow<'a, [u8]>,
}

impl<'a> WireRef<'a> {
    pub(crate) fn owned(bytes: Vec<u8>) -> Self {
        Self {
            bytes: Cow::Owned(bytes),
        }
    }

    pub(crate) fn borrowed(bytes: &'a [u8]) -> Self {
        Self {
            bytes: Cow::Borrowed(bytes),
        }
    }

    /// True when the bytes were produced for this reference rather than lent
    /// from the datum's own storage.
    pub fn is_owned(&self) -> bool {
        matches!(self.bytes, Cow::Owned(_))
    }
}

impl Deref for WireRef<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.bytes
    }
}

/// Sample type associated with a datum type.
pub type SampleOf<D> = <<D as Serdata>::Topic as SertopicOps>::Sample;

/// Capability set of a serialized sample.
///
/// Operations the contract declares unsupported (partial ranges,
/// scatter/gather into a caller arena, multi-fragment input where a single
/// fragment is assumed) panic: they are programming errors, not runtime
/// conditions.
pub trait Serdata: Sized + Send + Sync + fmt::Display + 'static {
    /// Descriptor operations of the topic this datum belongs to.
    type Topic: SertopicOps;

    fn common(&self) -> &SerdataCommon<Self::Topic>;

    fn common_mut(&mut self) -> &mut SerdataCommon<Self::Topic>;

    fn kind(&self) -> SerdataKind {
        self.common().kind()
    }

    /// Cached content hash.
    fn hash(&self) -> u32 {
        self.common().hash()
    }

    fn timestamp(&self) -> Timestamp {
        self.common().timestamp()
    }

    /// Topic the datum was built for; `None` for topicless datums.
    fn topic(&self) -> Option<&Arc<Sertopic<Self::Topic>>> {
        self.common().topic()
    }

    /// Stamp the source timestamp before the datum is shared.
    fn with_timestamp(mut self, timestamp: Timestamp) -> Self {
        self.common_mut().timestamp = timestamp;
        self
    }

    /// Serialized size in bytes.
    fn size(&self) -> u32;

    /// Equal-by-key.
    fn eqkey(&self, other: &Self) -> bool;

    /// Build from a received fragment chain. Only single-fragment chains are
    /// supported.
    fn from_ser(
        topic: &Arc<Sertopic<Self::Topic>>,
        kind: SerdataKind,
        fragchain: &FragChain<'_>,
        size: usize,
    ) -> Result<Self> {
        assert!(
            fragchain.next().is_none(),
            "from_ser: fragmented samples are not supported"
        );
        Self::from_ser_iov(topic, kind, &[fragchain.payload()], size)
    }

    /// Build from an ordered list of byte ranges totalling at most `size`.
    fn from_ser_iov(
        topic: &Arc<Sertopic<Self::Topic>>,
        kind: SerdataKind,
        iov: &[&[u8]],
        size: usize,
    ) -> Result<Self>;

    /// Rebuild a key datum from a keyhash; `None` when the keyhash cannot be
    /// inverted.
    fn from_keyhash(topic: &Arc<Sertopic<Self::Topic>>, keyhash: &Keyhash) -> Option<Self>;

    /// Build from an application sample. The sample is copied, never retained.
    fn from_sample(
        topic: &Arc<Sertopic<Self::Topic>>,
        kind: SerdataKind,
        sample: &SampleOf<Self>,
    ) -> Result<Self>;

    /// Serialized bytes `[off, off + len)`. Only the whole datum is supported.
    fn to_ser_ref(&self, off: usize, len: usize) -> Result<WireRef<'_>>;

    /// Release a reference obtained from [`Serdata::to_ser_ref`].
    fn to_ser_unref(&self, wire: WireRef<'_>) {
        drop(wire);
    }

    /// Copy serialized bytes `[off, off + len)` into `buf`.
    fn to_ser(&self, off: usize, len: usize, buf: &mut [u8]) -> Result<()> {
        let wire = self.to_ser_ref(off, len)?;
        if buf.len() < wire.len() {
            let err = Error::BufferTooSmall {
                needed: wire.len(),
                available: buf.len(),
            };
            self.to_ser_unref(wire);
            return Err(err);
        }
        buf[..wire.len()].copy_from_slice(&wire);
        self.to_ser_unref(wire);
        Ok(())
    }

    /// Fill `sample`, reusing its buffers. `arena` (scatter/gather into a
    /// caller-bounded buffer) is not supported.
    fn to_sample(&self, sample: &mut SampleOf<Self>, arena: Option<&mut [u8]>);

    /// Key-only projection.
    fn to_topicless(this: &Arc<Self>) -> Arc<Self>;

    /// Fill only the key fields of `sample` from a topicless datum.
    fn topicless_to_sample(
        &self,
        topic: &Sertopic<Self::Topic>,
        sample: &mut SampleOf<Self>,
        arena: Option<&mut [u8]>,
    );

    /// Human-readable form, bounded by `buf` (see [`print_bounded`]).
    fn print(&self, _topic: Option<&Sertopic<Self::Topic>>, buf: &mut [u8]) -> usize {
        print_bounded(&self.to_string(), buf)
    }

    /// Wire-level instance identity.
    fn get_keyhash(&self, force_md5: bool) -> Keyhash;
}

/// Copy `text` into `buf` with `snprintf` semantics: at most `buf.len() - 1`
/// bytes followed by a NUL. Returns the untruncated length, capped to
/// `buf.len()`.
pub fn print_bounded(text: &str, buf: &mut [u8]) -> usize {
    if let Some(room) = buf.len().checked_sub(1) {
        let n = text.len().min(room);
        buf[..n].copy_from_slice(&text.as_bytes()[..n]);
        buf[n] = 0;
    }
    text.len().min(buf.len())
}

pub(crate) fn assert_whole_range(off: usize, len: usize, size: u32) {
    assert!(
        off == 0 && len == size as usize,
        "to_ser: partial serialization [{}, +{}) of a {}-byte datum is not supported",
        off,
        len,
        size
    );
}

pub(crate) fn assert_no_arena(op: &str, arena: Option<&mut [u8]>) {
    assert!(
        arena.is_none(),
        "{}: scatter/gather into a caller buffer is not supported",
        op
    );
}
