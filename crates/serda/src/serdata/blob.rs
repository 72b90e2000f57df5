// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Opaque blobs: the payload is an uninterpreted byte sequence.
//!
//! There is no key. Every blob compares equal-by-key to every other blob and
//! carries the topic basehash as its content hash, so all samples of a blob
//! topic belong to one instance. This is a deliberate placeholder policy, not
//! an identity scheme.
//!
//! The wire form is the raw payload: no header, no length prefix, no padding.

use super::{assert_no_arena, assert_whole_range, Serdata, SerdataCommon, SerdataKind, WireRef};
use crate::core::ser::SerError;
use crate::core::types::{FreeOp, Sertopic, SertopicOps};
use crate::hash::Keyhash;
use crate::{Error, Result};
use std::fmt;
use std::sync::Arc;

/// Descriptor operations for blob topics.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlobTopic;

impl SertopicOps for BlobTopic {
    type Sample = Vec<u8>;
    const SERDATA_OPS_NAME: &'static str = "serda::blob";
    const TOPICKIND_NO_KEY: bool = true;

    fn equal(&self, _other: &Self) -> bool {
        true
    }

    fn hash(&self) -> u32 {
        0
    }

    fn zero_samples(&self, _samples: &mut [Vec<u8>]) {
        // Nothing relies on zeroed blob samples.
    }

    fn realloc_samples(&self, _old: Vec<Vec<u8>>, count: usize) -> Vec<Vec<u8>> {
        panic!(
            "realloc_samples({}): not supported for blob topics (no loans, dispose by handle or content filters)",
            count
        );
    }

    fn free_samples(&self, _samples: &mut Vec<Vec<u8>>, _count: usize, op: FreeOp) {
        assert!(
            !op.contains(FreeOp::ALL_BIT),
            "free_samples: blob topics never release the sample array"
        );
    }
}

/// Serialized opaque payload.
#[derive(Debug)]
pub struct BlobDatum {
    common: SerdataCommon<BlobTopic>,
    size: u32,
    payload: Option<Box<[u8]>>,
}

impl BlobDatum {
    fn build(
        topic: &Arc<Sertopic<BlobTopic>>,
        kind: SerdataKind,
        payload: Option<Box<[u8]>>,
    ) -> Result<Self> {
        // Invariant: payload present iff DATA with a non-empty body.
        let payload = payload.filter(|p| kind == SerdataKind::Data && !p.is_empty());
        let len = payload.as_ref().map_or(0, |p| p.len());
        let size = u32::try_from(len).map_err(|_| {
            Error::Malformed(SerError::InvalidData {
                reason: format!("blob of {} bytes exceeds the u32 size limit", len),
            })
        })?;
        Ok(Self {
            common: SerdataCommon::new(
                Some(Arc::clone(topic)),
                kind,
                topic.serdata_basehash(),
            ),
            size,
            payload,
        })
    }

    /// Payload bytes; empty for EMPTY and KEY datums.
    pub fn payload(&self) -> &[u8] {
        self.payload.as_deref().unwrap_or(&[])
    }
}

impl Serdata for BlobDatum {
    type Topic = BlobTopic;

    fn common(&self) -> &SerdataCommon<BlobTopic> {
        &self.common
    }

    fn common_mut(&mut self) -> &mut SerdataCommon<BlobTopic> {
        &mut self.common
    }

    fn size(&self) -> u32 {
        self.size
    }

    fn eqkey(&self, _other: &Self) -> bool {
        true
    }

    fn from_ser_iov(
        topic: &Arc<Sertopic<BlobTopic>>,
        kind: SerdataKind,
        iov: &[&[u8]],
        size: usize,
    ) -> Result<Self> {
        log::trace!(
            "[blob] from_ser_iov topic={} kind={:?} fragments={} size={}",
            topic.name(),
            kind,
            iov.len(),
            size
        );
        let payload = match kind {
            SerdataKind::Data => {
                let mut payload = vec![0u8; size];
                let mut offset = 0usize;
                for fragment in iov {
                    let end = offset + fragment.len();
                    assert!(
                        end <= size,
                        "from_ser_iov: fragments total at least {} bytes, exceeding the declared size {}",
                        end,
                        size
                    );
                    payload[offset..end].copy_from_slice(fragment);
                    offset = end;
                }
                Some(payload.into_boxed_slice())
            }
            SerdataKind::Empty | SerdataKind::Key => None,
        };
        Self::build(topic, kind, payload)
    }

    fn from_keyhash(topic: &Arc<Sertopic<BlobTopic>>, _keyhash: &Keyhash) -> Option<Self> {
        log::debug!("[blob] topic={} is keyless, no datum from keyhash", topic.name());
        None
    }

    fn from_sample(
        topic: &Arc<Sertopic<BlobTopic>>,
        kind: SerdataKind,
        sample: &Vec<u8>,
    ) -> Result<Self> {
        let payload = (kind == SerdataKind::Data).then(|| sample.clone().into_boxed_slice());
        Self::build(topic, kind, payload)
    }

    fn to_ser_ref(&self, off: usize, len: usize) -> Result<WireRef<'_>> {
        assert_whole_range(off, len, self.size);
        Ok(WireRef::borrowed(self.payload()))
    }

    fn to_sample(&self, sample: &mut Vec<u8>, arena: Option<&mut [u8]>) {
        assert_no_arena("to_sample", arena);
        sample.clear();
        sample.extend_from_slice(self.payload());
    }

    fn to_topicless(this: &Arc<Self>) -> Arc<Self> {
        // Blobs have no key to reduce to.
        Arc::clone(this)
    }

    fn topicless_to_sample(
        &self,
        _topic: &Sertopic<BlobTopic>,
        _sample: &mut Vec<u8>,
        arena: Option<&mut [u8]>,
    ) {
        assert_no_arena("topicless_to_sample", arena);
    }

    fn get_keyhash(&self, _force_md5: bool) -> Keyhash {
        Keyhash::zero()
    }
}

impl fmt::Display for BlobDatum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.payload().iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}
