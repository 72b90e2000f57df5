// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Key/value records: two unbounded strings, `key` being the instance key.
//!
//! Wire layout (plain CDR, sender byte order):
//!
//! ```text
//! +----+----+----+----+
//! | 00 | E  | 00 | 00 |   encapsulation header, E = 1 little-endian, 0 big-endian
//! +----+----+----+----+
//! | key length (incl. NUL)  |
//! | key bytes ... NUL | pad |   pad to a multiple of 4
//! | value length (incl. NUL)|   \
//! | value bytes ... NUL | pad |  } DATA only
//! +-------------------------+
//! ```

use super::{
    assert_no_arena, assert_whole_range, SampleOf, Serdata, SerdataCommon, SerdataKind, WireRef,
};
use crate::config::{
    CDR_HEADER_SIZE, CDR_NATIVE, CONTENT_HASH_SEED, STRING_ALIGNMENT, STRING_LENGTH_PREFIX,
};
use crate::core::ser::{string_padding, Cursor, CursorMut, Endianness, SerError, SerResult};
use crate::core::types::{FreeOp, Sertopic, SertopicOps};
use crate::hash::{mh3, Keyhash};
use crate::{Error, Result};
use std::ffi::{CStr, CString};
use std::fmt;
use std::sync::Arc;

/// Application-level key/value sample.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyValueSample {
    pub key: String,
    pub value: String,
}

impl KeyValueSample {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Descriptor operations for key/value topics.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyValueTopic;

impl SertopicOps for KeyValueTopic {
    type Sample = KeyValueSample;
    const SERDATA_OPS_NAME: &'static str = "serda::keyvalue";
    const TOPICKIND_NO_KEY: bool = false;

    fn equal(&self, _other: &Self) -> bool {
        // No fields beyond the common ones, which are compared before this.
        true
    }

    fn hash(&self) -> u32 {
        0
    }

    fn zero_samples(&self, samples: &mut [KeyValueSample]) {
        for sample in samples {
            *sample = KeyValueSample::default();
        }
    }

    fn realloc_samples(
        &self,
        mut old: Vec<KeyValueSample>,
        count: usize,
    ) -> Vec<KeyValueSample> {
        if count < old.len() {
            old.truncate(count);
            old.shrink_to_fit();
        } else {
            old.resize_with(count, KeyValueSample::default);
        }
        old
    }

    fn free_samples(&self, samples: &mut Vec<KeyValueSample>, count: usize, op: FreeOp) {
        if count == 0 {
            return;
        }
        for sample in samples.iter_mut().take(count) {
            sample.key = String::new();
            sample.value = String::new();
        }
        if op.contains(FreeOp::ALL_BIT) {
            *samples = Vec::new();
        }
    }
}

/// Serialized key/value sample.
#[derive(Debug)]
pub struct KeyValueDatum {
    common: SerdataCommon<KeyValueTopic>,
    key: CString,
    keysz: u32,
    pad0: u32,
    value: Option<CString>,
    valuesz: u32,
    pad1: u32,
}

fn cdr_string_len(s: &CStr, field: &str) -> Result<u32> {
    u32::try_from(s.to_bytes_with_nul().len())
        .map_err(|_| Error::InvalidSample(format!("{} exceeds the CDR string limit", field)))
}

fn to_cstring(s: &str, field: &str) -> Result<CString> {
    CString::new(s).map_err(|e| {
        Error::InvalidSample(format!(
            "{} contains an interior NUL at byte {}",
            field,
            e.nul_position()
        ))
    })
}

fn read_cdr_string(cursor: &mut Cursor<'_>, field: &str) -> SerResult<(CString, u32)> {
    let offset = cursor.offset();
    let len = cursor.read_u32()?;
    let bytes = cursor.read_bytes(len as usize)?;
    let s = CStr::from_bytes_with_nul(bytes).map_err(|e| SerError::InvalidData {
        reason: format!("{} string at offset {}: {}", field, offset, e),
    })?;
    // Samples hold `String`s: a non-UTF-8 key could not be sent back unchanged.
    s.to_str().map_err(|e| SerError::InvalidData {
        reason: format!("{} string at offset {} is not UTF-8: {}", field, offset, e),
    })?;
    Ok((s.to_owned(), len))
}

// Trailing padding may be left off by senders that end the stream on the
// string itself; tolerate its absence.
fn skip_padding(cursor: &mut Cursor<'_>) -> SerResult<()> {
    if cursor.align(STRING_ALIGNMENT).is_err() {
        cursor.read_bytes(cursor.remaining())?;
    }
    Ok(())
}

fn write_cdr_string(cursor: &mut CursorMut<'_>, s: &CStr, len: u32) -> SerResult<()> {
    cursor.write_u32(len)?;
    cursor.write_bytes(s.to_bytes_with_nul())?;
    cursor.align(STRING_ALIGNMENT)
}

impl KeyValueDatum {
    fn build(
        topic: Option<Arc<Sertopic<KeyValueTopic>>>,
        kind: SerdataKind,
        key: CString,
        keysz: u32,
        value: Option<CString>,
        valuesz: u32,
        basehash: u32,
    ) -> Self {
        let hash = mh3(key.as_bytes_with_nul(), CONTENT_HASH_SEED) ^ basehash;
        let pad0 = string_padding(keysz);
        let (valuesz, pad1) = match value {
            Some(_) => (valuesz, string_padding(valuesz)),
            None => (0, 0),
        };
        Self {
            common: SerdataCommon::new(topic, kind, hash),
            key,
            keysz,
            pad0,
            value,
            valuesz,
            pad1,
        }
    }

    pub fn key(&self) -> &CStr {
        &self.key
    }

    /// Value string; `None` unless the datum is of kind DATA.
    pub fn value(&self) -> Option<&CStr> {
        self.value.as_deref()
    }

    /// Encoded key length, terminator included.
    pub fn key_len(&self) -> u32 {
        self.keysz
    }

    pub fn key_padding(&self) -> u32 {
        self.pad0
    }

    /// Encoded value length, terminator included; 0 when absent.
    pub fn value_len(&self) -> u32 {
        self.valuesz
    }

    pub fn value_padding(&self) -> u32 {
        self.pad1
    }

    fn encode_into(&self, buf: &mut [u8]) -> SerResult<usize> {
        let mut cursor = CursorMut::new(buf, Endianness::NATIVE);
        cursor.write_bytes(&[0, CDR_NATIVE, 0, 0])?;
        write_cdr_string(&mut cursor, &self.key, self.keysz)?;
        if let (SerdataKind::Data, Some(value)) = (self.kind(), self.value.as_deref()) {
            write_cdr_string(&mut cursor, value, self.valuesz)?;
        }
        Ok(cursor.offset())
    }

    fn decode(
        topic: &Arc<Sertopic<KeyValueTopic>>,
        kind: SerdataKind,
        buf: &[u8],
    ) -> SerResult<Self> {
        if buf.len() < CDR_HEADER_SIZE {
            return Err(SerError::ReadFailed {
                offset: 0,
                reason: "missing encapsulation header".into(),
            });
        }
        let endianness = Endianness::from_header([buf[0], buf[1], buf[2], buf[3]])?;
        if endianness != Endianness::NATIVE {
            log::debug!(
                "[keyvalue] topic={} sender is {:?}-endian, swapping lengths",
                topic.name(),
                endianness
            );
        }

        let mut cursor = Cursor::new(&buf[CDR_HEADER_SIZE..], endianness);
        let (key, keysz) = read_cdr_string(&mut cursor, "key")?;
        skip_padding(&mut cursor)?;

        let (value, valuesz) = if kind == SerdataKind::Data {
            let (value, valuesz) = read_cdr_string(&mut cursor, "value")?;
            skip_padding(&mut cursor)?;
            (Some(value), valuesz)
        } else {
            (None, 0)
        };

        Ok(Self::build(
            Some(Arc::clone(topic)),
            kind,
            key,
            keysz,
            value,
            valuesz,
            topic.serdata_basehash(),
        ))
    }
}

impl Serdata for KeyValueDatum {
    type Topic = KeyValueTopic;

    fn common(&self) -> &SerdataCommon<KeyValueTopic> {
        &self.common
    }

    fn common_mut(&mut self) -> &mut SerdataCommon<KeyValueTopic> {
        &mut self.common
    }

    fn size(&self) -> u32 {
        let key = (STRING_LENGTH_PREFIX as u32) + self.keysz + self.pad0;
        let value = if self.kind() == SerdataKind::Data {
            (STRING_LENGTH_PREFIX as u32) + self.valuesz + self.pad1
        } else {
            0
        };
        CDR_HEADER_SIZE as u32 + key + value
    }

    fn eqkey(&self, other: &Self) -> bool {
        self.keysz == other.keysz && self.key.as_bytes() == other.key.as_bytes()
    }

    fn from_ser_iov(
        topic: &Arc<Sertopic<KeyValueTopic>>,
        kind: SerdataKind,
        iov: &[&[u8]],
        size: usize,
    ) -> Result<Self> {
        assert!(
            iov.len() == 1,
            "from_ser_iov: key/value samples must arrive as one fragment, got {}",
            iov.len()
        );
        let buf = &iov[0][..iov[0].len().min(size)];
        let datum = Self::decode(topic, kind, buf)?;
        log::trace!(
            "[keyvalue] from_ser topic={} kind={:?} size={} hash={:#010x}",
            topic.name(),
            kind,
            size,
            datum.hash()
        );
        Ok(datum)
    }

    fn from_keyhash(topic: &Arc<Sertopic<KeyValueTopic>>, keyhash: &Keyhash) -> Option<Self> {
        // Unbounded key: the keyhash is an MD5 digest and cannot be inverted.
        log::debug!(
            "[keyvalue] topic={} cannot rebuild a key from keyhash {}",
            topic.name(),
            keyhash
        );
        None
    }

    fn from_sample(
        topic: &Arc<Sertopic<KeyValueTopic>>,
        kind: SerdataKind,
        sample: &KeyValueSample,
    ) -> Result<Self> {
        let key = to_cstring(&sample.key, "key")?;
        let keysz = cdr_string_len(&key, "key")?;
        let (value, valuesz) = if kind == SerdataKind::Data {
            let value = to_cstring(&sample.value, "value")?;
            let valuesz = cdr_string_len(&value, "value")?;
            (Some(value), valuesz)
        } else {
            (None, 0)
        };
        Ok(Self::build(
            Some(Arc::clone(topic)),
            kind,
            key,
            keysz,
            value,
            valuesz,
            topic.serdata_basehash(),
        ))
    }

    fn to_ser_ref(&self, off: usize, len: usize) -> Result<WireRef<'_>> {
        let size = self.size();
        assert_whole_range(off, len, size);
        let mut bytes = vec![0u8; size as usize];
        let written = self.encode_into(&mut bytes)?;
        debug_assert_eq!(written, bytes.len());
        Ok(WireRef::owned(bytes))
    }

    fn to_ser(&self, off: usize, len: usize, buf: &mut [u8]) -> Result<()> {
        let size = self.size();
        assert_whole_range(off, len, size);
        if buf.len() < size as usize {
            return Err(Error::BufferTooSmall {
                needed: size as usize,
                available: buf.len(),
            });
        }
        self.encode_into(&mut buf[..size as usize])?;
        Ok(())
    }

    fn to_sample(&self, sample: &mut KeyValueSample, arena: Option<&mut [u8]>) {
        assert_no_arena("to_sample", arena);
        sample.key.clear();
        sample.key.push_str(&self.key.to_string_lossy());
        if let (SerdataKind::Data, Some(value)) = (self.kind(), self.value.as_deref()) {
            sample.value.clear();
            sample.value.push_str(&value.to_string_lossy());
        }
    }

    fn to_topicless(this: &Arc<Self>) -> Arc<Self> {
        // No topic, kind KEY, timestamp left undefined.
        Arc::new(Self {
            common: SerdataCommon::new(None, SerdataKind::Key, this.hash()),
            key: this.key.clone(),
            keysz: this.keysz,
            pad0: this.pad0,
            value: None,
            valuesz: 0,
            pad1: 0,
        })
    }

    fn topicless_to_sample(
        &self,
        _topic: &Sertopic<KeyValueTopic>,
        sample: &mut SampleOf<Self>,
        arena: Option<&mut [u8]>,
    ) {
        assert_no_arena("topicless_to_sample", arena);
        sample.key.clear();
        sample.key.push_str(&self.key.to_string_lossy());
    }

    fn get_keyhash(&self, _force_md5: bool) -> Keyhash {
        // Unbounded string key: always MD5.
        Keyhash::md5_of_string_key(self.key.as_bytes_with_nul())
    }
}

impl fmt::Display for KeyValueDatum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind(), self.value.as_deref()) {
            (SerdataKind::Data, Some(value)) => write!(
                f,
                "{} -> {}",
                self.key.to_string_lossy(),
                value.to_string_lossy()
            ),
            _ => write!(f, "{}", self.key.to_string_lossy()),
        }
    }
}
