// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::uninlined_format_args)] // Test/bench code readability over pedantic
#![allow(clippy::cast_possible_truncation)] // Test parameters
#![allow(clippy::unreadable_literal)] // Large test constants
#![allow(clippy::doc_markdown)] // Test documentation
#![allow(clippy::missing_panics_doc)] // Tests/examples panic on failure
#![allow(clippy::items_after_statements)] // Test helpers
#![allow(clippy::too_many_lines)] // Example/test code
#![allow(clippy::cast_lossless)] // Test simplicity

/// Byte-exact wire vectors for the key/value and blob variants.
///
/// The key/value vectors are built in the host byte order, matching what the
/// encoder emits; the byte-swapped vectors exercise the receive path of a
/// sender with the opposite order.
use md5::{Digest, Md5};
use serda::config::{CDR_BE, CDR_LE, CDR_NATIVE};
use serda::hash::{mh3, serdata_basehash};
use serda::{
    BlobDatum, BlobTopic, Error, FragChain, KeyValueDatum, KeyValueSample, KeyValueTopic, Serdata,
    SerdataKind, Sertopic,
};
use std::sync::Arc;

const KITCHEN_KEY: &str = "/home/kitchen/sensor";
const KITCHEN_VALUE: &str = "23.0";

fn kv_topic() -> Arc<Sertopic<KeyValueTopic>> {
    Arc::new(Sertopic::new("home", "KeyValue", KeyValueTopic))
}

fn blob_topic() -> Arc<Sertopic<BlobTopic>> {
    Arc::new(Sertopic::new("blobs", "Blob", BlobTopic))
}

/// Encode one CDR string (length incl. NUL, bytes, NUL, zero padding).
fn cdr_string(out: &mut Vec<u8>, s: &str, to_bytes: fn(u32) -> [u8; 4]) {
    let len = s.len() as u32 + 1;
    out.extend_from_slice(&to_bytes(len));
    out.extend_from_slice(s.as_bytes());
    out.push(0);
    let pad = if len % 4 == 0 { 0 } else { 4 - len % 4 };
    out.extend(std::iter::repeat(0u8).take(pad as usize));
}

fn kitchen_wire(encap: u8, to_bytes: fn(u32) -> [u8; 4]) -> Vec<u8> {
    let mut out = vec![0, encap, 0, 0];
    cdr_string(&mut out, KITCHEN_KEY, to_bytes);
    cdr_string(&mut out, KITCHEN_VALUE, to_bytes);
    out
}

fn native_kitchen_wire() -> Vec<u8> {
    kitchen_wire(CDR_NATIVE, u32::to_ne_bytes)
}

#[test]
fn test_kitchen_sample_wire_bytes() {
    let topic = kv_topic();
    let sample = KeyValueSample::new(KITCHEN_KEY, KITCHEN_VALUE);
    let datum = KeyValueDatum::from_sample(&topic, SerdataKind::Data, &sample).expect("encode");

    assert_eq!(datum.size(), 44);
    let mut wire = vec![0xAAu8; 44];
    datum.to_ser(0, 44, &mut wire).expect("to_ser");

    let expected = native_kitchen_wire();
    assert_eq!(expected.len(), 44);
    assert_eq!(wire, expected);

    // Layout spot checks
    assert_eq!(&wire[..4], &[0, CDR_NATIVE, 0, 0]);
    assert_eq!(&wire[4..8], &21u32.to_ne_bytes());
    assert_eq!(&wire[8..28], KITCHEN_KEY.as_bytes());
    assert_eq!(&wire[28..32], &[0, 0, 0, 0], "NUL then 3 pad bytes");
    assert_eq!(&wire[32..36], &5u32.to_ne_bytes());
    assert_eq!(&wire[36..44], b"23.0\0\0\0\0");
}

#[test]
fn test_kitchen_sample_decodes() {
    let topic = kv_topic();
    let wire = native_kitchen_wire();
    let datum = KeyValueDatum::from_ser_iov(&topic, SerdataKind::Data, &[&wire[..]], wire.len())
        .expect("decode");

    assert_eq!(datum.key().to_bytes(), KITCHEN_KEY.as_bytes());
    assert_eq!(
        datum.value().map(|v| v.to_bytes()),
        Some(KITCHEN_VALUE.as_bytes())
    );
    assert_eq!(datum.key_len(), 21);
    assert_eq!(datum.key_padding(), 3);
    assert_eq!(datum.value_len(), 5);
    assert_eq!(datum.value_padding(), 3);

    let mut out = KeyValueSample::default();
    datum.to_sample(&mut out, None);
    assert_eq!(out, KeyValueSample::new(KITCHEN_KEY, KITCHEN_VALUE));
}

#[test]
fn test_kitchen_sample_from_opposite_endian_sender() {
    let topic = kv_topic();
    let wire = if cfg!(target_endian = "little") {
        kitchen_wire(CDR_BE, u32::to_be_bytes)
    } else {
        kitchen_wire(CDR_LE, u32::to_le_bytes)
    };
    let datum = KeyValueDatum::from_ser_iov(&topic, SerdataKind::Data, &[&wire[..]], wire.len())
        .expect("decode swapped");

    let mut out = KeyValueSample::default();
    datum.to_sample(&mut out, None);
    assert_eq!(out, KeyValueSample::new(KITCHEN_KEY, KITCHEN_VALUE));

    // Re-encoding always uses the host order.
    let mut native = vec![0u8; datum.size() as usize];
    datum.to_ser(0, native.len(), &mut native).expect("to_ser");
    assert_eq!(native, native_kitchen_wire());
}

#[test]
fn test_kitchen_content_hash_and_keyhash() {
    let topic = kv_topic();
    let sample = KeyValueSample::new(KITCHEN_KEY, KITCHEN_VALUE);
    let datum = KeyValueDatum::from_sample(&topic, SerdataKind::Data, &sample).expect("encode");

    let basehash = serdata_basehash("serda::keyvalue");
    assert_eq!(topic.serdata_basehash(), basehash);
    let key_with_nul = b"/home/kitchen/sensor\0";
    assert_eq!(datum.hash(), mh3(key_with_nul, 0) ^ basehash);

    let mut md5_input = Vec::new();
    md5_input.extend_from_slice(&21u32.to_be_bytes());
    md5_input.extend_from_slice(key_with_nul);
    let digest = Md5::digest(&md5_input);
    assert_eq!(&datum.get_keyhash(false).as_bytes()[..], &digest[..]);
    assert_eq!(datum.get_keyhash(false), datum.get_keyhash(true));
}

#[test]
fn test_key_datum_wire_has_no_value() {
    let topic = kv_topic();
    let sample = KeyValueSample::new(KITCHEN_KEY, KITCHEN_VALUE);
    let key = KeyValueDatum::from_sample(&topic, SerdataKind::Key, &sample).expect("encode");
    assert_eq!(key.size(), 32);

    let mut wire = vec![0u8; 32];
    key.to_ser(0, 32, &mut wire).expect("to_ser");
    assert_eq!(&wire[..], &native_kitchen_wire()[..32]);

    let decoded =
        KeyValueDatum::from_ser_iov(&topic, SerdataKind::Key, &[&wire[..]], 32).expect("decode");
    assert!(decoded.eqkey(&key));
    assert!(decoded.value().is_none());
}

#[test]
fn test_truncated_kitchen_wire_is_malformed() {
    let topic = kv_topic();
    let wire = native_kitchen_wire();
    for cut in [0usize, 3, 7, 20, 35] {
        let res = KeyValueDatum::from_ser_iov(&topic, SerdataKind::Data, &[&wire[..cut]], cut);
        assert!(
            matches!(res, Err(Error::Malformed(_))),
            "cut at {} should be malformed",
            cut
        );
    }
}

#[test]
fn test_blob_fragments_reassemble() {
    let topic = blob_topic();
    let frags: [&[u8]; 5] = [b"ab", b"cde", b"", b"fghi", b"j"];
    let datum = BlobDatum::from_ser_iov(&topic, SerdataKind::Data, &frags, 10).expect("decode");
    assert_eq!(datum.size(), 10);
    assert_eq!(datum.payload(), b"abcdefghij");

    let wire = datum.to_ser_ref(0, 10).expect("to_ser_ref");
    assert_eq!(&*wire, b"abcdefghij");
    datum.to_ser_unref(wire);
}

#[test]
#[should_panic(expected = "declared size")]
fn test_blob_fragments_overflowing_size_panic() {
    let topic = blob_topic();
    let frags: [&[u8]; 5] = [b"ab", b"cde", b"", b"fghi", b"j"];
    let _ = BlobDatum::from_ser_iov(&topic, SerdataKind::Data, &frags, 9);
}

#[test]
fn test_blob_fragment_chain_single() {
    let topic = blob_topic();
    let chain = FragChain::new(b"hello");
    let datum = BlobDatum::from_ser(&topic, SerdataKind::Data, &chain, 5).expect("decode");
    assert_eq!(datum.to_string(), "68 65 6c 6c 6f");
}
