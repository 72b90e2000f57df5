// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::uninlined_format_args)] // Test/bench code readability over pedantic
#![allow(clippy::missing_panics_doc)] // Tests/examples panic on failure
#![allow(clippy::semicolon_if_nothing_returned)] // Benchmark code formatting
#![allow(clippy::cast_possible_truncation)] // Test parameters

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use serda::hash::mh3;
use serda::{
    BlobDatum, BlobTopic, KeyValueDatum, KeyValueSample, KeyValueTopic, Serdata, SerdataKind,
    Sertopic,
};
use std::sync::Arc;

fn kitchen() -> KeyValueSample {
    KeyValueSample::new("/home/kitchen/sensor", "23.0")
}

// ============================================================================
// Key/value codec
// ============================================================================

/// Benchmark: KeyValueDatum::from_sample (send path)
fn bench_keyvalue_from_sample(c: &mut Criterion) {
    let topic = Arc::new(Sertopic::new("home", "KeyValue", KeyValueTopic));
    let sample = kitchen();
    c.bench_function("keyvalue_from_sample", |b| {
        b.iter(|| {
            KeyValueDatum::from_sample(&topic, SerdataKind::Data, black_box(&sample))
                .expect("encode")
        })
    });
}

/// Benchmark: KeyValueDatum::to_ser into a reused buffer
fn bench_keyvalue_to_ser(c: &mut Criterion) {
    let topic = Arc::new(Sertopic::new("home", "KeyValue", KeyValueTopic));
    let datum =
        KeyValueDatum::from_sample(&topic, SerdataKind::Data, &kitchen()).expect("encode");
    let mut buf = vec![0u8; datum.size() as usize];
    c.bench_function("keyvalue_to_ser", |b| {
        b.iter(|| {
            datum
                .to_ser(0, buf.len(), black_box(&mut buf))
                .expect("to_ser");
        })
    });
}

/// Benchmark: KeyValueDatum::from_ser_iov (receive path)
fn bench_keyvalue_from_ser(c: &mut Criterion) {
    let topic = Arc::new(Sertopic::new("home", "KeyValue", KeyValueTopic));
    let datum =
        KeyValueDatum::from_sample(&topic, SerdataKind::Data, &kitchen()).expect("encode");
    let mut wire = vec![0u8; datum.size() as usize];
    datum.to_ser(0, wire.len(), &mut wire).expect("to_ser");
    c.bench_function("keyvalue_from_ser_iov", |b| {
        b.iter(|| {
            KeyValueDatum::from_ser_iov(
                &topic,
                SerdataKind::Data,
                &[black_box(&wire[..])],
                wire.len(),
            )
            .expect("decode")
        })
    });
}

/// Benchmark: MD5 keyhash of the kitchen key
fn bench_keyvalue_keyhash(c: &mut Criterion) {
    let topic = Arc::new(Sertopic::new("home", "KeyValue", KeyValueTopic));
    let datum =
        KeyValueDatum::from_sample(&topic, SerdataKind::Data, &kitchen()).expect("encode");
    c.bench_function("keyvalue_keyhash", |b| {
        b.iter(|| black_box(&datum).get_keyhash(false))
    });
}

/// Benchmark: topicless projection
fn bench_keyvalue_to_topicless(c: &mut Criterion) {
    let topic = Arc::new(Sertopic::new("home", "KeyValue", KeyValueTopic));
    let datum = Arc::new(
        KeyValueDatum::from_sample(&topic, SerdataKind::Data, &kitchen()).expect("encode"),
    );
    c.bench_function("keyvalue_to_topicless", |b| {
        b.iter(|| KeyValueDatum::to_topicless(black_box(&datum)))
    });
}

// ============================================================================
// Blob codec and hashing
// ============================================================================

/// Benchmark: 1 KiB blob reassembled from 4 fragments
fn bench_blob_from_ser_iov_1k(c: &mut Criterion) {
    let topic = Arc::new(Sertopic::new("blobs", "Blob", BlobTopic));
    let payload: Vec<u8> = (0..1024).map(|i| (i % 251) as u8).collect();
    c.bench_function("blob_from_ser_iov_1k", |b| {
        b.iter_batched(
            || payload.chunks(256).collect::<Vec<_>>(),
            |frags| {
                BlobDatum::from_ser_iov(&topic, SerdataKind::Data, &frags, 1024).expect("decode")
            },
            BatchSize::SmallInput,
        )
    });
}

/// Benchmark: murmur3 over a 21-byte key
fn bench_mh3_key(c: &mut Criterion) {
    let key = b"/home/kitchen/sensor\0";
    c.bench_function("mh3_kitchen_key", |b| {
        b.iter(|| mh3(black_box(key), 0))
    });
}

criterion_group!(
    benches,
    bench_keyvalue_from_sample,
    bench_keyvalue_to_ser,
    bench_keyvalue_from_ser,
    bench_keyvalue_keyhash,
    bench_keyvalue_to_topicless,
    bench_blob_from_ser_iov_1k,
    bench_mh3_key,
);
criterion_main!(benches);
