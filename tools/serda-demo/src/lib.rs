// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Shared plumbing for the serda demo binaries.
//!
//! The demos exchange wire frames over a pipe, one hex-encoded frame per
//! line: `serda-pub | serda-blob-sub <topic> <type>`.

use clap::Args;
use std::cell::Cell;
use std::fmt::Write as _;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

static TOPIC_COUNTER: AtomicU32 = AtomicU32::new(0);
static NEXT_THREAD_ID: AtomicU64 = AtomicU64::new(1);

thread_local! {
    static THREAD_ID: Cell<u64> = const { Cell::new(0) };
}

/// Positional arguments shared by both demos.
#[derive(Args, Debug, Clone)]
pub struct TopicArgs {
    /// Topic name
    pub topic: String,

    /// Type name registered with the topic
    pub type_name: String,

    /// Optional partition
    pub partition: Option<String>,
}

/// Small per-thread identifier, stable for the thread's lifetime.
fn thread_id() -> u64 {
    THREAD_ID.with(|id| {
        if id.get() == 0 {
            id.set(NEXT_THREAD_ID.fetch_add(1, Ordering::Relaxed));
        }
        id.get()
    })
}

/// Topic name unique to this call, process and thread:
/// `{prefix}{n}_pid{pid}_tid{tid}`.
pub fn unique_topic_name(prefix: &str) -> String {
    let n = TOPIC_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!(
        "{}{}_pid{}_tid{}",
        prefix,
        n,
        std::process::id(),
        thread_id()
    )
}

/// Lowercase hex, no separators.
pub fn hex_encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(out, "{:02x}", b);
    }
    out
}

/// Parse a hex line produced by [`hex_encode`]. Surrounding whitespace is
/// ignored.
pub fn hex_decode(line: &str) -> Result<Vec<u8>, String> {
    let line = line.trim();
    if line.len() % 2 != 0 {
        return Err(format!("odd number of hex digits ({})", line.len()));
    }
    (0..line.len())
        .step_by(2)
        .map(|i| {
            line.get(i..i + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(|| format!("invalid hex digit near column {}", i))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::thread;

    #[test]
    fn test_unique_topic_names_differ() {
        let a = unique_topic_name("serda_");
        let b = unique_topic_name("serda_");
        assert_ne!(a, b);
        assert!(a.starts_with("serda_"));
        assert!(a.contains(&format!("_pid{}_tid", std::process::id())));
    }

    #[test]
    fn test_unique_topic_names_across_threads() {
        let handles: Vec<_> = (0..4)
            .map(|_| thread::spawn(|| (0..16).map(|_| unique_topic_name("t")).collect::<Vec<_>>()))
            .collect();
        let mut seen = HashSet::new();
        for handle in handles {
            for name in handle.join().expect("thread should succeed") {
                assert!(seen.insert(name), "duplicate topic name");
            }
        }
        assert_eq!(seen.len(), 64);
    }

    #[test]
    fn test_thread_id_stable_per_thread() {
        let here = thread_id();
        assert_eq!(thread_id(), here);
        let there = thread::spawn(thread_id).join().expect("thread should succeed");
        assert_ne!(here, there);
    }

    #[test]
    fn test_hex_roundtrip() {
        let bytes = [0x00, 0x01, 0x7f, 0x80, 0xff];
        let line = hex_encode(&bytes);
        assert_eq!(line, "00017f80ff");
        assert_eq!(hex_decode(&format!("  {}\n", line)), Ok(bytes.to_vec()));
        assert_eq!(hex_decode(""), Ok(Vec::new()));
    }

    #[test]
    fn test_hex_decode_rejects_garbage() {
        assert!(hex_decode("abc").is_err());
        assert!(hex_decode("zz").is_err());
        assert!(hex_decode("0g").is_err());
    }
}
