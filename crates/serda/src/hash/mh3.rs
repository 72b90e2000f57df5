// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! MurmurHash3 (x86, 32-bit) content hash.

const C1: u32 = 0xcc9e_2d51;
const C2: u32 = 0x1b87_3593;
const ROUND_ADD: u32 = 0xe654_6b64;
const FMIX_M1: u32 = 0x85eb_ca6b;
const FMIX_M2: u32 = 0xc2b2_ae35;

#[inline]
fn mix_k1(mut k1: u32) -> u32 {
    k1 = k1.wrapping_mul(C1);
    k1 = k1.rotate_left(15);
    k1.wrapping_mul(C2)
}

#[inline]
fn fmix32(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(FMIX_M1);
    h ^= h >> 13;
    h = h.wrapping_mul(FMIX_M2);
    h ^ (h >> 16)
}

/// Hash `data` with MurmurHash3_x86_32.
///
/// Blocks are read little-endian so the result does not depend on the host.
pub fn mh3(data: &[u8], seed: u32) -> u32 {
    let mut h1 = seed;
    let mut blocks = data.chunks_exact(4);

    for block in &mut blocks {
        let k1 = u32::from_le_bytes([block[0], block[1], block[2], block[3]]);
        h1 ^= mix_k1(k1);
        h1 = h1.rotate_left(13);
        h1 = h1.wrapping_mul(5).wrapping_add(ROUND_ADD);
    }

    let tail = blocks.remainder();
    if !tail.is_empty() {
        let mut k1 = 0u32;
        for (i, &byte) in tail.iter().enumerate() {
            k1 ^= u32::from(byte) << (8 * i);
        }
        h1 ^= mix_k1(k1);
    }

    // Length is mixed modulo 2^32, as in the reference implementation.
    h1 ^= data.len() as u32;
    fmix32(h1)
}
