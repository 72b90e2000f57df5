// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # Core Components
//!
//! Low-level building blocks shared by the serdata codecs.
//!
//! | Module | Description |
//! |--------|-------------|
//! | `ser` | CDR cursors, byte order, string padding |
//! | `types` | Type descriptor (`Sertopic`) and sample-buffer operations |

/// Serialization helpers (CDR encoding/decoding).
pub mod ser;
pub mod types;
