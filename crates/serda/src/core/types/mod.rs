// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type descriptors for custom serdata types.
//!
//! Provides [`Sertopic`] (per-topic metadata) and the [`SertopicOps`] trait a
//! custom type implements to manage its sample buffers.

pub mod descriptor;

pub use descriptor::{FreeOp, Sertopic, SertopicOps};
