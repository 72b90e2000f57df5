// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # serda - pluggable serialized-data adapters for DDS
//!
//! Lets an application plug a custom in-memory sample type and a custom wire
//! encoding into a DDS middleware, so transport and discovery can move
//! samples without knowing their concrete type.
//!
//! ## Quick Start
//!
//! ```rust
//! use serda::{KeyValueDatum, KeyValueSample, KeyValueTopic, Serdata, SerdataKind, Sertopic};
//! use std::sync::Arc;
//!
//! let topic = Arc::new(Sertopic::new("home", "KeyValue", KeyValueTopic));
//! let sample = KeyValueSample::new("/home/kitchen/sensor", "23.0");
//!
//! // Send path
//! let datum = KeyValueDatum::from_sample(&topic, SerdataKind::Data, &sample)?;
//! let mut wire = vec![0u8; datum.size() as usize];
//! datum.to_ser(0, wire.len(), &mut wire)?;
//!
//! // Receive path
//! let received = KeyValueDatum::from_ser_iov(&topic, SerdataKind::Data, &[&wire], wire.len())?;
//! let mut out = KeyValueSample::default();
//! received.to_sample(&mut out, None);
//! assert_eq!(out, sample);
//! # Ok::<(), serda::Error>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +-------------------------------------------------------------+
//! |          Middleware (transport, discovery, history)          |
//! +-------------------------------------------------------------+
//! |  Serdata trait:  BlobDatum  |  KeyValueDatum                |
//! +-------------------------------------------------------------+
//! |  Sertopic<T>  |  core::ser cursors  |  hash (mh3, keyhash)  |
//! +-------------------------------------------------------------+
//! ```
//!
//! ## Modules Overview
//!
//! - [`serdata`] - datum capability set and the two variants (start here)
//! - [`core`] - type descriptor and CDR cursors
//! - [`hash`] - content hash and keyhash
//! - [`config`] - wire-format constants

pub mod config;
pub mod core;
mod error;
pub mod hash;
pub mod serdata;

pub use crate::core::types::{FreeOp, Sertopic, SertopicOps};
pub use error::{Error, Result};
pub use hash::Keyhash;
pub use serdata::{
    BlobDatum, BlobTopic, FragChain, KeyValueDatum, KeyValueSample, KeyValueTopic, SampleOf,
    Serdata, SerdataKind, Timestamp, WireRef,
};
