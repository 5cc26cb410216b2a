// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Frontier Protocol — Block Core
//!
//! The canonical block and header representation every node on the network
//! has to compute identically: the data structures, their deterministic
//! encoding, and the hash rules derived from it. One byte of disagreement
//! in field order or hash input and two nodes are on different chains.
//!
//! ## Architecture
//!
//! Leaves first:
//!
//! - **codec** — Canonical recursive length-prefixed encoding (RLP).
//! - **crypto** — Keccak-256 and the well-known empty digests.
//! - **header** — The header record and its two hashes (sealed / mining target).
//! - **transaction** — Transaction and receipt records carried by a block body.
//! - **roots** — Ordered trie root and bloom aggregation the header commits to.
//! - **block** — The block aggregate, its rebuild-on-write mutation path,
//!   and the network/storage wire forms.
//! - **ordering** — Comparators for sorting blocks.
//! - **config** — Header shape, protocol bounds and per-network parameters.
//! - **error** — The one error type of the crate.
//!
//! ## Data Flow
//!
//! ```text
//! bytes ──decode──▶ Block ──set_*/add_*──▶ roots rebuilt ──hash()──▶ identity
//! ```
//!
//! Nothing here performs I/O or blocks. Encoding and hashing are total over
//! in-memory values; only decoding and explicit checks return errors.

pub mod block;
pub mod codec;
pub mod config;
pub mod crypto;
pub mod error;
pub mod header;
pub mod ordering;
pub mod roots;
pub mod transaction;

pub use block::{Block, Identity};
pub use config::ProtocolParams;
pub use error::BlockError;
pub use header::{FieldSet, Header};
pub use ordering::{by_number, sort_blocks, BlockBy};
pub use transaction::{Log, Receipt, Transaction, TransactionBuilder};
