//! # Cryptographic Primitives
//!
//! Thin wrappers over the Keccak-256 implementation in `alloy-primitives`.
//! Nothing here is hand-rolled.

pub mod hash;

pub use hash::{sha3, EMPTY_KECCAK, EMPTY_LIST_HASH, EMPTY_ROOT_HASH};
