//! # Hashing Utilities
//!
//! Keccak-256 is the one hash function of the block core. Header identity,
//! the mining target, transaction identity, the uncle-set hash and every
//! trie node all go through it.
//!
//! Note that this is the original Keccak submission, not NIST's FIPS-202
//! SHA3-256 (different padding, different digests). Mixing them up is the
//! classic way to produce a chain nobody else can sync with.

use alloy_primitives::{b256, keccak256, B256};

/// Keccak-256 of the empty byte string.
pub const EMPTY_KECCAK: B256 =
    b256!("c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470");

/// Keccak-256 of the canonical encoding of an empty list.
///
/// This is the uncles hash of every block without uncles.
pub const EMPTY_LIST_HASH: B256 =
    b256!("1dcc4de8dec75d7aab85b567b6ccd41ad312451b948a7413f0a142fd40d49347");

/// Root of an empty ordered trie.
///
/// This is the transactions root of an empty block and the receipts root of
/// a block without receipts.
pub const EMPTY_ROOT_HASH: B256 =
    b256!("56e81f171bcc55a6ff8345e692c0f86e5b48e01b996cadc001622fb5e363b421");

/// Compute the Keccak-256 digest of `data`.
///
/// # Example
///
/// ```
/// use frontier_protocol::crypto::sha3;
///
/// let digest = sha3(b"frontier");
/// assert_eq!(digest.len(), 32);
/// ```
pub fn sha3(data: impl AsRef<[u8]>) -> B256 {
    keccak256(data)
}
