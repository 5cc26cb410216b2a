//! # Root & Bloom Derivation
//!
//! The two folds the block header commits to:
//!
//! - [`ordered_root`] — Merkle-Patricia trie root over an ordered list, keyed
//!   by the canonical encoding of each item's index. Used for both the
//!   transactions root and the receipts root.
//! - [`create_bloom`] — union of every receipt's log bloom.
//!
//! The trie itself comes from `alloy-trie`. The block core only ever calls
//! these functions, so swapping the trie implementation touches this file
//! alone.

use alloy_primitives::{Bloom, BloomInput, B256};
use alloy_rlp::Encodable;

use crate::transaction::{Log, Receipt};

/// Ordered trie root of `items`.
///
/// An empty slice yields [`EMPTY_ROOT_HASH`](crate::crypto::EMPTY_ROOT_HASH).
pub fn ordered_root<T: Encodable>(items: &[T]) -> B256 {
    alloy_trie::root::ordered_trie_root(items)
}

/// Bloom over a set of logs: each log's address and each of its topics.
pub fn logs_bloom<'a>(logs: impl IntoIterator<Item = &'a Log>) -> Bloom {
    let mut bloom = Bloom::ZERO;
    for log in logs {
        bloom.accrue(BloomInput::Raw(log.address.as_slice()));
        for topic in &log.topics {
            bloom.accrue(BloomInput::Raw(topic.as_slice()));
        }
    }
    bloom
}

/// Aggregate bloom of a receipt list, as stored in the header.
pub fn create_bloom(receipts: &[Receipt]) -> Bloom {
    let mut bloom = Bloom::ZERO;
    for receipt in receipts {
        bloom.accrue_bloom(&receipt.bloom);
    }
    bloom
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::EMPTY_ROOT_HASH;
    use crate::transaction::{Transaction, TransactionBuilder};
    use alloy_primitives::{Address, Bytes, U256};

    fn tx(nonce: u64) -> Transaction {
        TransactionBuilder::new().nonce(nonce).gas_limit(U256::from(21_000u64)).build()
    }

    fn log(byte: u8) -> Log {
        Log {
            address: Address::repeat_byte(byte),
            topics: vec![B256::repeat_byte(byte)],
            data: Bytes::new(),
        }
    }

    #[test]
    fn empty_root_is_well_known() {
        assert_eq!(ordered_root::<Transaction>(&[]), EMPTY_ROOT_HASH);
    }

    #[test]
    fn root_is_order_sensitive() {
        let forward = ordered_root(&[tx(1), tx(2)]);
        let backward = ordered_root(&[tx(2), tx(1)]);
        assert_ne!(forward, backward);
    }

    #[test]
    fn root_changes_with_each_item() {
        let one = ordered_root(&[tx(1)]);
        let two = ordered_root(&[tx(1), tx(2)]);
        assert_ne!(one, EMPTY_ROOT_HASH);
        assert_ne!(one, two);
    }

    #[test]
    fn create_bloom_is_union_of_receipt_blooms() {
        let a = Receipt::new(B256::ZERO, U256::from(1u64), vec![log(1)]);
        let b = Receipt::new(B256::ZERO, U256::from(2u64), vec![log(2)]);
        let combined = create_bloom(&[a.clone(), b.clone()]);

        assert_eq!(combined, logs_bloom(&[log(1), log(2)]));
        assert!(combined.contains(&a.bloom));
        assert!(combined.contains(&b.bloom));
    }

    #[test]
    fn create_bloom_of_nothing_is_zero() {
        assert_eq!(create_bloom(&[]), Bloom::ZERO);
    }
}
