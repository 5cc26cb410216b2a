//! End-to-end tests for the block core.
//!
//! These walk a block through the whole lifecycle the rest of the node
//! drives it through: assemble locally, seal, transmit, decode on the other
//! side, store with total difficulty, reload, and sort. Every test builds
//! its own blocks; nothing is shared between them.

use alloy_primitives::{Address, Bloom, Bytes, B256, U256};
use proptest::prelude::*;

use frontier_protocol::codec;
use frontier_protocol::crypto::{EMPTY_LIST_HASH, EMPTY_ROOT_HASH};
use frontier_protocol::header::uncles_hash;
use frontier_protocol::roots::{create_bloom, ordered_root};
use frontier_protocol::{
    by_number, sort_blocks, Block, BlockError, Header, Log, ProtocolParams, Receipt, Transaction,
    TransactionBuilder,
};

// ---------------------------------------------------------------------------
// Test Helpers
// ---------------------------------------------------------------------------

fn transfer(nonce: u64, value: u64) -> Transaction {
    TransactionBuilder::new()
        .nonce(nonce)
        .gas_price(U256::from(20_000_000_000u64))
        .gas_limit(U256::from(21_000u64))
        .to(Address::repeat_byte(0xbe))
        .value(U256::from(value))
        .signature(28, U256::from(nonce + 1), U256::from(nonce + 2))
        .build()
}

fn receipt_for(index: u64) -> Receipt {
    let log = Log {
        address: Address::repeat_byte(index as u8),
        topics: vec![B256::repeat_byte(0xdd), B256::repeat_byte(index as u8)],
        data: Bytes::from(vec![index as u8; 4]),
    };
    Receipt::new(B256::repeat_byte(index as u8), U256::from(21_000 * (index + 1)), vec![log])
}

fn child_of(parent: &Block, number: u64) -> Block {
    let mut block = Block::new(
        parent.hash(),
        Address::repeat_byte(0xc0),
        B256::repeat_byte(number as u8),
        U256::from(131_072u64),
        0,
        Bytes::from_static(b"e2e"),
    );
    block.set_number(U256::from(number));
    block.set_gas_limit(U256::from(3_141_592u64));
    block
}

fn genesis() -> Block {
    let mut block = Block::new(
        B256::ZERO,
        Address::ZERO,
        B256::repeat_byte(0x99),
        U256::from(131_072u64),
        42,
        Bytes::new(),
    );
    block.set_time(0);
    block
}

// ---------------------------------------------------------------------------
// 1. Local Assembly
// ---------------------------------------------------------------------------

#[test]
fn incremental_assembly_keeps_roots_synced() {
    let mut block = child_of(&genesis(), 1);
    assert_eq!(block.header().transactions_root, EMPTY_ROOT_HASH);

    let mut seen_roots = vec![block.header().transactions_root];
    for i in 0..4 {
        block.add_transaction(transfer(i, 1_000 + i));
        block.add_receipt(receipt_for(i));

        assert_eq!(block.header().transactions_root, ordered_root(block.transactions()));
        assert_eq!(block.header().receipts_root, ordered_root(block.receipts()));
        assert_eq!(block.bloom(), create_bloom(block.receipts()));

        let root = block.header().transactions_root;
        assert!(!seen_roots.contains(&root), "each append yields a new root");
        seen_roots.push(root);
    }

    block.set_gas_used(U256::from(84_000u64));
    assert!(block.verify_body().is_ok());
}

#[test]
fn replacing_lists_resyncs_every_derived_field() {
    let mut block = child_of(&genesis(), 1);
    block.set_transactions(vec![transfer(0, 1), transfer(1, 2)]);
    block.set_receipts(vec![receipt_for(0), receipt_for(1)]);
    block.set_uncles(vec![genesis().header().clone()]);

    block.set_transactions(Vec::new());
    block.set_receipts(Vec::new());
    block.set_uncles(Vec::new());

    assert_eq!(block.header().transactions_root, EMPTY_ROOT_HASH);
    assert_eq!(block.header().receipts_root, EMPTY_ROOT_HASH);
    assert_eq!(block.header().uncles_hash, EMPTY_LIST_HASH);
    assert_eq!(block.bloom(), Bloom::ZERO);
}

#[test]
fn append_matches_replace() {
    let mut appended = child_of(&genesis(), 1);
    appended.set_time(1_000);
    appended.add_transaction(transfer(0, 5));
    appended.add_transaction(transfer(1, 6));

    let mut replaced = child_of(&genesis(), 1);
    replaced.set_time(1_000);
    replaced.set_transactions(vec![transfer(0, 5), transfer(1, 6)]);

    assert_eq!(appended.header(), replaced.header());
    assert_eq!(appended.hash(), replaced.hash());
}

// ---------------------------------------------------------------------------
// 2. Sealing
// ---------------------------------------------------------------------------

#[test]
fn nonce_search_leaves_mining_target_fixed() {
    let mut block = child_of(&genesis(), 1);
    block.add_transaction(transfer(0, 1));
    let target = block.hash_no_nonce();

    let mut identities = Vec::new();
    for nonce in 0..8u64 {
        block.set_nonce(nonce);
        block.set_mix_digest(B256::left_padding_from(&nonce.to_be_bytes()));
        assert_eq!(block.hash_no_nonce(), target);
        identities.push(block.hash());
    }
    identities.sort();
    identities.dedup();
    assert_eq!(identities.len(), 8);
}

// ---------------------------------------------------------------------------
// 3. Transmit & Store
// ---------------------------------------------------------------------------

#[test]
fn network_round_trip_preserves_identity() {
    let parent = genesis();
    let mut block = child_of(&parent, 1);
    block.set_transactions(vec![transfer(0, 10), transfer(1, 20)]);
    block.set_uncles(vec![child_of(&parent, 1).header().clone()]);
    block.set_receipts(vec![receipt_for(0), receipt_for(1)]);

    let wire = block.rlp_bytes();
    assert_eq!(wire.len(), block.size());

    let received = Block::decode_rlp(&wire).unwrap();
    assert_eq!(received.hash(), block.hash());
    assert_eq!(received.parent_hash(), parent.hash());
    assert_eq!(received.transactions(), block.transactions());
    assert_eq!(received.uncles(), block.uncles());
    assert!(received.receipts().is_empty(), "receipts never travel");
    assert_eq!(received.total_difficulty(), None);
    assert!(received.verify_body().is_ok());
}

#[test]
fn storage_round_trip_with_and_without_total_difficulty() {
    let mut block = child_of(&genesis(), 1);
    block.add_transaction(transfer(0, 1));

    let without = Block::decode_rlp(&block.storage_bytes()).unwrap();
    assert_eq!(without.total_difficulty(), None);

    block.set_total_difficulty(Some(U256::from(262_144u64)));
    let with = Block::decode_rlp(&block.storage_bytes()).unwrap();
    assert_eq!(with.total_difficulty(), Some(U256::from(262_144u64)));
    assert_eq!(with.hash(), block.hash());
    assert_eq!(with.size(), block.size());
}

#[test]
fn spliced_body_is_detected_after_decode() {
    let mut block = child_of(&genesis(), 1);
    block.set_transactions(vec![transfer(0, 1)]);

    // First block's header, a different transaction list.
    let header = codec::encode(block.header());
    let txs = codec::encode_list(&[transfer(0, 2)]);
    let uncles = codec::encode_list::<Header>(&[]);
    let mut wire = Vec::new();
    alloy_rlp::Header { list: true, payload_length: header.len() + txs.len() + uncles.len() }
        .encode(&mut wire);
    wire.extend_from_slice(&header);
    wire.extend_from_slice(&txs);
    wire.extend_from_slice(&uncles);

    let decoded = Block::decode_rlp(&wire).unwrap();
    assert_eq!(decoded.hash(), block.hash(), "identity only covers the header");
    assert!(matches!(
        decoded.verify_body(),
        Err(BlockError::RootMismatch { field: "transactions_root", .. })
    ));
}

#[test]
fn truncated_input_never_yields_a_block() {
    let mut block = child_of(&genesis(), 1);
    block.set_transactions(vec![transfer(0, 1), transfer(1, 2)]);
    block.set_total_difficulty(Some(U256::from(1u64)));
    let bytes = block.storage_bytes();

    for cut in 0..bytes.len() {
        let result = Block::decode_rlp(&bytes[..cut]);
        assert!(result.is_err(), "prefix of length {cut} decoded");
        assert!(result.unwrap_err().is_decode_error());
    }
}

#[test]
fn oversized_scalar_is_rejected_not_truncated() {
    let block = child_of(&genesis(), 1);
    let mut bytes = Vec::new();
    let header = codec::encode(block.header());
    let txs = codec::encode_list::<Transaction>(&[]);
    let uncles = codec::encode_list::<Header>(&[]);
    // 33-byte total difficulty: one byte wider than 256 bits.
    let mut td = vec![0xa1, 0x01];
    td.extend_from_slice(&[0u8; 32]);

    let payload_length = header.len() + txs.len() + uncles.len() + td.len();
    alloy_rlp::Header { list: true, payload_length }.encode(&mut bytes);
    bytes.extend_from_slice(&header);
    bytes.extend_from_slice(&txs);
    bytes.extend_from_slice(&uncles);
    bytes.extend_from_slice(&td);

    assert!(matches!(Block::decode_rlp(&bytes), Err(BlockError::MalformedEncoding(_))));
}

// ---------------------------------------------------------------------------
// 4. Uncles & Ordering
// ---------------------------------------------------------------------------

#[test]
fn uncle_hash_commits_to_uncle_order() {
    let parent = genesis();
    let mut a = child_of(&parent, 1);
    a.set_time(1);
    let mut b = child_of(&parent, 1);
    b.set_time(2);

    let forward = vec![a.header().clone(), b.header().clone()];
    let backward = vec![b.header().clone(), a.header().clone()];
    assert_ne!(uncles_hash(&forward), uncles_hash(&backward));

    let mut block = child_of(&parent, 2);
    block.set_uncles(forward.clone());
    assert_eq!(block.header().uncles_hash, uncles_hash(&forward));
    assert_eq!(block.uncle_at(1), Some(&forward[1]));
}

#[test]
fn chain_sorts_by_number() {
    let g = genesis();
    let b1 = child_of(&g, 1);
    let b2 = child_of(&b1, 2);
    let b3 = child_of(&b2, 3);

    let mut shuffled = vec![b3.clone(), g.clone(), b2.clone(), b1.clone()];
    sort_blocks(&mut shuffled, by_number);
    let numbers: Vec<u64> = shuffled.iter().map(Block::number_u64).collect();
    assert_eq!(numbers, vec![0, 1, 2, 3]);
    assert_eq!(shuffled[3].parent_hash(), b2.hash());
}

#[test]
fn mocked_chain_links_by_override() {
    let parent = genesis().with_mock_hash(B256::repeat_byte(0x01));
    let child = child_of(&parent, 1).with_mock_parent_hash(B256::repeat_byte(0x01));
    assert_eq!(child.parent_hash(), parent.hash());
    assert_eq!(child.header().parent_hash, B256::repeat_byte(0x01));
}

// ---------------------------------------------------------------------------
// 5. Protocol Bounds
// ---------------------------------------------------------------------------

#[test]
fn extra_data_bound_is_enforced_outside_the_block() {
    let params = ProtocolParams::default();
    let long = Bytes::from(vec![0u8; params.max_extra_data_size + 1]);

    // The block accepts it; the params check rejects it.
    let mut block = child_of(&genesis(), 1);
    block.set_extra_data(long.clone());
    assert_eq!(block.extra_data().len(), params.max_extra_data_size + 1);
    assert!(matches!(
        params.check_extra_data(&long),
        Err(BlockError::ExtraDataTooLong { .. })
    ));
}

// ---------------------------------------------------------------------------
// 6. Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn decode_inverts_encode(
        values in proptest::collection::vec(any::<u64>(), 0..8),
        td in proptest::option::of(any::<u64>()),
        extra in proptest::collection::vec(any::<u8>(), 0..64),
    ) {
        let mut block = child_of(&genesis(), values.len() as u64);
        block.set_extra_data(Bytes::from(extra));
        block.set_transactions(values.iter().enumerate().map(|(i, v)| transfer(i as u64, *v)).collect());
        block.set_total_difficulty(td.map(U256::from));

        let decoded = Block::decode_rlp(&block.storage_bytes()).unwrap();
        prop_assert_eq!(decoded.header(), block.header());
        prop_assert_eq!(decoded.transactions(), block.transactions());
        prop_assert_eq!(decoded.total_difficulty(), block.total_difficulty());
    }

    #[test]
    fn seal_never_moves_mining_target(nonce in any::<u64>(), mix in any::<[u8; 32]>()) {
        let block = child_of(&genesis(), 1);
        let mut resealed = block.clone();
        resealed.set_nonce(nonce);
        resealed.set_mix_digest(B256::from(mix));
        prop_assert_eq!(resealed.hash_no_nonce(), block.hash_no_nonce());
    }
}

// ---------------------------------------------------------------------------
// 7. Mainnet Genesis
// ---------------------------------------------------------------------------

fn mainnet_genesis_header() -> Header {
    let mut header = Header {
        uncles_hash: EMPTY_LIST_HASH,
        state_root: "0xd7f8974fb5ac78d9ac099b9ad5018bedc2ce0a72dad1827a1709da30580f0544"
            .parse()
            .unwrap(),
        transactions_root: EMPTY_ROOT_HASH,
        receipts_root: EMPTY_ROOT_HASH,
        difficulty: U256::from(0x4_0000_0000u64),
        gas_limit: U256::from(5_000u64),
        extra_data: Bytes::from(
            hex::decode("11bbe8db4e347b4e8c937c1c8370e4b5ed33adb3db69cbdb7a38e1e50b1b82fa")
                .unwrap(),
        ),
        ..Default::default()
    };
    header.set_nonce(0x42);
    header
}

#[test]
fn mainnet_genesis_hash() {
    let expected: B256 = "0xd4e56740f876aef8c010b86a40d5f56745a118d0906a34e69aec8c0db1cb8fa3"
        .parse()
        .unwrap();

    let header = mainnet_genesis_header();
    assert_eq!(header.hash(), expected);

    let block = Block::with_header(header);
    assert_eq!(block.hash(), expected);
    assert!(block.verify_body().is_ok());

    let decoded = Block::decode_rlp(&block.rlp_bytes()).unwrap();
    assert_eq!(decoded.hash(), expected);
    assert_eq!(decoded.nonce(), 0x42);
}
