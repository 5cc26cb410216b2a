//! # Block Header
//!
//! The fixed-shape metadata record of a block and the two hashes computed
//! over it.
//!
//! ## Field Order
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  parent_hash        B256                     │
//! │  uncles_hash        B256  (derived)          │
//! │  coinbase           Address                  │
//! │  state_root         B256                     │
//! │  transactions_root  B256  (derived)          │
//! │  receipts_root      B256  (derived)          │
//! │  logs_bloom         Bloom (derived)          │
//! │  difficulty         U256                     │
//! │  number             U256                     │
//! │  gas_limit          U256                     │
//! │  gas_used           U256                     │
//! │  timestamp          u64                      │
//! │  extra_data         Bytes                    │
//! ├──────────────────────────────────────────────┤
//! │  mix_digest         B256  ┐ seal             │
//! │  nonce              B64   ┘                  │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! The order is part of the identity contract. [`Header::hash`] covers all
//! fifteen fields; [`Header::hash_no_nonce`] covers the first thirteen and
//! is what proof-of-work searches against.

use std::fmt;

use alloy_primitives::{Address, Bloom, Bytes, B256, B64, U256};
use alloy_rlp::{BufMut, Decodable, Encodable};
use serde::{Deserialize, Serialize};

use crate::codec;
use crate::crypto::sha3;

// ---------------------------------------------------------------------------
// FieldSet
// ---------------------------------------------------------------------------

/// Which header fields an encoding covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSet {
    /// All fields, including mix digest and nonce. Block identity.
    Sealed,
    /// Everything except mix digest and nonce. Mining target.
    Unsealed,
}

impl FieldSet {
    fn includes_seal(self) -> bool {
        matches!(self, FieldSet::Sealed)
    }
}

// ---------------------------------------------------------------------------
// Header
// ---------------------------------------------------------------------------

/// Block header.
///
/// A plain value: fields are public and may be set freely while the header is
/// being prepared. Once a [`Block`](crate::block::Block) owns it, the derived
/// roots are only written through the block's content setters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    /// Hash of the parent block.
    pub parent_hash: B256,
    /// Hash of the canonical encoding of the uncle list.
    pub uncles_hash: B256,
    /// Beneficiary of the block reward.
    pub coinbase: Address,
    /// State trie root after this block.
    pub state_root: B256,
    /// Ordered trie root of the transaction list.
    pub transactions_root: B256,
    /// Ordered trie root of the receipt list.
    pub receipts_root: B256,
    /// Union of every receipt's bloom.
    pub logs_bloom: Bloom,
    /// Proof-of-work difficulty.
    pub difficulty: U256,
    /// Height of the block. Genesis is zero.
    pub number: U256,
    /// Gas ceiling for the block.
    pub gas_limit: U256,
    /// Gas consumed by the block's transactions.
    pub gas_used: U256,
    /// Seconds since the Unix epoch.
    pub timestamp: u64,
    /// Free-form bytes. Length is bounded by protocol parameters, not here.
    pub extra_data: Bytes,
    /// Proof-of-work mix digest.
    pub mix_digest: B256,
    /// Proof-of-work nonce, big-endian.
    pub nonce: B64,
}

impl Header {
    /// Block identity: hash over every field.
    pub fn hash(&self) -> B256 {
        self.hash_fields(FieldSet::Sealed)
    }

    /// Mining target: hash over every field except mix digest and nonce.
    pub fn hash_no_nonce(&self) -> B256 {
        self.hash_fields(FieldSet::Unsealed)
    }

    /// Hash the canonical encoding of the selected fields.
    pub fn hash_fields(&self, fields: FieldSet) -> B256 {
        sha3(self.encode_fields(fields))
    }

    /// Canonical encoding of the selected fields as a list.
    pub fn encode_fields(&self, fields: FieldSet) -> Vec<u8> {
        let payload_length = self.payload_length(fields);
        let mut out = Vec::with_capacity(payload_length + alloy_rlp::length_of_length(payload_length));
        self.write_fields(fields, &mut out);
        out
    }

    /// Store `nonce` as eight big-endian bytes.
    ///
    /// This is the one field a proof-of-work search loop touches. It feeds
    /// no derived root, so no recomputation follows.
    pub fn set_nonce(&mut self, nonce: u64) {
        self.nonce = B64::new(nonce.to_be_bytes());
    }

    /// The nonce as an integer.
    pub fn nonce_u64(&self) -> u64 {
        u64::from_be_bytes(self.nonce.0)
    }

    fn payload_length(&self, fields: FieldSet) -> usize {
        let mut length = self.parent_hash.length()
            + self.uncles_hash.length()
            + self.coinbase.length()
            + self.state_root.length()
            + self.transactions_root.length()
            + self.receipts_root.length()
            + self.logs_bloom.length()
            + self.difficulty.length()
            + self.number.length()
            + self.gas_limit.length()
            + self.gas_used.length()
            + self.timestamp.length()
            + self.extra_data.length();
        if fields.includes_seal() {
            length += self.mix_digest.length() + self.nonce.length();
        }
        length
    }

    fn write_fields(&self, fields: FieldSet, out: &mut dyn BufMut) {
        alloy_rlp::Header { list: true, payload_length: self.payload_length(fields) }.encode(out);
        self.parent_hash.encode(out);
        self.uncles_hash.encode(out);
        self.coinbase.encode(out);
        self.state_root.encode(out);
        self.transactions_root.encode(out);
        self.receipts_root.encode(out);
        self.logs_bloom.encode(out);
        self.difficulty.encode(out);
        self.number.encode(out);
        self.gas_limit.encode(out);
        self.gas_used.encode(out);
        self.timestamp.encode(out);
        self.extra_data.encode(out);
        if fields.includes_seal() {
            self.mix_digest.encode(out);
            self.nonce.encode(out);
        }
    }
}

impl Encodable for Header {
    fn encode(&self, out: &mut dyn BufMut) {
        self.write_fields(FieldSet::Sealed, out);
    }

    fn length(&self) -> usize {
        let payload_length = self.payload_length(FieldSet::Sealed);
        payload_length + alloy_rlp::length_of_length(payload_length)
    }
}

impl Decodable for Header {
    fn decode(buf: &mut &[u8]) -> alloy_rlp::Result<Self> {
        let rlp_head = alloy_rlp::Header::decode(buf)?;
        if !rlp_head.list {
            return Err(alloy_rlp::Error::UnexpectedString);
        }
        let started_len = buf.len();
        if started_len < rlp_head.payload_length {
            return Err(alloy_rlp::Error::InputTooShort);
        }
        let this = Self {
            parent_hash: Decodable::decode(buf)?,
            uncles_hash: Decodable::decode(buf)?,
            coinbase: Decodable::decode(buf)?,
            state_root: Decodable::decode(buf)?,
            transactions_root: Decodable::decode(buf)?,
            receipts_root: Decodable::decode(buf)?,
            logs_bloom: Decodable::decode(buf)?,
            difficulty: Decodable::decode(buf)?,
            number: Decodable::decode(buf)?,
            gas_limit: Decodable::decode(buf)?,
            gas_used: Decodable::decode(buf)?,
            timestamp: Decodable::decode(buf)?,
            extra_data: Decodable::decode(buf)?,
            mix_digest: Decodable::decode(buf)?,
            nonce: Decodable::decode(buf)?,
        };
        let consumed = started_len - buf.len();
        if consumed != rlp_head.payload_length {
            return Err(alloy_rlp::Error::ListLengthMismatch {
                expected: rlp_head.payload_length,
                got: consumed,
            });
        }
        Ok(this)
    }
}

/// Hash of the canonical encoding of an uncle list.
///
/// A direct encode-then-hash, not a trie root.
pub fn uncles_hash(uncles: &[Header]) -> B256 {
    sha3(codec::encode_list(uncles))
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\tParentHash:   {}", self.parent_hash)?;
        writeln!(f, "\tUncleHash:    {}", self.uncles_hash)?;
        writeln!(f, "\tCoinbase:     {}", self.coinbase)?;
        writeln!(f, "\tRoot:         {}", self.state_root)?;
        writeln!(f, "\tTxSha:        {}", self.transactions_root)?;
        writeln!(f, "\tReceiptSha:   {}", self.receipts_root)?;
        writeln!(f, "\tBloom:        {}", self.logs_bloom)?;
        writeln!(f, "\tDifficulty:   {}", self.difficulty)?;
        writeln!(f, "\tNumber:       {}", self.number)?;
        writeln!(f, "\tGasLimit:     {}", self.gas_limit)?;
        writeln!(f, "\tGasUsed:      {}", self.gas_used)?;
        writeln!(f, "\tTime:         {}", self.timestamp)?;
        writeln!(f, "\tExtra:        {}", self.extra_data)?;
        writeln!(f, "\tMixDigest:    {}", self.mix_digest)?;
        write!(f, "\tNonce:        {}", self.nonce)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
