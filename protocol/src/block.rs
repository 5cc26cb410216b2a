//! # Block Structure
//!
//! A block is a [`Header`] plus its body: uncle headers, transactions and,
//! on the locally assembled path, receipts. The header commits to the body
//! through four derived fields:
//!
//! ```text
//! transactions ──ordered_root──▶ transactions_root
//! receipts ─────ordered_root──▶ receipts_root
//! receipts ─────create_bloom──▶ logs_bloom
//! uncles ───────sha3(encode)──▶ uncles_hash
//! ```
//!
//! ## Rebuild on Write
//!
//! Every body mutation goes through one private choke point that writes the
//! new content and then recomputes the matching derived field before
//! returning. There is no way to reach a block whose header roots lag behind
//! its lists, and no setter exists for the derived fields themselves.
//!
//! ## Encodings
//!
//! ```text
//! network: [header, [tx, ...], [uncle, ...]]
//! storage: [header, [tx, ...], [uncle, ...], total_difficulty]
//! ```
//!
//! Total difficulty is only appended when known. Receipts, reward and the
//! mock identities are local bookkeeping and never encoded.

use std::fmt;

use alloy_primitives::{Address, Bloom, Bytes, B256, U256};
use alloy_rlp::{BufMut, Decodable, Encodable};
use tracing::{debug, trace};

use crate::codec;
use crate::error::BlockError;
use crate::header::{uncles_hash, Header};
use crate::roots::{create_bloom, ordered_root};
use crate::transaction::{Receipt, Transaction};

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// Where a block's hash (or parent hash) comes from.
///
/// Test harnesses build blocks with hashes they pick themselves rather than
/// mining real headers. `Overridden` makes that visible in the type instead
/// of hiding it behind a zero-value sentinel. Production paths never set it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Identity {
    /// Derived from the header.
    #[default]
    Computed,
    /// Fixed by the caller.
    Overridden(B256),
}

impl Identity {
    fn resolve(self, computed: impl FnOnce() -> B256) -> B256 {
        match self {
            Identity::Computed => computed(),
            Identity::Overridden(hash) => hash,
        }
    }
}

// ---------------------------------------------------------------------------
// Body
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Content {
    Transactions,
    Receipts,
    Uncles,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct BlockBody {
    transactions: Vec<Transaction>,
    uncles: Vec<Header>,
    receipts: Vec<Receipt>,
}

// ---------------------------------------------------------------------------
// Block
// ---------------------------------------------------------------------------

/// A full block: header, body and local bookkeeping.
///
/// Built by one owner through a sequence of mutating calls, then handed
/// off read-only. Nothing here locks; callers must not mutate a block that
/// others are reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    header: Header,
    body: BlockBody,
    total_difficulty: Option<U256>,
    reward: U256,
    hash_identity: Identity,
    parent_identity: Identity,
}

impl Block {
    /// Start a fresh block on top of `parent_hash`.
    ///
    /// The body is empty, gas accounting is zero, the timestamp is now, and
    /// every derived header field already commits to the empty body.
    pub fn new(
        parent_hash: B256,
        coinbase: Address,
        state_root: B256,
        difficulty: U256,
        nonce: u64,
        extra_data: Bytes,
    ) -> Self {
        let mut header = Header {
            parent_hash,
            coinbase,
            state_root,
            difficulty,
            timestamp: u64::try_from(chrono::Utc::now().timestamp()).unwrap_or_default(),
            extra_data,
            gas_used: U256::ZERO,
            gas_limit: U256::ZERO,
            ..Default::default()
        };
        header.set_nonce(nonce);

        let mut block = Self::with_header(header);
        block.rebuild(Content::Transactions);
        block.rebuild(Content::Receipts);
        block.rebuild(Content::Uncles);
        block
    }

    /// Wrap an already-built header. The body starts empty.
    ///
    /// The header's roots are kept verbatim: they may describe a body that
    /// has not been attached yet. The first body mutation brings the
    /// corresponding root back in line with the block's own content.
    pub fn with_header(header: Header) -> Self {
        Self {
            header,
            body: BlockBody::default(),
            total_difficulty: None,
            reward: U256::ZERO,
            hash_identity: Identity::Computed,
            parent_identity: Identity::Computed,
        }
    }

    // -- body mutation -----------------------------------------------------

    /// Replace the transaction list and recompute the transactions root.
    pub fn set_transactions(&mut self, transactions: Vec<Transaction>) {
        self.write_body(Content::Transactions, |body| body.transactions = transactions);
    }

    /// Append one transaction. Same contract as replacing the whole list.
    pub fn add_transaction(&mut self, transaction: Transaction) {
        self.write_body(Content::Transactions, |body| body.transactions.push(transaction));
    }

    /// Replace the receipt list and recompute the receipts root and bloom.
    pub fn set_receipts(&mut self, receipts: Vec<Receipt>) {
        self.write_body(Content::Receipts, |body| body.receipts = receipts);
    }

    /// Append one receipt. Same contract as replacing the whole list.
    pub fn add_receipt(&mut self, receipt: Receipt) {
        self.write_body(Content::Receipts, |body| body.receipts.push(receipt));
    }

    /// Replace the uncle list and recompute the uncles hash.
    pub fn set_uncles(&mut self, uncles: Vec<Header>) {
        self.write_body(Content::Uncles, |body| body.uncles = uncles);
    }

    fn write_body(&mut self, content: Content, write: impl FnOnce(&mut BlockBody)) {
        write(&mut self.body);
        self.rebuild(content);
    }

    fn rebuild(&mut self, content: Content) {
        match content {
            Content::Transactions => {
                self.header.transactions_root = ordered_root(&self.body.transactions);
            }
            Content::Receipts => {
                self.header.receipts_root = ordered_root(&self.body.receipts);
                self.header.logs_bloom = create_bloom(&self.body.receipts);
            }
            Content::Uncles => {
                self.header.uncles_hash = uncles_hash(&self.body.uncles);
            }
        }
        trace!(?content, "rebuilt derived header fields");
    }

    // -- identity ----------------------------------------------------------

    /// Block identity. Honors a mock override when one is set.
    pub fn hash(&self) -> B256 {
        self.hash_identity.resolve(|| self.header.hash())
    }

    /// Mining target. Always derived from the header; overrides never apply.
    pub fn hash_no_nonce(&self) -> B256 {
        self.header.hash_no_nonce()
    }

    /// Parent link. Honors a mock override when one is set.
    pub fn parent_hash(&self) -> B256 {
        self.parent_identity.resolve(|| self.header.parent_hash)
    }

    /// Pin the block hash to `hash`. For test harnesses only.
    pub fn with_mock_hash(mut self, hash: B256) -> Self {
        self.hash_identity = Identity::Overridden(hash);
        self
    }

    /// Pin the parent hash to `hash`. For test harnesses only.
    pub fn with_mock_parent_hash(mut self, hash: B256) -> Self {
        self.parent_identity = Identity::Overridden(hash);
        self
    }

    /// Source of [`Block::hash`].
    pub fn hash_identity(&self) -> Identity {
        self.hash_identity
    }

    /// Source of [`Block::parent_hash`].
    pub fn parent_identity(&self) -> Identity {
        self.parent_identity
    }

    // -- body access -------------------------------------------------------

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.body.transactions
    }

    pub fn uncles(&self) -> &[Header] {
        &self.body.uncles
    }

    pub fn receipts(&self) -> &[Receipt] {
        &self.body.receipts
    }

    /// Find a contained transaction by its identity hash.
    pub fn transaction(&self, hash: B256) -> Option<&Transaction> {
        self.body.transactions.iter().find(|tx| tx.hash() == hash)
    }

    pub fn transaction_at(&self, index: usize) -> Option<&Transaction> {
        self.body.transactions.get(index)
    }

    pub fn uncle_at(&self, index: usize) -> Option<&Header> {
        self.body.uncles.get(index)
    }

    /// Check that the header commits to the attached transactions and uncles.
    ///
    /// Receipts are not checked: decoded blocks never carry them.
    pub fn verify_body(&self) -> Result<(), BlockError> {
        let computed = ordered_root(&self.body.transactions);
        if computed != self.header.transactions_root {
            return Err(BlockError::RootMismatch {
                field: "transactions_root",
                header: self.header.transactions_root,
                computed,
            });
        }
        let computed = uncles_hash(&self.body.uncles);
        if computed != self.header.uncles_hash {
            return Err(BlockError::RootMismatch {
                field: "uncles_hash",
                header: self.header.uncles_hash,
                computed,
            });
        }
        Ok(())
    }

    // -- header fields -----------------------------------------------------

    pub fn number(&self) -> U256 {
        self.header.number
    }

    /// Block number clamped into 64 bits.
    pub fn number_u64(&self) -> u64 {
        self.header.number.saturating_to::<u64>()
    }

    pub fn set_number(&mut self, number: U256) {
        self.header.number = number;
    }

    pub fn coinbase(&self) -> Address {
        self.header.coinbase
    }

    pub fn set_coinbase(&mut self, coinbase: Address) {
        self.header.coinbase = coinbase;
    }

    pub fn state_root(&self) -> B256 {
        self.header.state_root
    }

    pub fn set_root(&mut self, state_root: B256) {
        self.header.state_root = state_root;
    }

    pub fn bloom(&self) -> Bloom {
        self.header.logs_bloom
    }

    pub fn difficulty(&self) -> U256 {
        self.header.difficulty
    }

    pub fn gas_limit(&self) -> U256 {
        self.header.gas_limit
    }

    pub fn set_gas_limit(&mut self, gas_limit: U256) {
        self.header.gas_limit = gas_limit;
    }

    pub fn gas_used(&self) -> U256 {
        self.header.gas_used
    }

    pub fn set_gas_used(&mut self, gas_used: U256) {
        self.header.gas_used = gas_used;
    }

    pub fn time(&self) -> u64 {
        self.header.timestamp
    }

    pub fn set_time(&mut self, timestamp: u64) {
        self.header.timestamp = timestamp;
    }

    pub fn extra_data(&self) -> &Bytes {
        &self.header.extra_data
    }

    pub fn set_extra_data(&mut self, extra_data: Bytes) {
        self.header.extra_data = extra_data;
    }

    pub fn mix_digest(&self) -> B256 {
        self.header.mix_digest
    }

    pub fn set_mix_digest(&mut self, mix_digest: B256) {
        self.header.mix_digest = mix_digest;
    }

    pub fn nonce(&self) -> u64 {
        self.header.nonce_u64()
    }

    pub fn set_nonce(&mut self, nonce: u64) {
        self.header.set_nonce(nonce);
    }

    // -- bookkeeping -------------------------------------------------------

    /// Cumulative difficulty from genesis, when known.
    pub fn total_difficulty(&self) -> Option<U256> {
        self.total_difficulty
    }

    pub fn set_total_difficulty(&mut self, total_difficulty: Option<U256>) {
        self.total_difficulty = total_difficulty;
    }

    pub fn reward(&self) -> U256 {
        self.reward
    }

    pub fn set_reward(&mut self, reward: U256) {
        self.reward = reward;
    }

    // -- encoding ----------------------------------------------------------

    /// Network form: `[header, transactions, uncles]`.
    pub fn rlp_bytes(&self) -> Vec<u8> {
        codec::encode(self)
    }

    /// Storage form: network form plus total difficulty when known.
    pub fn storage_bytes(&self) -> Vec<u8> {
        let payload_length = self.storage_payload_length();
        let mut out = Vec::with_capacity(payload_length + alloy_rlp::length_of_length(payload_length));
        alloy_rlp::Header { list: true, payload_length }.encode(&mut out);
        self.encode_body_fields(&mut out);
        if let Some(td) = self.total_difficulty {
            td.encode(&mut out);
        }
        out
    }

    /// Byte length of the network form.
    pub fn size(&self) -> usize {
        self.length()
    }

    fn network_payload_length(&self) -> usize {
        self.header.length()
            + codec::list_length(&self.body.transactions)
            + codec::list_length(&self.body.uncles)
    }

    fn storage_payload_length(&self) -> usize {
        self.network_payload_length() + self.total_difficulty.map_or(0, |td| td.length())
    }

    fn encode_body_fields(&self, out: &mut dyn BufMut) {
        self.header.encode(out);
        alloy_rlp::encode_list::<Transaction, Transaction>(&self.body.transactions, out);
        alloy_rlp::encode_list::<Header, Header>(&self.body.uncles, out);
    }

    // -- decoding ----------------------------------------------------------

    /// Decode a block in network or storage form.
    ///
    /// All-or-nothing: the input must be exactly one well-formed block.
    pub fn decode_rlp(bytes: &[u8]) -> Result<Self, BlockError> {
        let mut buf = bytes;
        let block = Self::decode_fields(&mut buf)?;
        if !buf.is_empty() {
            return Err(BlockError::TrailingBytes(buf.len()));
        }
        Ok(block)
    }

    fn decode_fields(buf: &mut &[u8]) -> Result<Self, BlockError> {
        let mut payload = codec::take_list_payload(buf)?;
        let payload_length = payload.len();

        if payload.is_empty() {
            return Err(BlockError::MissingField("header"));
        }
        let header = Header::decode(&mut payload)?;

        if payload.is_empty() {
            return Err(BlockError::MissingField("transactions"));
        }
        let transactions = Vec::<Transaction>::decode(&mut payload)?;

        if payload.is_empty() {
            return Err(BlockError::MissingField("uncles"));
        }
        let uncles = Vec::<Header>::decode(&mut payload)?;

        let total_difficulty = if payload.is_empty() {
            None
        } else {
            Some(U256::decode(&mut payload)?)
        };
        // At most four elements: anything after total difficulty is a shape error.
        if !payload.is_empty() {
            return Err(alloy_rlp::Error::ListLengthMismatch {
                expected: payload_length - payload.len(),
                got: payload_length,
            }
            .into());
        }

        debug!(
            txs = transactions.len(),
            uncles = uncles.len(),
            storage_form = total_difficulty.is_some(),
            "decoded block"
        );

        Ok(Self {
            header,
            body: BlockBody { transactions, uncles, receipts: Vec::new() },
            total_difficulty,
            reward: U256::ZERO,
            hash_identity: Identity::Computed,
            parent_identity: Identity::Computed,
        })
    }
}

impl Encodable for Block {
    fn encode(&self, out: &mut dyn BufMut) {
        alloy_rlp::Header { list: true, payload_length: self.network_payload_length() }.encode(out);
        self.encode_body_fields(out);
    }

    fn length(&self) -> usize {
        let payload_length = self.network_payload_length();
        payload_length + alloy_rlp::length_of_length(payload_length)
    }
}

impl Decodable for Block {
    fn decode(buf: &mut &[u8]) -> alloy_rlp::Result<Self> {
        Self::decode_fields(buf).map_err(|err| match err {
            BlockError::MalformedEncoding(inner) => inner,
            BlockError::MissingField(_) => alloy_rlp::Error::InputTooShort,
            _ => alloy_rlp::Error::Custom("invalid block"),
        })
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let td = self.total_difficulty.map_or_else(|| "unknown".to_string(), |td| td.to_string());
        writeln!(f, "BLOCK({}): Size: {} TD: {} {{", self.header.hash(), self.size(), td)?;
        writeln!(f, "NoNonce: {}", self.header.hash_no_nonce())?;
        writeln!(f, "Header:\n[\n{}\n]", self.header)?;
        writeln!(f, "Transactions:")?;
        for tx in &self.body.transactions {
            writeln!(f, "\t{}", tx.hash())?;
        }
        writeln!(f, "Uncles:")?;
        for uncle in &self.body.uncles {
            writeln!(f, "\t{}", uncle.hash())?;
        }
        write!(f, "}}")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
