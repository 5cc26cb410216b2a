//! Post-execution receipts.
//!
//! A receipt records what executing a transaction did: the state root after
//! it ran, the cumulative gas used in the block so far, and the logs it
//! emitted along with their bloom. Receipts are produced locally while a
//! block is assembled. They are committed to by the header (receipts root
//! and logs bloom) but are never part of a block's network or storage form.

use alloy_primitives::{Address, Bloom, Bytes, B256, U256};
use alloy_rlp::{RlpDecodable, RlpEncodable};
use serde::{Deserialize, Serialize};

use crate::roots::logs_bloom;

/// A log entry emitted during execution.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, RlpEncodable, RlpDecodable,
)]
pub struct Log {
    /// Contract that emitted the log.
    pub address: Address,
    /// Indexed topics. Address and topics feed the bloom; data does not.
    pub topics: Vec<B256>,
    /// Unindexed payload.
    pub data: Bytes,
}

/// Outcome of one transaction within a block.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, RlpEncodable, RlpDecodable,
)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    /// State root after the transaction was applied.
    pub post_state: B256,
    /// Gas used by this and every earlier transaction in the block.
    pub cumulative_gas_used: U256,
    /// Bloom over this receipt's logs.
    pub bloom: Bloom,
    /// Logs in emission order.
    pub logs: Vec<Log>,
}

impl Receipt {
    /// Build a receipt, deriving its bloom from `logs`.
    pub fn new(post_state: B256, cumulative_gas_used: U256, logs: Vec<Log>) -> Self {
        Self {
            post_state,
            cumulative_gas_used,
            bloom: logs_bloom(&logs),
            logs,
        }
    }
}
