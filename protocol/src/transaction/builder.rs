//! Transaction construction via the builder pattern.
//!
//! The block core treats a [`Transaction`] as opaque apart from two things:
//! it has a canonical encoding, and the Keccak-256 of that encoding is its
//! identity hash. The record itself is the legacy nine-field layout so that
//! blocks built here are byte-compatible with the rest of the network.
//!
//! The builder does not sign. `v`, `r` and `s` are carried verbatim; the
//! signer lives outside this crate.

use alloy_primitives::{Address, Bytes, TxKind, B256, U256};
use alloy_rlp::{RlpDecodable, RlpEncodable};
use serde::{Deserialize, Serialize};

use crate::codec;
use crate::crypto::sha3;

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// A signed legacy transaction.
///
/// Field order is the canonical encoding order. Reordering these fields
/// changes every transaction hash and every transactions root.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, RlpEncodable, RlpDecodable,
)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Sender's account sequence number.
    pub nonce: u64,
    /// Price per unit of gas, in wei.
    pub gas_price: U256,
    /// Maximum gas this transaction may consume.
    pub gas_limit: U256,
    /// Recipient, or contract creation.
    pub to: TxKind,
    /// Value transferred, in wei.
    pub value: U256,
    /// Call data or contract init code.
    pub input: Bytes,
    /// Signature recovery id.
    pub v: u64,
    /// Signature `r` component.
    pub r: U256,
    /// Signature `s` component.
    pub s: U256,
}

impl Transaction {
    /// Identity hash: Keccak-256 of the canonical encoding.
    pub fn hash(&self) -> B256 {
        sha3(codec::encode(self))
    }

    /// Canonical encoding of this transaction.
    pub fn rlp_bytes(&self) -> Vec<u8> {
        codec::encode(self)
    }

    /// Returns `true` if this transaction deploys a contract.
    pub fn is_contract_creation(&self) -> bool {
        self.to.is_create()
    }

    /// Recipient address, if this is a call.
    pub fn recipient(&self) -> Option<Address> {
        self.to.to().copied()
    }
}

// ---------------------------------------------------------------------------
// TransactionBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`Transaction`].
///
/// Unset numeric fields default to zero and the recipient defaults to
/// contract creation.
#[derive(Debug, Clone, Default)]
pub struct TransactionBuilder {
    tx: Transaction,
}

impl TransactionBuilder {
    /// Start a new builder with every field zeroed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sender nonce.
    pub fn nonce(mut self, nonce: u64) -> Self {
        self.tx.nonce = nonce;
        self
    }

    /// Set the gas price.
    pub fn gas_price(mut self, gas_price: U256) -> Self {
        self.tx.gas_price = gas_price;
        self
    }

    /// Set the gas limit.
    pub fn gas_limit(mut self, gas_limit: U256) -> Self {
        self.tx.gas_limit = gas_limit;
        self
    }

    /// Send to `address` rather than creating a contract.
    pub fn to(mut self, address: Address) -> Self {
        self.tx.to = TxKind::Call(address);
        self
    }

    /// Set the transferred value.
    pub fn value(mut self, value: U256) -> Self {
        self.tx.value = value;
        self
    }

    /// Set the call data.
    pub fn input(mut self, input: impl Into<Bytes>) -> Self {
        self.tx.input = input.into();
        self
    }

    /// Attach an externally produced signature.
    pub fn signature(mut self, v: u64, r: U256, s: U256) -> Self {
        self.tx.v = v;
        self.tx.r = r;
        self.tx.s = s;
        self
    }

    /// Finish building.
    pub fn build(self) -> Transaction {
        self.tx
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
