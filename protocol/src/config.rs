//! # Protocol Configuration & Constants
//!
//! Header shape and the protocol bounds used by the block core live here.
//! Field widths are carried by the primitive types themselves (`B256`,
//! `Address`, `Bloom`, `B64`).
//!
//! [`ProtocolParams`] carries the bounds that are tunable per network
//! (devnets like larger extra data) and is what the command-line tool
//! loads from its `--config` file.

use serde::{Deserialize, Serialize};

use crate::error::BlockError;

// ---------------------------------------------------------------------------
// Header Shape
// ---------------------------------------------------------------------------

/// Number of fields in a sealed header (including mix digest and nonce).
pub const SEALED_HEADER_FIELDS: usize = 15;

/// Number of fields hashed for the mining target (mix digest and nonce dropped).
pub const UNSEALED_HEADER_FIELDS: usize = 13;

// ---------------------------------------------------------------------------
// Protocol Bounds
// ---------------------------------------------------------------------------

/// Maximum size of the header's extra data, in bytes.
pub const MAXIMUM_EXTRA_DATA_SIZE: usize = 1024;

/// Gas limit of the genesis block.
pub const GENESIS_GAS_LIMIT: u64 = 3_141_592;

/// Difficulty of the genesis block.
pub const GENESIS_DIFFICULTY: u64 = 131_072;

/// The gas limit may never drop below this.
pub const MIN_GAS_LIMIT: u64 = 125_000;

// ---------------------------------------------------------------------------
// ProtocolParams
// ---------------------------------------------------------------------------

/// Per-network protocol parameters.
///
/// Missing keys fall back to the mainnet constants above, so a config file
/// only needs to name what it changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProtocolParams {
    /// Upper bound on `extra_data` length.
    pub max_extra_data_size: usize,
    /// Gas limit of the genesis block.
    pub genesis_gas_limit: u64,
    /// Difficulty of the genesis block.
    pub genesis_difficulty: u64,
    /// Lower bound on any block's gas limit.
    pub min_gas_limit: u64,
}

impl Default for ProtocolParams {
    fn default() -> Self {
        Self {
            max_extra_data_size: MAXIMUM_EXTRA_DATA_SIZE,
            genesis_gas_limit: GENESIS_GAS_LIMIT,
            genesis_difficulty: GENESIS_DIFFICULTY,
            min_gas_limit: MIN_GAS_LIMIT,
        }
    }
}

impl ProtocolParams {
    /// Parse parameters from a JSON document and check them for consistency.
    pub fn from_json_str(json: &str) -> Result<Self, BlockError> {
        let params: Self =
            serde_json::from_str(json).map_err(|e| BlockError::InvalidConfig(e.to_string()))?;
        params.validate()?;
        Ok(params)
    }

    /// Reject parameter combinations no chain could run with.
    pub fn validate(&self) -> Result<(), BlockError> {
        if self.genesis_gas_limit < self.min_gas_limit {
            return Err(BlockError::InvalidConfig(format!(
                "genesis gas limit {} below minimum {}",
                self.genesis_gas_limit, self.min_gas_limit
            )));
        }
        Ok(())
    }

    /// Enforce the extra-data bound. The header itself accepts any length.
    pub fn check_extra_data(&self, extra: &[u8]) -> Result<(), BlockError> {
        if extra.len() > self.max_extra_data_size {
            return Err(BlockError::ExtraDataTooLong {
                len: extra.len(),
                max: self.max_extra_data_size,
            });
        }
        Ok(())
    }
}
