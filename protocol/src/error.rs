//! Error types for block encoding, decoding and validation.
//!
//! Encoding and hashing an in-memory block never fails, so everything in
//! here comes from one of three places: bytes handed to us from outside
//! (peers, storage), a body check against header roots, or a protocol
//! bound enforced by [`ProtocolParams`](crate::config::ProtocolParams).

use alloy_primitives::B256;
use thiserror::Error;

/// Errors produced by the block core.
#[derive(Debug, Error)]
pub enum BlockError {
    /// The bytes do not match the expected shape or field types.
    #[error("malformed encoding: {0}")]
    MalformedEncoding(#[from] alloy_rlp::Error),

    /// An expected sub-structure is absent from an otherwise valid list.
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// A complete value was decoded but bytes were left over.
    #[error("{0} trailing bytes after canonical encoding")]
    TrailingBytes(usize),

    /// A header root does not match the body it is supposed to commit to.
    #[error("{field} mismatch: header={header}, computed={computed}")]
    RootMismatch {
        /// Name of the header field that disagrees with the body.
        field: &'static str,
        /// Value carried by the header.
        header: B256,
        /// Value recomputed from the body.
        computed: B256,
    },

    /// Extra data exceeds the protocol bound.
    #[error("extra data too long: {len} bytes (max {max})")]
    ExtraDataTooLong {
        /// Length of the offending extra data.
        len: usize,
        /// Configured maximum.
        max: usize,
    },

    /// Protocol parameters could not be parsed or are inconsistent.
    #[error("invalid protocol parameters: {0}")]
    InvalidConfig(String),
}

impl BlockError {
    /// Whether this error originates from undecodable input, as opposed to a
    /// well-formed value that failed a check.
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            BlockError::MalformedEncoding(_)
                | BlockError::MissingField(_)
                | BlockError::TrailingBytes(_)
        )
    }
}
