//! # Canonical Encoding
//!
//! Recursive length-prefixed encoding (RLP) of ordered field lists. Scalars
//! encode as their minimal big-endian bytes, fixed-size arrays and byte
//! strings as length-prefixed strings, and nested lists recursively with
//! the same rules. The encoding is a pure function of the values and their
//! order, so it is what every hash in the block core is computed over.
//!
//! Encoding cannot fail. Decoding is strict: a value must consume its input
//! exactly, and list payloads must not overrun the buffer they came from.

use alloy_rlp::{Decodable, Encodable};

use crate::error::BlockError;

/// Canonically encode a single value.
pub fn encode<T: Encodable + ?Sized>(value: &T) -> Vec<u8> {
    let mut out = Vec::with_capacity(value.length());
    value.encode(&mut out);
    out
}

/// Canonically encode a slice as a list of its items.
pub fn encode_list<T: Encodable>(items: &[T]) -> Vec<u8> {
    let mut out = Vec::with_capacity(alloy_rlp::list_length::<T, T>(items));
    alloy_rlp::encode_list::<T, T>(items, &mut out);
    out
}

/// Byte length of the canonical encoding of a list of `items`.
pub fn list_length<T: Encodable>(items: &[T]) -> usize {
    alloy_rlp::list_length::<T, T>(items)
}

/// Decode a value that must occupy all of `bytes`.
pub fn decode_exact<T: Decodable>(bytes: &[u8]) -> Result<T, BlockError> {
    let mut buf = bytes;
    let value = T::decode(&mut buf)?;
    if !buf.is_empty() {
        return Err(BlockError::TrailingBytes(buf.len()));
    }
    Ok(value)
}

/// Split a list's payload off the front of `buf`, advancing `buf` past it.
///
/// Fails if the next item is a string rather than a list, or if the
/// declared payload length runs past the end of the input.
pub fn take_list_payload<'a>(buf: &mut &'a [u8]) -> Result<&'a [u8], BlockError> {
    let header = alloy_rlp::Header::decode(buf)?;
    if !header.list {
        return Err(alloy_rlp::Error::UnexpectedString.into());
    }
    if header.payload_length > buf.len() {
        return Err(alloy_rlp::Error::InputTooShort.into());
    }
    let (payload, rest) = buf.split_at(header.payload_length);
    *buf = rest;
    Ok(payload)
}
