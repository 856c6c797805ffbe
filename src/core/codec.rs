//! Fixed-width element encoding.
//!
//! Every field element crossing a byte boundary (native backends, wire-facing
//! callers) is a big-endian, zero-left-padded, non-negative byte string of
//! exactly `ceil(bits(p) / 8)` bytes.

extern crate alloc;
use alloc::vec;
use alloc::vec::Vec;

use num_bigint::BigUint;

use crate::polynomial::ZpPolyError;

/// Encodes `value` into exactly `width` big-endian bytes.
///
/// # Returns
/// * `Err(ZpPolyError::InvalidEncoding)` if `value` needs more than `width` bytes.
pub fn encode_element(value: &BigUint, width: usize) -> Result<Vec<u8>, ZpPolyError> {
    let raw = value.to_bytes_be();
    // to_bytes_be yields [0] for zero
    let raw: &[u8] = if raw == [0u8] { &[] } else { &raw };
    if raw.len() > width {
        return Err(ZpPolyError::InvalidEncoding);
    }
    let mut out = vec![0u8; width];
    out[width - raw.len()..].copy_from_slice(raw);
    Ok(out)
}

/// Decodes a big-endian byte string. Leading zeros are ignored.
pub fn decode_element(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_be(bytes)
}

/// Encodes a slice of elements with a common width.
pub fn encode_elements(values: &[BigUint], width: usize) -> Result<Vec<Vec<u8>>, ZpPolyError> {
    values.iter().map(|v| encode_element(v, width)).collect()
}

/// Decodes a slice of fixed-width byte strings.
///
/// # Returns
/// * `Err(ZpPolyError::InvalidEncoding)` if any entry is not exactly `width` bytes.
pub fn decode_elements(bytes: &[Vec<u8>], width: usize) -> Result<Vec<BigUint>, ZpPolyError> {
    bytes
        .iter()
        .map(|b| {
            if b.len() != width {
                Err(ZpPolyError::InvalidEncoding)
            } else {
                Ok(decode_element(b))
            }
        })
        .collect()
}
