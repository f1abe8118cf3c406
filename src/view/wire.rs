//! String-encoded view results
//!
//! The view service renders arrays as comma-joined elements in array order
//! and scalars as plain decimal/address strings. Nothing structural is
//! guaranteed, so every element is validated here before use.

use crate::error::WireError;
use alloy::primitives::{Address, U256};
use std::str::FromStr;

/// Split a comma-joined result into trimmed elements.
/// Optional surrounding brackets are tolerated; an empty string is an empty list.
pub fn split_list(raw: &str) -> Vec<&str> {
    let body = raw.trim();
    let body = body
        .strip_prefix('[')
        .and_then(|b| b.strip_suffix(']'))
        .unwrap_or(body)
        .trim();

    if body.is_empty() {
        return Vec::new();
    }
    body.split(',').map(str::trim).collect()
}

/// Validate one address element, returning it trimmed (checksum casing kept)
pub fn parse_address(raw: &str) -> Result<&str, WireError> {
    let trimmed = raw.trim();
    let hex = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .ok_or_else(|| WireError::InvalidAddress(raw.to_string()))?;

    if hex.len() != 40 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(WireError::InvalidAddress(raw.to_string()));
    }
    Ok(trimmed)
}

/// Same as `parse_address`, additionally rejecting the zero address
pub fn parse_nonzero_address(raw: &str) -> Result<&str, WireError> {
    let addr = parse_address(raw)?;
    if is_zero_address(addr) {
        return Err(WireError::InvalidAddress(raw.to_string()));
    }
    Ok(addr)
}

pub fn is_zero_address(addr: &str) -> bool {
    Address::from_str(addr.trim()).map(|a| a == Address::ZERO).unwrap_or(false)
}

pub fn parse_address_list(raw: &str) -> Result<Vec<String>, WireError> {
    split_list(raw)
        .into_iter()
        .map(|el| parse_address(el).map(str::to_string))
        .collect()
}

/// Base-10 unsigned integer, up to 256 bits
pub fn parse_uint(raw: &str) -> Result<U256, WireError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(WireError::InvalidUint(raw.to_string()));
    }
    U256::from_str_radix(trimmed, 10).map_err(|_| WireError::InvalidUint(raw.to_string()))
}

pub fn parse_uint_list(raw: &str) -> Result<Vec<U256>, WireError> {
    split_list(raw).into_iter().map(parse_uint).collect()
}

/// First element of a comma-joined result, which must not be empty
pub fn first_element(raw: &str) -> Result<&str, WireError> {
    split_list(raw).into_iter().next().ok_or(WireError::Empty)
}

pub fn expect_len<T>(items: &[T], expected: usize) -> Result<(), WireError> {
    if items.len() < expected {
        return Err(WireError::TooFewElements {
            expected,
            actual: items.len(),
        });
    }
    Ok(())
}
