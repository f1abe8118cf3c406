//! Decimal Normalization
//!
//! Scales raw on-chain integer amounts by a token's decimal count and
//! computes reserve rates. All arithmetic is exact `BigDecimal`; only the
//! rate division rounds, at the library's default precision, and it rounds
//! the same way for every reserve of a pool.
//!
//! Author: AI-Generated
//! Created: 2026-10-18

use crate::error::NormalizeError;
use alloy::primitives::U256;
use bigdecimal::num_bigint::{BigInt, Sign};
use bigdecimal::{BigDecimal, Zero};
use std::str::FromStr;

/// Fixed precision of the chain's native asset
pub const NATIVE_DECIMALS: u8 = 18;

/// `raw / 10^decimals`, exact.
///
/// `raw` must be a plain base-10 non-negative integer (no sign, no fraction,
/// no exponent). Surrounding whitespace is tolerated.
pub fn normalize(raw: &str, decimals: u8) -> Result<BigDecimal, NormalizeError> {
    let digits = raw.trim();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(NormalizeError::InvalidAmount(raw.to_string()));
    }

    let int = BigInt::from_str(digits).map_err(|_| NormalizeError::InvalidAmount(raw.to_string()))?;
    Ok(BigDecimal::new(int, i64::from(decimals)))
}

/// `normalize` for an already-typed 256-bit amount
pub fn normalize_u256(raw: U256, decimals: u8) -> BigDecimal {
    let int = BigInt::from_bytes_be(Sign::Plus, &raw.to_be_bytes::<32>());
    BigDecimal::new(int, i64::from(decimals))
}

/// `balance / total_supply`, or `None` for an empty supply
pub fn rate(balance: &BigDecimal, total_supply: &BigDecimal) -> Option<BigDecimal> {
    if total_supply.is_zero() {
        return None;
    }
    Some(balance / total_supply)
}

/// Plain decimal rendering: no exponent, no trailing zeros
pub fn format_rate(rate: &BigDecimal) -> String {
    if rate.is_zero() {
        return "0".to_string();
    }
    rate.normalized().to_plain_string()
}
