//! Conversions between human token amounts and raw integer units

use alloy::primitives::U256;
use rust_decimal::Decimal;
use crate::errors::{WorkflowError, WorkflowResult};

/// Scales `amount` by `10^decimals`.
///
/// Fails on negative amounts and on amounts with more fractional digits than
/// the token carries.
pub fn parse_units(amount: Decimal, decimals: u8) -> WorkflowResult<U256> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(WorkflowError::config(format!("negative token amount {}", amount)));
    }
    let normalized = amount.normalize();
    let scale = normalized.scale();
    let mantissa = U256::from(normalized.mantissa().unsigned_abs());

    if scale > decimals as u32 {
        return Err(WorkflowError::config(format!(
            "{} has more than {} fractional digits",
            amount, decimals
        )));
    }

    let factor = U256::from(10u8)
        .checked_pow(U256::from(decimals as u32 - scale))
        .ok_or_else(|| WorkflowError::config(format!("10^{} does not fit uint256", decimals)))?;
    mantissa
        .checked_mul(factor)
        .ok_or_else(|| WorkflowError::config(format!("{} overflows uint256 at {} decimals", amount, decimals)))
}

/// Renders raw units as a decimal string with trailing zeros trimmed.
pub fn format_units(raw: U256, decimals: u8) -> String {
    if decimals == 0 {
        return raw.to_string();
    }
    // past 77 decimals every uint256 is below one whole token
    let (whole, fraction) = match U256::from(10u8).checked_pow(U256::from(decimals)) {
        Some(factor) => (raw / factor, raw % factor),
        None => (U256::ZERO, raw),
    };
    if fraction.is_zero() {
        return whole.to_string();
    }
    let padded = format!("{:0>width$}", fraction.to_string(), width = decimals as usize);
    format!("{}.{}", whole, padded.trim_end_matches('0'))
}
