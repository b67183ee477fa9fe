//! 512-bit intermediate multiply/divide helpers

use alloy::primitives::{U256, U512};
use crate::errors::MathError;

/// Computes `a * b / denominator` without losing the high bits of the product.
pub fn mul_div(a: U256, b: U256, denominator: U256) -> Result<U256, MathError> {
    if denominator.is_zero() {
        return Err(MathError::DivisionByZero("mul_div"));
    }
    let quotient = U512::from(a) * U512::from(b) / U512::from(denominator);
    narrow(quotient).ok_or(MathError::Overflow("mul_div"))
}

/// Like [`mul_div`], rounding up when the division leaves a remainder.
pub fn mul_div_rounding_up(a: U256, b: U256, denominator: U256) -> Result<U256, MathError> {
    let result = mul_div(a, b, denominator)?;
    if a.mul_mod(b, denominator).is_zero() {
        return Ok(result);
    }
    result
        .checked_add(U256::ONE)
        .ok_or(MathError::Overflow("mul_div_rounding_up"))
}

/// Divides `a` by `b`, rounding up. Callers must ensure `b != 0`.
pub fn div_rounding_up(a: U256, b: U256) -> U256 {
    let (quotient, remainder) = a.div_rem(b);
    if remainder.is_zero() {
        quotient
    } else {
        quotient + U256::ONE
    }
}

pub(crate) fn narrow(value: U512) -> Option<U256> {
    if value.bit_len() > 256 {
        return None;
    }
    Some(value.to::<U256>())
}
