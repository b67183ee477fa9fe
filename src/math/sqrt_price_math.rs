//! Q64.96 price encoding and token amount deltas

use alloy::primitives::{U256, U512};
use std::str::FromStr;
use crate::errors::MathError;
use super::{
    full_math::{div_rounding_up, mul_div, mul_div_rounding_up, narrow},
    tick_math::{MAX_SQRT_RATIO, MIN_SQRT_RATIO},
    BPS_DENOMINATOR, FEE_DENOMINATOR, Q96, RESOLUTION,
};

/// Encodes `amount1 / amount0` as `sqrt(amount1 / amount0) * 2^96`.
///
/// The result is the floor of the exact square root, which is what the
/// pool stores after `initialize`.
pub fn encode_sqrt_ratio_x96(amount1: U256, amount0: U256) -> Result<U256, MathError> {
    if amount0.is_zero() {
        return Err(MathError::DivisionByZero("encode_sqrt_ratio_x96"));
    }
    let ratio_x192 = (U512::from(amount1) << (2 * RESOLUTION)) / U512::from(amount0);
    let sqrt_ratio = narrow(isqrt(ratio_x192)).ok_or(MathError::Overflow("encode_sqrt_ratio_x96"))?;

    if sqrt_ratio < MIN_SQRT_RATIO || sqrt_ratio >= MAX_SQRT_RATIO {
        return Err(MathError::SqrtRatioOutOfBounds(sqrt_ratio.to_string()));
    }
    Ok(sqrt_ratio)
}

fn isqrt(value: U512) -> U512 {
    if value < U512::from(2u8) {
        return value;
    }
    // 2^ceil(bits / 2) is always >= sqrt(value); Newton descends from there
    let mut x = U512::ONE << value.bit_len().div_ceil(2);
    loop {
        let y = (x + value / x) >> 1;
        if y >= x {
            return x;
        }
        x = y;
    }
}

/// Price of token0 in units of token1, for display and sanity checks.
pub fn sqrt_ratio_to_price(sqrt_ratio_x96: U256) -> f64 {
    let sqrt = f64::from_str(&sqrt_ratio_x96.to_string()).unwrap_or(0.0);
    let q96 = 2f64.powi(RESOLUTION as i32);
    (sqrt / q96).powi(2)
}

/// Amount of token0 between two sqrt prices for `liquidity`.
pub fn get_amount_0_delta(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    liquidity: u128,
    round_up: bool,
) -> Result<U256, MathError> {
    let (lower, upper) = if sqrt_ratio_a_x96 > sqrt_ratio_b_x96 {
        (sqrt_ratio_b_x96, sqrt_ratio_a_x96)
    } else {
        (sqrt_ratio_a_x96, sqrt_ratio_b_x96)
    };
    if lower.is_zero() {
        return Err(MathError::DivisionByZero("get_amount_0_delta"));
    }

    let numerator1 = U256::from(liquidity) << RESOLUTION;
    let numerator2 = upper - lower;

    if round_up {
        Ok(div_rounding_up(
            mul_div_rounding_up(numerator1, numerator2, upper)?,
            lower,
        ))
    } else {
        Ok(mul_div(numerator1, numerator2, upper)? / lower)
    }
}

/// Amount of token1 between two sqrt prices for `liquidity`.
pub fn get_amount_1_delta(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    liquidity: u128,
    round_up: bool,
) -> Result<U256, MathError> {
    let (lower, upper) = if sqrt_ratio_a_x96 > sqrt_ratio_b_x96 {
        (sqrt_ratio_b_x96, sqrt_ratio_a_x96)
    } else {
        (sqrt_ratio_a_x96, sqrt_ratio_b_x96)
    };

    if round_up {
        mul_div_rounding_up(U256::from(liquidity), upper - lower, Q96)
    } else {
        mul_div(U256::from(liquidity), upper - lower, Q96)
    }
}

/// Output of an exact-input swap valued at the current spot price, net of
/// the pool fee. Ignores price impact, so it is an upper bound.
pub fn quote_exact_input_at_spot(
    sqrt_ratio_x96: U256,
    amount_in: U256,
    fee: u32,
    zero_for_one: bool,
) -> Result<U256, MathError> {
    if sqrt_ratio_x96.is_zero() {
        return Err(MathError::DivisionByZero("quote_exact_input_at_spot"));
    }
    let after_fee = mul_div(
        amount_in,
        U256::from(FEE_DENOMINATOR.saturating_sub(fee)),
        U256::from(FEE_DENOMINATOR),
    )?;

    if zero_for_one {
        mul_div(mul_div(after_fee, sqrt_ratio_x96, Q96)?, sqrt_ratio_x96, Q96)
    } else {
        mul_div(mul_div(after_fee, Q96, sqrt_ratio_x96)?, Q96, sqrt_ratio_x96)
    }
}

/// `amount * (10000 - slippage_bps) / 10000`, floored.
pub fn apply_slippage(amount: U256, slippage_bps: u32) -> Result<U256, MathError> {
    let keep = BPS_DENOMINATOR.saturating_sub(slippage_bps);
    mul_div(amount, U256::from(keep), U256::from(BPS_DENOMINATOR))
}
