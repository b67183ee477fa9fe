//! Token amounts required to mint a liquidity position

use alloy::primitives::U256;
use crate::errors::MathError;
use super::{get_amount_0_delta, get_amount_1_delta, get_sqrt_ratio_at_tick};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MintAmounts {
    pub amount0: U256,
    pub amount1: U256,
}

/// Token amounts needed to add `liquidity` between `tick_lower` and
/// `tick_upper` at the pool's current price, rounded up.
///
/// Below the range only token0 is needed, above it only token1.
pub fn mint_amounts(
    sqrt_price_x96: U256,
    current_tick: i32,
    tick_lower: i32,
    tick_upper: i32,
    liquidity: u128,
) -> Result<MintAmounts, MathError> {
    let sqrt_lower = get_sqrt_ratio_at_tick(tick_lower)?;
    let sqrt_upper = get_sqrt_ratio_at_tick(tick_upper)?;

    if current_tick < tick_lower {
        Ok(MintAmounts {
            amount0: get_amount_0_delta(sqrt_lower, sqrt_upper, liquidity, true)?,
            amount1: U256::ZERO,
        })
    } else if current_tick < tick_upper {
        Ok(MintAmounts {
            amount0: get_amount_0_delta(sqrt_price_x96, sqrt_upper, liquidity, true)?,
            amount1: get_amount_1_delta(sqrt_lower, sqrt_price_x96, liquidity, true)?,
        })
    } else {
        Ok(MintAmounts {
            amount0: U256::ZERO,
            amount1: get_amount_1_delta(sqrt_lower, sqrt_upper, liquidity, true)?,
        })
    }
}
