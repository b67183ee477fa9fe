//! Liquidity position parameters and the mint request

use alloy::primitives::{Address, U256};
use serde::Serialize;
use crate::{
    errors::{MathError, WorkflowError, WorkflowResult},
    math::{max_usable_tick, min_usable_tick, nearest_usable_tick},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TickRange {
    pub lower: i32,
    pub upper: i32,
}

impl TickRange {
    /// A range `band_spacings` tick spacings either side of the usable tick
    /// nearest to `current_tick`, clamped into the usable tick domain.
    pub fn around(current_tick: i32, tick_spacing: i32, band_spacings: u32) -> Result<Self, MathError> {
        if band_spacings == 0 {
            return Err(MathError::EmptyTickBand);
        }
        let base = nearest_usable_tick(current_tick, tick_spacing)?;
        let half_width = i64::from(tick_spacing) * i64::from(band_spacings);

        let min = min_usable_tick(tick_spacing)?;
        let max = max_usable_tick(tick_spacing)?;
        let lower = (i64::from(base) - half_width).max(i64::from(min)) as i32;
        let upper = (i64::from(base) + half_width).min(i64::from(max)) as i32;
        if lower >= upper {
            return Err(MathError::TickSpacingTooWide(tick_spacing));
        }

        Ok(Self { lower, upper })
    }

    pub fn contains(&self, tick: i32) -> bool {
        self.lower <= tick && tick < self.upper
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PositionParams {
    pub pool: Address,
    pub liquidity: u128,
    pub range: TickRange,
}

/// `INonfungiblePositionManager.MintParams`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MintRequest {
    pub token0: Address,
    pub token1: Address,
    pub fee: u32,
    pub tick_lower: i32,
    pub tick_upper: i32,
    pub amount0_desired: U256,
    pub amount1_desired: U256,
    pub amount0_min: U256,
    pub amount1_min: U256,
    pub recipient: Address,
    /// unix seconds
    pub deadline: u64,
}

impl MintRequest {
    pub fn validate(&self, now_unix: u64, tick_spacing: i32) -> WorkflowResult<()> {
        const ACTION: &str = "mint";
        if self.token0 >= self.token1 {
            return Err(WorkflowError::rejected(ACTION, "token0 must sort below token1"));
        }
        if self.tick_lower >= self.tick_upper {
            return Err(WorkflowError::rejected(
                ACTION,
                format!("tickLower {} must be below tickUpper {}", self.tick_lower, self.tick_upper),
            ));
        }
        if self.tick_lower % tick_spacing != 0 || self.tick_upper % tick_spacing != 0 {
            return Err(WorkflowError::rejected(
                ACTION,
                format!("ticks must be multiples of spacing {}", tick_spacing),
            ));
        }
        if self.amount0_desired.is_zero() && self.amount1_desired.is_zero() {
            return Err(WorkflowError::rejected(ACTION, "nothing to deposit"));
        }
        if self.amount0_min > self.amount0_desired || self.amount1_min > self.amount1_desired {
            return Err(WorkflowError::rejected(ACTION, "minimum amounts exceed desired amounts"));
        }
        if self.recipient == Address::ZERO {
            return Err(WorkflowError::rejected(ACTION, "recipient is the zero address"));
        }
        if self.deadline <= now_unix {
            return Err(WorkflowError::rejected(
                ACTION,
                format!("deadline {} already passed", self.deadline),
            ));
        }
        Ok(())
    }
}
