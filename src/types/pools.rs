//! Pool descriptors read from the chain and pool creation requests

use alloy::primitives::{Address, U256};
use serde::Serialize;
use crate::{
    errors::{WorkflowError, WorkflowResult},
    math::{sqrt_ratio_to_price, MAX_SQRT_RATIO, MIN_SQRT_RATIO},
};

/// Largest fee a pool may be created with (100%, in hundredths of a bip).
pub const MAX_FEE: u32 = 1_000_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoolImmutables {
    pub factory: Address,
    pub token0: Address,
    pub token1: Address,
    pub fee: u32,
    pub tick_spacing: i32,
    pub max_liquidity_per_tick: u128,
}

/// `liquidity()` plus the `slot0()` tuple, in its on-chain order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoolState {
    pub liquidity: u128,
    pub sqrt_price_x96: U256,
    pub tick: i32,
    pub observation_index: u16,
    pub observation_cardinality: u16,
    pub observation_cardinality_next: u16,
    pub fee_protocol: u8,
    pub unlocked: bool,
}

impl PoolState {
    /// token1 per token0 at the current sqrt price
    pub fn price(&self) -> f64 {
        sqrt_ratio_to_price(self.sqrt_price_x96)
    }

    pub fn is_initialized(&self) -> bool {
        !self.sqrt_price_x96.is_zero()
    }
}

/// Arguments of `createAndInitializePoolIfNecessary`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatePoolRequest {
    pub token0: Address,
    pub token1: Address,
    pub fee: u32,
    pub sqrt_price_x96: U256,
}

impl CreatePoolRequest {
    pub fn validate(&self) -> WorkflowResult<()> {
        const ACTION: &str = "createAndInitializePoolIfNecessary";
        if self.token0 >= self.token1 {
            return Err(WorkflowError::rejected(
                ACTION,
                format!("token0 {} must sort below token1 {}", self.token0, self.token1),
            ));
        }
        if self.fee == 0 || self.fee >= MAX_FEE {
            return Err(WorkflowError::rejected(ACTION, format!("invalid fee tier {}", self.fee)));
        }
        if self.sqrt_price_x96 < MIN_SQRT_RATIO || self.sqrt_price_x96 >= MAX_SQRT_RATIO {
            return Err(WorkflowError::rejected(
                ACTION,
                format!("sqrtPriceX96 {} out of range", self.sqrt_price_x96),
            ));
        }
        Ok(())
    }
}
