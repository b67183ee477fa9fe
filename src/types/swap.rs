//! Single-hop exact-input swap request

use alloy::primitives::{Address, U256};
use serde::Serialize;
use crate::{
    errors::{WorkflowError, WorkflowResult},
    math::{MAX_SQRT_RATIO, MIN_SQRT_RATIO},
};

/// `ISwapRouter02.ExactInputSingleParams`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwapRequest {
    pub token_in: Address,
    pub token_out: Address,
    pub fee: u32,
    pub recipient: Address,
    pub amount_in: U256,
    pub amount_out_minimum: U256,
    /// zero means no price limit
    pub sqrt_price_limit_x96: U256,
}

impl SwapRequest {
    pub fn validate(&self) -> WorkflowResult<()> {
        const ACTION: &str = "exactInputSingle";
        if self.amount_in.is_zero() {
            return Err(WorkflowError::rejected(ACTION, "amountIn must be non-zero"));
        }
        if self.token_in == self.token_out {
            return Err(WorkflowError::rejected(ACTION, "tokenIn and tokenOut are the same token"));
        }
        if self.recipient == Address::ZERO {
            return Err(WorkflowError::rejected(ACTION, "recipient is the zero address"));
        }
        let limit = self.sqrt_price_limit_x96;
        if !limit.is_zero() && (limit <= MIN_SQRT_RATIO || limit >= MAX_SQRT_RATIO) {
            return Err(WorkflowError::rejected(ACTION, format!("sqrtPriceLimitX96 {} out of range", limit)));
        }
        Ok(())
    }

    /// Direction of the swap in pool terms.
    pub fn zero_for_one(&self) -> bool {
        self.token_in < self.token_out
    }
}
