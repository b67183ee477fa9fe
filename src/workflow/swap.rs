//! Single-hop exact-input swap through the router

use alloy::primitives::{Address, U256};
use serde::Serialize;
use tracing::info;
use crate::{
    config::NetworkProfile,
    errors::{WorkflowError, WorkflowResult},
    gateway::ChainGateway,
    math::{apply_slippage, quote_exact_input_at_spot},
    types::{Snapshot, SwapRequest, TxOutcome},
};
use super::approval::approve;

#[derive(Debug, Clone, Serialize)]
pub struct SwapOutcome {
    pub pool: Address,
    pub request: SwapRequest,
    pub approval: TxOutcome,
    pub tx: TxOutcome,
}

/// Swaps exactly `amount_in` of `token_in` for `token_out` in `pool`.
///
/// With `slippage_bps > 0` the minimum output is the spot quote net of the
/// pool fee, less the tolerance. Zero disables the minimum.
pub async fn swap_input(
    gateway: &dyn ChainGateway,
    profile: &NetworkProfile,
    token_in: Address,
    token_out: Address,
    amount_in: U256,
    pool: Address,
    slippage_bps: u32,
) -> WorkflowResult<SwapOutcome> {
    const ACTION: &str = "exactInputSingle";
    if amount_in.is_zero() {
        return Err(WorkflowError::rejected(ACTION, "amountIn must be non-zero"));
    }
    let router = profile.swap_router()?;

    let immutables = Snapshot::now(gateway.pool_immutables(pool).await?);
    let pool_tokens = [immutables.token0, immutables.token1];
    if !pool_tokens.contains(&token_in) || !pool_tokens.contains(&token_out) {
        return Err(WorkflowError::rejected(
            ACTION,
            format!("pool {} does not trade {} for {}", pool, token_in, token_out),
        ));
    }

    let approval = approve(gateway, token_in, router, amount_in).await?;

    let mut request = SwapRequest {
        token_in,
        token_out,
        fee: immutables.fee,
        recipient: gateway.owner(),
        amount_in,
        amount_out_minimum: U256::ZERO,
        sqrt_price_limit_x96: U256::ZERO,
    };

    // Read after the approval confirmed; the quote sets amountOutMinimum.
    if slippage_bps > 0 {
        let state = Snapshot::now(gateway.pool_state(pool).await?);
        let quote = quote_exact_input_at_spot(
            state.sqrt_price_x96,
            amount_in,
            immutables.fee,
            request.zero_for_one(),
        )?;
        request.amount_out_minimum = apply_slippage(quote, slippage_bps)?;
    }
    request.validate()?;

    let tx = gateway.exact_input_single(router, &request).await?;
    info!(
        "🔄 Swapped {} of {} for at least {} of {}",
        amount_in, token_in, request.amount_out_minimum, token_out
    );

    Ok(SwapOutcome {
        pool,
        request,
        approval,
        tx,
    })
}
