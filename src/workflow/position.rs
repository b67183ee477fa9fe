//! Liquidity position minting around the current pool price

use alloy::primitives::Address;
use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, warn};
use crate::{
    config::{MintSettings, NetworkProfile},
    errors::{WorkflowError, WorkflowResult},
    gateway::ChainGateway,
    math::{apply_slippage, mint_amounts, MintAmounts},
    types::{MintRequest, PoolImmutables, PoolState, PositionParams, Snapshot, TickRange, TxOutcome},
};
use super::approval::approve;

#[derive(Debug, Clone, Serialize)]
pub struct MintOutcome {
    pub position: PositionParams,
    pub request: MintRequest,
    pub approvals: Vec<TxOutcome>,
    pub tx: TxOutcome,
}

/// Reads immutables and dynamic state concurrently.
pub async fn fetch_pool(
    gateway: &dyn ChainGateway,
    pool: Address,
) -> WorkflowResult<(Snapshot<PoolImmutables>, Snapshot<PoolState>)> {
    let (immutables, state) = tokio::join!(gateway.pool_immutables(pool), gateway.pool_state(pool));
    Ok((Snapshot::now(immutables?), Snapshot::now(state?)))
}

fn amounts_for(state: &PoolState, range: TickRange, liquidity: u128) -> WorkflowResult<MintAmounts> {
    Ok(mint_amounts(state.sqrt_price_x96, state.tick, range.lower, range.upper, liquidity)?)
}

/// `(now, now + deadline_secs)` in unix seconds.
fn mint_deadline(deadline_secs: u64) -> WorkflowResult<(u64, u64)> {
    let now = u64::try_from(Utc::now().timestamp()).unwrap_or_default();
    let deadline = now.checked_add(deadline_secs).ok_or_else(|| {
        WorkflowError::config(format!("mint deadline of {} seconds overflows the clock", deadline_secs))
    })?;
    Ok((now, deadline))
}

/// Mints `settings.liquidity` in a band of `settings.band_spacings` tick
/// spacings either side of the pool's current tick, owned by the gateway's
/// owner account.
pub async fn create_position(
    gateway: &dyn ChainGateway,
    profile: &NetworkProfile,
    pool: Address,
    settings: &MintSettings,
) -> WorkflowResult<MintOutcome> {
    let manager = profile.position_manager()?;
    let (immutables, state) = fetch_pool(gateway, pool).await?;

    if !state.is_initialized() {
        return Err(WorkflowError::rejected("mint", format!("pool {} is not initialized", pool)));
    }
    info!("💧 Current liquidity: {} (tick {})", state.liquidity, state.tick);

    let range = TickRange::around(state.tick, immutables.tick_spacing, settings.band_spacings)?;
    let position = PositionParams {
        pool,
        liquidity: settings.liquidity,
        range,
    };
    let mut amounts = amounts_for(&state, position.range, position.liquidity)?;
    info!("   amount0Desired: {}", amounts.amount0);
    info!("   amount1Desired: {}", amounts.amount1);

    let mut approvals = vec![
        approve(gateway, immutables.token0, manager, amounts.amount0).await?,
        approve(gateway, immutables.token1, manager, amounts.amount1).await?,
    ];
    let approved = amounts;

    // Re-read after the approvals confirmed; mint amounts follow the current price.
    debug!("re-reading pool state, previous snapshot is {}ms old", state.age().num_milliseconds());
    let fresh = Snapshot::now(gateway.pool_state(pool).await?);
    if fresh.sqrt_price_x96 != state.sqrt_price_x96 {
        warn!(
            "⚠️ Pool price moved while approving (tick {} -> {}), recomputing amounts",
            state.tick, fresh.tick
        );
        amounts = amounts_for(&fresh, position.range, position.liquidity)?;
        if amounts.amount0 > approved.amount0 {
            approvals.push(approve(gateway, immutables.token0, manager, amounts.amount0).await?);
        }
        if amounts.amount1 > approved.amount1 {
            approvals.push(approve(gateway, immutables.token1, manager, amounts.amount1).await?);
        }
    }

    let (now, deadline) = mint_deadline(settings.deadline_secs)?;
    let request = MintRequest {
        token0: immutables.token0,
        token1: immutables.token1,
        fee: immutables.fee,
        tick_lower: position.range.lower,
        tick_upper: position.range.upper,
        amount0_desired: amounts.amount0,
        amount1_desired: amounts.amount1,
        amount0_min: apply_slippage(amounts.amount0, settings.slippage_bps)?,
        amount1_min: apply_slippage(amounts.amount1, settings.slippage_bps)?,
        recipient: gateway.owner(),
        deadline,
    };
    request.validate(now, immutables.tick_spacing)?;

    let tx = gateway.mint(manager, &request).await?;
    info!(
        "🎯 Minted liquidity {} in [{}, {}] on {}",
        position.liquidity, position.range.lower, position.range.upper, pool
    );

    Ok(MintOutcome {
        position,
        request,
        approvals,
        tx,
    })
}
