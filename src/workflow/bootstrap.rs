//! Pool creation at the price implied by two initial deposits

use alloy::primitives::{Address, U256};
use serde::Serialize;
use tracing::info;
use crate::{
    config::NetworkProfile,
    errors::{WorkflowError, WorkflowResult},
    gateway::ChainGateway,
    math::{encode_sqrt_ratio_x96, sqrt_ratio_to_price},
    types::{CreatePoolRequest, SortedPair, TxOutcome},
};

#[derive(Debug, Clone, Serialize)]
pub struct BootstrapOutcome {
    pub pool: Address,
    pub token0: Address,
    pub token1: Address,
    pub fee: u32,
    pub sqrt_price_x96: U256,
    pub tx: TxOutcome,
}

/// Looks the pool up in the factory. Zero address when it does not exist.
pub async fn pool_by_tokens_and_fee(
    gateway: &dyn ChainGateway,
    profile: &NetworkProfile,
    token_a: Address,
    token_b: Address,
    fee: u32,
) -> WorkflowResult<Address> {
    gateway.get_pool(profile.factory()?, token_a, token_b, fee).await
}

/// Creates and initializes the `token_a`/`token_b` pool for `fee` unless it
/// already exists, priced at `deposit_b / deposit_a`.
///
/// Calling it again for the same pair and fee is a no-op on chain and
/// returns the same pool address.
pub async fn create_pool(
    gateway: &dyn ChainGateway,
    profile: &NetworkProfile,
    token_a: Address,
    token_b: Address,
    deposit_a: U256,
    deposit_b: U256,
    fee: u32,
) -> WorkflowResult<BootstrapOutcome> {
    let manager = profile.position_manager()?;
    let factory = profile.factory()?;

    let pair = SortedPair::new(token_a, token_b);
    let (amount0, amount1) = pair.order(deposit_a, deposit_b);
    let sqrt_price_x96 = encode_sqrt_ratio_x96(amount1, amount0)?;
    info!(
        "💱 Initial price: {:.6} token1 ({}) per token0 ({})",
        sqrt_ratio_to_price(sqrt_price_x96),
        pair.token1,
        pair.token0
    );

    let request = CreatePoolRequest {
        token0: pair.token0,
        token1: pair.token1,
        fee,
        sqrt_price_x96,
    };
    request.validate()?;

    let tx = gateway.create_and_initialize_pool(manager, &request).await?;

    let pool = gateway.get_pool(factory, token_a, token_b, fee).await?;
    if pool == Address::ZERO {
        return Err(WorkflowError::NotFound {
            what: format!("pool for {}/{} at fee {}", token_a, token_b, fee),
            address: None,
        });
    }
    info!("🏊 Pool for tokens {} and {} at {}", token_a, token_b, pool);

    Ok(BootstrapOutcome {
        pool,
        token0: pair.token0,
        token1: pair.token1,
        fee,
        sqrt_price_x96,
        tx,
    })
}
