//! Full bootstrap → mint → swap run

use alloy::primitives::{Address, U256};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;
use crate::{
    config::{MintSettings, NetworkProfile, Settings},
    errors::WorkflowResult,
    gateway::ChainGateway,
    types::{BalanceReport, SwapDelta, TokenInfo},
    utils::display::print_balance_report,
};
use super::{
    balances::collect_report,
    bootstrap::{create_pool, BootstrapOutcome},
    position::{create_position, MintOutcome},
    swap::{swap_input, SwapOutcome},
};

/// Everything a run needs, resolved up front.
#[derive(Debug, Clone)]
pub struct WorkflowPlan {
    pub token_a: TokenInfo,
    pub token_b: TokenInfo,
    pub deposit_a: U256,
    pub deposit_b: U256,
    pub fee: u32,
    pub mint: MintSettings,
    pub swap_amount: U256,
    pub swap_slippage_bps: u32,
}

impl WorkflowPlan {
    /// DAI is token A and USDC token B, as on the configured test networks.
    pub fn from_settings(settings: &Settings, profile: &NetworkProfile) -> WorkflowResult<Self> {
        Ok(Self {
            token_a: TokenInfo::new("DAI", profile.dai()?, settings.token_decimals),
            token_b: TokenInfo::new("USDC", profile.usdc()?, settings.token_decimals),
            deposit_a: settings.deposit_a_raw()?,
            deposit_b: settings.deposit_b_raw()?,
            fee: settings.pool_fee,
            mint: settings.mint_settings()?,
            swap_amount: settings.swap_amount_raw()?,
            swap_slippage_bps: settings.swap_slippage_bps,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub network: String,
    pub owner: Address,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub bootstrap: BootstrapOutcome,
    pub position: MintOutcome,
    pub swap: SwapOutcome,
    pub reports: Vec<BalanceReport>,
    pub swap_delta: Option<SwapDelta>,
}

impl RunSummary {
    pub fn pool(&self) -> Address {
        self.bootstrap.pool
    }

    pub fn is_consistent(&self) -> bool {
        self.swap_delta.as_ref().is_some_and(SwapDelta::is_consistent)
    }
}

/// Runs every step in order. The first failure aborts the run; confirmed
/// transactions from earlier steps stay on chain.
pub async fn run(
    gateway: &dyn ChainGateway,
    profile: &NetworkProfile,
    plan: &WorkflowPlan,
) -> WorkflowResult<RunSummary> {
    let run_id = Uuid::new_v4();
    let started_at = Utc::now();
    let owner = gateway.owner();
    info!("🚀 Starting run {} on {} as {}", run_id, profile.name, owner);

    let bootstrap = create_pool(
        gateway,
        profile,
        plan.token_a.address,
        plan.token_b.address,
        plan.deposit_a,
        plan.deposit_b,
        plan.fee,
    )
    .await?;
    let pool = bootstrap.pool;

    let position = create_position(gateway, profile, pool, &plan.mint).await?;

    let holders = vec![("pool".to_string(), pool), ("owner".to_string(), owner)];
    let tokens = vec![plan.token_a.clone(), plan.token_b.clone()];

    let before = collect_report(gateway, "after creating position", &holders, &tokens).await?;
    print_balance_report(&before);

    let swap = swap_input(
        gateway,
        profile,
        plan.token_a.address,
        plan.token_b.address,
        plan.swap_amount,
        pool,
        plan.swap_slippage_bps,
    )
    .await?;

    let after = collect_report(gateway, "after swap", &holders, &tokens).await?;
    print_balance_report(&after);

    let swap_delta = SwapDelta::between(
        &before,
        &after,
        pool,
        plan.token_a.address,
        plan.token_b.address,
        plan.swap_amount,
    );
    match &swap_delta {
        Some(delta) if delta.is_consistent() => {
            info!("✅ Pool received {} {} and paid out {} {}",
                plan.swap_amount, plan.token_a.symbol, delta.amount_out(), plan.token_b.symbol);
        }
        Some(delta) => {
            warn!(
                "⚠️ Pool balances inconsistent with the swap: {} {} -> {} (amountIn {})",
                plan.token_a.symbol, delta.pool_token_in_before, delta.pool_token_in_after, delta.amount_in
            );
        }
        None => warn!("⚠️ Pool balances missing from the reports"),
    }

    Ok(RunSummary {
        run_id,
        network: profile.name.clone(),
        owner,
        started_at,
        finished_at: Utc::now(),
        bootstrap,
        position,
        swap,
        reports: vec![before, after],
        swap_delta,
    })
}
