//! Console rendering of reports and pool state

use tracing::info;
use crate::{
    config::NetworkProfile,
    types::{BalanceReport, PoolImmutables, PoolState},
    utils::units::format_units,
};

pub fn print_balance_report(report: &BalanceReport) {
    info!("\n📊 Balances {}", report.label);
    for entry in &report.entries {
        info!(
            "   {} {} ({}): {}",
            entry.token_symbol,
            entry.holder_label,
            entry.holder,
            format_units(entry.amount, entry.decimals)
        );
    }
}

pub fn print_pool_summary(pool: &alloy::primitives::Address, immutables: &PoolImmutables, state: &PoolState) {
    info!("\n🏊 Pool {}", pool);
    info!("   token0: {}", immutables.token0);
    info!("   token1: {}", immutables.token1);
    info!("   fee: {} ({:.2} bps), tick spacing {}", immutables.fee, immutables.fee as f64 / 100.0, immutables.tick_spacing);
    info!("   price: {:.6} token1 per token0 (tick {})", state.price(), state.tick);
    info!("   liquidity: {}", state.liquidity);
}

pub fn print_network_profile(profile: &NetworkProfile) {
    info!("🌐 Network: {} (chain {})", profile.name, profile.chain_id);
    info!("   RPC: {}", profile.rpc_url);
    info!("   Confirmations: {}", profile.block_confirmations);
    if let Some(factory) = profile.factory {
        info!("   Factory: {}", factory);
    }
    if let Some(manager) = profile.position_manager {
        info!("   Position manager: {}", manager);
    }
    if let Some(router) = profile.swap_router {
        info!("   Swap router: {}", router);
    }
}
