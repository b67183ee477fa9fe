//! ERC-20 allowance issuance

use alloy::primitives::{Address, U256};
use tracing::info;
use crate::{errors::WorkflowResult, gateway::ChainGateway, types::TxOutcome};

/// Lets `spender` pull `amount` of `token` from the gateway's owner account.
/// Returns after the approval is confirmed.
pub async fn approve(
    gateway: &dyn ChainGateway,
    token: Address,
    spender: Address,
    amount: U256,
) -> WorkflowResult<TxOutcome> {
    let outcome = gateway.approve(token, spender, amount).await?;
    info!(
        "🔓 {} approved {} to spend {} of {}",
        gateway.owner(),
        spender,
        amount,
        token
    );
    Ok(outcome)
}
