//! Token balance reads and before/after reports

use alloy::primitives::{Address, U256};
use chrono::Utc;
use crate::{
    errors::WorkflowResult,
    gateway::ChainGateway,
    types::{BalanceEntry, BalanceReport, TokenInfo},
};

pub async fn check_balance_of(
    gateway: &dyn ChainGateway,
    holder: Address,
    token: Address,
) -> WorkflowResult<U256> {
    gateway.balance_of(token, holder).await
}

/// Reads every `holders` × `tokens` balance. Reports are diagnostic, so the
/// rows are not re-read before use.
pub async fn collect_report(
    gateway: &dyn ChainGateway,
    label: &str,
    holders: &[(String, Address)],
    tokens: &[TokenInfo],
) -> WorkflowResult<BalanceReport> {
    let mut report = BalanceReport::new(label);
    for (holder_label, holder) in holders {
        for token in tokens {
            let amount = check_balance_of(gateway, *holder, token.address).await?;
            report.entries.push(BalanceEntry {
                holder_label: holder_label.clone(),
                holder: *holder,
                token_symbol: token.symbol.clone(),
                token: token.address,
                decimals: token.decimals,
                amount,
                fetched_at: Utc::now(),
            });
        }
    }
    Ok(report)
}
