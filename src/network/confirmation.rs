//! Waiting for transaction receipts

use alloy::{
    network::{Ethereum, ReceiptResponse},
    providers::PendingTransactionBuilder,
    transports::Transport,
};
use std::time::Duration;
use tracing::{debug, info, warn};
use crate::{
    errors::{WorkflowError, WorkflowResult},
    types::TxOutcome,
};

/// Blocks until `pending` has `confirmations` confirmations or `timeout`
/// elapses. A reverted receipt is a transaction error.
pub async fn await_confirmation<T>(
    pending: PendingTransactionBuilder<T, Ethereum>,
    action: &str,
    confirmations: u64,
    timeout: Duration,
) -> WorkflowResult<TxOutcome>
where
    T: Transport + Clone,
{
    let tx_hash = *pending.tx_hash();
    info!("📡 {} sent: {:?} (waiting for {} confirmation(s))", action, tx_hash, confirmations);

    let receipt = tokio::select! {
        result = pending.with_required_confirmations(confirmations).get_receipt() => {
            result.map_err(|e| WorkflowError::Transaction {
                action: action.to_string(),
                message: format!("failed to obtain receipt for {:?}: {}", tx_hash, e),
                source: Some(e.into()),
            })?
        }
        _ = tokio::time::sleep(timeout) => {
            warn!("⏰ {} not confirmed after {:?}: {:?}", action, timeout, tx_hash);
            return Err(WorkflowError::Timeout {
                action: action.to_string(),
                waited: timeout,
            });
        }
    };

    if !ReceiptResponse::status(&receipt) {
        return Err(WorkflowError::rejected(
            action,
            format!("reverted in tx {:?}", receipt.transaction_hash),
        ));
    }

    debug!("gas used by {}: {}", action, receipt.gas_used);
    info!("✅ {} confirmed in block {:?}", action, receipt.block_number);

    Ok(TxOutcome::new(action, receipt.transaction_hash, receipt.block_number)
        .with_contract_address(receipt.contract_address))
}
