//! Confirmed transaction summaries

use alloy::primitives::{Address, TxHash};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TxOutcome {
    pub action: String,
    pub tx_hash: TxHash,
    pub block_number: Option<u64>,
    /// set for contract deployments
    pub contract_address: Option<Address>,
}

impl TxOutcome {
    pub fn new(action: impl Into<String>, tx_hash: TxHash, block_number: Option<u64>) -> Self {
        Self {
            action: action.into(),
            tx_hash,
            block_number,
            contract_address: None,
        }
    }

    pub fn with_contract_address(mut self, address: Option<Address>) -> Self {
        self.contract_address = address;
        self
    }
}
