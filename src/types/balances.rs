//! Balance report rows

use alloy::primitives::{Address, U256};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceEntry {
    pub holder_label: String,
    pub holder: Address,
    pub token_symbol: String,
    pub token: Address,
    pub decimals: u8,
    pub amount: U256,
    pub fetched_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BalanceReport {
    pub label: String,
    pub entries: Vec<BalanceEntry>,
}

impl BalanceReport {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            entries: Vec::new(),
        }
    }

    pub fn amount(&self, holder: Address, token: Address) -> Option<U256> {
        self.entries
            .iter()
            .find(|e| e.holder == holder && e.token == token)
            .map(|e| e.amount)
    }
}

/// Change in the pool's balances across a swap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwapDelta {
    pub pool_token_in_before: U256,
    pub pool_token_in_after: U256,
    pub pool_token_out_before: U256,
    pub pool_token_out_after: U256,
    pub amount_in: U256,
}

impl SwapDelta {
    pub fn between(
        before: &BalanceReport,
        after: &BalanceReport,
        pool: Address,
        token_in: Address,
        token_out: Address,
        amount_in: U256,
    ) -> Option<Self> {
        Some(Self {
            pool_token_in_before: before.amount(pool, token_in)?,
            pool_token_in_after: after.amount(pool, token_in)?,
            pool_token_out_before: before.amount(pool, token_out)?,
            pool_token_out_after: after.amount(pool, token_out)?,
            amount_in,
        })
    }

    /// The pool received exactly `amount_in` and paid out a non-negative amount.
    pub fn is_consistent(&self) -> bool {
        self.pool_token_in_before.checked_add(self.amount_in) == Some(self.pool_token_in_after)
            && self.pool_token_out_after <= self.pool_token_out_before
    }

    pub fn amount_out(&self) -> U256 {
        self.pool_token_out_before.saturating_sub(self.pool_token_out_after)
    }
}
