//! Token descriptors and canonical pair ordering

use alloy::primitives::Address;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenInfo {
    pub symbol: String,
    pub address: Address,
    pub decimals: u8,
}

impl TokenInfo {
    pub fn new(symbol: impl Into<String>, address: Address, decimals: u8) -> Self {
        Self {
            symbol: symbol.into(),
            address,
            decimals,
        }
    }
}

/// Two tokens in pool order: `token0` has the numerically smaller address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortedPair {
    pub token0: Address,
    pub token1: Address,
    /// `true` when the caller's first token became `token1`
    pub flipped: bool,
}

impl SortedPair {
    pub fn new(token_a: Address, token_b: Address) -> Self {
        if token_a < token_b {
            Self { token0: token_a, token1: token_b, flipped: false }
        } else {
            Self { token0: token_b, token1: token_a, flipped: true }
        }
    }

    /// Reorders per-token values given in caller order into pool order.
    pub fn order<T>(&self, for_a: T, for_b: T) -> (T, T) {
        if self.flipped {
            (for_b, for_a)
        } else {
            (for_a, for_b)
        }
    }
}
