//! Run settings and environment variable handling

use alloy::primitives::U256;
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use std::path::PathBuf;
use std::str::FromStr;
use crate::errors::{WorkflowError, WorkflowResult};
use crate::types::MAX_FEE;
use crate::utils::units::parse_units;

// Workflow defaults
pub const DEFAULT_POOL_FEE: u32 = 100;
pub const DEFAULT_TOKEN_A_DEPOSIT: Decimal = dec!(100000);
pub const DEFAULT_TOKEN_B_DEPOSIT: Decimal = dec!(101000);
pub const DEFAULT_POSITION_LIQUIDITY: Decimal = dec!(110000000);
pub const DEFAULT_TICK_BAND_SPACINGS: u32 = 2;
pub const DEFAULT_SLIPPAGE_BPS: u32 = 50; // 0.5%
pub const MAX_SLIPPAGE_BPS: u32 = 10_000;
pub const DEFAULT_MINT_DEADLINE_SECS: u64 = 600;
pub const MAX_MINT_DEADLINE_SECS: u64 = 86_400;
pub const DEFAULT_SWAP_AMOUNT: Decimal = dec!(10);
pub const DEFAULT_TX_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_TOKEN_DECIMALS: u8 = 18;
/// 10^77 is the largest power of ten a uint256 holds.
pub const MAX_TOKEN_DECIMALS: u8 = 77;

#[derive(Debug, Clone)]
pub struct Settings {
    pub private_key: Option<String>,
    pub pool_fee: u32,
    pub token_decimals: u8,
    pub token_a_deposit: Decimal,
    pub token_b_deposit: Decimal,
    pub position_liquidity: Decimal,
    pub tick_band_spacings: u32,
    pub mint_slippage_bps: u32,
    pub swap_slippage_bps: u32,
    pub mint_deadline_secs: u64,
    pub swap_amount: Decimal,
    pub tx_timeout_secs: u64,
    pub output_dir: PathBuf,
    pub artifacts_dir: PathBuf,
    pub deployments_dir: PathBuf,
}

/// Position parameters in raw units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintSettings {
    pub liquidity: u128,
    pub band_spacings: u32,
    pub slippage_bps: u32,
    pub deadline_secs: u64,
}

fn parse_or<T>(env: &dyn Fn(&str) -> Option<String>, key: &str, default: T) -> WorkflowResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
        Some(raw) => raw
            .parse()
            .map_err(|e| WorkflowError::config(format!("invalid {}='{}': {}", key, raw, e))),
        None => Ok(default),
    }
}

impl Settings {
    /// Reads settings from the process environment.
    pub fn load() -> WorkflowResult<Self> {
        Self::from_lookup(&|key| std::env::var(key).ok())
    }

    pub fn from_lookup(env: &dyn Fn(&str) -> Option<String>) -> WorkflowResult<Self> {
        let settings = Self {
            private_key: env("PRIVATE_KEY").filter(|k| !k.trim().is_empty()),
            pool_fee: parse_or(env, "POOL_FEE", DEFAULT_POOL_FEE)?,
            token_decimals: parse_or(env, "TOKEN_DECIMALS", DEFAULT_TOKEN_DECIMALS)?,
            token_a_deposit: parse_or(env, "TOKEN_A_DEPOSIT", DEFAULT_TOKEN_A_DEPOSIT)?,
            token_b_deposit: parse_or(env, "TOKEN_B_DEPOSIT", DEFAULT_TOKEN_B_DEPOSIT)?,
            position_liquidity: parse_or(env, "POSITION_LIQUIDITY", DEFAULT_POSITION_LIQUIDITY)?,
            tick_band_spacings: parse_or(env, "TICK_BAND_SPACINGS", DEFAULT_TICK_BAND_SPACINGS)?,
            mint_slippage_bps: parse_or(env, "MINT_SLIPPAGE_BPS", DEFAULT_SLIPPAGE_BPS)?,
            swap_slippage_bps: parse_or(env, "SWAP_SLIPPAGE_BPS", DEFAULT_SLIPPAGE_BPS)?,
            mint_deadline_secs: parse_or(env, "MINT_DEADLINE_SECS", DEFAULT_MINT_DEADLINE_SECS)?,
            swap_amount: parse_or(env, "SWAP_AMOUNT", DEFAULT_SWAP_AMOUNT)?,
            tx_timeout_secs: parse_or(env, "TX_TIMEOUT_SECS", DEFAULT_TX_TIMEOUT_SECS)?,
            output_dir: PathBuf::from(env("OUTPUT_DIR").unwrap_or_else(|| "output".to_string())),
            artifacts_dir: PathBuf::from(env("ARTIFACTS_DIR").unwrap_or_else(|| "artifacts".to_string())),
            deployments_dir: PathBuf::from(
                env("DEPLOYMENTS_DIR").unwrap_or_else(|| "deployments".to_string()),
            ),
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> WorkflowResult<()> {
        if self.pool_fee == 0 || self.pool_fee >= MAX_FEE {
            return Err(WorkflowError::config(format!("POOL_FEE {} out of range", self.pool_fee)));
        }
        if self.token_a_deposit <= Decimal::ZERO || self.token_b_deposit <= Decimal::ZERO {
            return Err(WorkflowError::config("initial deposits must be positive"));
        }
        if self.tick_band_spacings == 0 {
            return Err(WorkflowError::config("TICK_BAND_SPACINGS must be at least 1"));
        }
        if self.mint_slippage_bps > MAX_SLIPPAGE_BPS || self.swap_slippage_bps > MAX_SLIPPAGE_BPS {
            return Err(WorkflowError::config("slippage must not exceed 10000 bps"));
        }
        if self.token_decimals > MAX_TOKEN_DECIMALS {
            return Err(WorkflowError::config(format!(
                "TOKEN_DECIMALS {} exceeds {}",
                self.token_decimals, MAX_TOKEN_DECIMALS
            )));
        }
        if self.mint_deadline_secs == 0 || self.mint_deadline_secs > MAX_MINT_DEADLINE_SECS {
            return Err(WorkflowError::config(format!(
                "MINT_DEADLINE_SECS must be within 1..={}",
                MAX_MINT_DEADLINE_SECS
            )));
        }
        if self.tx_timeout_secs == 0 {
            return Err(WorkflowError::config("TX_TIMEOUT_SECS must be positive"));
        }
        Ok(())
    }

    pub fn require_private_key(&self) -> WorkflowResult<&str> {
        self.private_key
            .as_deref()
            .ok_or_else(|| WorkflowError::config("PRIVATE_KEY is required to sign transactions"))
    }

    pub fn deposit_a_raw(&self) -> WorkflowResult<U256> {
        parse_units(self.token_a_deposit, self.token_decimals)
    }

    pub fn deposit_b_raw(&self) -> WorkflowResult<U256> {
        parse_units(self.token_b_deposit, self.token_decimals)
    }

    pub fn swap_amount_raw(&self) -> WorkflowResult<U256> {
        parse_units(self.swap_amount, self.token_decimals)
    }

    pub fn mint_settings(&self) -> WorkflowResult<MintSettings> {
        let raw = parse_units(self.position_liquidity, self.token_decimals)?;
        if raw.is_zero() || raw > U256::from(u128::MAX) {
            return Err(WorkflowError::config(format!(
                "POSITION_LIQUIDITY {} does not fit uint128",
                self.position_liquidity
            )));
        }
        Ok(MintSettings {
            liquidity: raw.to::<u128>(),
            band_spacings: self.tick_band_spacings,
            slippage_bps: self.mint_slippage_bps,
            deadline_secs: self.mint_deadline_secs,
        })
    }

    pub fn tx_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.tx_timeout_secs)
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.output_dir.join("logs")
    }

    pub fn reports_dir(&self) -> PathBuf {
        self.output_dir.join("reports")
    }
}
