//! Uniswap V3 fixed-point math used to encode prices, pick tick ranges and
//! size liquidity positions

pub mod full_math;
pub mod tick_math;
pub mod sqrt_price_math;
pub mod position;

pub use full_math::*;
pub use tick_math::*;
pub use sqrt_price_math::*;
pub use position::*;

use alloy::primitives::U256;

pub const RESOLUTION: usize = 96;
/// 2^96
pub const Q96: U256 = U256::from_limbs([0, 1 << 32, 0, 0]);
/// Fee tiers are expressed in hundredths of a basis point.
pub const FEE_DENOMINATOR: u32 = 1_000_000;
pub const BPS_DENOMINATOR: u32 = 10_000;
