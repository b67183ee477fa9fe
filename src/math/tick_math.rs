//! Tick <-> sqrt price conversion and tick-spacing helpers

use alloy::primitives::U256;
use crate::errors::MathError;

pub const MIN_TICK: i32 = -887272;
pub const MAX_TICK: i32 = -MIN_TICK;

/// sqrt ratio at `MIN_TICK`
pub const MIN_SQRT_RATIO: U256 = U256::from_limbs([4295128739, 0, 0, 0]);
/// sqrt ratio at `MAX_TICK`
pub const MAX_SQRT_RATIO: U256 =
    U256::from_limbs([6743328256752651558, 17280870778742802505, 4294805859, 0]);

// 1 / sqrt(1.0001)^(2^i) in Q128, indexed by the tick bit that selects it.
const TICK_MULTIPLIERS: [(u32, u128); 19] = [
    (0x2, 0xfff97272373d413259a46990580e213a),
    (0x4, 0xfff2e50f5f656932ef12357cf3c7fdcc),
    (0x8, 0xffe5caca7e10e4e61c3624eaa0941cd0),
    (0x10, 0xffcb9843d60f6159c9db58835c926644),
    (0x20, 0xff973b41fa98c081472e6896dfb254c0),
    (0x40, 0xff2ea16466c96a3843ec78b326b52861),
    (0x80, 0xfe5dee046a99a2a811c461f1969c3053),
    (0x100, 0xfcbe86c7900a88aedcffc83b479aa3a4),
    (0x200, 0xf987a7253ac413176f2b074cf7815e54),
    (0x400, 0xf3392b0822b70005940c7a398e4b70f3),
    (0x800, 0xe7159475a2c29b7443b29c7fa6e889d9),
    (0x1000, 0xd097f3bdfd2022b8845ad8f792aa5825),
    (0x2000, 0xa9f746462d870fdf8a65dc1f90e061e5),
    (0x4000, 0x70d869a156d2a1b890bb3df62baf32f7),
    (0x8000, 0x31be135f97d08fd981231505542fcfa6),
    (0x10000, 0x9aa508b5b7a84e1c677de54f3e99bc9),
    (0x20000, 0x5d6af8dedb81196699c329225ee604),
    (0x40000, 0x2216e584f5fa1ea926041bedfe98),
    (0x80000, 0x48a170391f7dc42444e8fa2),
];

/// Returns sqrt(1.0001^tick) as a Q64.96 value.
pub fn get_sqrt_ratio_at_tick(tick: i32) -> Result<U256, MathError> {
    let abs_tick = tick.unsigned_abs();
    if abs_tick > MAX_TICK as u32 {
        return Err(MathError::TickOutOfBounds(tick));
    }

    let mut ratio = if abs_tick & 0x1 != 0 {
        U256::from(0xfffcb933bd6fad37aa2d162d1a594001u128)
    } else {
        U256::ONE << 128
    };

    for (bit, multiplier) in TICK_MULTIPLIERS {
        if abs_tick & bit != 0 {
            ratio = ratio.wrapping_mul(U256::from(multiplier)) >> 128;
        }
    }

    if tick > 0 {
        ratio = U256::MAX / ratio;
    }

    // Q128.128 -> Q128.96, rounding up so the result never understates the price
    let round_up = !(ratio & U256::from(u32::MAX)).is_zero();
    Ok((ratio >> 32) + U256::from(round_up as u8))
}

/// Rounds `tick` to the nearest multiple of `tick_spacing`.
///
/// Ties round toward positive infinity (`-5` with spacing 10 becomes `0`,
/// `5` becomes `10`), matching `Math.round` in the Uniswap SDK. The result
/// always lies inside `[MIN_TICK, MAX_TICK]`.
pub fn nearest_usable_tick(tick: i32, tick_spacing: i32) -> Result<i32, MathError> {
    if tick_spacing <= 0 {
        return Err(MathError::InvalidTickSpacing(tick_spacing));
    }
    if !(MIN_TICK..=MAX_TICK).contains(&tick) {
        return Err(MathError::TickOutOfBounds(tick));
    }

    let rounded = (tick + tick_spacing / 2).div_euclid(tick_spacing) * tick_spacing;
    if rounded < MIN_TICK {
        Ok(rounded + tick_spacing)
    } else if rounded > MAX_TICK {
        Ok(rounded - tick_spacing)
    } else {
        Ok(rounded)
    }
}

/// Smallest tick a position may use for the given spacing.
pub fn min_usable_tick(tick_spacing: i32) -> Result<i32, MathError> {
    if tick_spacing <= 0 {
        return Err(MathError::InvalidTickSpacing(tick_spacing));
    }
    Ok(-(MAX_TICK / tick_spacing) * tick_spacing)
}

/// Largest tick a position may use for the given spacing.
pub fn max_usable_tick(tick_spacing: i32) -> Result<i32, MathError> {
    if tick_spacing <= 0 {
        return Err(MathError::InvalidTickSpacing(tick_spacing));
    }
    Ok((MAX_TICK / tick_spacing) * tick_spacing)
}
