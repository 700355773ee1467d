/// Stepwise growth used by level-driven variables.
use crate::numeric::BigNumber;

/// Grows by 1 per level for `length` levels, then by `base` per level for the
/// next `length`, then by `base^2`, and so on, starting from `offset`.
///
/// value = offset + d * (base^q - 1) + r * base^q, with q = level / length,
/// r = level % length, d = length / (base - 1).
#[inline]
pub fn stepwise_power_sum(level: u32, base: f64, length: u32, offset: f64) -> BigNumber {
    debug_assert!(base > 1.0 && length > 0);
    let q = level / length;
    let r = level % length;
    let d = length as f64 / (base - 1.0);
    let step = BigNumber::from_f64(base).pow(q as f64);
    BigNumber::from_f64(offset)
        + BigNumber::from_f64(d) * (step - BigNumber::ONE)
        + BigNumber::from(r) * step
}
