/// Series mechanics: the single addend of the limit summation.
use crate::numeric::BigNumber;

/// term(j) = (1 + k^k_exp / j) ^ (j^j_exp), for j >= 1.
///
/// The base stays small (k is an upgrade level), so it is built in `f64`;
/// only the power can leave the `f64` range.
#[inline]
pub fn term(j: u64, k: u64, k_exp: f64, j_exp: f64) -> BigNumber {
    debug_assert!(j >= 1, "series index starts at 1");
    let j = j as f64;
    let base = 1.0 + (k as f64).powf(k_exp) / j;
    BigNumber::from_f64(base).pow(j.powf(j_exp))
}
