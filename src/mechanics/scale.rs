/// Display scaling helpers shared by theories.
use crate::numeric::BigNumber;

/// Log-scaled value for the host's 2D graph: sign(v) * log10(1 + |v|).
#[inline]
pub fn graph_value(v: BigNumber) -> f64 {
    v.sign() as f64 * (BigNumber::ONE + v.abs()).log10()
}

/// Formats a milestone exponent for LaTeX: at most two decimals, no trailing zeros.
pub fn fmt_exponent(x: f64) -> String {
    let s = format!("{x:.2}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}
