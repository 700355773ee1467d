/// Fibonacci and Lucas numbers and the golden-ratio approximation built on them.
/// All functions are pure; values are re-derived on every call.
use crate::numeric::BigNumber;

pub const GOLDEN_RATIO: f64 = 1.618_033_988_749_895;

/// Largest index whose fast-doubling intermediates stay inside `u128`.
const EXACT_LIMIT: u32 = 180;

/// F(n) by fast doubling:
/// F(2m) = F(m) * (2F(m+1) - F(m)), F(2m+1) = F(m)^2 + F(m+1)^2.
#[inline]
pub fn fibonacci_exact(n: u32) -> u128 {
    debug_assert!(n <= EXACT_LIMIT);
    let (mut a, mut b) = (0u128, 1u128);
    for i in (0..u32::BITS - n.leading_zeros()).rev() {
        let d = a * (2 * b - a);
        let e = a * a + b * b;
        a = d;
        b = e;
        if (n >> i) & 1 == 1 {
            let c = a + b;
            a = b;
            b = c;
        }
    }
    a
}

/// F(n), switching to Binet's estimate phi^n / sqrt(5) past the `u128` range.
pub fn fibonacci(n: u32) -> BigNumber {
    if n <= EXACT_LIMIT {
        BigNumber::from(fibonacci_exact(n))
    } else {
        BigNumber::from_f64(GOLDEN_RATIO).pow(n as f64) / BigNumber::from_f64(5f64.sqrt())
    }
}

/// L(n) = F(n-1) + F(n+1), with L(0) = 2.
pub fn lucas(n: u32) -> BigNumber {
    if n == 0 {
        return BigNumber::TWO;
    }
    if n < EXACT_LIMIT {
        BigNumber::from(fibonacci_exact(n - 1) + fibonacci_exact(n + 1))
    } else {
        BigNumber::from_f64(GOLDEN_RATIO).pow(n as f64)
    }
}

/// F(t+1) / F(t), the t-th ratio approximating phi; 1 at t = 0.
pub fn golden_approximation(t: u32) -> f64 {
    if t == 0 {
        return 1.0;
    }
    (fibonacci(t + 1) / fibonacci(t)).to_f64()
}

/// |phi - F(t+1)/F(t)|, with 1 at t = 0.
///
/// Uses F(t+1) - phi*F(t) = (-1/phi)^t, so the error is phi^-t / F(t) and
/// never cancels to zero the way the direct difference does.
pub fn golden_delta(t: u32) -> BigNumber {
    if t == 0 {
        return BigNumber::ONE;
    }
    BigNumber::from_f64(GOLDEN_RATIO).pow(-(t as f64)) / fibonacci(t)
}
