// tests/mechanics.rs
use limit_series::BigNumber;
use limit_series::mechanics::{
    GOLDEN_RATIO, fibonacci, fibonacci_exact, fmt_exponent, golden_approximation, golden_delta,
    graph_value, lucas, stepwise_power_sum, term,
};
use rstest::rstest;

fn approx(a: BigNumber, b: f64) -> bool {
    (a.to_f64() - b).abs() <= 1e-9 * b.abs().max(1.0)
}

/* ──────────────────────────────────────────────────────────────────────────
1) Series term
────────────────────────────────────────────────────────────────────────── */

#[rstest]
#[case(1, 2, 1.0, 1.0, 3.0)]
#[case(2, 2, 1.0, 1.0, 4.0)]
#[case(2, 3, 1.0, 1.0, 6.25)]
#[case(3, 0, 1.0, 1.0, 1.0)]
#[case(1, 4, 1.5, 1.0, 9.0)]
fn term_values(#[case] j: u64, #[case] k: u64, #[case] k_exp: f64, #[case] j_exp: f64, #[case] expected: f64) {
    assert!(approx(term(j, k, k_exp, j_exp), expected));
}

#[test]
fn term_approaches_e_to_the_k() {
    let t = term(1_000_000, 1, 1.0, 1.0);
    assert!((t.to_f64() - std::f64::consts::E).abs() < 1e-5);
}

/* ──────────────────────────────────────────────────────────────────────────
2) Fibonacci / Lucas / golden ratio
────────────────────────────────────────────────────────────────────────── */

#[rstest]
#[case(0, 0)]
#[case(1, 1)]
#[case(2, 1)]
#[case(10, 55)]
#[case(90, 2_880_067_194_370_816_120)]
fn fibonacci_exact_values(#[case] n: u32, #[case] expected: u128) {
    assert_eq!(fibonacci_exact(n), expected);
}

#[test]
fn fibonacci_switches_to_binet_smoothly() {
    let exact = fibonacci(180);
    let estimated = fibonacci(181) / BigNumber::from_f64(GOLDEN_RATIO);
    assert!((exact.log10() - estimated.log10()).abs() < 1e-9);
    assert!((fibonacci(200).log10() - 41.448).abs() < 1e-3);
}

#[rstest]
#[case(0, 2.0)]
#[case(1, 1.0)]
#[case(2, 3.0)]
#[case(5, 11.0)]
#[case(10, 123.0)]
fn lucas_values(#[case] n: u32, #[case] expected: f64) {
    assert!(approx(lucas(n), expected));
}

#[test]
fn ratios_approach_phi() {
    assert_eq!(golden_approximation(0), 1.0);
    assert!((golden_approximation(5) - 1.6).abs() < 1e-12);
    assert!((golden_approximation(40) - GOLDEN_RATIO).abs() < 1e-12);
}

#[test]
fn delta_matches_the_direct_difference() {
    assert_eq!(golden_delta(0), BigNumber::ONE);
    for t in 1..=20 {
        let direct = (GOLDEN_RATIO - golden_approximation(t)).abs();
        let delta = golden_delta(t).to_f64();
        assert!((delta - direct).abs() <= 1e-6 * direct, "t={t}: {delta} vs {direct}");
    }
}

#[test]
fn delta_never_reaches_zero() {
    let mut last = golden_delta(1);
    for t in 2..=100 {
        let d = golden_delta(t);
        assert!(!d.is_zero());
        assert!(d < last);
        last = d;
    }
}

/* ──────────────────────────────────────────────────────────────────────────
3) Stepwise growth and display helpers
────────────────────────────────────────────────────────────────────────── */

#[rstest]
#[case(0, 0.0)]
#[case(5, 5.0)]
#[case(10, 10.0)]
#[case(15, 20.0)]
#[case(25, 50.0)]
fn stepwise_power_sum_doubles_every_ten_levels(#[case] level: u32, #[case] expected: f64) {
    assert!(approx(stepwise_power_sum(level, 2.0, 10, 0.0), expected));
}

#[rstest]
#[case(1.15, "1.15")]
#[case(1.0 + 2.0 * 0.15, "1.3")]
#[case(2.0 - 2.0 * 0.1, "1.8")]
#[case(2.0, "2")]
#[case(1.02, "1.02")]
fn exponents_render_without_trailing_zeros(#[case] x: f64, #[case] expected: &str) {
    assert_eq!(fmt_exponent(x), expected);
}

#[test]
fn graph_value_is_log_scaled() {
    assert_eq!(graph_value(BigNumber::ZERO), 0.0);
    assert!((graph_value(BigNumber::from_f64(9.0)) - 1.0).abs() < 1e-12);
    assert!((graph_value(BigNumber::from_parts(1.0, 1500)) - 1500.0).abs() < 1e-9);
}
