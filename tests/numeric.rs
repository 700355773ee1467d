// tests/numeric.rs
use limit_series::BigNumber;
use rstest::rstest;
use serde::{Deserialize, Serialize};

/* ──────────────────────────────────────────────────────────────────────────
1) Normalisation and arithmetic
────────────────────────────────────────────────────────────────────────── */

#[test]
fn parts_are_normalised() {
    let a = BigNumber::from_parts(123.0, 0);
    assert!((a.mantissa() - 1.23).abs() < 1e-12);
    assert_eq!(a.exponent(), 2);

    let b = BigNumber::from_parts(0.5, 3);
    assert!((b.mantissa() - 5.0).abs() < 1e-12);
    assert_eq!(b.exponent(), 2);

    assert!(BigNumber::from_f64(f64::NAN).is_zero());
    assert!(BigNumber::from_f64(f64::INFINITY).log10().is_finite());

    let tiny = BigNumber::from_f64(1e-320);
    assert!((1.0..10.0).contains(&tiny.mantissa()), "{tiny:?}");
    assert!((tiny.log10() + 320.0).abs() < 1e-3, "{tiny:?}");
    assert!(tiny * BigNumber::from_parts(1.0, 320) < BigNumber::TWO);
}

#[test]
fn addition_drops_insignificant_addends() {
    let big = BigNumber::from_parts(1.0, 20);
    assert_eq!(big + BigNumber::ONE, big);
    assert_eq!(BigNumber::from_f64(2.0) + BigNumber::from_f64(3.0), BigNumber::from_f64(5.0));
    assert!((big - big).is_zero());
}

#[test]
fn products_carry_the_exponent() {
    let p = BigNumber::from_parts(5.0, 1000) * BigNumber::from_parts(4.0, 1000);
    assert_eq!(p.exponent(), 2001);
    assert!((p.mantissa() - 2.0).abs() < 1e-12);

    let q = p / BigNumber::from_parts(2.0, 2001);
    assert!((q.to_f64() - 1.0).abs() < 1e-12);
    assert!((BigNumber::TEN / BigNumber::ZERO).is_zero());
}

#[test]
fn powers_leave_the_f64_range() {
    let p = BigNumber::TWO.pow(10_000.0);
    assert_eq!(p.exponent(), 3010);
    assert!((p.log10() - 10_000.0 * 2f64.log10()).abs() < 1e-9);
    assert!(p.to_f64().is_infinite());

    assert_eq!(BigNumber::from_f64(7.0).pow(0.0), BigNumber::ONE);
    assert!(BigNumber::ZERO.pow(2.0).is_zero());
    assert_eq!(BigNumber::from_f64(-2.0).pow(3.0).sign(), -1);
}

#[test]
fn square_root_splits_odd_exponents() {
    let r = BigNumber::from_parts(1.0, 1501).sqrt();
    assert_eq!(r.exponent(), 750);
    assert!((r.mantissa() - 10f64.sqrt()).abs() < 1e-12);
    assert!((BigNumber::from_f64(16.0).sqrt().to_f64() - 4.0).abs() < 1e-12);
}

#[test]
fn ordering_follows_sign_then_magnitude() {
    let values = [
        BigNumber::from_parts(-1.0, 500),
        BigNumber::from_f64(-1.0),
        BigNumber::ZERO,
        BigNumber::from_f64(1e-5),
        BigNumber::ONE,
        BigNumber::from_parts(1.0, 500),
    ];
    for pair in values.windows(2) {
        assert!(pair[0] < pair[1], "{} < {}", pair[0], pair[1]);
    }
    assert_eq!(values[0].max(values[5]), values[5]);
    assert_eq!(values[0].min(values[5]), values[0]);
}

#[test]
fn sum_folds_from_zero() {
    let s: BigNumber = (1..=4u32).map(BigNumber::from).sum();
    assert_eq!(s, BigNumber::from_f64(10.0));
    let empty: BigNumber = std::iter::empty::<BigNumber>().sum();
    assert!(empty.is_zero());
}

/* ──────────────────────────────────────────────────────────────────────────
2) Text
────────────────────────────────────────────────────────────────────────── */

#[rstest]
#[case(BigNumber::ZERO, "0")]
#[case(BigNumber::from_f64(1234.5), "1234.5")]
#[case(BigNumber::from_f64(0.25), "0.25")]
#[case(BigNumber::from_parts(1.5, 1500), "1.5e1500")]
#[case(BigNumber::from_parts(9.999, 9), "1e10")]
#[case(BigNumber::from_parts(-2.0, 40), "-2e40")]
#[case(BigNumber::from_f64(0.0149), "0.0149")]
#[case(BigNumber::from_f64(0.00266), "2.66e-3")]
#[case(BigNumber::from_f64(0.00999), "9.99e-3")]
fn display_switches_to_scientific(#[case] v: BigNumber, #[case] expected: &str) {
    assert_eq!(v.to_string(), expected);
}

#[test]
fn display_precision_bounds_fraction_digits() {
    assert_eq!(format!("{:.0}", BigNumber::from_f64(20.0)), "20");
    assert_eq!(format!("{:.4}", BigNumber::from_parts(1.23456, 700)), "1.2346e700");
}

#[rstest]
#[case("42", 4.2, 1)]
#[case("1e1500", 1.0, 1500)]
#[case("2.5E-3", 2.5, -3)]
#[case(" 3e+12 ", 3.0, 12)]
fn parses_scientific_notation(#[case] input: &str, #[case] mantissa: f64, #[case] exponent: i64) {
    let v: BigNumber = input.parse().unwrap();
    assert!((v.mantissa() - mantissa).abs() < 1e-12);
    assert_eq!(v.exponent(), exponent);
}

#[test]
fn rejects_malformed_input() {
    assert!("abc".parse::<BigNumber>().is_err());
    assert!("1e".parse::<BigNumber>().is_err());
    assert!("inf".parse::<BigNumber>().is_err());
}

#[derive(Serialize, Deserialize)]
struct Save {
    rho: BigNumber,
}

#[test]
fn serialises_as_a_string() {
    let save = Save { rho: BigNumber::from_parts(1.5, 1500) };
    let text = toml::to_string(&save).unwrap();
    assert!(text.contains("\"1.5e1500\""), "{text}");

    let back: Save = toml::from_str(&text).unwrap();
    assert_eq!(back.rho, save.rho);
}
