// src/numeric.rs

//! Extended-range number used for currency and production values.
//!
//! Theory values climb far past `f64::MAX` (rho reaches `1e1500` and beyond),
//! so a value is kept as a normalised `f64` mantissa in `[1, 10)` and an `i64`
//! decimal exponent. Precision is that of the mantissa; only the range is
//! extended. Operations return new values, the type is `Copy`.

use std::cmp::Ordering;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseBigNumberError;

/// Decades after which the smaller addend vanishes from an `f64` mantissa.
const SIGNIFICANT_DECADES: i64 = 17;
/// Results whose log10 stays inside this band are computed in plain `f64`.
const F64_SAFE_LOG10: f64 = 300.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct BigNumber {
    mantissa: f64,
    exponent: i64,
}

impl BigNumber {
    pub const ZERO: Self = Self { mantissa: 0.0, exponent: 0 };
    pub const ONE: Self = Self { mantissa: 1.0, exponent: 0 };
    pub const TWO: Self = Self { mantissa: 2.0, exponent: 0 };
    pub const THREE: Self = Self { mantissa: 3.0, exponent: 0 };
    pub const TEN: Self = Self { mantissa: 1.0, exponent: 1 };

    /// `mantissa * 10^exponent`, normalised.
    pub fn from_parts(mantissa: f64, exponent: i64) -> Self {
        if mantissa == 0.0 || mantissa.is_nan() {
            return Self::ZERO;
        }
        let mantissa = if mantissa.is_finite() { mantissa } else { f64::MAX.copysign(mantissa) };
        let shift = mantissa.abs().log10().floor() as i32;
        let mut m = if shift >= 0 {
            mantissa / 10f64.powi(shift)
        } else if shift < -300 {
            // Subnormals: 10^-shift alone would overflow.
            mantissa * 1e300 * 10f64.powi(-shift - 300)
        } else {
            mantissa * 10f64.powi(-shift)
        };
        let mut e = exponent.saturating_add(shift as i64);
        // log10 rounding can leave the mantissa one decade off.
        if m.abs() >= 10.0 {
            m /= 10.0;
            e = e.saturating_add(1);
        } else if m.abs() < 1.0 {
            m *= 10.0;
            e = e.saturating_sub(1);
        }
        Self { mantissa: m, exponent: e }
    }

    pub fn from_f64(value: f64) -> Self {
        Self::from_parts(value, 0)
    }

    /// `10^log`, always positive.
    pub fn from_log10(log: f64) -> Self {
        if log == f64::NEG_INFINITY {
            return Self::ZERO;
        }
        let e = log.floor();
        Self::from_parts(10f64.powf(log - e), e as i64)
    }

    pub fn mantissa(&self) -> f64 {
        self.mantissa
    }

    pub fn exponent(&self) -> i64 {
        self.exponent
    }

    pub fn is_zero(&self) -> bool {
        self.mantissa == 0.0
    }

    /// -1, 0 or 1.
    pub fn sign(&self) -> i32 {
        if self.mantissa > 0.0 {
            1
        } else if self.mantissa < 0.0 {
            -1
        } else {
            0
        }
    }

    pub fn abs(self) -> Self {
        Self { mantissa: self.mantissa.abs(), exponent: self.exponent }
    }

    /// log10 of the magnitude; `-inf` for zero.
    pub fn log10(&self) -> f64 {
        if self.is_zero() {
            return f64::NEG_INFINITY;
        }
        self.mantissa.abs().log10() + self.exponent as f64
    }

    /// Saturates to `±inf` above the `f64` range and flushes to 0 below it.
    pub fn to_f64(&self) -> f64 {
        if self.exponent > 308 {
            return f64::INFINITY.copysign(self.mantissa);
        }
        if self.exponent < -324 {
            return 0.0;
        }
        self.mantissa * 10f64.powi(self.exponent as i32)
    }

    pub fn pow(self, p: f64) -> Self {
        if p == 0.0 {
            return Self::ONE;
        }
        if self.is_zero() {
            return if p > 0.0 { Self::ZERO } else { Self::from_f64(f64::INFINITY) };
        }
        let odd_integer = p.fract() == 0.0 && (p % 2.0).abs() == 1.0;
        let negate = self.mantissa < 0.0 && odd_integer;
        let log = self.log10() * p;

        let magnitude = if log.abs() < F64_SAFE_LOG10 && self.exponent.abs() < 300 {
            Self::from_f64(self.abs().to_f64().powf(p))
        } else {
            Self::from_log10(log)
        };
        if negate { -magnitude } else { magnitude }
    }

    /// Square root of the magnitude.
    pub fn sqrt(self) -> Self {
        if self.is_zero() {
            return Self::ZERO;
        }
        let m = self.mantissa.abs();
        if self.exponent.rem_euclid(2) == 0 {
            Self::from_parts(m.sqrt(), self.exponent / 2)
        } else {
            Self::from_parts((m * 10.0).sqrt(), (self.exponent - 1) / 2)
        }
    }

    pub fn max(self, other: Self) -> Self {
        if other > self { other } else { self }
    }

    pub fn min(self, other: Self) -> Self {
        if other < self { other } else { self }
    }
}

impl Default for BigNumber {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<f64> for BigNumber {
    fn from(v: f64) -> Self {
        Self::from_f64(v)
    }
}

impl From<u32> for BigNumber {
    fn from(v: u32) -> Self {
        Self::from_f64(v as f64)
    }
}

impl From<u64> for BigNumber {
    fn from(v: u64) -> Self {
        Self::from_f64(v as f64)
    }
}

impl From<u128> for BigNumber {
    fn from(v: u128) -> Self {
        Self::from_f64(v as f64)
    }
}

impl From<i32> for BigNumber {
    fn from(v: i32) -> Self {
        Self::from_f64(v as f64)
    }
}

impl Neg for BigNumber {
    type Output = Self;
    fn neg(self) -> Self {
        if self.is_zero() {
            return self;
        }
        Self { mantissa: -self.mantissa, exponent: self.exponent }
    }
}

impl Add for BigNumber {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        if self.is_zero() {
            return rhs;
        }
        if rhs.is_zero() {
            return self;
        }
        let (big, small) = if self.exponent >= rhs.exponent { (self, rhs) } else { (rhs, self) };
        let gap = big.exponent - small.exponent;
        if gap > SIGNIFICANT_DECADES {
            return big;
        }
        Self::from_parts(big.mantissa + small.mantissa / 10f64.powi(gap as i32), big.exponent)
    }
}

impl Sub for BigNumber {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        self + (-rhs)
    }
}

impl Mul for BigNumber {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        if self.is_zero() || rhs.is_zero() {
            return Self::ZERO;
        }
        Self::from_parts(self.mantissa * rhs.mantissa, self.exponent.saturating_add(rhs.exponent))
    }
}

/// Division by zero yields zero; theory formulas never divide by a zero value.
impl Div for BigNumber {
    type Output = Self;
    fn div(self, rhs: Self) -> Self {
        if self.is_zero() || rhs.is_zero() {
            return Self::ZERO;
        }
        Self::from_parts(self.mantissa / rhs.mantissa, self.exponent.saturating_sub(rhs.exponent))
    }
}

impl AddAssign for BigNumber {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for BigNumber {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign for BigNumber {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Sum for BigNumber {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, x| acc + x)
    }
}

impl PartialOrd for BigNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        let (a, b) = (self.sign(), other.sign());
        if a != b {
            return Some(a.cmp(&b));
        }
        if a == 0 {
            return Some(Ordering::Equal);
        }
        let m = self.mantissa.abs().partial_cmp(&other.mantissa.abs())?;
        let magnitude = self.exponent.cmp(&other.exponent).then(m);
        Some(if a > 0 { magnitude } else { magnitude.reverse() })
    }
}

fn trim_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// Plain notation for exponents in `-2..6`, `1.23e1500` or `2.65e-3` otherwise.
/// The formatter precision (default 2) bounds the significant fraction digits.
impl fmt::Display for BigNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(2);
        if self.is_zero() {
            return f.write_str("0");
        }
        if (-2..6).contains(&self.exponent) {
            // Below 1 the precision counts significant fraction digits.
            let digits = precision + self.exponent.min(0).unsigned_abs() as usize;
            let v = self.to_f64();
            return f.write_str(trim_zeros(&format!("{v:.digits$}")));
        }
        let scale = 10f64.powi(precision as i32);
        let mut m = (self.mantissa * scale).round() / scale;
        let mut e = self.exponent;
        if m.abs() >= 10.0 {
            m /= 10.0;
            e += 1;
        }
        write!(f, "{}e{}", trim_zeros(&format!("{m:.precision$}")), e)
    }
}

/// Accepts `42`, `1.5`, `1e1500`, `2.5E-3`.
impl FromStr for BigNumber {
    type Err = ParseBigNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseBigNumberError { input: s.to_string() };
        let t = s.trim();
        let (m, e) = match t.find(['e', 'E']) {
            Some(i) => (&t[..i], &t[i + 1..]),
            None => (t, "0"),
        };
        let m: f64 = m.parse().map_err(|_| err())?;
        let e: i64 = e.trim_start_matches('+').parse().map_err(|_| err())?;
        if !m.is_finite() {
            return Err(err());
        }
        Ok(Self::from_parts(m, e))
    }
}

impl From<BigNumber> for String {
    fn from(v: BigNumber) -> String {
        format!("{}e{}", v.mantissa, v.exponent)
    }
}

impl TryFrom<String> for BigNumber {
    type Error = ParseBigNumberError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
