// src/systems/cost.rs

//! Cost curves for upgrades and the milestone schedule.

use serde::{Deserialize, Serialize};

use crate::numeric::BigNumber;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cost {
    /// base * 2^(rate * level)
    Exponential { base: f64, rate: f64 },
    /// intercept + slope * level
    Linear { slope: f64, intercept: f64 },
    /// Level 0 is free, level L costs what `inner` charges for L - 1.
    FirstFree(Box<Cost>),
    Free,
}

impl Cost {
    pub fn exponential(base: f64, rate: f64) -> Self {
        Cost::Exponential { base, rate }
    }

    pub fn linear(slope: f64, intercept: f64) -> Self {
        Cost::Linear { slope, intercept }
    }

    pub fn first_free(inner: Cost) -> Self {
        Cost::FirstFree(Box::new(inner))
    }

    /// Price of going from `level` to `level + 1`.
    pub fn cost(&self, level: u32) -> BigNumber {
        match self {
            Cost::Exponential { base, rate } => {
                BigNumber::from_f64(*base) * BigNumber::TWO.pow(rate * level as f64)
            }
            Cost::Linear { slope, intercept } => {
                BigNumber::from_f64(*intercept) + BigNumber::from_f64(*slope) * BigNumber::from(level)
            }
            Cost::FirstFree(inner) => match level {
                0 => BigNumber::ZERO,
                l => inner.cost(l - 1),
            },
            Cost::Free => BigNumber::ZERO,
        }
    }

    /// True when every level costs nothing.
    pub fn is_free(&self) -> bool {
        match self {
            Cost::Exponential { base, .. } => *base == 0.0,
            Cost::Linear { slope, intercept } => *slope == 0.0 && *intercept == 0.0,
            Cost::FirstFree(inner) => inner.is_free(),
            Cost::Free => true,
        }
    }

    /// Price of buying `amount` levels starting at `level`.
    pub fn total(&self, level: u32, amount: u32) -> BigNumber {
        if self.is_free() {
            return BigNumber::ZERO;
        }
        (level..level.saturating_add(amount)).map(|l| self.cost(l)).sum()
    }

    /// Like [`total`](Self::total), but stops once the running price passes
    /// `funds`. `Err` carries the price reached at that point.
    pub fn total_within(&self, level: u32, amount: u32, funds: BigNumber) -> Result<BigNumber, BigNumber> {
        if self.is_free() {
            return Ok(BigNumber::ZERO);
        }
        let mut spent = BigNumber::ZERO;
        for l in level..level.saturating_add(amount) {
            spent += self.cost(l);
            if spent > funds {
                return Err(spent);
            }
        }
        Ok(spent)
    }

    /// How many consecutive levels from `level` fit in `funds`, up to `cap`.
    pub fn max_affordable(&self, level: u32, funds: BigNumber, cap: u32) -> u32 {
        let cap = cap.min(u32::MAX - level);
        if self.is_free() {
            return cap;
        }
        let mut spent = BigNumber::ZERO;
        let mut bought = 0;
        while bought < cap {
            let next = spent + self.cost(level + bought);
            if next > funds {
                break;
            }
            spent = next;
            bought += 1;
        }
        bought
    }
}
