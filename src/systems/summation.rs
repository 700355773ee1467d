// src/systems/summation.rs

//! # Incremental summation cache
//!
//! Keeps the running partial sum
//!
//! ```text
//! S(n, k) = Σ_{j=1}^{n} (1 + k^kExp / j) ^ (j^jExp)
//! ```
//!
//! across ticks. Upgrade levels only grow between publications, so the
//! common tick either reuses the sum or appends a few terms:
//!
//! | case | condition                          | work            |
//! |------|------------------------------------|-----------------|
//! | A    | `k > base_parameter` (or stale key) | full, `O(n)`    |
//! | B    | `n > upper_bound`, `k` not grown    | `O(n - upper)`  |
//! | C    | neither                            | none            |
//!
//! Case A wins when both grew in the same call. The read transform is
//! applied fresh on every call and never cached.

use serde::{Deserialize, Serialize};

use crate::mechanics::series::term;
use crate::numeric::BigNumber;

/// Exponents read from milestone state once per call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeriesExponents {
    pub k_exp: f64,
    pub j_exp: f64,
    pub root_exp: f64,
}

impl SeriesExponents {
    pub const BASE: Self = Self { k_exp: 1.0, j_exp: 1.0, root_exp: 2.0 };

    /// The part of the exponents that every term depends on.
    fn term_key(&self) -> (u64, u64) {
        (self.k_exp.to_bits(), self.j_exp.to_bits())
    }
}

impl Default for SeriesExponents {
    fn default() -> Self {
        Self::BASE
    }
}

/// What counts as "the sum is stale".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Invalidation {
    /// Only a grown `k` forces a recompute. Exponent milestones bought since
    /// the last recompute leave older terms at their old exponents.
    BaseOnly,
    /// A grown `k` or any change of `kExp`/`jExp` forces a recompute.
    #[default]
    Exponents,
}

/// How the partial sum becomes a production value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RootTransform {
    /// `S^(1/rootExp)` right after a full recompute, `sqrt(S)` otherwise.
    /// Diverges from `Uniform` once the root milestone is bought.
    #[default]
    Legacy,
    /// `S^(1/rootExp)` on every read.
    Uniform,
}

/// Which case a refresh took.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Refresh {
    Full,
    Extend { added: u64 },
    Cached,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SeriesState {
    /// Last `n` the sum covers.
    pub upper_bound: u64,
    /// Last `k` the sum was computed with.
    pub base_parameter: u64,
    pub partial_sum: BigNumber,
    term_key: Option<(u64, u64)>,
}

#[derive(Clone, Debug, Default)]
pub struct SeriesCache {
    state: SeriesState,
    invalidation: Invalidation,
    transform: RootTransform,
    terms_computed: u64,
}

impl SeriesCache {
    pub fn new(invalidation: Invalidation, transform: RootTransform) -> Self {
        Self { state: SeriesState::default(), invalidation, transform, terms_computed: 0 }
    }

    pub fn state(&self) -> &SeriesState {
        &self.state
    }

    /// Untransformed sum as of the last refresh.
    pub fn partial_sum(&self) -> BigNumber {
        self.state.partial_sum
    }

    /// Term evaluations performed over the cache's lifetime.
    pub fn terms_computed(&self) -> u64 {
        self.terms_computed
    }

    pub fn invalidation(&self) -> Invalidation {
        self.invalidation
    }

    pub fn transform(&self) -> RootTransform {
        self.transform
    }

    /// Back to the empty sum; levels restart from zero after a publication.
    pub fn reset(&mut self) {
        self.state = SeriesState::default();
    }

    /// Production value for upper bound `n` and base parameter `k`.
    pub fn evaluate(&mut self, n: u64, k: u64, exps: SeriesExponents) -> BigNumber {
        let refresh = self.refresh(n, k, exps);
        self.apply_root(refresh, exps)
    }

    /// Brings the partial sum up to date and reports which case ran.
    pub fn refresh(&mut self, n: u64, k: u64, exps: SeriesExponents) -> Refresh {
        let key = exps.term_key();
        let stale_key = self.invalidation == Invalidation::Exponents
            && self.state.term_key.is_some_and(|prev| prev != key);

        let refresh = if k > self.state.base_parameter || stale_key {
            self.state.partial_sum = self.sum_range(1, n, k, exps);
            self.state.base_parameter = k;
            self.state.upper_bound = n;
            self.state.term_key = Some(key);
            Refresh::Full
        } else if n > self.state.upper_bound {
            let from = self.state.upper_bound + 1;
            let added = self.sum_range(from, n, k, exps);
            self.state.partial_sum += added;
            self.state.upper_bound = n;
            self.state.term_key = Some(key);
            Refresh::Extend { added: n - from + 1 }
        } else {
            // An empty sum is valid under any exponents.
            self.state.term_key.get_or_insert(key);
            Refresh::Cached
        };

        tracing::trace!(
            ?refresh,
            n,
            k,
            upper_bound = self.state.upper_bound,
            base_parameter = self.state.base_parameter,
            "series refresh"
        );
        refresh
    }

    fn apply_root(&self, refresh: Refresh, exps: SeriesExponents) -> BigNumber {
        let sum = self.state.partial_sum;
        match (self.transform, refresh) {
            (RootTransform::Legacy, Refresh::Full) | (RootTransform::Uniform, _) => {
                sum.pow(1.0 / exps.root_exp)
            }
            (RootTransform::Legacy, _) => sum.sqrt(),
        }
    }

    fn sum_range(&mut self, from: u64, to: u64, k: u64, exps: SeriesExponents) -> BigNumber {
        if from > to {
            return BigNumber::ZERO;
        }
        self.terms_computed += to - from + 1;
        (from..=to).map(|j| term(j, k, exps.k_exp, exps.j_exp)).sum()
    }
}

/// From-scratch reference: Σ_{j=1}^{n} term(j, k).
pub fn full_sum(n: u64, k: u64, exps: SeriesExponents) -> BigNumber {
    (1..=n).map(|j| term(j, k, exps.k_exp, exps.j_exp)).sum()
}
