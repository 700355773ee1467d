// src/theories/classic.rs
#![cfg(feature = "theory-classic")]

//! The first Exponential Limit Series release.
//!
//! Two upgrades, `n` and `k`, and the untransformed series as production:
//! `rho_dot = Σ_{x=1}^{n} (1 + k/x)^x`. No milestones, achievements or story.
//! The series goes through the same cache as the alpha theory; only its raw
//! partial sum is used.

use std::f64::consts::E;

use crate::config::TheoryConfig;
use crate::error::Result;
use crate::log::DebugLog;
use crate::numeric::BigNumber;
use crate::systems::board::Board;
use crate::systems::cost::Cost;
use crate::systems::sdk::{EquationCache, EquationSlot, Event};
use crate::systems::summation::{SeriesCache, SeriesExponents};
use crate::systems::upgrade::{PermanentKind, Upgrade};
use crate::theories::sdk::{Metadata, Theory, invalidate_for};

pub const N: u32 = 0;
pub const K: u32 = 1;

const METADATA: Metadata = Metadata {
    id: "exponential_limit_series_custom_theory",
    name: "Exponential Limit Series",
    description: "A theory to explore the beloved main formula from a different angle",
    authors: "AfuroZamurai",
    version: 1,
};

pub struct ClassicTheory {
    board: Board,
    series: SeriesCache,
    equations: EquationCache,
    debug: DebugLog,
}

impl ClassicTheory {
    pub fn new(config: TheoryConfig) -> Result<Self> {
        let mut board = Board::new();

        board.create_upgrade(Upgrade::new(
            N,
            "n",
            Cost::first_free(Cost::exponential(15.0, 1.618f64.log2())),
        ))?;
        board.create_upgrade(Upgrade::new(K, "k", Cost::exponential(100.0, E.log2())))?;

        board.create_permanent(0, PermanentKind::Publication, 1e10)?;
        board.create_permanent(1, PermanentKind::BuyAll, 1e20)?;
        board.create_permanent(2, PermanentKind::AutoBuyer, 1e30)?;

        Ok(Self {
            board,
            series: SeriesCache::new(config.invalidation, config.root_transform),
            equations: EquationCache::default(),
            debug: DebugLog::new(config.debug_log),
        })
    }

    pub fn series(&self) -> &SeriesCache {
        &self.series
    }

    /// Raw series value for the current levels.
    pub fn sum(&mut self) -> BigNumber {
        let n = self.board.level(N) as u64;
        let k = self.board.level(K) as u64;
        self.series.refresh(n, k, SeriesExponents::BASE);
        self.series.partial_sum()
    }
}

impl Theory for ClassicTheory {
    fn metadata(&self) -> &Metadata {
        &METADATA
    }

    fn board(&self) -> &Board {
        &self.board
    }

    fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    fn tick(&mut self, elapsed: f64, multiplier: f64) {
        let dt = BigNumber::from_f64(elapsed * multiplier);
        let bonus = self.board.publication_multiplier();
        let sum = self.sum();
        let production = bonus * dt * sum;
        self.board.add_currency(production);
        self.debug.log(|| format!("added {bonus} * {dt} * {sum} = {production}"));
        self.equations.invalidate(EquationSlot::Secondary);
    }

    fn primary_equation(&mut self) -> String {
        self.equations.get_or_render(EquationSlot::Primary, || {
            "\\dot{\\rho} = \\sum_{x = 1}^{n}\\left(1+\\frac{k}{x}\\right)^x".to_string()
        })
    }

    fn secondary_equation(&mut self) -> String {
        let (k, n) = (self.board.level(K), self.board.level(N));
        self.equations
            .get_or_render(EquationSlot::Secondary, || format!("k = {k}\\qquad n = {n}"))
    }

    fn tertiary_equation(&mut self) -> String {
        let symbol = self.board.latex_symbol().to_string();
        self.equations
            .get_or_render(EquationSlot::Tertiary, || format!("{symbol}=\\max\\rho"))
    }

    fn publication_multiplier(&self, tau: BigNumber) -> BigNumber {
        tau.pow(0.164) / BigNumber::THREE
    }

    fn publication_multiplier_formula(&self, symbol: &str) -> String {
        format!("\\frac{{{{{symbol}}}^{{0.164}}}}{{3}}")
    }

    fn dispatch(&mut self, event: Event) {
        invalidate_for(&mut self.equations, event);
    }

    fn variable_text(&self, id: u32, level: u32) -> Option<String> {
        match id {
            N => Some(format!("n={level}")),
            K => Some(format!("k={level}")),
            _ => None,
        }
    }

    fn post_publish(&mut self) {
        self.series.reset();
        self.equations.invalidate_all();
    }
}
