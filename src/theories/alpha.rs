// src/theories/alpha.rs
#![cfg(feature = "theory-alpha")]

//! Exponential Limit Series (alpha).
//!
//! ```text
//! rho_dot = q1^a1 * q2^a2 * a * S^(1/r)
//! S       = Σ_{j=1}^{n} (1 + k^b / j)^(j^c)
//! a       = l^d / Δ,   Δ = |phi - f_{t+1} / f_t|
//! ```
//!
//! `S` lives in a [`SeriesCache`]; `a` only applies once the Fibonacci
//! milestone unlocks `f_t` and `l`. Seven milestones raise the exponents
//! `a1 a2 b c d` and lower the root `r`.

use std::f64::consts::E;

use crate::config::TheoryConfig;
use crate::error::Result;
use crate::log::DebugLog;
use crate::mechanics::scale::fmt_exponent;
use crate::mechanics::sequence::{GOLDEN_RATIO, fibonacci, golden_delta, lucas};
use crate::mechanics::stepwise::stepwise_power_sum;
use crate::numeric::BigNumber;
use crate::systems::board::Board;
use crate::systems::cost::Cost;
use crate::systems::progress::Condition;
use crate::systems::sdk::{EquationCache, EquationSlot, Event};
use crate::systems::summation::{SeriesCache, SeriesExponents};
use crate::systems::upgrade::{MilestoneUpgrade, PermanentKind, Upgrade};
use crate::theories::sdk::{Metadata, Theory, invalidate_for};

// Regular upgrades
pub const Q1: u32 = 0;
pub const Q2: u32 = 1;
pub const N: u32 = 2;
pub const K: u32 = 3;
pub const F: u32 = 4;
pub const L: u32 = 5;

// Milestones
pub const M_Q1_EXP: u32 = 0;
pub const M_Q2_EXP: u32 = 1;
pub const M_F_UNLOCK: u32 = 2;
pub const M_L_EXP: u32 = 3;
pub const M_ROOT_EXP: u32 = 4;
pub const M_J_EXP: u32 = 5;
pub const M_K_EXP: u32 = 6;

const Q1_EXP_STEP: f64 = 0.15;
const Q2_EXP_STEP: f64 = 0.15;
const L_EXP_STEP: f64 = 0.1;
const ROOT_EXP_STEP: f64 = 0.1;
const J_EXP_STEP: f64 = 0.01;
const K_EXP_STEP: f64 = 0.05;

/// `f_t` stops here; the achievement for the final level keys off it.
pub const F_MAX_LEVEL: u32 = 100;

const METADATA: Metadata = Metadata {
    id: "exponential_limit_series_alpha",
    name: "Exponential Limit Series (Alpha)",
    description: "A theory to explore the beloved main formula from a different angle. \
        Beware: this is an alpha version, so it is neither balanced nor complete. \
        It might get breaking changes all the time.",
    authors: "AfuroZamurai",
    version: 1,
};

/// (id, name, log10 of the rho threshold)
const RHO_ACHIEVEMENTS: [(u32, &str, i64); 9] = [
    (4, "Oh look, a character", 6),
    (5, "If only it was tau", 100),
    (6, "Speedy EF", 300),
    (7, "Halfway there yet?", 500),
    (8, "Devil's mathematician", 666),
    (9, "They had us in the first half", 750),
    (10, "Oh look, a penny", 1000),
    (11, "Any moment now", 1250),
    (12, "Wait, there is no limit?", 1500),
];

/// (id, name, description, publications)
const PUBLICATION_ACHIEVEMENTS: [(u32, &str, &str, u32); 6] = [
    (20, "Publicity!", "Publish for the first time", 1),
    (21, "All good things come in threes", "Publish 3 times", 3),
    (22, "Double digits", "Publish 10 times", 10),
    (23, "Why am I doing this?", "Publish 20 times", 20),
    (24, "How can there be another paper?", "Publish 50 times", 50),
    (25, "This is madness", "Publish 100 times", 100),
];

fn rho_at_least(decades: i64) -> Condition {
    Condition::CurrencyAtLeast(BigNumber::from_parts(1.0, decades))
}

fn inc_exp(symbol: &str, step: f64) -> (String, String) {
    (
        format!("Increases ${symbol}$ exponent by {step}"),
        format!("Increases ${symbol}$ exponent"),
    )
}

pub fn q1(level: u32) -> BigNumber {
    stepwise_power_sum(level, 2.0, 10, 0.0)
}

pub fn q2(level: u32) -> BigNumber {
    BigNumber::TWO.pow(level as f64)
}

/// f_t: 1, 1, 2, 3, 5, ...
pub fn f_value(level: u32) -> BigNumber {
    fibonacci(level + 1)
}

pub fn l_value(level: u32) -> BigNumber {
    lucas(level)
}

pub fn q1_exp(level: u32) -> f64 {
    1.0 + level as f64 * Q1_EXP_STEP
}

pub fn q2_exp(level: u32) -> f64 {
    1.0 + level as f64 * Q2_EXP_STEP
}

pub fn l_exp(level: u32) -> f64 {
    1.0 + level as f64 * L_EXP_STEP
}

pub fn root_exp(level: u32) -> f64 {
    2.0 - level as f64 * ROOT_EXP_STEP
}

pub fn j_exp(level: u32) -> f64 {
    1.0 + level as f64 * J_EXP_STEP
}

pub fn k_exp(level: u32) -> f64 {
    1.0 + level as f64 * K_EXP_STEP
}

pub struct AlphaTheory {
    board: Board,
    series: SeriesCache,
    equations: EquationCache,
    debug: DebugLog,
}

impl AlphaTheory {
    pub fn new(config: TheoryConfig) -> Result<Self> {
        let mut board = Board::new();
        Self::register_upgrades(&mut board)?;
        Self::register_milestones(&mut board)?;
        Self::register_achievements(&mut board)?;
        Self::register_story(&mut board)?;

        let mut theory = Self {
            board,
            series: SeriesCache::new(config.invalidation, config.root_transform),
            equations: EquationCache::default(),
            debug: DebugLog::new(config.debug_log),
        };
        theory.update_availability();
        Ok(theory)
    }

    fn register_upgrades(board: &mut Board) -> Result<()> {
        let log2 = |x: f64| x.log2();
        board.create_upgrade(Upgrade::new(
            Q1,
            "q_1",
            Cost::first_free(Cost::exponential(10.0, 3.38 / 4.0 + 0.1)),
        ))?;
        board.create_upgrade(Upgrade::new(Q2, "q_2", Cost::exponential(1000.0, 3.38 * 3.0 + 1.0)))?;
        board.create_upgrade(Upgrade::new(
            N,
            "n",
            Cost::first_free(Cost::exponential(15.0, log2(GOLDEN_RATIO + 0.4))),
        ))?;
        board.create_upgrade(Upgrade::new(K, "k", Cost::exponential(1500.0, log2(E + 0.3))))?;
        board.create_upgrade(
            Upgrade::new(F, "f_t", Cost::exponential(1000.0, log2(4.0))).with_max_level(F_MAX_LEVEL),
        )?;
        board.create_upgrade(Upgrade::new(L, "l", Cost::exponential(1500.0, log2(E + 0.3))))?;

        board.create_permanent(0, PermanentKind::Publication, 1e1)?;
        board.create_permanent(1, PermanentKind::BuyAll, 1e2)?;
        board.create_permanent(2, PermanentKind::AutoBuyer, 1e3)?;
        Ok(())
    }

    fn register_milestones(board: &mut Board) -> Result<()> {
        // One milestone point per decade of tau.
        board.set_milestone_cost(Cost::linear(1.0, 1.0));

        let primary = [Event::InvalidatePrimary];
        let exps = [
            (M_Q1_EXP, "q_1", Q1_EXP_STEP),
            (M_Q2_EXP, "q_2", Q2_EXP_STEP),
        ];
        for (id, symbol, step) in exps {
            let (desc, info) = inc_exp(symbol, step);
            board.create_milestone(MilestoneUpgrade::new(id, 2).describe(desc, info).on_bought_or_refunded(&primary))?;
        }

        board.create_milestone(
            MilestoneUpgrade::new(M_F_UNLOCK, 1)
                .describe("Unlock $f$", "Unlocks $f$")
                .on_bought_or_refunded(&[
                    Event::UpdateAvailability,
                    Event::InvalidatePrimary,
                    Event::InvalidateSecondary,
                ]),
        )?;

        let (desc, info) = inc_exp("l", L_EXP_STEP);
        board.create_milestone(MilestoneUpgrade::new(M_L_EXP, 2).describe(desc, info).on_bought_or_refunded(&primary))?;

        board.create_milestone(
            MilestoneUpgrade::new(M_ROOT_EXP, 2)
                .describe(
                    format!("Decreases $root\\ exponent$ by {ROOT_EXP_STEP}"),
                    "Decreases $root\\ exponent$",
                )
                .on_bought_or_refunded(&primary),
        )?;

        let (desc, info) = inc_exp("j\\ exponent", J_EXP_STEP);
        board.create_milestone(MilestoneUpgrade::new(M_J_EXP, 2).describe(desc, info).on_bought_or_refunded(&primary))?;

        let (desc, _) = inc_exp("k", K_EXP_STEP);
        board.create_milestone(
            MilestoneUpgrade::new(M_K_EXP, 2)
                .describe(desc, format!("Increases $k$ by {K_EXP_STEP}"))
                .on_bought_or_refunded(&primary),
        )?;
        Ok(())
    }

    fn register_achievements(board: &mut Board) -> Result<()> {
        for (id, name) in [
            (0, "Miscellaneous"),
            (1, "Progress"),
            (2, "Milestones"),
            (3, "Publications"),
            (4, "Approximation"),
        ] {
            board.create_achievement_category(id, name)?;
        }

        // Miscellaneous
        board.create_achievement(0, 0, "Back from retirement", "Unlock publication", Condition::PermanentOwned(PermanentKind::Publication))?;
        board.create_achievement(1, 0, "This is useless", "Unlock the \"Buy All\" button", Condition::PermanentOwned(PermanentKind::BuyAll))?;
        board.create_achievement(2, 0, "Time to rest", "Unlock the auto-buyer", Condition::PermanentOwned(PermanentKind::AutoBuyer))?;

        // Progress
        board.create_achievement(3, 1, "Baby steps", "Purchase a level of k", Condition::UpgradeLevelAtLeast { id: K, level: 1 })?;
        for (id, name, decades) in RHO_ACHIEVEMENTS {
            board.create_achievement(id, 1, name, &format!("Reach 1e{decades} rho"), rho_at_least(decades))?;
        }

        // Milestones
        board.create_achievement(13, 2, "I know that one", "Add an exponent to q1", Condition::MilestoneLevelAtLeast { id: M_Q1_EXP, level: 1 })?;
        board.create_achievement(18, 2, "Power the original", "Add an exponent to k", Condition::MilestoneLevelAtLeast { id: M_K_EXP, level: 1 })?;
        board.create_achievement(19, 2, "That's it?", "Get all milestones", Condition::AllMilestonesMaxed)?;

        // Publications
        for (id, name, description, count) in PUBLICATION_ACHIEVEMENTS {
            board.create_achievement(id, 3, name, description, Condition::PublicationsAtLeast(count))?;
        }

        // Approximation
        board.create_achievement(26, 4, "Close enough", "Reach 3 digits of precision for the golden ratio", Condition::UpgradeLevelAtLeast { id: F, level: 9 })?;
        board.create_achievement(27, 4, "How many do I need?", "Reach 7 digits of precision for the golden ratio", Condition::UpgradeLevelAtLeast { id: F, level: 18 })?;
        board.create_achievement(28, 4, "Out of space", "Reach 15 digits of precision for the golden ratio", Condition::UpgradeLevelAtLeast { id: F, level: 36 })?;
        board.create_achievement(31, 4, "You need to be stopped", "Reach the final level of f_t", Condition::UpgradeMaxed(F))?;
        Ok(())
    }

    fn register_story(board: &mut Board) -> Result<()> {
        board.create_story_chapter(0, "Expand your limits", "Got n", Condition::UpgradeLevelAtLeast { id: N, level: 1 })?;
        board.create_story_chapter(1, "Must go faster", "Got k", Condition::UpgradeLevelAtLeast { id: K, level: 1 })?;
        board.create_story_chapter(2, "Retirement is not enough", "Published", Condition::PublicationsAtLeast(1))?;
        board.create_story_chapter(3, "Déjà-vu", "Reached e50 rho", rho_at_least(50))?;
        board.create_story_chapter(4, "Golden idea", "Unlock Fibonacci", Condition::UpgradeAvailable(F))?;
        board.create_story_chapter(5, "Aided growth", "Decreased root exponent", Condition::MilestoneLevelAtLeast { id: M_ROOT_EXP, level: 1 })?;
        board.create_story_chapter(7, "Satisfaction", "Reached e1000 rho", rho_at_least(1000))?;
        board.create_story_chapter(8, "Letting it go", "Got all milestones", Condition::AllMilestonesMaxed)?;
        board.create_story_chapter(9, "Finale", "Reached e1500 rho", rho_at_least(1500))?;
        Ok(())
    }

    /// `f_t` and `l` exist only after the Fibonacci milestone.
    fn update_availability(&mut self) {
        let unlocked = fibonacci_unlocked(&self.board);
        for id in [F, L] {
            if let Ok(u) = self.board.upgrade_mut(id) {
                u.available = unlocked;
            }
        }
    }

    pub fn series(&self) -> &SeriesCache {
        &self.series
    }

    /// Exponents of the series as the milestones currently set them.
    pub fn series_exponents(&self) -> SeriesExponents {
        SeriesExponents {
            k_exp: k_exp(self.board.milestone_level(M_K_EXP)),
            j_exp: j_exp(self.board.milestone_level(M_J_EXP)),
            root_exp: root_exp(self.board.milestone_level(M_ROOT_EXP)),
        }
    }

    /// Δ for the current `f_t` level.
    pub fn delta(&self) -> BigNumber {
        delta(&self.board)
    }

    /// `l^d / Δ`, or 1 while `f_t` is locked.
    pub fn a(&self) -> BigNumber {
        let f_available = self.board.upgrade(F).is_ok_and(|u| u.available);
        if !f_available {
            return BigNumber::ONE;
        }
        let numerator = l_value(self.board.level(L)).pow(l_exp(self.board.milestone_level(M_L_EXP)));
        numerator / self.delta()
    }
}

fn fibonacci_unlocked(board: &Board) -> bool {
    board.milestone_level(M_F_UNLOCK) > 0
}

fn delta(board: &Board) -> BigNumber {
    golden_delta(board.level(F))
}

fn exponent_suffix(level: u32, value: f64) -> String {
    if level > 0 { format!("^{{{}}}", fmt_exponent(value)) } else { String::new() }
}

fn render_primary(board: &Board) -> String {
    let m = |id| board.milestone_level(id);
    let unlocked = fibonacci_unlocked(board);

    let mut s = String::from("\\dot{\\rho} = q_1");
    s += &exponent_suffix(m(M_Q1_EXP), q1_exp(m(M_Q1_EXP)));
    s += "q_2";
    s += &exponent_suffix(m(M_Q2_EXP), q2_exp(m(M_Q2_EXP)));
    if unlocked {
        s += "a";
    }
    s += &format!("\\sqrt[{}]{{s}}", fmt_exponent(root_exp(m(M_ROOT_EXP))));
    s += "\\qquad s = \\sum_{j = 1}^{n}\\left(1+\\frac{k";
    s += &exponent_suffix(m(M_K_EXP), k_exp(m(M_K_EXP)));
    s += "}{j}\\right)^{j";
    s += &exponent_suffix(m(M_J_EXP), j_exp(m(M_J_EXP)));
    s += "}";
    if unlocked {
        s += "\\qquad a = \\frac{l";
        s += &exponent_suffix(m(M_L_EXP), l_exp(m(M_L_EXP)));
        s += "}{\\Delta}";
    }
    s
}

fn render_secondary(board: &Board) -> String {
    if !fibonacci_unlocked(board) {
        return String::new();
    }
    format!(
        "\\Delta = \\mid\\phi - \\frac{{f_{{t + 1}}}}{{f_{{t}}}}\\mid\\qquad \\Delta = {}",
        delta(board)
    )
}

impl Theory for AlphaTheory {
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
        let vq1 = q1(self.board.level(Q1)).pow(q1_exp(self.board.milestone_level(M_Q1_EXP)));
        let vq2 = q2(self.board.level(Q2)).pow(q2_exp(self.board.milestone_level(M_Q2_EXP)));

        let exps = self.series_exponents();
        let n = self.board.level(N) as u64;
        let k = self.board.level(K) as u64;
        let summation = self.series.evaluate(n, k, exps);

        let a = self.a();
        let production = bonus * dt * vq1 * vq2 * a * summation;
        self.board.add_currency(production);

        self.debug.log(|| {
            format!("dt: {dt}, q1: {vq1}, q2: {vq2}, a: {a}, summation: {summation}, added: {production}")
        });
        self.equations.invalidate(EquationSlot::Secondary);
        self.equations.invalidate(EquationSlot::Tertiary);
    }

    fn primary_equation(&mut self) -> String {
        let board = &self.board;
        self.equations.get_or_render(EquationSlot::Primary, || render_primary(board))
    }

    fn secondary_equation(&mut self) -> String {
        let board = &self.board;
        self.equations.get_or_render(EquationSlot::Secondary, || render_secondary(board))
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
        match event {
            Event::UpdateAvailability => self.update_availability(),
            e => invalidate_for(&mut self.equations, e),
        }
    }

    fn variable_text(&self, id: u32, level: u32) -> Option<String> {
        let text = match id {
            Q1 => format!("q_1={:.0}", q1(level)),
            Q2 => format!("q_2={:.0}", q2(level)),
            N => format!("n={level}"),
            K => format!("k={level}"),
            F => format!("f_t={:.0}", f_value(level)),
            L => format!("l={:.0}", l_value(level)),
            _ => return None,
        };
        Some(text)
    }

    fn variable_description(&self, id: u32, level: u32) -> Option<String> {
        match id {
            Q2 => Some(format!("q_2=2^{{{level}}}")),
            _ => self.variable_text(id, level),
        }
    }

    fn post_publish(&mut self) {
        self.series.reset();
        self.equations.invalidate_all();
    }
}
