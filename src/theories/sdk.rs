// src/theories/sdk.rs

//! # Theory SDK
//!
//! The contract between a theory and the host engine, plus a small session
//! driver that plays a theory the way the host does.
//!
//! ## Host contract
//! A theory is constructed once (its `init`), then the host calls
//! [`Theory::tick`] once per frame and reads the three equation strings when
//! it redraws. Everything else (purchases, milestones, publication,
//! progress polling) is a provided method routed through the theory's
//! [`Board`], so that milestone [`Event`]s always reach [`Theory::dispatch`].
//!
//! ## Steps to add a theory
//! 1. Create `src/theories/<name>.rs` behind a `theory-<name>` feature.
//! 2. Declare upgrades, milestones, permanents, achievements and chapters on
//!    a [`Board`] in the constructor. Attach the events each milestone should
//!    trigger instead of writing callbacks.
//! 3. Keep cross-tick math in a dedicated system (the summation cache is the
//!    model) and read milestone levels once per tick.
//! 4. Render equations through an
//!    [`EquationCache`](crate::systems::sdk::EquationCache) so the host only
//!    pays for LaTeX assembly after an invalidation.
//!
//! ## Session driver
//! [`run_session`] ticks a theory with a simple player policy (buy
//! permanents, spend milestone points, buy upgrades, publish on a
//! multiplier-gain threshold) and reports what happened. It is meant for
//! demos and tests, not as a balancing tool.

use crate::error::Result;
use crate::mechanics::scale::graph_value;
use crate::numeric::BigNumber;
use crate::run_ticks;
use crate::systems::board::Board;
use crate::systems::progress::Unlocked;
use crate::systems::sdk::{EquationCache, EquationSlot, Event};
use crate::systems::upgrade::PermanentKind;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Metadata {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub authors: &'static str,
    pub version: u32,
}

pub trait Theory {
    fn metadata(&self) -> &Metadata;
    fn board(&self) -> &Board;
    fn board_mut(&mut self) -> &mut Board;

    /// Converts `elapsed * multiplier` seconds into currency.
    fn tick(&mut self, elapsed: f64, multiplier: f64);

    fn primary_equation(&mut self) -> String;
    fn secondary_equation(&mut self) -> String;
    fn tertiary_equation(&mut self) -> String;

    fn publication_multiplier(&self, tau: BigNumber) -> BigNumber;
    fn publication_multiplier_formula(&self, symbol: &str) -> String;

    /// Reacts to one milestone event.
    fn dispatch(&mut self, event: Event);

    /// LaTeX for an upgrade's variable at `level`, e.g. `n=5`.
    fn variable_text(&self, id: u32, level: u32) -> Option<String>;

    /// Variant shown as the upgrade's description; defaults to [`Theory::variable_text`].
    fn variable_description(&self, id: u32, level: u32) -> Option<String> {
        self.variable_text(id, level)
    }

    /// Runs after the board reset levels for a publication.
    fn post_publish(&mut self) {}

    fn tau(&self) -> BigNumber {
        self.board().currency()
    }

    fn graph_value(&self) -> f64 {
        graph_value(self.board().currency())
    }

    fn upgrade_description(&self, id: u32) -> Option<String> {
        let level = self.board().upgrade(id).ok()?.level;
        self.variable_description(id, level).map(|s| math(&s))
    }

    /// Before/after text for buying `amount` more levels.
    fn upgrade_info(&self, id: u32, amount: u32) -> Option<String> {
        let level = self.board().upgrade(id).ok()?.level;
        let from = self.variable_text(id, level)?;
        let to = self.variable_text(id, level + amount)?;
        Some(math_to(&from, &to))
    }

    fn buy(&mut self, id: u32, amount: u32) -> Result<()> {
        self.board_mut().buy(id, amount)
    }

    fn buy_permanent(&mut self, id: u32) -> Result<()> {
        self.board_mut().buy_permanent(id)
    }

    fn buy_milestone(&mut self, id: u32) -> Result<()> {
        let events = self.board_mut().buy_milestone(id)?;
        for e in events {
            self.dispatch(e);
        }
        Ok(())
    }

    fn refund_milestone(&mut self, id: u32) -> Result<()> {
        let events = self.board_mut().refund_milestone(id)?;
        for e in events {
            self.dispatch(e);
        }
        Ok(())
    }

    /// Multiplier a publication right now would install.
    fn next_publication_multiplier(&self) -> BigNumber {
        self.publication_multiplier(self.board().tau())
    }

    fn publish(&mut self) -> Result<BigNumber> {
        let multiplier = self.next_publication_multiplier();
        self.board_mut().publish(multiplier)?;
        self.post_publish();
        Ok(multiplier)
    }

    fn poll_progress(&mut self) -> Vec<Unlocked> {
        self.board_mut().poll_progress()
    }
}

/// Inline math for the host's text widgets.
pub fn math(latex: &str) -> String {
    format!("\\({latex}\\)")
}

pub fn math_to(from: &str, to: &str) -> String {
    format!("\\({from}\\rightarrow{{}}{to}\\)")
}

/// Applies an equation event to `cache`; other events are left to the caller.
pub fn invalidate_for(cache: &mut EquationCache, event: Event) {
    match event {
        Event::InvalidatePrimary => cache.invalidate(EquationSlot::Primary),
        Event::InvalidateSecondary => cache.invalidate(EquationSlot::Secondary),
        Event::InvalidateTertiary => cache.invalidate(EquationSlot::Tertiary),
        Event::UpdateAvailability => {}
    }
}

#[derive(Clone, Copy, Debug)]
pub struct SessionPolicy {
    /// Seconds per tick.
    pub dt: f64,
    pub multiplier: f64,
    /// Publish once the next multiplier is this many times the current one.
    pub publish_ratio: Option<f64>,
    pub buy_milestones: bool,
    /// Cap on levels bought per upgrade per tick when buying in bulk.
    pub buy_limit: u32,
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self { dt: 0.1, multiplier: 1.0, publish_ratio: Some(3.0), buy_milestones: true, buy_limit: 100 }
    }
}

#[derive(Clone, Debug, Default)]
pub struct SessionReport {
    pub ticks: usize,
    pub levels_bought: u64,
    pub publications: u32,
    pub unlocked: Vec<Unlocked>,
    pub tau: BigNumber,
}

/// One host frame under `policy`.
pub fn session_step<T: Theory>(theory: &mut T, policy: &SessionPolicy, report: &mut SessionReport) {
    theory.tick(policy.dt, policy.multiplier);

    let affordable: Vec<u32> = theory
        .board()
        .permanents()
        .filter(|p| !p.bought && p.price <= theory.board().currency())
        .map(|p| p.id)
        .collect();
    for id in affordable {
        // An earlier permanent this frame may have drained the funds.
        let _ = theory.buy_permanent(id);
    }

    if policy.buy_milestones {
        while theory.board().milestone_points_available() > 0 {
            let next = theory.board().milestones().find(|m| m.available && !m.is_maxed()).map(|m| m.id);
            match next {
                Some(id) if theory.buy_milestone(id).is_ok() => {}
                _ => break,
            }
        }
    }

    let board = theory.board();
    if board.owns(PermanentKind::AutoBuyer) || board.owns(PermanentKind::BuyAll) {
        report.levels_bought += theory.board_mut().buy_all(policy.buy_limit) as u64;
    } else if let Some(id) = theory.board().cheapest_affordable() {
        if theory.buy(id, 1).is_ok() {
            report.levels_bought += 1;
        }
    }

    if let Some(ratio) = policy.publish_ratio {
        let current = theory.board().publication_multiplier();
        let gain = theory.next_publication_multiplier() / current;
        if theory.board().owns(PermanentKind::Publication)
            && gain >= BigNumber::from_f64(ratio)
            && theory.publish().is_ok()
        {
            report.publications += 1;
        }
    }

    report.unlocked.extend(theory.poll_progress());
}

/// Plays `theory` for up to `max_ticks` frames or until `until` holds.
pub fn run_session<T: Theory>(
    theory: &mut T,
    policy: SessionPolicy,
    max_ticks: usize,
    until: impl Fn(&T) -> bool,
) -> SessionReport {
    let mut report = SessionReport::default();
    let ticks = run_ticks(theory, |t| session_step(t, &policy, &mut report), until, max_ticks);
    report.ticks = ticks;
    report.tau = theory.board().tau();
    report
}
