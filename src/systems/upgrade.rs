// src/systems/upgrade.rs

//! Purchasable entities: regular upgrades, milestone upgrades, permanents.

use crate::numeric::BigNumber;
use crate::systems::cost::Cost;
use crate::systems::sdk::Event;

/// A level-based variable bought with currency (`q1`, `n`, `k`, ...).
#[derive(Clone, Debug)]
pub struct Upgrade {
    pub id: u32,
    pub symbol: String,
    pub level: u32,
    pub max_level: Option<u32>,
    pub cost: Cost,
    pub available: bool,
}

impl Upgrade {
    pub fn new(id: u32, symbol: impl Into<String>, cost: Cost) -> Self {
        Self { id, symbol: symbol.into(), level: 0, max_level: None, cost, available: true }
    }

    pub fn with_max_level(mut self, max_level: u32) -> Self {
        self.max_level = Some(max_level);
        self
    }

    pub fn is_maxed(&self) -> bool {
        self.max_level.is_some_and(|m| self.level >= m)
    }

    /// Levels still purchasable before the max, or before `u32::MAX`.
    pub fn remaining(&self) -> u32 {
        let cap = self.max_level.unwrap_or(u32::MAX);
        cap.saturating_sub(self.level)
    }

    pub fn next_cost(&self) -> BigNumber {
        self.cost.cost(self.level)
    }
}

/// A permanent formula modifier paid for with milestone points.
///
/// `listeners` are dispatched, in order, after every buy or refund.
#[derive(Clone, Debug)]
pub struct MilestoneUpgrade {
    pub id: u32,
    pub level: u32,
    pub max_level: u32,
    pub description: String,
    pub info: String,
    pub available: bool,
    pub listeners: Vec<Event>,
}

impl MilestoneUpgrade {
    pub fn new(id: u32, max_level: u32) -> Self {
        Self {
            id,
            level: 0,
            max_level,
            description: String::new(),
            info: String::new(),
            available: true,
            listeners: Vec::new(),
        }
    }

    pub fn describe(mut self, description: impl Into<String>, info: impl Into<String>) -> Self {
        self.description = description.into();
        self.info = info.into();
        self
    }

    pub fn on_bought_or_refunded(mut self, events: &[Event]) -> Self {
        self.listeners.extend_from_slice(events);
        self
    }

    pub fn is_maxed(&self) -> bool {
        self.level >= self.max_level
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PermanentKind {
    Publication,
    BuyAll,
    AutoBuyer,
}

/// One-shot unlock bought with currency; survives publications.
#[derive(Clone, Debug)]
pub struct PermanentUpgrade {
    pub id: u32,
    pub kind: PermanentKind,
    pub price: BigNumber,
    pub bought: bool,
}
