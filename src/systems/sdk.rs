// src/systems/sdk.rs

//! # Systems SDK
//!
//! The host-side building blocks a theory is assembled from. The host engine
//! owns the game loop; a theory only declares entities on a [`Board`] and
//! reacts to a small set of events.
//!
//! ## Pieces
//! - [`summation`]: the incremental series cache (the only stateful math).
//! - [`cost`]: exponential / linear / first-free cost curves.
//! - [`upgrade`]: regular upgrades, milestone upgrades, permanents.
//! - [`progress`]: achievements and story chapters with declarative
//!   [`Condition`]s the host polls.
//! - [`board`]: the registry holding currency, tau, entities and the
//!   publication state.
//!
//! ## Events instead of callbacks
//! A milestone carries an explicit list of [`Event`]s. After a buy or refund
//! the board hands that list back and the theory dispatches it synchronously
//! (invalidate an equation, recompute availability). Nothing captures outer
//! variables; every reaction is visible in the milestone's declaration.
//!
//! ## Equations
//! Equation strings are rendered lazily and kept in an [`EquationCache`]
//! until an event invalidates the slot.
//!
//! [`summation`]: crate::systems::summation
//! [`cost`]: crate::systems::cost
//! [`upgrade`]: crate::systems::upgrade
//! [`progress`]: crate::systems::progress
//! [`board`]: crate::systems::board
//! [`Board`]: crate::systems::board::Board
//! [`Condition`]: crate::systems::progress::Condition

/// Reactions a milestone can request after it is bought or refunded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    InvalidatePrimary,
    InvalidateSecondary,
    InvalidateTertiary,
    UpdateAvailability,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EquationSlot {
    Primary,
    Secondary,
    Tertiary,
}

/// Lazily rendered equation strings, one per slot.
#[derive(Clone, Debug, Default)]
pub struct EquationCache {
    slots: [Option<String>; 3],
}

impl EquationCache {
    fn index(slot: EquationSlot) -> usize {
        match slot {
            EquationSlot::Primary => 0,
            EquationSlot::Secondary => 1,
            EquationSlot::Tertiary => 2,
        }
    }

    pub fn invalidate(&mut self, slot: EquationSlot) {
        self.slots[Self::index(slot)] = None;
    }

    pub fn invalidate_all(&mut self) {
        self.slots = Default::default();
    }

    pub fn is_cached(&self, slot: EquationSlot) -> bool {
        self.slots[Self::index(slot)].is_some()
    }

    /// Cached string for `slot`, rendering it first if it was invalidated.
    pub fn get_or_render(&mut self, slot: EquationSlot, render: impl FnOnce() -> String) -> String {
        self.slots[Self::index(slot)].get_or_insert_with(render).clone()
    }
}
