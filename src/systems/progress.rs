// src/systems/progress.rs

//! Achievements and story chapters.
//!
//! Both unlock once when their [`Condition`] first holds and never re-lock.

use crate::numeric::BigNumber;
use crate::systems::board::Board;
use crate::systems::upgrade::PermanentKind;

/// Predicate the host polls after each tick.
#[derive(Clone, Debug, PartialEq)]
pub enum Condition {
    PermanentOwned(PermanentKind),
    UpgradeLevelAtLeast { id: u32, level: u32 },
    UpgradeMaxed(u32),
    UpgradeAvailable(u32),
    MilestoneLevelAtLeast { id: u32, level: u32 },
    AllMilestonesMaxed,
    CurrencyAtLeast(BigNumber),
    PublicationsAtLeast(u32),
}

impl Condition {
    /// Unknown ids never hold.
    pub fn holds(&self, board: &Board) -> bool {
        match self {
            Condition::PermanentOwned(kind) => board.owns(*kind),
            Condition::UpgradeLevelAtLeast { id, level } => {
                board.upgrade(*id).is_ok_and(|u| u.level >= *level)
            }
            Condition::UpgradeMaxed(id) => board.upgrade(*id).is_ok_and(|u| u.is_maxed()),
            Condition::UpgradeAvailable(id) => board.upgrade(*id).is_ok_and(|u| u.available),
            Condition::MilestoneLevelAtLeast { id, level } => {
                board.milestone(*id).is_ok_and(|m| m.level >= *level)
            }
            Condition::AllMilestonesMaxed => board.milestones().all(|m| m.is_maxed()),
            Condition::CurrencyAtLeast(v) => board.currency() >= *v,
            Condition::PublicationsAtLeast(n) => board.publications() >= *n,
        }
    }
}

#[derive(Clone, Debug)]
pub struct AchievementCategory {
    pub id: u32,
    pub name: String,
}

#[derive(Clone, Debug)]
pub struct Achievement {
    pub id: u32,
    pub category: u32,
    pub name: String,
    pub description: String,
    pub condition: Condition,
    pub unlocked: bool,
}

#[derive(Clone, Debug)]
pub struct StoryChapter {
    pub id: u32,
    pub title: String,
    pub text: String,
    pub condition: Condition,
    pub unlocked: bool,
}

/// Newly unlocked entry reported by a poll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Unlocked {
    Achievement(u32),
    Chapter(u32),
}
