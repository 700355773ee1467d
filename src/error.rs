// src/error.rs

//! Error types for the host model, configuration and number parsing.
//!
//! The summation cache itself never fails; everything here belongs to the
//! collaborator side (purchases, registration, config files).

use crate::numeric::BigNumber;

/// What kind of entity an id refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Upgrade,
    Milestone,
    Permanent,
    Achievement,
    Category,
    Chapter,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EntityKind::Upgrade => "upgrade",
            EntityKind::Milestone => "milestone",
            EntityKind::Permanent => "permanent upgrade",
            EntityKind::Achievement => "achievement",
            EntityKind::Category => "achievement category",
            EntityKind::Chapter => "story chapter",
        };
        f.write_str(s)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TheoryError {
    #[error("unknown {kind} id {id}")]
    Unknown { kind: EntityKind, id: u32 },

    #[error("{kind} id {id} is already registered")]
    Duplicate { kind: EntityKind, id: u32 },

    #[error("cannot afford {kind} {id}: costs {cost}, have {funds}")]
    InsufficientFunds {
        kind: EntityKind,
        id: u32,
        cost: BigNumber,
        funds: BigNumber,
    },

    #[error("{kind} {id} is at its max level")]
    MaxLevel { kind: EntityKind, id: u32 },

    #[error("{kind} {id} is not available")]
    Unavailable { kind: EntityKind, id: u32 },

    #[error("no milestone points left to spend")]
    NoMilestonePoints,

    #[error("milestone {0} has no level to refund")]
    NothingToRefund(u32),

    #[error("publication is not unlocked")]
    PublicationLocked,

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("cannot parse {input:?} as a number")]
pub struct ParseBigNumberError {
    pub input: String,
}

pub type Result<T> = std::result::Result<T, TheoryError>;
