// src/config.rs

//! Theory configuration.
//!
//! Every field has a default, so an empty TOML document is a valid config:
//!
//! ```toml
//! debug_log = true
//! invalidation = "base_only"   # or "exponents"
//! root_transform = "uniform"   # or "legacy"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::systems::summation::{Invalidation, RootTransform};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TheoryConfig {
    /// Emit the per-tick debug line through `tracing::debug!`.
    pub debug_log: bool,
    pub invalidation: Invalidation,
    pub root_transform: RootTransform,
}

impl TheoryConfig {
    /// Behaviour of earlier releases: `k`-only invalidation, legacy transform.
    pub fn legacy() -> Self {
        Self {
            debug_log: false,
            invalidation: Invalidation::BaseOnly,
            root_transform: RootTransform::Legacy,
        }
    }

    pub fn with_debug_log(mut self, on: bool) -> Self {
        self.debug_log = on;
        self
    }

    pub fn with_invalidation(mut self, invalidation: Invalidation) -> Self {
        self.invalidation = invalidation;
        self
    }

    pub fn with_root_transform(mut self, transform: RootTransform) -> Self {
        self.root_transform = transform;
        self
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}
