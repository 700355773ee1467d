// src/theories/mod.rs

// Concrete theories built on the systems layer.
// Each theory is feature-gated so a host build only carries what it loads.

pub mod sdk;
pub use sdk::*;

#[cfg(feature = "theory-classic")]
pub mod classic;

#[cfg(feature = "theory-alpha")]
pub mod alpha;
