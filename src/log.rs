// src/log.rs

//! Debug logging gated by [`TheoryConfig::debug_log`](crate::config::TheoryConfig).

/// Off-by-default debug channel; the message is only built when enabled.
#[derive(Clone, Copy, Debug, Default)]
pub struct DebugLog {
    enabled: bool,
}

impl DebugLog {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn log(&self, message: impl FnOnce() -> String) {
        if self.enabled {
            tracing::debug!(target: "limit_series::debug", "{}", message());
        }
    }
}
