// SPDX-License-Identifier: MIT

//! Explicit manager configuration (SPEC_FULL.md §1 — no process-global
//! statics or memoized values).

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ManagerConfig {
    /// A session is evicted once this long has passed without a `Remain`.
    pub session_timeout: Duration,
    /// How often the keepalive sweep runs.
    pub sweep_interval: Duration,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self { session_timeout: Duration::from_secs(15), sweep_interval: Duration::from_secs(5) }
    }
}
