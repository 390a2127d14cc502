// SPDX-License-Identifier: MIT

//! Session identity and record (spec.md §3 "Session").
//!
//! A session is the manager's handle on one connected client (user daemon)
//! or one connected agent. It carries no behavior of its own; the presence
//! registry in `tp-state` is what tracks liveness against it.

use crate::clock::Clock;

crate::define_id! {
    /// Opaque session identifier handed to a client or agent on `ArriveAsClient`/`ArriveAsAgent`.
    pub struct SessionId("sess");
}

/// Which side of the wire protocol a session belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionKind {
    Client,
    Agent,
}

/// A tracked session and its last-seen timestamp.
///
/// `last_mark_epoch_ms` is advanced by `Remain` calls; the manager's
/// keepalive sweep evicts sessions whose mark has gone stale (spec.md §4.1).
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub kind: SessionKind,
    pub established_epoch_ms: u64,
    pub last_mark_epoch_ms: u64,
}

impl Session {
    pub fn new(kind: SessionKind, clock: &impl Clock) -> Self {
        let now = clock.epoch_ms();
        Self {
            id: SessionId::new(),
            kind,
            established_epoch_ms: now,
            last_mark_epoch_ms: now,
        }
    }

    /// Record a `Remain` keepalive at the given time.
    pub fn mark(&mut self, epoch_ms: u64) {
        self.last_mark_epoch_ms = epoch_ms;
    }

    /// True if no mark has been received within `timeout_ms` of `now_epoch_ms`.
    pub fn is_stale(&self, now_epoch_ms: u64, timeout_ms: u64) -> bool {
        now_epoch_ms.saturating_sub(self.last_mark_epoch_ms) >= timeout_ms
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
