// SPDX-License-Identifier: MIT

//! Periodic keepalive sweep (spec.md §4.1), grounded on the teacher's
//! background reconciliation task pattern — a `tokio::time::interval`
//! loop racing a `CancellationToken` rather than a detached `spawn`.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tp_core::Clock;
use tp_state::{InterceptTable, PresenceRegistry};
use tracing::info;

use crate::fsm;

pub async fn run<C: Clock>(
    presence: Arc<PresenceRegistry>,
    intercepts: Arc<InterceptTable>,
    clock: C,
    sweep_interval: Duration,
    session_timeout: Duration,
    cancel: CancellationToken,
) {
    let mut ticker = tokio::time::interval(sweep_interval);
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let evicted = presence.sweep_stale(clock.epoch_ms(), session_timeout.as_millis() as u64);
                if !evicted.is_empty() {
                    info!(count = evicted.len(), "evicted stale sessions");
                    fsm::reevaluate_all(&intercepts, &presence.snapshot_agents_with_sessions());
                }
            }
            _ = cancel.cancelled() => {
                info!("keepalive sweep shutting down");
                return;
            }
        }
    }
}

#[cfg(test)]
#[path = "keepalive_tests.rs"]
mod tests;
