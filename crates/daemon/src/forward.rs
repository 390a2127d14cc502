// SPDX-License-Identifier: MIT

//! Default [`tp_agent::Forwarder`] for the in-cluster agent process.
//!
//! Actually tunnelling intercepted traffic to the developer's laptop is
//! out of scope here (spec.md §1 Non-goals: data travels agent<->client
//! directly, the control plane only coordinates); this forwarder records
//! which intercepts are live so the loop's bookkeeping and error-reporting
//! paths are exercised end to end.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashSet;
use tp_agent::Forwarder;
use tp_core::InterceptInfo;
use tracing::info;

#[derive(Default)]
pub struct LoggingForwarder {
    active: Mutex<HashSet<String>>,
}

#[async_trait]
impl Forwarder for LoggingForwarder {
    async fn ensure_forwarding(&self, intercept: &InterceptInfo) -> Result<(), String> {
        let id = intercept.id.to_string();
        if self.active.lock().insert(id.clone()) {
            info!(intercept = %id, mechanism = %intercept.spec.mechanism.name, "forwarding started");
        }
        Ok(())
    }

    async fn stop_forwarding(&self, intercept_id: &str) {
        if self.active.lock().remove(intercept_id) {
            info!(intercept = %intercept_id, "forwarding stopped");
        }
    }
}
