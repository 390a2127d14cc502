// SPDX-License-Identifier: MIT

//! Traffic forwarding boundary (spec.md §4.4 "forward").
//!
//! Actually proxying intercepted connections to the developer's laptop is
//! a platform/mechanism-specific concern (the teacher's equivalent split
//! is `AgentAdapter` delegating the real work to its adapter
//! implementation); the loop only needs to know whether forwarding for a
//! given intercept is currently healthy.

use async_trait::async_trait;
use tp_core::InterceptInfo;

#[async_trait]
pub trait Forwarder: Send + Sync {
    /// Ensure traffic for `intercept` is being forwarded. Idempotent:
    /// called on every review pass for every active intercept.
    async fn ensure_forwarding(&self, intercept: &InterceptInfo) -> Result<(), String>;

    /// Tear down forwarding for an intercept that no longer exists.
    async fn stop_forwarding(&self, intercept_id: &str);
}
