// SPDX-License-Identifier: MIT

//! The agent's view of its connection to the manager (spec.md §4.4),
//! grounded on the teacher's `AgentAdapter` trait shape
//! (`crates/daemon/src/adapters/agent/k8s/mod.rs`) — an async trait so the
//! loop can be driven against a fake in tests without a real socket.

use async_trait::async_trait;
use tp_core::{AgentInfo, Disposition, InterceptId, InterceptInfo, SessionId};

use crate::error::AgentError;

#[async_trait]
pub trait ManagerLink: Send + Sync {
    async fn arrive(&self, info: AgentInfo) -> Result<SessionId, AgentError>;
    async fn remain(&self, session: SessionId) -> Result<(), AgentError>;
    async fn watch_intercepts(&self, session: SessionId) -> Result<Vec<InterceptInfo>, AgentError>;

    /// Report the outcome of trying to service an assigned intercept:
    /// `ACTIVE` with where this agent is forwarding to, or `AGENT_ERROR`
    /// with why it could not.
    #[allow(clippy::too_many_arguments)]
    async fn review_intercept(
        &self,
        session: SessionId,
        id: InterceptId,
        disposition: Disposition,
        message: String,
        pod_ip: Option<String>,
        ssh_port: Option<u16>,
    ) -> Result<(), AgentError>;
}
