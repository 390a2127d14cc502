// SPDX-License-Identifier: MIT

//! Intercept spec, info and disposition (spec.md §3, §4.3).

use crate::mechanism::Mechanism;
use crate::session::SessionId;

crate::define_id! {
    /// Identifier for one intercept, returned from `CreateIntercept`.
    pub struct InterceptId("icpt");
}

/// What a client requests when creating an intercept.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct InterceptSpec {
    pub name: String,
    pub agent_name: String,
    pub namespace: String,
    pub mechanism: Mechanism,
}

/// Why an intercept is not currently forwarding traffic, or that it is.
///
/// `AGENT_ERROR` is sticky by design (SPEC_FULL.md §4 decision 3): once an
/// agent reports an error for an intercept, only removing the intercept
/// clears it, since the error may stem from a misconfiguration elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Disposition {
    Waiting,
    NoAgent,
    NoMechanism,
    NoPort,
    AgentError,
    Active,
    Removed,
}

/// The full, manager-side record of an intercept.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct InterceptInfo {
    pub id: InterceptId,
    pub spec: InterceptSpec,
    pub client_session: SessionId,
    pub disposition: Disposition,
    pub message: String,
    /// The agent session the assignment FSM picked for this intercept, if
    /// any. Populated by re-evaluation (§4.3) before the agent has reviewed
    /// it; only that same session may call `ReviewIntercept` on it.
    pub agent_session: Option<SessionId>,
    /// The pod IP the agent reported when it reviewed the intercept ACTIVE.
    pub pod_ip: Option<String>,
    /// The manager-facing port the agent is forwarding to, reported at the
    /// same time as `pod_ip`.
    pub manager_port: Option<u16>,
}

impl InterceptInfo {
    pub fn new(id: InterceptId, spec: InterceptSpec, client_session: SessionId) -> Self {
        Self {
            id,
            spec,
            client_session,
            disposition: Disposition::Waiting,
            message: String::new(),
            agent_session: None,
            pod_ip: None,
            manager_port: None,
        }
    }

    /// Move to a new disposition, unless the current one is the sticky
    /// `AgentError` state, which only `remove` clears. Any disposition
    /// other than `Active` drops the reported pod IP and port, since they
    /// describe an agent that is no longer confirmed to be forwarding.
    pub fn transition(&mut self, disposition: Disposition, message: impl Into<String>) {
        if self.disposition == Disposition::AgentError && disposition != Disposition::Removed {
            return;
        }
        if disposition != Disposition::Active {
            self.pod_ip = None;
            self.manager_port = None;
        }
        self.disposition = disposition;
        self.message = message.into();
    }

    /// Record which agent session the assignment FSM picked, or clear it.
    /// Guarded by the same `AgentError` stickiness as `transition`.
    pub fn set_agent_session(&mut self, agent_session: Option<SessionId>) {
        if self.disposition == Disposition::AgentError {
            return;
        }
        self.agent_session = agent_session;
    }

    /// Apply the outcome of an agent's `ReviewIntercept` call: either
    /// `ACTIVE` with the pod IP and port it is forwarding to, or
    /// `AGENT_ERROR` with a message. Does not touch `agent_session` — the
    /// reviewing agent remains the assigned one either way.
    pub fn review(
        &mut self,
        disposition: Disposition,
        message: impl Into<String>,
        pod_ip: Option<String>,
        manager_port: Option<u16>,
    ) {
        if self.disposition == Disposition::AgentError && disposition != Disposition::Removed {
            return;
        }
        self.disposition = disposition;
        self.message = message.into();
        self.pod_ip = pod_ip;
        self.manager_port = manager_port;
    }

    pub fn remove(&mut self) {
        self.disposition = Disposition::Removed;
        self.message.clear();
        self.agent_session = None;
        self.pod_ip = None;
        self.manager_port = None;
    }

    pub fn is_active(&self) -> bool {
        self.disposition == Disposition::Active
    }
}

#[cfg(test)]
#[path = "intercept_tests.rs"]
mod tests;
