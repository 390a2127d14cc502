// SPDX-License-Identifier: MIT

//! Agent identity and capability advertisement (spec.md §3 "AgentInfo").

use crate::mechanism::{mechanisms_are_the_same, Mechanism};

crate::define_id! {
    /// Identifier for an agent's arrival session, distinct from `SessionId`
    /// only in prefix; agents and clients share the session table.
    pub struct AgentSessionId("agnt");
}

/// What a traffic-agent sidecar reports about itself on `ArriveAsAgent`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AgentInfo {
    pub name: String,
    pub namespace: String,
    pub pod_name: String,
    pub pod_ip: String,
    pub version: String,
    pub product: String,
    pub mechanisms: Vec<Mechanism>,
}

impl AgentInfo {
    /// True if `mechanism_name` is among this agent's advertised mechanisms.
    pub fn agent_has_mechanism(&self, mechanism_name: &str) -> bool {
        self.mechanisms.iter().any(|m| m.name == mechanism_name)
    }
}

/// True if every agent in the workload's replica set agrees on identity
/// (`name`, `product`, `version`) and mechanism set. A single agent (or an
/// empty set) is never "compatible" in isolation; the check exists to
/// catch a rolling-update window where old and new agent versions briefly
/// coexist, whether or not their mechanisms happen to still match.
pub fn agents_are_compatible(agents: &[AgentInfo]) -> bool {
    if agents.len() < 2 {
        return !agents.is_empty();
    }
    let first = &agents[0];
    agents[1..].iter().all(|a| {
        a.name == first.name
            && a.product == first.product
            && a.version == first.version
            && mechanisms_are_the_same(&first.mechanisms, &a.mechanisms)
    })
}

#[cfg(test)]
#[path = "agent_info_tests.rs"]
mod tests;
