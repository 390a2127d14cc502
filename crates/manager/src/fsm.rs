// SPDX-License-Identifier: MIT

//! Intercept assignment state machine (spec.md §4.3).
//!
//! Pure evaluation of "given the current agent presence snapshot, what
//! disposition (and, if any, newly chosen agent) should this intercept
//! have" — kept side-effect free so the transition table can be exercised
//! without a running listener, grounded on the teacher's
//! `engine::runtime::handlers` dispatch-by-event shape.

use tp_core::{agents_are_compatible, AgentInfo, Disposition, InterceptInfo, SessionId};
use tp_state::InterceptTable;

/// Evaluate what disposition an intercept should have given the current
/// agent snapshot, and which agent session (if any) it should be assigned
/// to. Never returns [`Disposition::AgentError`] or [`Disposition::Removed`]
/// — those only come from an explicit agent report or an explicit removal.
///
/// Never promotes an intercept to [`Disposition::Active`] on its own: only
/// an agent's own `ReviewIntercept` call can do that. A compatible,
/// mechanism-capable agent is instead *assigned* while the disposition
/// stays `Waiting`, picked deterministically (lexicographically smallest
/// pod name) so repeated evaluation converges on the same agent. An
/// already-`Active` intercept whose assigned agent is still present and
/// compatible is left untouched.
pub fn evaluate(
    info: &InterceptInfo,
    agents: &[(SessionId, AgentInfo)],
) -> (Disposition, String, Option<SessionId>) {
    if matches!(info.disposition, Disposition::AgentError | Disposition::Removed) {
        return (info.disposition, info.message.clone(), info.agent_session);
    }

    let eligible: Vec<(SessionId, &AgentInfo)> = agents
        .iter()
        .filter(|(_, a)| a.name == info.spec.agent_name && a.namespace == info.spec.namespace)
        .map(|(session, a)| (*session, a))
        .collect();

    let owned: Vec<AgentInfo> = eligible.iter().map(|(_, a)| (*a).clone()).collect();
    let compatible = agents_are_compatible(&owned);

    if info.disposition == Disposition::Active {
        if let Some(assigned) = info.agent_session {
            if compatible && eligible.iter().any(|(session, _)| *session == assigned) {
                return (info.disposition, info.message.clone(), info.agent_session);
            }
        }
    }

    if eligible.is_empty() {
        return (Disposition::NoAgent, format!("no agent found for {}", info.spec.agent_name), None);
    }

    if !compatible {
        return (
            Disposition::Waiting,
            format!(
                "agent replicas for {} disagree on identity or mechanisms, a rolling upgrade may be in progress",
                info.spec.agent_name
            ),
            None,
        );
    }

    let capable: Vec<(SessionId, &AgentInfo)> =
        eligible.iter().copied().filter(|(_, a)| a.agent_has_mechanism(&info.spec.mechanism.name)).collect();
    if capable.is_empty() {
        return (
            Disposition::NoMechanism,
            format!("{} does not support mechanism {}", info.spec.agent_name, info.spec.mechanism.name),
            None,
        );
    }

    if info.spec.mechanism.args.is_empty() {
        return (Disposition::NoPort, "mechanism arguments did not specify a port".to_string(), None);
    }

    let chosen = capable.iter().min_by_key(|(_, a)| a.pod_name.clone()).expect("capable is non-empty");
    (Disposition::Waiting, String::new(), Some(chosen.0))
}

/// Re-run [`evaluate`] for every live intercept against the current agent
/// snapshot. Shared by the request handlers (agent arrival) and the
/// keepalive sweep (agent eviction, spec.md §8 scenario 4: an evicted
/// agent's ACTIVE intercepts revert to WAITING with their assignment
/// cleared).
pub fn reevaluate_all(intercepts: &InterceptTable, agents: &[(SessionId, AgentInfo)]) {
    for info in intercepts.snapshot() {
        let (disposition, message, agent_session) = evaluate(&info, agents);
        intercepts.reassign(&info.id, disposition, message, agent_session);
    }
}

#[cfg(test)]
#[path = "fsm_tests.rs"]
mod tests;
