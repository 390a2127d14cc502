// SPDX-License-Identifier: MIT

//! Presence registry: the set of arrived clients and agents, keyed by
//! session id, with keepalive eviction (spec.md §4.1, §4.4).

use std::collections::HashMap;

use parking_lot::Mutex;
use tp_core::{AgentInfo, ClientInfo, Session, SessionId, SessionKind};

use crate::watchable::Watchable;

enum Principal {
    Client(ClientInfo),
    Agent(AgentInfo),
}

/// Tracks every arrived session and publishes a snapshot of agent
/// presence for `WatchAgents` subscribers.
///
/// Grounded on the teacher's `MaterializedState` agents/workers
/// HashMap-by-key split; repurposed so eviction happens on `lastMark`
/// staleness (§4.1's keepalive sweep) rather than explicit worker-stop
/// events.
pub struct PresenceRegistry {
    sessions: Mutex<HashMap<SessionId, (Session, Principal)>>,
    agents: Watchable<Vec<AgentInfo>>,
}

impl Default for PresenceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PresenceRegistry {
    pub fn new() -> Self {
        Self { sessions: Mutex::new(HashMap::new()), agents: Watchable::new(Vec::new()) }
    }

    pub fn arrive_client(&self, session: Session, client: ClientInfo) {
        debug_assert_eq!(session.kind, SessionKind::Client);
        self.sessions.lock().insert(session.id, (session, Principal::Client(client)));
    }

    pub fn arrive_agent(&self, session: Session, agent: AgentInfo) {
        debug_assert_eq!(session.kind, SessionKind::Agent);
        self.sessions.lock().insert(session.id, (session, Principal::Agent(agent)));
        self.republish_agents();
    }

    /// Record a `Remain` keepalive. Returns false if the session is unknown
    /// (caller should treat this as `SESSION_EXPIRED`).
    pub fn mark(&self, id: &SessionId, epoch_ms: u64) -> bool {
        match self.sessions.lock().get_mut(id) {
            Some((session, _)) => {
                session.mark(epoch_ms);
                true
            }
            None => false,
        }
    }

    pub fn depart(&self, id: &SessionId) {
        let removed = self.sessions.lock().remove(id);
        if let Some((_, Principal::Agent(_))) = removed {
            self.republish_agents();
        }
    }

    pub fn contains(&self, id: &SessionId) -> bool {
        self.sessions.lock().contains_key(id)
    }

    /// Evict every session whose last mark is older than `timeout_ms`,
    /// returning the evicted ids (spec.md §4.1 keepalive sweep).
    pub fn sweep_stale(&self, now_epoch_ms: u64, timeout_ms: u64) -> Vec<SessionId> {
        let mut evicted = Vec::new();
        let mut agent_evicted = false;
        self.sessions.lock().retain(|id, (session, principal)| {
            let stale = session.is_stale(now_epoch_ms, timeout_ms);
            if stale {
                evicted.push(*id);
                if matches!(principal, Principal::Agent(_)) {
                    agent_evicted = true;
                }
            }
            !stale
        });
        if agent_evicted {
            self.republish_agents();
        }
        evicted
    }

    pub fn snapshot_agents(&self) -> Vec<AgentInfo> {
        self.agents.get()
    }

    /// Every currently arrived agent paired with its session id, used by the
    /// assignment FSM to pick (and later authorize) a specific agent session
    /// rather than just a workload name.
    pub fn snapshot_agents_with_sessions(&self) -> Vec<(SessionId, AgentInfo)> {
        self.sessions
            .lock()
            .iter()
            .filter_map(|(id, (_, principal))| match principal {
                Principal::Agent(info) => Some((*id, info.clone())),
                Principal::Client(_) => None,
            })
            .collect()
    }

    /// The [`AgentInfo`] a session id resolved to, or `None` if the session
    /// is unknown or belongs to a client.
    pub fn agent_info(&self, id: &SessionId) -> Option<AgentInfo> {
        match self.sessions.lock().get(id) {
            Some((_, Principal::Agent(info))) => Some(info.clone()),
            _ => None,
        }
    }

    pub fn watch_agents(&self) -> tokio::sync::watch::Receiver<Vec<AgentInfo>> {
        self.agents.subscribe()
    }

    fn republish_agents(&self) {
        let snapshot: Vec<AgentInfo> = self
            .sessions
            .lock()
            .values()
            .filter_map(|(_, principal)| match principal {
                Principal::Agent(info) => Some(info.clone()),
                Principal::Client(_) => None,
            })
            .collect();
        self.agents.set(snapshot);
    }
}

#[cfg(test)]
#[path = "presence_tests.rs"]
mod tests;
