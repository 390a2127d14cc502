// SPDX-License-Identifier: MIT

//! Intercept table: the manager's authoritative set of intercepts and
//! their dispositions (spec.md §4.3).

use std::collections::HashMap;

use parking_lot::Mutex;
use tp_core::{Disposition, InterceptId, InterceptInfo, InterceptSpec, SessionId};

use crate::watchable::Watchable;

/// Owns every live [`InterceptInfo`] and republishes a snapshot to
/// `WatchIntercepts` subscribers on every mutation.
///
/// Grounded on the same `MaterializedState` keyed-store shape as
/// [`crate::presence::PresenceRegistry`], specialized to intercepts.
pub struct InterceptTable {
    intercepts: Mutex<HashMap<InterceptId, InterceptInfo>>,
    snapshot: Watchable<Vec<InterceptInfo>>,
}

impl Default for InterceptTable {
    fn default() -> Self {
        Self::new()
    }
}

impl InterceptTable {
    pub fn new() -> Self {
        Self { intercepts: Mutex::new(HashMap::new()), snapshot: Watchable::new(Vec::new()) }
    }

    pub fn create(&self, spec: InterceptSpec, client_session: SessionId) -> InterceptInfo {
        let info = InterceptInfo::new(InterceptId::new(), spec, client_session);
        self.intercepts.lock().insert(info.id, info.clone());
        self.republish();
        info
    }

    pub fn get(&self, id: &InterceptId) -> Option<InterceptInfo> {
        self.intercepts.lock().get(id).cloned()
    }

    pub fn transition(&self, id: &InterceptId, disposition: Disposition, message: impl Into<String>) {
        let mut table = self.intercepts.lock();
        if let Some(info) = table.get_mut(id) {
            info.transition(disposition, message);
        }
        drop(table);
        self.republish();
    }

    /// Apply the assignment FSM's verdict: a new disposition/message plus
    /// which agent session (if any) it picked.
    pub fn reassign(
        &self,
        id: &InterceptId,
        disposition: Disposition,
        message: impl Into<String>,
        agent_session: Option<SessionId>,
    ) {
        let mut table = self.intercepts.lock();
        if let Some(info) = table.get_mut(id) {
            info.transition(disposition, message);
            info.set_agent_session(agent_session);
        }
        drop(table);
        self.republish();
    }

    /// Apply the outcome of an agent's `ReviewIntercept` call.
    pub fn review(
        &self,
        id: &InterceptId,
        disposition: Disposition,
        message: impl Into<String>,
        pod_ip: Option<String>,
        manager_port: Option<u16>,
    ) {
        let mut table = self.intercepts.lock();
        if let Some(info) = table.get_mut(id) {
            info.review(disposition, message, pod_ip, manager_port);
        }
        drop(table);
        self.republish();
    }

    pub fn remove(&self, id: &InterceptId) -> Option<InterceptInfo> {
        let removed = self.intercepts.lock().remove(id);
        self.republish();
        removed
    }

    /// Every intercept currently assigned to `agent_name`, regardless of
    /// disposition (used by the agent loop's "review" step, spec.md §4.4).
    pub fn for_agent(&self, agent_name: &str) -> Vec<InterceptInfo> {
        self.intercepts.lock().values().filter(|i| i.spec.agent_name == agent_name).cloned().collect()
    }

    /// True if `client_session` already owns an intercept named `name`
    /// (spec.md §4.2 `CreateIntercept` uniqueness check).
    pub fn exists_for_client(&self, client_session: SessionId, name: &str) -> bool {
        self.intercepts.lock().values().any(|i| i.client_session == client_session && i.spec.name == name)
    }

    /// The intercept named `name` owned by `client_session`, if any.
    pub fn find_owned(&self, client_session: SessionId, name: &str) -> Option<InterceptInfo> {
        self.intercepts
            .lock()
            .values()
            .find(|i| i.client_session == client_session && i.spec.name == name)
            .cloned()
    }

    /// True if any client owns an intercept named `name`, regardless of
    /// owner — used to tell "not found" apart from "not yours" on removal.
    pub fn any_with_name(&self, name: &str) -> bool {
        self.intercepts.lock().values().any(|i| i.spec.name == name)
    }

    pub fn snapshot(&self) -> Vec<InterceptInfo> {
        self.snapshot.get()
    }

    pub fn watch(&self) -> tokio::sync::watch::Receiver<Vec<InterceptInfo>> {
        self.snapshot.subscribe()
    }

    fn republish(&self) {
        let values: Vec<InterceptInfo> = self.intercepts.lock().values().cloned().collect();
        self.snapshot.set(values);
    }
}

#[cfg(test)]
#[path = "intercepts_tests.rs"]
mod tests;
