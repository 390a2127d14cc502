// SPDX-License-Identifier: MIT

//! Request dispatch (spec.md §4.2), grounded on the teacher's
//! `listener::handle_request` match-per-variant shape.

use std::sync::Arc;

use tp_core::{Clock, Disposition, ManagerError, Session, SessionKind};
use tp_proto::{Request, Response, WireErrorKind};
use tp_state::{InterceptTable, PresenceRegistry};

use crate::fsm;

/// Shared manager state handed to every connection handler.
pub struct ManagerCore<C: Clock> {
    pub presence: Arc<PresenceRegistry>,
    pub intercepts: Arc<InterceptTable>,
    pub clock: C,
}

impl<C: Clock> ManagerCore<C> {
    pub fn new(presence: Arc<PresenceRegistry>, intercepts: Arc<InterceptTable>, clock: C) -> Self {
        Self { presence, intercepts, clock }
    }

    pub fn handle(&self, request: Request) -> Response {
        match self.try_handle(request) {
            Ok(response) => response,
            Err(err) => Response::Error { kind: WireErrorKind::from(err.kind()), message: err.to_string() },
        }
    }

    fn try_handle(&self, request: Request) -> Result<Response, ManagerError> {
        match request {
            Request::ArriveAsClient { client } => {
                let session = Session::new(SessionKind::Client, &self.clock);
                let id = session.id;
                self.presence.arrive_client(session, client);
                Ok(Response::Arrived { session: id })
            }
            Request::ArriveAsAgent { agent } => {
                let session = Session::new(SessionKind::Agent, &self.clock);
                let id = session.id;
                self.presence.arrive_agent(session, agent);
                self.reevaluate_all();
                Ok(Response::Arrived { session: id })
            }
            Request::Remain { session } => {
                if self.presence.mark(&session, self.clock.epoch_ms()) {
                    Ok(Response::Marked)
                } else {
                    Err(ManagerError::SessionExpired(session.to_string()))
                }
            }
            Request::Depart { session } => {
                self.presence.depart(&session);
                Ok(Response::Departed)
            }
            Request::WatchAgents { session } => {
                if !self.presence.contains(&session) {
                    return Err(ManagerError::SessionExpired(session.to_string()));
                }
                Ok(Response::AgentsSnapshot { agents: self.presence.snapshot_agents() })
            }
            Request::WatchIntercepts { session } => self.watch_intercepts(session),
            Request::CreateIntercept { session, spec } => {
                if !self.presence.contains(&session) {
                    return Err(ManagerError::SessionExpired(session.to_string()));
                }
                if self.intercepts.exists_for_client(session, &spec.name) {
                    return Err(ManagerError::AlreadyExists(spec.name));
                }
                let info = self.intercepts.create(spec, session);
                let agents = self.presence.snapshot_agents_with_sessions();
                let (disposition, message, agent_session) = fsm::evaluate(&info, &agents);
                self.intercepts.reassign(&info.id, disposition, message, agent_session);
                let info = self.intercepts.get(&info.id).unwrap_or(info);
                Ok(Response::InterceptCreated { info })
            }
            Request::RemoveIntercept { session, name } => {
                if !self.presence.contains(&session) {
                    return Err(ManagerError::SessionExpired(session.to_string()));
                }
                match self.intercepts.find_owned(session, &name) {
                    Some(info) => {
                        self.intercepts.remove(&info.id);
                        Ok(Response::InterceptRemoved)
                    }
                    None if self.intercepts.any_with_name(&name) => {
                        Err(ManagerError::PermissionDenied(format!("intercept {name:?} is not owned by this client")))
                    }
                    None => Err(ManagerError::InterceptNotFound(name)),
                }
            }
            Request::ReviewIntercept { session, id, disposition, message, pod_ip, ssh_port } => {
                self.review_intercept(session, id, disposition, message, pod_ip, ssh_port)
            }
        }
    }

    /// Agents see only intercepts assigned or eligible for their own
    /// workload; clients see only the intercepts they created (spec.md §4.4
    /// "watch" scoping for the intercept stream).
    fn watch_intercepts(&self, session: tp_core::SessionId) -> Result<Response, ManagerError> {
        if !self.presence.contains(&session) {
            return Err(ManagerError::SessionExpired(session.to_string()));
        }
        let intercepts = match self.presence.agent_info(&session) {
            Some(agent) => self.intercepts.for_agent(&agent.name),
            None => self
                .intercepts
                .snapshot()
                .into_iter()
                .filter(|i| i.client_session == session)
                .collect(),
        };
        Ok(Response::InterceptsSnapshot { intercepts })
    }

    /// Apply an agent's review of an intercept it was assigned. Only the
    /// session the FSM actually assigned may review it (spec.md §4.4
    /// "review" -> `PERMISSION_DENIED` otherwise), and only `ACTIVE` or
    /// `AGENT_ERROR` are valid outcomes to report.
    fn review_intercept(
        &self,
        session: tp_core::SessionId,
        id: tp_core::InterceptId,
        disposition: Disposition,
        message: String,
        pod_ip: Option<String>,
        ssh_port: Option<u16>,
    ) -> Result<Response, ManagerError> {
        if !self.presence.contains(&session) {
            return Err(ManagerError::SessionExpired(session.to_string()));
        }
        if !matches!(disposition, Disposition::Active | Disposition::AgentError) {
            return Err(ManagerError::InvalidReview(disposition));
        }
        let info = self.intercepts.get(&id).ok_or_else(|| ManagerError::InterceptNotFound(id.to_string()))?;
        if info.agent_session != Some(session) {
            return Err(ManagerError::PermissionDenied(format!(
                "session {session} is not the agent assigned to intercept {id}"
            )));
        }
        self.intercepts.review(&id, disposition, message, pod_ip, ssh_port);
        Ok(Response::Marked)
    }

    /// Re-run the assignment FSM for every live intercept after agent
    /// presence changes (spec.md §4.3).
    fn reevaluate_all(&self) {
        fsm::reevaluate_all(&self.intercepts, &self.presence.snapshot_agents_with_sessions());
    }
}

#[cfg(test)]
#[path = "handlers_tests.rs"]
mod tests;
