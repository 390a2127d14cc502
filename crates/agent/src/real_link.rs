// SPDX-License-Identifier: MIT

//! The real [`ManagerLink`], driving `tp_proto`'s length-prefixed JSON
//! framing over a single persistent connection to the manager.

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::Mutex;
use tp_core::{AgentInfo, Disposition, InterceptId, InterceptInfo, SessionId};
use tp_proto::{read_message, write_message, Request, Response};

use crate::error::AgentError;
use crate::link::ManagerLink;

/// Drives a single request/response exchange per call over a shared
/// duplex connection, serializing concurrent callers behind a mutex since
/// the wire protocol is strictly request-then-response (spec.md §6).
pub struct StreamLink<S> {
    conn: Mutex<S>,
}

impl<S> StreamLink<S> {
    pub fn new(conn: S) -> Self {
        Self { conn: Mutex::new(conn) }
    }
}

async fn exchange<S>(conn: &Mutex<S>, request: Request) -> Result<Response, AgentError>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    // `Mutex<S>`'s lock is held only across the owning future's await
    // points here, never across a `.await` on a *different* task, since
    // each call to `exchange` runs to completion before releasing it.
    let mut conn = conn.lock().await;
    let request_send = write_message(&mut *conn, &request);
    request_send.await.map_err(|e| AgentError::Link(e.to_string()))?;
    read_message(&mut *conn).await.map_err(|e| AgentError::Link(e.to_string()))
}

#[async_trait]
impl<S> ManagerLink for StreamLink<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    async fn arrive(&self, info: AgentInfo) -> Result<SessionId, AgentError> {
        match exchange(&self.conn, Request::ArriveAsAgent { agent: info }).await? {
            Response::Arrived { session } => Ok(session),
            Response::Error { message, .. } => Err(AgentError::Link(message)),
            other => Err(AgentError::Link(format!("unexpected response: {other:?}"))),
        }
    }

    async fn remain(&self, session: SessionId) -> Result<(), AgentError> {
        match exchange(&self.conn, Request::Remain { session }).await? {
            Response::Marked => Ok(()),
            Response::Error { kind, message } if kind == tp_proto::WireErrorKind::SessionExpired => {
                let _ = message;
                Err(AgentError::SessionExpired)
            }
            Response::Error { message, .. } => Err(AgentError::Link(message)),
            other => Err(AgentError::Link(format!("unexpected response: {other:?}"))),
        }
    }

    async fn watch_intercepts(&self, session: SessionId) -> Result<Vec<InterceptInfo>, AgentError> {
        match exchange(&self.conn, Request::WatchIntercepts { session }).await? {
            Response::InterceptsSnapshot { intercepts } => Ok(intercepts),
            Response::Error { kind, message } if kind == tp_proto::WireErrorKind::SessionExpired => {
                let _ = message;
                Err(AgentError::SessionExpired)
            }
            Response::Error { message, .. } => Err(AgentError::Link(message)),
            other => Err(AgentError::Link(format!("unexpected response: {other:?}"))),
        }
    }

    async fn review_intercept(
        &self,
        session: SessionId,
        id: InterceptId,
        disposition: Disposition,
        message: String,
        pod_ip: Option<String>,
        ssh_port: Option<u16>,
    ) -> Result<(), AgentError> {
        let request = Request::ReviewIntercept { session, id, disposition, message, pod_ip, ssh_port };
        match exchange(&self.conn, request).await? {
            Response::Marked => Ok(()),
            Response::Error { message, .. } => Err(AgentError::Link(message)),
            other => Err(AgentError::Link(format!("unexpected response: {other:?}"))),
        }
    }
}
