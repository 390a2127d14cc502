// SPDX-License-Identifier: MIT

use super::*;
use parking_lot::Mutex;
use tp_core::{InterceptId, InterceptInfo, InterceptSpec, Mechanism};

struct FakeLink {
    session: SessionId,
    arrivals: Mutex<u32>,
    intercepts: Mutex<Vec<InterceptInfo>>,
    expire_next_remain: Mutex<bool>,
    reviews: Mutex<Vec<(InterceptId, Disposition, String)>>,
}

#[async_trait::async_trait]
impl ManagerLink for FakeLink {
    async fn arrive(&self, _info: AgentInfo) -> Result<SessionId, AgentError> {
        *self.arrivals.lock() += 1;
        Ok(self.session)
    }

    async fn remain(&self, _session: SessionId) -> Result<(), AgentError> {
        if std::mem::take(&mut *self.expire_next_remain.lock()) {
            return Err(AgentError::SessionExpired);
        }
        Ok(())
    }

    async fn watch_intercepts(&self, _session: SessionId) -> Result<Vec<InterceptInfo>, AgentError> {
        Ok(self.intercepts.lock().clone())
    }

    async fn review_intercept(
        &self,
        _session: SessionId,
        id: InterceptId,
        disposition: Disposition,
        message: String,
        _pod_ip: Option<String>,
        _ssh_port: Option<u16>,
    ) -> Result<(), AgentError> {
        self.reviews.lock().push((id, disposition, message));
        Ok(())
    }
}

struct FailingForwarder;

#[async_trait::async_trait]
impl Forwarder for FailingForwarder {
    async fn ensure_forwarding(&self, _intercept: &InterceptInfo) -> Result<(), String> {
        Err("connection refused".to_string())
    }

    async fn stop_forwarding(&self, _intercept_id: &str) {}
}

struct OkForwarder;

#[async_trait::async_trait]
impl Forwarder for OkForwarder {
    async fn ensure_forwarding(&self, _intercept: &InterceptInfo) -> Result<(), String> {
        Ok(())
    }

    async fn stop_forwarding(&self, _intercept_id: &str) {}
}

fn agent_info() -> AgentInfo {
    AgentInfo {
        name: "svc".to_string(),
        namespace: "default".to_string(),
        pod_name: "svc-abc".to_string(),
        pod_ip: "10.0.0.5".to_string(),
        version: "2.20.0".to_string(),
        product: "telepresence".to_string(),
        mechanisms: vec![Mechanism::new("tcp", [])],
    }
}

fn assigned_intercept(agent_session: SessionId) -> InterceptInfo {
    let mut info = InterceptInfo::new(
        InterceptId::new(),
        InterceptSpec {
            name: "icpt".to_string(),
            agent_name: "svc".to_string(),
            namespace: "default".to_string(),
            mechanism: Mechanism::new("tcp", vec!["8080".to_string()]),
        },
        SessionId::new(),
    );
    info.set_agent_session(Some(agent_session));
    info
}

#[tokio::test(start_paused = true)]
async fn reviews_agent_error_when_forwarding_fails() {
    let session = SessionId::new();
    let link = Arc::new(FakeLink {
        session,
        arrivals: Mutex::new(0),
        intercepts: Mutex::new(vec![assigned_intercept(session)]),
        expire_next_remain: Mutex::new(false),
        reviews: Mutex::new(Vec::new()),
    });
    let forwarder = Arc::new(FailingForwarder);
    let cancel = CancellationToken::new();
    let cancel_task = cancel.clone();
    let link_task = link.clone();

    let handle = tokio::spawn(run(
        link_task,
        forwarder,
        agent_info(),
        AgentLoopConfig { remain_interval: Duration::from_secs(60), watch_interval: Duration::from_millis(10) },
        cancel_task,
    ));

    tokio::time::advance(Duration::from_millis(50)).await;
    tokio::task::yield_now().await;
    cancel.cancel();
    handle.await.unwrap().unwrap();

    let reviews = link.reviews.lock();
    assert!(!reviews.is_empty());
    assert_eq!(reviews[0].1, Disposition::AgentError);
}

#[tokio::test(start_paused = true)]
async fn reviews_active_with_pod_ip_when_forwarding_succeeds() {
    let session = SessionId::new();
    let link = Arc::new(FakeLink {
        session,
        arrivals: Mutex::new(0),
        intercepts: Mutex::new(vec![assigned_intercept(session)]),
        expire_next_remain: Mutex::new(false),
        reviews: Mutex::new(Vec::new()),
    });
    let forwarder = Arc::new(OkForwarder);
    let cancel = CancellationToken::new();
    let cancel_task = cancel.clone();
    let link_task = link.clone();

    let handle = tokio::spawn(run(
        link_task,
        forwarder,
        agent_info(),
        AgentLoopConfig { remain_interval: Duration::from_secs(60), watch_interval: Duration::from_millis(10) },
        cancel_task,
    ));

    tokio::time::advance(Duration::from_millis(50)).await;
    tokio::task::yield_now().await;
    cancel.cancel();
    handle.await.unwrap().unwrap();

    let reviews = link.reviews.lock();
    assert!(!reviews.is_empty());
    assert_eq!(reviews[0].1, Disposition::Active);
}

#[tokio::test(start_paused = true)]
async fn unassigned_intercepts_are_never_reviewed() {
    let session = SessionId::new();
    let link = Arc::new(FakeLink {
        session,
        arrivals: Mutex::new(0),
        intercepts: Mutex::new(vec![assigned_intercept(SessionId::new())]),
        expire_next_remain: Mutex::new(false),
        reviews: Mutex::new(Vec::new()),
    });
    let forwarder = Arc::new(OkForwarder);
    let cancel = CancellationToken::new();
    let cancel_task = cancel.clone();
    let link_task = link.clone();

    let handle = tokio::spawn(run(
        link_task,
        forwarder,
        agent_info(),
        AgentLoopConfig { remain_interval: Duration::from_secs(60), watch_interval: Duration::from_millis(10) },
        cancel_task,
    ));

    tokio::time::advance(Duration::from_millis(50)).await;
    tokio::task::yield_now().await;
    cancel.cancel();
    handle.await.unwrap().unwrap();

    assert!(link.reviews.lock().is_empty());
}

#[tokio::test(start_paused = true)]
async fn re_arrives_after_session_expires_on_remain() {
    let link = Arc::new(FakeLink {
        session: SessionId::new(),
        arrivals: Mutex::new(0),
        intercepts: Mutex::new(vec![]),
        expire_next_remain: Mutex::new(true),
        reviews: Mutex::new(Vec::new()),
    });
    let forwarder = Arc::new(OkForwarder);
    let cancel = CancellationToken::new();
    let cancel_task = cancel.clone();
    let link_task = link.clone();

    let handle = tokio::spawn(run(
        link_task,
        forwarder,
        agent_info(),
        AgentLoopConfig { remain_interval: Duration::from_millis(10), watch_interval: Duration::from_secs(60) },
        cancel_task,
    ));

    tokio::time::advance(Duration::from_millis(50)).await;
    tokio::task::yield_now().await;
    cancel.cancel();
    handle.await.unwrap().unwrap();

    assert_eq!(*link.arrivals.lock(), 2);
}
