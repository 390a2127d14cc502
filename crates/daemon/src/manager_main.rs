// SPDX-License-Identifier: MIT

//! `tp-daemon manager` entry point: runs the manager's TCP listener loop
//! and keepalive sweep, grounded on the teacher's `Listener::run_unix_only`
//! accept loop (here over TCP, since the manager serves remote agents and
//! clients rather than a local CLI).

use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tp_core::SystemClock;
use tp_manager::{ManagerConfig, ManagerCore};
use tp_proto::{read_message_timeout, write_message_timeout, ProtocolError, Response};
use tp_state::{InterceptTable, PresenceRegistry};
use tracing::{debug, error, info, warn};

use crate::env;

pub async fn run() -> anyhow::Result<()> {
    let config = ManagerConfig { session_timeout: env::session_timeout(), sweep_interval: env::sweep_interval() };
    let presence = Arc::new(PresenceRegistry::new());
    let intercepts = Arc::new(InterceptTable::new());
    let core = Arc::new(ManagerCore::new(presence.clone(), intercepts.clone(), SystemClock));

    let cancel = CancellationToken::new();
    let sweep = tokio::spawn(tp_manager::keepalive::run(
        presence,
        intercepts,
        SystemClock,
        config.sweep_interval,
        config.session_timeout,
        cancel.child_token(),
    ));

    let addr = env::manager_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, "manager listening");

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accepted = listener.accept() => {
                let (stream, peer) = accepted?;
                let core = core.clone();
                tokio::spawn(async move {
                    debug!(%peer, "connection accepted");
                    if let Err(e) = serve_connection(stream, core).await {
                        log_connection_error(e);
                    }
                });
            }
            _ = &mut shutdown => {
                info!("shutdown signal received");
                break;
            }
        }
    }

    cancel.cancel();
    let _ = sweep.await;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

/// Serve requests off one connection until the peer disconnects. A single
/// agent or client keeps its connection open for the session's lifetime,
/// issuing many requests over it (spec.md §5's "Arrive strictly
/// happens-before Remain/Watch/Depart").
async fn serve_connection<S>(mut stream: S, core: Arc<ManagerCore<SystemClock>>) -> Result<(), ProtocolError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    loop {
        let request = match read_message_timeout(&mut stream, env::ipc_timeout()).await {
            Ok(request) => request,
            Err(ProtocolError::Closed) => return Ok(()),
            Err(e) => return Err(e),
        };
        let response: Response = core.handle(request);
        write_message_timeout(&mut stream, &response, env::ipc_timeout()).await?;
    }
}

fn log_connection_error(e: ProtocolError) {
    match e {
        ProtocolError::Closed => debug!("peer disconnected"),
        ProtocolError::Timeout => warn!("connection timed out"),
        other => error!(error = %other, "connection error"),
    }
}
