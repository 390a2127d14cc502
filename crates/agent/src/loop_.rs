// SPDX-License-Identifier: MIT

//! The agent loop: connect, arrive, then alternate remain/watch/review
//! until cancelled (spec.md §4.4), grounded on the teacher's
//! `KubernetesAdapter::spawn` retry-on-IP-change pattern and
//! `cmd/traffic/cmd/agent/client.go`'s connect-retry loop.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tp_core::{AgentInfo, Disposition, SessionId};
use tracing::{error, info, warn};

use crate::error::AgentError;
use crate::forward::Forwarder;
use crate::link::ManagerLink;

pub struct AgentLoopConfig {
    pub remain_interval: Duration,
    pub watch_interval: Duration,
}

impl Default for AgentLoopConfig {
    fn default() -> Self {
        Self { remain_interval: Duration::from_secs(5), watch_interval: Duration::from_secs(2) }
    }
}

/// Run the agent loop until `cancel` fires or the manager link reports an
/// unrecoverable error. A [`AgentError::SessionExpired`] causes a single
/// re-arrive rather than terminating the loop, since the manager may have
/// restarted and forgotten this agent's session.
pub async fn run(
    link: Arc<dyn ManagerLink>,
    forwarder: Arc<dyn Forwarder>,
    info: AgentInfo,
    config: AgentLoopConfig,
    cancel: CancellationToken,
) -> Result<(), AgentError> {
    let mut session = link.arrive(info.clone()).await?;
    info!(%session, "agent arrived");

    let mut remain_ticker = tokio::time::interval(config.remain_interval);
    let mut watch_ticker = tokio::time::interval(config.watch_interval);
    let mut known_intercepts: HashSet<String> = HashSet::new();

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                info!("agent loop shutting down");
                return Ok(());
            }
            _ = remain_ticker.tick() => {
                match link.remain(session).await {
                    Ok(()) => {}
                    Err(AgentError::SessionExpired) => {
                        warn!("session expired, re-arriving");
                        session = link.arrive(info.clone()).await?;
                    }
                    Err(e) => return Err(e),
                }
            }
            _ = watch_ticker.tick() => {
                let intercepts = match link.watch_intercepts(session).await {
                    Ok(intercepts) => intercepts,
                    Err(AgentError::SessionExpired) => {
                        warn!("session expired, re-arriving");
                        session = link.arrive(info.clone()).await?;
                        continue;
                    }
                    Err(e) => return Err(e),
                };

                let mut seen = HashSet::new();
                for intercept in &intercepts {
                    if intercept.spec.agent_name != info.name {
                        continue;
                    }
                    seen.insert(intercept.id.to_string());
                    if intercept.agent_session != Some(session) {
                        continue;
                    }
                    match forwarder.ensure_forwarding(intercept).await {
                        Ok(()) => {
                            let ssh_port = intercept.spec.mechanism.args.first().and_then(|p| p.parse().ok());
                            let _ = link
                                .review_intercept(
                                    session,
                                    intercept.id,
                                    Disposition::Active,
                                    String::new(),
                                    Some(info.pod_ip.clone()),
                                    ssh_port,
                                )
                                .await;
                        }
                        Err(message) => {
                            error!(intercept = %intercept.id, %message, "forwarding failed");
                            let _ = link
                                .review_intercept(
                                    session,
                                    intercept.id,
                                    Disposition::AgentError,
                                    message,
                                    None,
                                    None,
                                )
                                .await;
                        }
                    }
                }

                for stale in known_intercepts.difference(&seen) {
                    forwarder.stop_forwarding(stale).await;
                }
                known_intercepts = seen;
            }
        }
    }
}

#[cfg(test)]
#[path = "loop_tests.rs"]
mod tests;
