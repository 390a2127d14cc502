// SPDX-License-Identifier: MIT

//! `tp-daemon agent` entry point: connects to the manager and runs the
//! sidecar loop, grounded on
//! `examples/original_source/cmd/traffic/cmd/agent/client.go`'s
//! connect-then-loop shape.

use std::sync::Arc;

use tokio::net::TcpStream;
use tokio_util::sync::CancellationToken;
use tp_agent::{AgentLoopConfig, StreamLink};
use tp_core::{AgentInfo, Mechanism};
use tracing::info;

use crate::env;
use crate::forward::LoggingForwarder;

pub async fn run() -> anyhow::Result<()> {
    let name = env::agent_name()?;
    let info_record = AgentInfo {
        name,
        namespace: env::namespace(),
        pod_name: env::pod_name(),
        pod_ip: env::pod_ip(),
        version: env::agent_version(),
        product: "telepresence".to_string(),
        mechanisms: vec![Mechanism::new("tcp", Vec::<String>::new())],
    };

    let manager_addr = format!("{}:{}", env::manager_host(), env::manager_port());
    info!(%manager_addr, agent = %info_record.name, "connecting to manager");
    let stream = TcpStream::connect(&manager_addr).await?;
    let link = Arc::new(StreamLink::new(stream));
    let forwarder = Arc::new(LoggingForwarder::default());

    let cancel = CancellationToken::new();
    let cancel_on_signal = cancel.clone();
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        cancel_on_signal.cancel();
    });

    tp_agent::run(link, forwarder, info_record, AgentLoopConfig::default(), cancel).await?;
    Ok(())
}
