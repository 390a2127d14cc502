// SPDX-License-Identifier: MIT

//! `tp-connector`: the laptop-side root daemon. Binds a Unix domain
//! socket for the CLI to talk to, and wires up outbound DNS routing and
//! virtual-IP NAT bookkeeping for the namespaces the user is connected to
//! (spec.md §4.6, §6).

mod env;
mod install;
mod protocol;

use std::os::unix::fs::PermissionsExt;
use std::sync::Arc;

use clap::Parser;
use nix::unistd::Uid;
use parking_lot::RwLock;
use tokio::net::UnixListener;
use tp_installer::InstallerConfig;
use tp_outbound::{build_search_paths, find_available_subnet, Subnet};
use tracing::{error, info};

use crate::protocol::{ConnectorRequest, ConnectorResponse};

#[derive(Parser)]
#[command(name = "tp-connector")]
struct Cli {
    /// Image registry override, mirrors TELEPRESENCE_REGISTRY.
    #[arg(long)]
    registry: Option<String>,

    /// Kubernetes namespaces to route to the cluster.
    #[arg(long = "namespace", value_name = "NAMESPACE")]
    namespaces: Vec<String>,
}

struct OutboundState {
    namespaces: Vec<String>,
    search_paths: Vec<String>,
    subnet: Option<Subnet>,
}

struct ConnectorState {
    outbound: RwLock<OutboundState>,
    installer_config: InstallerConfig,
    kube_client: Option<kube::Client>,
}

fn main() -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    if !Uid::effective().is_root() {
        eprintln!("tp-connector must run as root (euid 0)");
        std::process::exit(1);
    }

    let cli = Cli::parse();
    if let Some(registry) = &cli.registry {
        std::env::set_var("TELEPRESENCE_REGISTRY", registry);
    }

    let namespaces = if cli.namespaces.is_empty() { vec!["default".to_string()] } else { cli.namespaces };
    let search_paths = build_search_paths(&namespaces, &[], &env::cluster_domain());
    let subnet = find_available_subnet(&[]);
    if subnet.is_none() {
        error!("no available subnet found for the virtual network device");
    }
    let outbound = RwLock::new(OutboundState { namespaces, search_paths, subnet });
    let registry = env::registry_override().unwrap_or_else(|| env::DEFAULT_REGISTRY.to_string());
    let installer_config = InstallerConfig::new(registry, env::agent_version());

    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(async move {
        let kube_client = match kube::Client::try_default().await {
            Ok(client) => Some(client),
            Err(e) => {
                error!(error = %e, "no kubernetes client available, EnsureAgent/RemoveAgent will fail");
                None
            }
        };
        let state = Arc::new(ConnectorState { outbound, installer_config, kube_client });
        run(state).await
    });
    if let Err(e) = result {
        eprintln!("tp-connector exited with error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run(state: Arc<ConnectorState>) -> anyhow::Result<()> {
    let socket_path = env::socket_path();
    if socket_path.exists() {
        std::fs::remove_file(&socket_path)?;
    }
    if let Some(parent) = socket_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let listener = UnixListener::bind(&socket_path)?;
    std::fs::set_permissions(&socket_path, std::fs::Permissions::from_mode(0o777))?;
    info!(path = %socket_path.display(), "connector listening");

    loop {
        tokio::select! {
            accepted = listener.accept() => {
                let (stream, _) = accepted?;
                let state = state.clone();
                tokio::spawn(async move {
                    if let Err(e) = serve(stream, state).await {
                        error!(error = %e, "connection error");
                    }
                });
            }
            _ = tokio::signal::ctrl_c() => {
                info!("shutdown signal received");
                let _ = std::fs::remove_file(&socket_path);
                return Ok(());
            }
        }
    }
}

async fn serve(
    mut stream: tokio::net::UnixStream,
    state: Arc<ConnectorState>,
) -> Result<(), tp_proto::ProtocolError> {
    loop {
        let request: ConnectorRequest = match tp_proto::read_message(&mut stream).await {
            Ok(request) => request,
            Err(tp_proto::ProtocolError::Closed) => return Ok(()),
            Err(e) => return Err(e),
        };
        let quit = matches!(request, ConnectorRequest::Quit);
        let response = match request {
            ConnectorRequest::Status => {
                let guard = state.outbound.read();
                ConnectorResponse::Status {
                    namespaces: guard.namespaces.clone(),
                    search_paths: guard.search_paths.clone(),
                    subnet: guard.subnet.map(|s| format!("{}/{}", s.base, s.prefix_len)),
                }
            }
            ConnectorRequest::EnsureAgent { namespace, workload, service } => {
                handle_ensure_agent(&state, namespace, workload, service).await
            }
            ConnectorRequest::RemoveAgent { namespace, workload, service } => {
                handle_remove_agent(&state, namespace, workload, service).await
            }
            ConnectorRequest::Quit => ConnectorResponse::Ok,
        };
        tp_proto::write_message(&mut stream, &response).await?;
        if quit {
            return Ok(());
        }
    }
}

async fn handle_ensure_agent(
    state: &ConnectorState,
    namespace: String,
    workload: String,
    service: Option<String>,
) -> ConnectorResponse {
    let Some(client) = state.kube_client.clone() else {
        return ConnectorResponse::Error { message: "no kubernetes client available".to_string() };
    };
    match crate::install::ensure_agent(
        client,
        &state.installer_config,
        &namespace,
        &workload,
        service.as_deref(),
        env::DEFAULT_AGENT_PORT,
    )
    .await
    {
        Ok((_record, already_present)) => ConnectorResponse::AgentEnsured { already_present },
        Err(e) => ConnectorResponse::Error { message: e.to_string() },
    }
}

async fn handle_remove_agent(
    state: &ConnectorState,
    namespace: String,
    workload: String,
    service: Option<String>,
) -> ConnectorResponse {
    let Some(client) = state.kube_client.clone() else {
        return ConnectorResponse::Error { message: "no kubernetes client available".to_string() };
    };
    match crate::install::remove_agent(client, &namespace, &workload, service.as_deref()).await {
        Ok(()) => ConnectorResponse::AgentRemoved,
        Err(e) => ConnectorResponse::Error { message: e.to_string() },
    }
}
