// SPDX-License-Identifier: MIT

//! Deployment/Service mutation (spec.md §4.5), grounded on
//! `install.go`'s `addAgentToWorkload`/`hideContainerPort`/`addSymbolicPort`
//! and built in the teacher's `k8s::pod::build_pod` struct-literal idiom.

use k8s_openapi::api::core::v1::{Container, ContainerPort, EnvVar, Service};
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;

use crate::config::InstallerConfig;
use crate::error::InstallerError;
use crate::image::agent_image_name;
use tp_core::{ActionRecord, DeploymentAction, ServiceAction};

pub const AGENT_CONTAINER_NAME: &str = "traffic-agent";
pub const AGENT_ANNOTATION: &str = "telepresence.getambassador.io/actions";

/// Build the sidecar container to inject into a workload's pod template.
pub fn build_agent_container(config: &InstallerConfig, proxy_port: i32) -> Container {
    Container {
        name: AGENT_CONTAINER_NAME.to_string(),
        image: Some(agent_image_name(config)),
        ports: Some(vec![ContainerPort { container_port: proxy_port, ..Default::default() }]),
        env: Some(vec![EnvVar {
            name: "TELEPRESENCE_CONTAINER".to_string(),
            value: Some(String::new()),
            ..Default::default()
        }]),
        ..Default::default()
    }
}

/// Add the traffic-agent container to a pod's container list, recording
/// the reversible action. No-op (returns `None`) if already present,
/// matching the original's idempotent `ensureAgent`.
pub fn add_traffic_agent(
    config: &InstallerConfig,
    containers: &mut Vec<Container>,
    proxy_port: i32,
) -> Option<DeploymentAction> {
    if containers.iter().any(|c| c.name == AGENT_CONTAINER_NAME) {
        return None;
    }
    containers.push(build_agent_container(config, proxy_port));
    Some(DeploymentAction::AddTrafficAgent {
        container_name: AGENT_CONTAINER_NAME.to_string(),
        agent_image: agent_image_name(config),
    })
}

/// Rename an app container's named port so the agent can claim the
/// original name on its own proxy port, recording the reversible action.
pub fn hide_container_port(
    containers: &mut [Container],
    container_name: &str,
    port_name: &str,
) -> Result<Option<DeploymentAction>, InstallerError> {
    let container = containers
        .iter_mut()
        .find(|c| c.name == container_name)
        .ok_or_else(|| InstallerError::NoSuchContainer {
            workload: String::new(),
            container: container_name.to_string(),
        })?;

    let Some(ports) = container.ports.as_mut() else { return Ok(None) };
    let Some(port) = ports.iter_mut().find(|p| p.name.as_deref() == Some(port_name)) else {
        return Ok(None);
    };

    let hidden_name = format!("tm-{port_name}");
    port.name = Some(hidden_name.clone());
    Ok(Some(DeploymentAction::HideContainerPort {
        container_name: container_name.to_string(),
        old_name: port_name.to_string(),
        hidden_name,
    }))
}

/// Point a service port at the agent's proxy port by symbolic name,
/// recording the reversible action. No-op if already symbolic.
pub fn make_port_symbolic(
    service: &mut Service,
    port_name: &str,
    symbolic_name: &str,
) -> Option<ServiceAction> {
    let ports = service.spec.as_mut()?.ports.as_mut()?;
    let port = ports.iter_mut().find(|p| p.name.as_deref() == Some(port_name))?;

    let current = match &port.target_port {
        Some(IntOrString::String(s)) if s == symbolic_name => return None,
        Some(IntOrString::Int(n)) => n.to_string(),
        Some(IntOrString::String(s)) => s.clone(),
        None => return None,
    };
    port.target_port = Some(IntOrString::String(symbolic_name.to_string()));
    Some(ServiceAction::MakePortSymbolic {
        port_name: port_name.to_string(),
        target_port: current,
        symbolic_name: symbolic_name.to_string(),
    })
}

/// Undo every action recorded in `record`, applied in reverse order so a
/// later action that depends on an earlier one unwinds cleanly.
pub fn undo_deployment_actions(containers: &mut Vec<Container>, record: &ActionRecord) {
    for action in record.deployment_actions.iter().rev() {
        match action {
            DeploymentAction::AddTrafficAgent { container_name, .. } => {
                containers.retain(|c| &c.name != container_name);
            }
            DeploymentAction::HideContainerPort { container_name, old_name, hidden_name } => {
                if let Some(container) = containers.iter_mut().find(|c| &c.name == container_name) {
                    if let Some(ports) = container.ports.as_mut() {
                        if let Some(port) = ports.iter_mut().find(|p| p.name.as_deref() == Some(hidden_name)) {
                            port.name = Some(old_name.clone());
                        }
                    }
                }
            }
        }
    }
}

/// Undo every service action recorded in `record`, applied in reverse
/// order. Restores `targetPort` to its pre-mutation value, parsed back as
/// numeric if it looked numeric before `make_port_symbolic` ran.
pub fn undo_service_actions(service: &mut Service, record: &ActionRecord) {
    let Some(ports) = service.spec.as_mut().and_then(|s| s.ports.as_mut()) else { return };
    for action in record.service_actions.iter().rev() {
        match action {
            ServiceAction::MakePortSymbolic { port_name, target_port, symbolic_name } => {
                let Some(port) = ports.iter_mut().find(|p| p.name.as_deref() == Some(port_name)) else {
                    continue;
                };
                if port.target_port.as_ref() != Some(&IntOrString::String(symbolic_name.clone())) {
                    continue;
                }
                port.target_port = Some(match target_port.parse::<i32>() {
                    Ok(n) => IntOrString::Int(n),
                    Err(_) => IntOrString::String(target_port.clone()),
                });
            }
        }
    }
}

#[cfg(test)]
#[path = "mutate_tests.rs"]
mod tests;
