// SPDX-License-Identifier: MIT

//! Drives `tp_installer`'s pure Deployment/Service mutations against a
//! live cluster. The Installer is a client-side connector concern: the
//! connector plans and applies the mutation, then hands the caller back
//! to the manager/agent control plane for the actual intercept.
//!
//! Grounded on `oj-daemon::adapters::agent::k8s::adapter::KubernetesAdapter`'s
//! `Api::namespaced` + fetch/mutate/apply shape, adapted from pod lifecycle
//! to in-place Deployment/Service patching.

use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::Service;
use kube::api::{Api, PatchParams};
use kube::{Client, ResourceExt};
use semver::Version;
use tp_core::ActionRecord;
use tp_installer::mutate::{
    add_traffic_agent, make_port_symbolic, undo_deployment_actions, undo_service_actions, AGENT_ANNOTATION,
};
use tp_installer::{InstallerConfig, InstallerError};

const ACTION_RECORD_VERSION: &str = "1.0.0";

fn current_version() -> Version {
    Version::parse(ACTION_RECORD_VERSION).unwrap_or(Version::new(1, 0, 0))
}

/// Inject the traffic-agent sidecar into `workload`, rewiring `service`'s
/// port to the agent if one is given. No-op if the workload already
/// carries the action annotation (idempotent `ensureAgent`).
pub async fn ensure_agent(
    client: Client,
    config: &InstallerConfig,
    namespace: &str,
    workload: &str,
    service: Option<&str>,
    proxy_port: i32,
) -> Result<(ActionRecord, bool), InstallerError> {
    let deployments: Api<Deployment> = Api::namespaced(client.clone(), namespace);
    let mut deployment = deployments.get(workload).await?;

    if deployment.annotations().contains_key(AGENT_ANNOTATION) {
        let raw = deployment.annotations().get(AGENT_ANNOTATION).cloned().unwrap_or_default();
        let record = ActionRecord::from_annotation(&raw, &current_version())?;
        return Ok((record, true));
    }

    let mut record = ActionRecord::new(current_version());

    let containers = &mut deployment
        .spec
        .as_mut()
        .and_then(|s| s.template.spec.as_mut())
        .ok_or_else(|| InstallerError::NoSuchContainer {
            workload: workload.to_string(),
            container: String::new(),
        })?
        .containers;

    if let Some(action) = add_traffic_agent(config, containers, proxy_port) {
        record.deployment_actions.push(action);
    }

    let annotation = record.to_annotation()?;
    deployment.annotations_mut().insert(AGENT_ANNOTATION.to_string(), annotation);

    let patch = kube::api::Patch::Merge(&deployment);
    deployments.patch(workload, &PatchParams::default(), &patch).await?;

    if let Some(service_name) = service {
        let services: Api<Service> = Api::namespaced(client, namespace);
        let mut svc = services.get(service_name).await?;
        if let Some(action) = make_port_symbolic(&mut svc, "http", &format!("tel2px-{proxy_port}")) {
            record.service_actions.push(action);
            let patch = kube::api::Patch::Merge(&svc);
            services.patch(service_name, &PatchParams::default(), &patch).await?;
        }
    }

    Ok((record, false))
}

/// Reverse a prior [`ensure_agent`] call, removing the action annotation
/// and, if a service was rewired, restoring its original target port.
/// No-op if the workload carries no annotation.
pub async fn remove_agent(
    client: Client,
    namespace: &str,
    workload: &str,
    service: Option<&str>,
) -> Result<(), InstallerError> {
    let deployments: Api<Deployment> = Api::namespaced(client.clone(), namespace);
    let mut deployment = deployments.get(workload).await?;

    let Some(raw) = deployment.annotations().get(AGENT_ANNOTATION).cloned() else {
        return Ok(());
    };
    let record = ActionRecord::from_annotation(&raw, &current_version())?;

    let containers = &mut deployment
        .spec
        .as_mut()
        .and_then(|s| s.template.spec.as_mut())
        .ok_or_else(|| InstallerError::NoSuchContainer {
            workload: workload.to_string(),
            container: String::new(),
        })?
        .containers;
    undo_deployment_actions(containers, &record);
    deployment.annotations_mut().remove(AGENT_ANNOTATION);

    let patch = kube::api::Patch::Merge(&deployment);
    deployments.patch(workload, &PatchParams::default(), &patch).await?;

    if !record.service_actions.is_empty() {
        if let Some(service_name) = service {
            let services: Api<Service> = Api::namespaced(client, namespace);
            let mut svc = services.get(service_name).await?;
            undo_service_actions(&mut svc, &record);
            let patch = kube::api::Patch::Merge(&svc);
            services.patch(service_name, &PatchParams::default(), &patch).await?;
        }
    }

    Ok(())
}
