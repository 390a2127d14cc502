// SPDX-License-Identifier: MIT

//! Reversible installer actions (spec.md §4.5), grounded on
//! `pkg/client/connector/install.go`'s `deploymentActions`/`svcActions`.
//!
//! These are data records only: the manager records *what it did* to a
//! workload as an annotation so that a later `telepresence uninstall` (or a
//! crashed daemon's next run) can undo it without re-deriving intent from
//! the live object. Applying the mutation against the Kubernetes API lives
//! in `tp-installer`; this module only knows how to serialize, version-gate
//! and describe the actions.

use semver::Version;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ActionError {
    #[error("action annotation version {found} is incompatible with {current}")]
    VersionMismatch { found: Version, current: Version },

    #[error("malformed action annotation: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("no action named {0} recorded")]
    NotFound(String),
}

/// A single reversible mutation made to a Deployment/ReplicaSet/Pod spec.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind")]
pub enum DeploymentAction {
    /// Injected the traffic-agent sidecar container.
    AddTrafficAgent { container_name: String, agent_image: String },
    /// Renamed an app container's named port so the agent can claim it.
    HideContainerPort { container_name: String, old_name: String, hidden_name: String },
}

impl DeploymentAction {
    pub fn explain(&self) -> String {
        match self {
            DeploymentAction::AddTrafficAgent { container_name, agent_image } => {
                format!("add traffic-agent container {container_name:?} (image {agent_image})")
            }
            DeploymentAction::HideContainerPort { container_name, old_name, hidden_name } => {
                format!(
                    "rename port {old_name:?} to {hidden_name:?} on container {container_name:?}"
                )
            }
        }
    }
}

/// A single reversible mutation made to a Service spec.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind")]
pub enum ServiceAction {
    /// Pointed a service port at the agent's proxy port by name instead of number.
    MakePortSymbolic { port_name: String, target_port: String, symbolic_name: String },
}

impl ServiceAction {
    pub fn explain(&self) -> String {
        match self {
            ServiceAction::MakePortSymbolic { port_name, symbolic_name, .. } => {
                format!("point service port {port_name:?} at symbolic target {symbolic_name:?}")
            }
        }
    }
}

/// Annotation payload recorded on a mutated workload
/// (`telepresence.getambassador.io/actions`).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ActionRecord {
    pub version: Version,
    pub deployment_actions: Vec<DeploymentAction>,
    pub service_actions: Vec<ServiceAction>,
}

impl ActionRecord {
    pub fn new(version: Version) -> Self {
        Self { version, deployment_actions: Vec::new(), service_actions: Vec::new() }
    }

    pub fn to_annotation(&self) -> Result<String, ActionError> {
        serde_json::to_string(self).map_err(ActionError::from)
    }

    pub fn from_annotation(raw: &str, current: &Version) -> Result<Self, ActionError> {
        let record: ActionRecord = serde_json::from_str(raw)?;
        if (current.major, current.minor) < (record.version.major, record.version.minor) {
            return Err(ActionError::VersionMismatch {
                found: record.version,
                current: current.clone(),
            });
        }
        Ok(record)
    }

    pub fn is_empty(&self) -> bool {
        self.deployment_actions.is_empty() && self.service_actions.is_empty()
    }
}

#[cfg(test)]
#[path = "action_tests.rs"]
mod tests;
