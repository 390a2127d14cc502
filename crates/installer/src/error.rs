// SPDX-License-Identifier: MIT

//! Installer errors (spec.md §7), grounded on the teacher's
//! `LifecycleError` one-enum-per-subsystem shape.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InstallerError {
    #[error("kubernetes api error: {0}")]
    Kube(#[from] kube::Error),

    #[error("{workload} has no container named {container}")]
    NoSuchContainer { workload: String, container: String },

    #[error(
        "{count} services expose {workload}'s container {container} through incompatible ports; pass --service to disambiguate"
    )]
    AmbiguousService { workload: String, container: String, count: usize },

    #[error(transparent)]
    Action(#[from] tp_core::ActionError),
}
