// SPDX-License-Identifier: MIT

//! `removeManagerAndAgents` (SPEC_FULL.md §2): undo every agent injection
//! concurrently, then remove the manager's own objects only if every
//! agent undo succeeded.

use tokio::task::JoinSet;
use tp_core::join_errors;

use crate::error::InstallerError;

/// Concurrently undo the agent injection on every named workload.
/// Returns `Ok(())` only if every undo succeeded; otherwise an error
/// whose message is the exact `"multiple errors:\n  ..."` shape when more
/// than one workload failed, grounded on `install.go`'s
/// `removeManagerAndAgents`.
pub async fn remove_agents<F, Fut>(workloads: Vec<String>, undo_one: F) -> Result<(), String>
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: std::future::Future<Output = Result<(), InstallerError>> + Send + 'static,
{
    let undo_one = std::sync::Arc::new(undo_one);
    let mut set = JoinSet::new();
    for workload in workloads {
        let undo_one = undo_one.clone();
        set.spawn(async move { (workload.clone(), undo_one(workload).await) });
    }

    let mut errors = Vec::new();
    while let Some(result) = set.join_next().await {
        match result {
            Ok((workload, Ok(()))) => tracing::debug!(%workload, "undid agent injection"),
            Ok((workload, Err(e))) => errors.push(format!("{workload}: {e}")),
            Err(join_err) => errors.push(format!("task panicked: {join_err}")),
        }
    }

    match join_errors(errors) {
        None => Ok(()),
        Some(message) => Err(message),
    }
}

#[cfg(test)]
#[path = "uninstall_tests.rs"]
mod tests;
