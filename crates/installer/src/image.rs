// SPDX-License-Identifier: MIT

//! Exact image naming (SPEC_FULL.md §2), grounded on
//! `pkg/client/connector/install.go`'s `agentImageName`/`managerImageName`.

use crate::config::InstallerConfig;

/// `{registry}/tel2:{version}`, or `{registry}/prop_tel2:{version}` for a
/// licensed agent image. Recomputed on every call — no process-global
/// memoization (SPEC_FULL.md §4 decision 2).
pub fn agent_image_name(config: &InstallerConfig) -> String {
    let image = if config.licensed { "prop_tel2" } else { "tel2" };
    format!("{}/{}:{}", config.registry, image, config.agent_version)
}

/// `{registry}/tel2:{version}` — the manager never ships a licensed variant.
pub fn manager_image_name(config: &InstallerConfig) -> String {
    format!("{}/tel2:{}", config.registry, config.agent_version)
}
