// SPDX-License-Identifier: MIT

//! Environment variable access for the connector, grounded on the
//! teacher's `env.rs` single-source-of-truth pattern.

use std::path::PathBuf;

pub const DEFAULT_REGISTRY: &str = "docker.io/datawire";
pub const DEFAULT_AGENT_PORT: i32 = 9900;

pub fn agent_version() -> String {
    std::env::var("TELEPRESENCE_AGENT_VERSION").unwrap_or_else(|_| "2.20.0".to_string())
}

pub fn socket_path() -> PathBuf {
    std::env::var("TELEPRESENCE_ROOT_SOCKET")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/var/run/telepresence-connector.socket"))
}

pub fn registry_override() -> Option<String> {
    std::env::var("TELEPRESENCE_REGISTRY").ok()
}

pub fn cluster_domain() -> String {
    std::env::var("TELEPRESENCE_CLUSTER_DOMAIN").unwrap_or_else(|_| "cluster.local".to_string())
}
