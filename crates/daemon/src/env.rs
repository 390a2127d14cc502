// SPDX-License-Identifier: MIT

//! Centralized environment variable access, grounded on the teacher's
//! `env.rs` (single place that knows variable names and defaults).

use std::time::Duration;

pub const DEFAULT_REGISTRY: &str = "docker.io/datawire";

pub fn registry() -> String {
    std::env::var("TELEPRESENCE_REGISTRY").unwrap_or_else(|_| DEFAULT_REGISTRY.to_string())
}

pub fn manager_addr() -> String {
    std::env::var("TP_MANAGER_ADDR").unwrap_or_else(|_| "0.0.0.0:8081".to_string())
}

pub fn session_timeout() -> Duration {
    std::env::var("TP_SESSION_TIMEOUT_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(Duration::from_secs(15))
}

pub fn sweep_interval() -> Duration {
    std::env::var("TP_SWEEP_INTERVAL_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(Duration::from_secs(5))
}

pub fn ipc_timeout() -> Duration {
    std::env::var("TP_IPC_TIMEOUT_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(Duration::from_secs(30))
}

pub fn agent_name() -> Result<String, std::env::VarError> {
    std::env::var("TELEPRESENCE_CONTAINER")
}

pub fn namespace() -> String {
    std::env::var("TELEPRESENCE_NAMESPACE").unwrap_or_else(|_| "default".to_string())
}

pub fn pod_name() -> String {
    std::env::var("TELEPRESENCE_POD_NAME").unwrap_or_default()
}

pub fn pod_ip() -> String {
    std::env::var("TELEPRESENCE_POD_IP").unwrap_or_default()
}

pub fn manager_host() -> String {
    std::env::var("TELEPRESENCE_MANAGER_HOST").unwrap_or_else(|_| "traffic-manager".to_string())
}

pub fn manager_port() -> u16 {
    std::env::var("TELEPRESENCE_MANAGER_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8081)
}

pub fn agent_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
