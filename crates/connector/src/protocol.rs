// SPDX-License-Identifier: MIT

//! Small request/response pair for the connector's control socket.
//!
//! Reuses `tp_proto`'s generic length-prefixed JSON framing (it is
//! generic over any `Serialize`/`DeserializeOwned` type, not just the
//! manager's own `Request`/`Response`) rather than overloading the
//! manager wire protocol with laptop-local concerns.

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type")]
pub enum ConnectorRequest {
    Status,
    EnsureAgent { namespace: String, workload: String, service: Option<String> },
    RemoveAgent { namespace: String, workload: String, service: Option<String> },
    Quit,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type")]
pub enum ConnectorResponse {
    Status { namespaces: Vec<String>, search_paths: Vec<String>, subnet: Option<String> },
    AgentEnsured { already_present: bool },
    AgentRemoved,
    Error { message: String },
    Ok,
}
