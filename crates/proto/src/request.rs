// SPDX-License-Identifier: MIT

//! Manager wire requests (spec.md §4.2 "Manager gRPC surface").

use tp_core::{AgentInfo, ClientInfo, Disposition, InterceptId, InterceptSpec, SessionId};

/// A request sent to the manager over the connector/agent link.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    /// A user-facing daemon announcing itself (spec.md §4.4 "connect").
    ArriveAsClient { client: ClientInfo },

    /// A traffic-agent sidecar announcing itself (spec.md §4.4 "arrive").
    ArriveAsAgent { agent: AgentInfo },

    /// Keepalive for an established session (spec.md §4.4 "remain").
    Remain { session: SessionId },

    /// Graceful session teardown.
    Depart { session: SessionId },

    /// Subscribe to the agent presence snapshot stream (spec.md §4.4 "watch").
    WatchAgents { session: SessionId },

    /// Subscribe to the intercept table snapshot stream.
    WatchIntercepts { session: SessionId },

    /// Client requests a new intercept.
    CreateIntercept { session: SessionId, spec: InterceptSpec },

    /// Client tears down an intercept it owns, identified by name within
    /// its own set of intercepts.
    RemoveIntercept { session: SessionId, name: String },

    /// An assigned agent reports the outcome of trying to service an
    /// intercept: either `ACTIVE` with where it is forwarding traffic, or
    /// `AGENT_ERROR` with a reason (spec.md §4.4 "review").
    ReviewIntercept {
        session: SessionId,
        id: InterceptId,
        disposition: Disposition,
        message: String,
        pod_ip: Option<String>,
        ssh_port: Option<u16>,
    },
}
