// SPDX-License-Identifier: MIT

//! Manager wire responses (spec.md §4.2).

use tp_core::{AgentInfo, ErrorKind, InterceptInfo, SessionId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WireErrorKind {
    Transient,
    Precondition,
    Permission,
    Fatal,
    SessionExpired,
}

impl From<ErrorKind> for WireErrorKind {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Transient => WireErrorKind::Transient,
            ErrorKind::Precondition => WireErrorKind::Precondition,
            ErrorKind::Permission => WireErrorKind::Permission,
            ErrorKind::Fatal => WireErrorKind::Fatal,
            ErrorKind::SessionExpired => WireErrorKind::SessionExpired,
        }
    }
}

/// A response sent back from the manager.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type")]
pub enum Response {
    Arrived { session: SessionId },
    Marked,
    Departed,
    AgentsSnapshot { agents: Vec<AgentInfo> },
    InterceptsSnapshot { intercepts: Vec<InterceptInfo> },
    InterceptCreated { info: InterceptInfo },
    InterceptRemoved,
    Error { kind: WireErrorKind, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_round_trips_through_json() {
        let resp = Response::Marked;
        let json = serde_json::to_string(&resp).unwrap();
        let parsed: Response = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, resp);
    }

    #[test]
    fn error_kind_maps_from_core_error_kind() {
        assert_eq!(WireErrorKind::from(ErrorKind::Fatal), WireErrorKind::Fatal);
    }
}
