// SPDX-License-Identifier: MIT

//! Agent-side errors, grounded on the teacher's `AgentAdapterError`
//! one-enum-per-subsystem shape.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("manager link error: {0}")]
    Link(String),

    #[error("session expired, re-arriving")]
    SessionExpired,

    #[error("forwarding failed for intercept {0}: {1}")]
    ForwardFailed(String, String),
}
