// SPDX-License-Identifier: MIT

//! Error kinds and the manager's error type (spec.md §7).
//!
//! Every error surfaced across the wire protocol is classified into one of
//! four kinds so that clients and agents know whether to retry, prompt the
//! user, or give up. `SessionExpired` is its own case: it is always fatal
//! to the session but callers must re-arrive rather than treat it as a
//! generic `Fatal`.

use thiserror::Error;

use crate::intercept::Disposition;

/// How a caller should react to an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Retry with backoff; the condition is expected to clear on its own.
    Transient,
    /// The caller's request cannot succeed as stated; fix the request.
    Precondition,
    /// The caller is not allowed to do this; do not retry.
    Permission,
    /// Unrecoverable; surface to the user and stop.
    Fatal,
    /// The session id is no longer known to the manager; re-arrive.
    SessionExpired,
}

/// Errors returned from the manager's wire-protocol surface (spec.md §4.2).
#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("session {0} has expired")]
    SessionExpired(String),

    #[error("no agent found for {0}")]
    NoAgent(String),

    #[error("mechanism {0} is not supported by this agent")]
    UnsupportedMechanism(String),

    #[error("intercept {0} not found")]
    InterceptNotFound(String),

    #[error("{0} is not authorized to perform this operation")]
    PermissionDenied(String),

    #[error("an intercept named {0:?} already exists for this client")]
    AlreadyExists(String),

    #[error("a review may only report ACTIVE or AGENT_ERROR, not {0:?}")]
    InvalidReview(Disposition),

    #[error("presence registry is shutting down")]
    ShuttingDown,

    #[error(transparent)]
    Action(#[from] crate::action::ActionError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ManagerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ManagerError::SessionExpired(_) => ErrorKind::SessionExpired,
            ManagerError::NoAgent(_) => ErrorKind::Transient,
            ManagerError::UnsupportedMechanism(_) => ErrorKind::Precondition,
            ManagerError::InterceptNotFound(_) => ErrorKind::Precondition,
            ManagerError::PermissionDenied(_) => ErrorKind::Permission,
            ManagerError::AlreadyExists(_) => ErrorKind::Precondition,
            ManagerError::InvalidReview(_) => ErrorKind::Precondition,
            ManagerError::ShuttingDown => ErrorKind::Transient,
            ManagerError::Action(_) => ErrorKind::Fatal,
            ManagerError::Internal(_) => ErrorKind::Fatal,
        }
    }
}

/// Join multiple errors into one, matching the original's exact formatting:
/// a single error is returned unwrapped, and two or more are joined as
/// `"multiple errors:\n  {e1}\n  {e2}"`.
pub fn join_errors<E: std::fmt::Display>(errors: Vec<E>) -> Option<String> {
    match errors.len() {
        0 => None,
        1 => Some(errors[0].to_string()),
        _ => {
            let mut msg = String::from("multiple errors:");
            for e in &errors {
                msg.push_str("\n  ");
                msg.push_str(&e.to_string());
            }
            Some(msg)
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
