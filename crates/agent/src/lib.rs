// SPDX-License-Identifier: MIT

//! tp-agent: the per-workload sidecar loop that arrives at the manager,
//! remains present, watches for intercept assignments and drives
//! forwarding for the ones addressed to it.

pub mod error;
pub mod forward;
pub mod link;
pub mod loop_;
pub mod real_link;

pub use error::AgentError;
pub use forward::Forwarder;
pub use link::ManagerLink;
pub use loop_::{run, AgentLoopConfig};
pub use real_link::StreamLink;
