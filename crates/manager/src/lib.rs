// SPDX-License-Identifier: MIT

//! tp-manager: gRPC-shaped server (spec.md §4.2, §4.3).

pub mod config;
pub mod fsm;
pub mod handlers;
pub mod keepalive;

pub use config::ManagerConfig;
pub use handlers::ManagerCore;
