// SPDX-License-Identifier: MIT

//! tp-installer: Kubernetes Deployment/Service mutation (spec.md §4.5).

pub mod config;
pub mod conflict;
pub mod error;
pub mod image;
pub mod mutate;
pub mod uninstall;

pub use config::InstallerConfig;
pub use error::InstallerError;
