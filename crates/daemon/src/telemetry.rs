// SPDX-License-Identifier: MIT

//! Structured logging setup, grounded on the teacher's `tracing-subscriber`
//! `EnvFilter` wiring in `crates/daemon`'s startup path.

pub fn init(process: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
    tracing::info!(process, "starting");
}
