// SPDX-License-Identifier: MIT

//! Argv-dispatched `agent`/`manager` process (spec.md §6): the same
//! binary plays either role depending on argv[1], or argv[0]'s basename
//! when invoked as `traffic-agent`/`traffic-manager`, matching how the
//! teacher's `oj` binary dispatches subcommands from a single `main`.

mod agent_main;
mod env;
mod forward;
mod manager_main;
mod telemetry;

/// Decide which role to run as from raw argv, independent of `std::env`
/// so the dispatch rule is unit-testable.
fn resolve_mode(argv: &[String]) -> Option<&'static str> {
    let argv0 = argv.first().map(String::as_str).unwrap_or("");
    let basename = std::path::Path::new(argv0).file_name().and_then(|s| s.to_str()).unwrap_or("");
    match basename {
        "traffic-agent" => return Some("agent"),
        "traffic-manager" => return Some("manager"),
        _ => {}
    }
    match argv.get(1).map(String::as_str) {
        Some("agent") => Some("agent"),
        Some("manager") => Some("manager"),
        _ => None,
    }
}

fn main() {
    let argv: Vec<String> = std::env::args().collect();
    let mode = match resolve_mode(&argv) {
        Some(mode) => mode,
        None => {
            eprintln!("usage: tp-daemon <agent|manager>");
            std::process::exit(127);
        }
    };

    telemetry::init(mode);

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("failed to start async runtime: {e}");
            std::process::exit(1);
        }
    };

    let result = runtime.block_on(async move {
        match mode {
            "agent" => agent_main::run().await,
            "manager" => manager_main::run().await,
            _ => unreachable!(),
        }
    });

    if let Err(e) = result {
        eprintln!("{mode} exited with error: {e:#}");
        std::process::exit(1);
    }
}
