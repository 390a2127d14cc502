// SPDX-License-Identifier: MIT

//! Service/port conflict detection (SPEC_FULL.md §2), grounded on
//! `install.go`'s `findMatchingServices`/`findMatchingPort`.

use k8s_openapi::api::core::v1::{Service, ServicePort};

use crate::error::InstallerError;

/// One service port that targets a given container port, either by number
/// or by name.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchingPort {
    pub service_name: String,
    pub service_port: ServicePort,
}

/// Every service in `services` with a port whose `targetPort` resolves to
/// `container_port` (or `container_port_name`, if the container declared
/// a named port).
pub fn find_matching_services(
    services: &[Service],
    container_port: i32,
    container_port_name: Option<&str>,
) -> Vec<MatchingPort> {
    services
        .iter()
        .filter_map(|svc| {
            let name = svc.metadata.name.clone()?;
            let port = find_matching_port(svc, container_port, container_port_name)?;
            Some(MatchingPort { service_name: name, service_port: port })
        })
        .collect()
}

/// Find the one port on `service` that targets `container_port`. A
/// string-typed `targetPort` matching the container's named port wins a
/// tie over a numeric `targetPort` matching the raw number, mirroring the
/// original's preference for symbolic references (they survive a later
/// port renumber; numeric ones do not).
fn find_matching_port(
    service: &Service,
    container_port: i32,
    container_port_name: Option<&str>,
) -> Option<ServicePort> {
    let ports = service.spec.as_ref()?.ports.as_ref()?;

    let by_name = container_port_name.and_then(|port_name| {
        ports.iter().find(|p| {
            p.target_port.as_ref().is_some_and(|tp| {
                matches!(tp, k8s_openapi::apimachinery::pkg::util::intstr::IntOrString::String(s) if s == port_name)
            })
        })
    });
    if let Some(p) = by_name {
        return Some(p.clone());
    }

    ports
        .iter()
        .find(|p| {
            p.target_port.as_ref().is_some_and(|tp| {
                matches!(tp, k8s_openapi::apimachinery::pkg::util::intstr::IntOrString::Int(n) if *n == container_port)
            })
        })
        .cloned()
}

/// Require exactly one matching service/port pair, erroring with
/// [`InstallerError::AmbiguousService`] when more than one is found.
pub fn require_single_match(
    matches: Vec<MatchingPort>,
    workload: &str,
    container: &str,
) -> Result<Option<MatchingPort>, InstallerError> {
    match matches.len() {
        0 => Ok(None),
        1 => Ok(matches.into_iter().next()),
        count => Err(InstallerError::AmbiguousService {
            workload: workload.to_string(),
            container: container.to_string(),
            count,
        }),
    }
}

#[cfg(test)]
#[path = "conflict_tests.rs"]
mod tests;
