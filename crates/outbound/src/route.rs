// SPDX-License-Identifier: MIT

//! Route table: decides whether a queried DNS name belongs to the
//! cluster (and should be answered/forwarded to the in-cluster resolver)
//! or is external (forward upstream), grounded on the same
//! `resolved_linux.go` routing-domain model as [`crate::search`].

/// Classifies a query name against the search paths installed for this
/// connection.
#[derive(Debug, Clone)]
pub struct RouteTable {
    search_paths: Vec<String>,
}

impl RouteTable {
    pub fn new(search_paths: Vec<String>) -> Self {
        Self { search_paths }
    }

    /// True if `name` should be routed to the cluster resolver rather than
    /// forwarded upstream: it matches a `~`-prefixed routing domain, or
    /// ends in a plain search suffix (including the cluster zone).
    pub fn routes_to_cluster(&self, name: &str) -> bool {
        let name = name.trim_end_matches('.');
        self.search_paths.iter().any(|path| {
            let suffix = path.trim_start_matches('~').trim_end_matches('.');
            name == suffix || name.ends_with(&format!(".{suffix}"))
        })
    }
}

#[cfg(test)]
#[path = "route_tests.rs"]
mod tests;
