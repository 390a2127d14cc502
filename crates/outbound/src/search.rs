// SPDX-License-Identifier: MIT

//! systemd-resolved search-path construction (SPEC_FULL.md §2, §4 decision
//! 1), grounded on `pkg/client/daemon/resolved_linux.go`.
//!
//! A bare namespace name (no dot) becomes a `~namespace` routing domain so
//! resolved treats any query ending in that label as "route to us, don't
//! search". A dotted name is left as an ordinary search suffix instead,
//! since it already names a full domain rather than a namespace shorthand.
//! The cluster zone is always appended last, with a trailing dot so it is
//! never subject to further suffixing.

/// Build the systemd-resolved search-domain list for the given namespaces
/// and extra include-suffixes, always ending with the cluster zone.
pub fn build_search_paths(namespaces: &[String], include_suffixes: &[String], cluster_domain: &str) -> Vec<String> {
    let mut out = Vec::with_capacity(namespaces.len() + include_suffixes.len() + 1);

    for name in namespaces {
        if name.contains('.') {
            out.push(name.clone());
        } else {
            out.push(format!("~{name}"));
        }
    }

    for suffix in include_suffixes {
        out.push(format!("~{suffix}"));
    }

    let mut cluster = cluster_domain.trim_end_matches('.').to_string();
    cluster.push('.');
    out.push(cluster);

    out
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
