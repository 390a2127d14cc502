// SPDX-License-Identifier: MIT

//! Intercept mechanisms (spec.md §3 "Mechanism").
//!
//! A mechanism is how an agent captures traffic for interception (e.g. TCP
//! port forwarding vs. an HTTP header-routed mechanism). Agents advertise
//! the mechanisms they support; clients request one by name when creating
//! an intercept.

/// One mechanism an agent advertises, with its argument schema.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Mechanism {
    pub name: String,
    pub args: Vec<String>,
}

impl Mechanism {
    pub fn new(name: impl Into<String>, args: impl IntoIterator<Item = String>) -> Self {
        Self { name: name.into(), args: args.into_iter().collect() }
    }
}

/// True if every mechanism name in `a` also appears in `b`, duplicate names
/// within either side are rejected outright, and neither side is empty.
///
/// Mirrors the original's edge cases: an empty mechanism list is never
/// considered a match even against another empty list, and a side that
/// advertises the same mechanism name twice can never agree with anything.
pub fn mechanisms_are_the_same(a: &[Mechanism], b: &[Mechanism]) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    if has_duplicate_names(a) || has_duplicate_names(b) {
        return false;
    }
    a.len() == b.len() && a.iter().all(|m| b.iter().any(|other| other.name == m.name))
}

fn has_duplicate_names(mechanisms: &[Mechanism]) -> bool {
    for (i, m) in mechanisms.iter().enumerate() {
        if mechanisms[..i].iter().any(|other| other.name == m.name) {
            return true;
        }
    }
    false
}

#[cfg(test)]
#[path = "mechanism_tests.rs"]
mod tests;
