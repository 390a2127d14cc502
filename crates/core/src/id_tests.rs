// SPDX-License-Identifier: MIT

use super::*;
use std::collections::HashMap;

crate::define_id! {
    /// Test ID type for macro verification.
    pub struct TestId("test");
}

#[test]
fn define_id_hash_map_lookup() {
    let mut map = HashMap::new();
    let id = TestId::new();
    map.insert(id, 42);
    assert_eq!(map.get(id.as_str()), Some(&42));
}

#[test]
fn define_id_new_ids_are_unique() {
    assert_ne!(TestId::new(), TestId::new());
}

#[test]
fn define_id_new_carries_prefix() {
    let id = TestId::new();
    assert!(id.as_str().starts_with("test"));
}

#[test]
fn define_id_from_string_round_trips() {
    let id = TestId::from_string("test-fixed-1");
    assert_eq!(id.as_str(), "test-fixed-1");
    assert_eq!(id, TestId::from_string("test-fixed-1"));
}

#[test]
fn define_id_display_matches_as_str() {
    let id = TestId::new();
    assert_eq!(format!("{id}"), id.as_str());
}

#[test]
fn idbuf_new_truncates_len_correctly() {
    let buf = IdBuf::new("abc");
    assert_eq!(buf.as_str(), "abc");
    assert!(!buf.is_empty());
}

#[test]
fn idbuf_empty_is_empty() {
    assert!(IdBuf::empty().is_empty());
}

#[test]
fn short_fn_truncates() {
    let s = "abcdefghijklmnop";
    assert_eq!(short(s, 8), "abcdefgh");
    assert_eq!(short(s, 100), s);
    assert_eq!(short("abc", 8), "abc");
}
