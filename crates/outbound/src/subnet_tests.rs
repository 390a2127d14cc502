// SPDX-License-Identifier: MIT

use super::*;

#[test]
fn empty_existing_picks_10_0_0_0_slash_24() {
    let subnet = find_available_subnet(&[]).unwrap();
    assert_eq!(subnet, Subnet::new(Ipv4Addr::new(10, 0, 0, 0), 24));
}

#[test]
fn skips_covered_16_candidates_in_order() {
    let existing = [Subnet::new(Ipv4Addr::new(10, 0, 0, 0), 16)];
    let subnet = find_available_subnet(&existing).unwrap();
    assert_eq!(subnet, Subnet::new(Ipv4Addr::new(10, 1, 0, 0), 24));
}

#[test]
fn skips_claimed_third_octet_within_the_same_16() {
    let existing = [Subnet::new(Ipv4Addr::new(10, 0, 0, 0), 24)];
    let subnet = find_available_subnet(&existing).unwrap();
    assert_eq!(subnet, Subnet::new(Ipv4Addr::new(10, 0, 1, 0), 24));
}

#[test]
fn wider_than_24_claim_marks_every_third_octet_it_spans() {
    // 10.0.0.0/20 spans third octets 0..=15.
    let existing = [Subnet::new(Ipv4Addr::new(10, 0, 0, 0), 20)];
    let subnet = find_available_subnet(&existing).unwrap();
    assert_eq!(subnet, Subnet::new(Ipv4Addr::new(10, 0, 16, 0), 24));
}

#[test]
fn falls_through_to_172_16_block_when_all_of_10_8_is_taken() {
    let existing = [Subnet::new(Ipv4Addr::new(10, 0, 0, 0), 8)];
    let subnet = find_available_subnet(&existing).unwrap();
    assert_eq!(subnet, Subnet::new(Ipv4Addr::new(172, 16, 0, 0), 24));
}

#[test]
fn falls_through_to_192_168_when_10_and_172_are_taken() {
    let existing = [
        Subnet::new(Ipv4Addr::new(10, 0, 0, 0), 8),
        Subnet::new(Ipv4Addr::new(172, 16, 0, 0), 12),
    ];
    let subnet = find_available_subnet(&existing).unwrap();
    assert_eq!(subnet, Subnet::new(Ipv4Addr::new(192, 168, 0, 0), 24));
}

#[test]
fn returns_none_when_everything_is_covered() {
    let existing = [
        Subnet::new(Ipv4Addr::new(10, 0, 0, 0), 8),
        Subnet::new(Ipv4Addr::new(172, 16, 0, 0), 12),
        Subnet::new(Ipv4Addr::new(192, 168, 0, 0), 16),
    ];
    assert!(find_available_subnet(&existing).is_none());
}

#[test]
fn covers_requires_narrower_or_equal_prefix() {
    let wide = Subnet::new(Ipv4Addr::new(10, 0, 0, 0), 8);
    let narrow = Subnet::new(Ipv4Addr::new(10, 5, 0, 0), 16);
    assert!(wide.covers(&narrow));
    assert!(!narrow.covers(&wide));
}
