// SPDX-License-Identifier: MIT

use super::*;

#[test]
fn get_returns_initial_value() {
    let w = Watchable::new(vec![1, 2, 3]);
    assert_eq!(w.get(), vec![1, 2, 3]);
}

#[test]
fn update_mutates_in_place() {
    let w = Watchable::new(vec![1]);
    w.update(|v| v.push(2));
    assert_eq!(w.get(), vec![1, 2]);
}

#[test]
fn set_replaces_the_value() {
    let w = Watchable::new(1);
    w.set(42);
    assert_eq!(w.get(), 42);
}

#[tokio::test]
async fn subscribers_observe_updates() {
    let w = Watchable::new(0);
    let mut rx = w.subscribe();
    w.set(7);
    rx.changed().await.unwrap();
    assert_eq!(*rx.borrow(), 7);
}

#[tokio::test]
async fn slow_subscriber_sees_latest_value_not_every_intermediate() {
    let w = Watchable::new(0);
    let mut rx = w.subscribe();
    w.set(1);
    w.set(2);
    w.set(3);
    rx.changed().await.unwrap();
    assert_eq!(*rx.borrow(), 3);
}
