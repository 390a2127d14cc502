// SPDX-License-Identifier: MIT

//! A generic snapshot-subscription store (spec.md §4.1).
//!
//! `WatchAgents`/`WatchIntercepts` clients want "give me the current
//! snapshot, then tell me whenever it changes" rather than an event log to
//! replay — manager state is rebuilt from re-arrival on restart, never
//! persisted (spec.md §4.1), so there is nothing to replay from. This
//! wraps `tokio::sync::watch`, which already coalesces writes a slow
//! subscriber misses into the latest value instead of buffering every one.

use tokio::sync::watch;

/// A value with one writer and many watching readers.
///
/// Grounded on the teacher's `MaterializedState` (a single mutable owner
/// publishing snapshots to listeners) but replaces its WAL-backed
/// persistence with `tokio::sync::watch`'s in-memory coalescing, since
/// spec.md §4.1 requires no cross-restart durability for this state.
pub struct Watchable<V> {
    tx: watch::Sender<V>,
}

impl<V: Clone> Watchable<V> {
    pub fn new(initial: V) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Subscribe to future snapshots. The new receiver immediately sees the
    /// current value as "changed" is initially false but `borrow()` works.
    pub fn subscribe(&self) -> watch::Receiver<V> {
        self.tx.subscribe()
    }

    /// Current snapshot.
    pub fn get(&self) -> V {
        self.tx.borrow().clone()
    }

    /// Mutate the value in place and notify subscribers, skipping the
    /// notification if no receiver is listening.
    pub fn update(&self, f: impl FnOnce(&mut V)) {
        self.tx.send_modify(f);
    }

    /// Replace the value outright and notify subscribers.
    pub fn set(&self, value: V) {
        // `send` only errs when every receiver (including our own internal
        // one) has been dropped, which cannot happen since `tx` holds it.
        let _ = self.tx.send(value);
    }
}

#[cfg(test)]
#[path = "watchable_tests.rs"]
mod tests;
