// SPDX-License-Identifier: MIT

//! tp-state: in-memory, ephemeral manager state (spec.md §4.1).
//!
//! Nothing here persists across a restart; every session and intercept is
//! rebuilt as clients and agents re-arrive.

pub mod intercepts;
pub mod presence;
pub mod watchable;

pub use intercepts::InterceptTable;
pub use presence::PresenceRegistry;
pub use watchable::Watchable;
