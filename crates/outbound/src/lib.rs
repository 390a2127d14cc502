// SPDX-License-Identifier: MIT

//! tp-outbound: laptop-side DNS search-domain routing, virtual IP
//! translation and subnet allocation (spec.md §4.6).

pub mod nat;
pub mod route;
pub mod search;
pub mod subnet;

pub use nat::VirtualIpTable;
pub use route::RouteTable;
pub use search::build_search_paths;
pub use subnet::{find_available_subnet, Subnet};
