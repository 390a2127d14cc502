// SPDX-License-Identifier: MIT

//! tp-proto: wire types and framing shared by the manager, agent and
//! connector (spec.md §4.2, §6).

pub mod request;
pub mod response;
pub mod wire;

pub use request::Request;
pub use response::{Response, WireErrorKind};
pub use wire::{
    decode, encode, read_message, read_message_timeout, write_message, write_message_timeout,
    ProtocolError, MAX_MESSAGE_LEN,
};
