//! HogWarp chat relay.
//!
//! Routes player chat through slash-commands (/me, /house, /say, /shout,
//! /whisper) or a house-tagged global broadcast, and hands the formatted
//! text to a display actor for each recipient.

pub mod chat;
pub mod common;
pub mod config;
pub mod host;
pub mod relay;

#[cfg(test)]
pub(crate) mod test_support;

pub use chat::{ChatRouter, Invocation};
pub use common::{Delivery, House, HostEvent, Player, Vector3};
pub use host::{ChatPlugin, Plugin, SharedRoster};
pub use relay::{RelayHandle, RelayService};
