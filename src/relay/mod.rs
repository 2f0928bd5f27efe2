//! Serial relay between the host and the chat router.
//!
//! - `channels`: Communication channel structures
//! - `service`: The request queue and the loop that drains it

pub mod channels;
pub mod service;

pub use channels::ChannelBundle;
pub use service::{RelayHandle, RelayRequest, RelayService};
