//! Host boundary.
//!
//! Everything the game host owns (the player roster, the in-world display
//! actor, the plugin lifecycle) is reached through the traits here.

pub mod actor;
pub mod plugin;
pub mod roster;

pub use actor::{ActorSpawner, ChannelActor, ChannelSpawner, DisplayActor};
pub use plugin::{ChatPlugin, Plugin, PluginVersion};
pub use roster::{Roster, SharedRoster};
