//! Configuration type definitions.

use serde::Deserialize;

use crate::common::types::Player;

/// Default `/say` range in world units.
pub const DEFAULT_SAY_DISTANCE: f32 = 400.0;

/// Default `/shout` range in world units.
pub const DEFAULT_SHOUT_DISTANCE: f32 = 1500.0;

/// Default `/whisper` range in world units.
pub const DEFAULT_WHISPER_DISTANCE: f32 = 100.0;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub chat: ChatConfig,
    /// Players known before any join event arrives.
    #[serde(default)]
    pub roster: Vec<Player>,
}

/// Chat routing settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatConfig {
    #[serde(default)]
    pub distances: Distances,
    /// Start with default chat handling suppressed.
    #[serde(default, rename = "override")]
    pub chat_msg_override: bool,
}

/// Proximity thresholds for the distance-scoped commands.
///
/// No ordering between the three is enforced; whisper is deliberately
/// shorter than say.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Distances {
    #[serde(default = "default_say")]
    pub say: f32,
    #[serde(default = "default_shout")]
    pub shout: f32,
    #[serde(default = "default_whisper")]
    pub whisper: f32,
}

impl Default for Distances {
    fn default() -> Self {
        Self {
            say: DEFAULT_SAY_DISTANCE,
            shout: DEFAULT_SHOUT_DISTANCE,
            whisper: DEFAULT_WHISPER_DISTANCE,
        }
    }
}

fn default_say() -> f32 {
    DEFAULT_SAY_DISTANCE
}

fn default_shout() -> f32 {
    DEFAULT_SHOUT_DISTANCE
}

fn default_whisper() -> f32 {
    DEFAULT_WHISPER_DISTANCE
}
