//! Distance-scoped chat.

use crate::chat::formatter::{SAY_FORMAT, SHOUT_FORMAT, WHISPER_FORMAT};
use crate::common::types::{Player, Vector3};
use crate::config::types::Distances;

/// The three proximity commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProximityKind {
    Say,
    Shout,
    Whisper,
}

impl ProximityKind {
    pub const ALL: [ProximityKind; 3] = [Self::Say, Self::Shout, Self::Whisper];

    pub fn token(&self) -> &'static str {
        match self {
            Self::Say => "/say",
            Self::Shout => "/shout",
            Self::Whisper => "/whisper",
        }
    }

    pub fn format(&self) -> &'static str {
        match self {
            Self::Say => SAY_FORMAT,
            Self::Shout => SHOUT_FORMAT,
            Self::Whisper => WHISPER_FORMAT,
        }
    }

    /// Range for this kind under `distances`.
    pub fn range(&self, distances: &Distances) -> f32 {
        match self {
            Self::Say => distances.say,
            Self::Shout => distances.shout,
            Self::Whisper => distances.whisper,
        }
    }
}

/// Inclusive range check.
pub fn in_range(origin: &Vector3, target: &Vector3, range: f32) -> bool {
    origin.distance(target) <= range
}

/// Players within `range` of `origin`, including any player standing on it.
pub fn players_within<'a>(
    players: &'a [Player],
    origin: &'a Vector3,
    range: f32,
) -> impl Iterator<Item = &'a Player> + 'a {
    players
        .iter()
        .filter(move |p| in_range(origin, &p.position, range))
}
