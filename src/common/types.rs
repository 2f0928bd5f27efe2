//! Shared types used across the application.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A player's house affiliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum House {
    Gryffindor,
    Hufflepuff,
    Ravenclaw,
    Slytherin,
    Unaffiliated,
}

impl House {
    /// Map the host's numeric house id.
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(Self::Gryffindor),
            1 => Some(Self::Hufflepuff),
            2 => Some(Self::Ravenclaw),
            3 => Some(Self::Slytherin),
            4 => Some(Self::Unaffiliated),
            _ => None,
        }
    }

    /// Convert back to the host's numeric id.
    /// This is the inverse of from_id().
    pub fn to_id(&self) -> u8 {
        match self {
            Self::Gryffindor => 0,
            Self::Hufflepuff => 1,
            Self::Ravenclaw => 2,
            Self::Slytherin => 3,
            Self::Unaffiliated => 4,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Gryffindor => "Gryffindor",
            Self::Hufflepuff => "Hufflepuff",
            Self::Ravenclaw => "Ravenclaw",
            Self::Slytherin => "Slytherin",
            Self::Unaffiliated => "Unaffiliated",
        }
    }
}

impl FromStr for House {
    type Err = String;

    /// Parse a house name, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gryffindor" => Ok(Self::Gryffindor),
            "hufflepuff" => Ok(Self::Hufflepuff),
            "ravenclaw" => Ok(Self::Ravenclaw),
            "slytherin" => Ok(Self::Slytherin),
            "unaffiliated" | "none" => Ok(Self::Unaffiliated),
            _ => Err(format!("unknown house '{}'", s)),
        }
    }
}

impl TryFrom<String> for House {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for House {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// World-space position.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &Vector3) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// A connected player as reported by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub username: String,
    pub house: House,
    #[serde(default)]
    pub position: Vector3,
}

impl Player {
    pub fn new(username: impl Into<String>, house: House, position: Vector3) -> Self {
        Self {
            username: username.into(),
            house,
            position,
        }
    }
}
