//! Canonical message types flowing in and out of the relay.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::types::{Player, Vector3};

/// Formatted chat text addressed to exactly one player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Delivery {
    /// Recipient's username.
    pub recipient: String,
    /// Display markup as rendered by the client.
    pub text: String,
    /// When the router handed the text to the display actor.
    pub sent_at: DateTime<Utc>,
}

impl Delivery {
    pub fn new(recipient: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
            text: text.into(),
            sent_at: Utc::now(),
        }
    }
}

/// Event reported by the host, one per input line.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostEvent {
    /// A player typed a chat line.
    Chat { sender: String, text: String },
    /// A player connected.
    Join { player: Player },
    /// A player disconnected.
    Leave { username: String },
    /// A player moved.
    Move { username: String, position: Vector3 },
    /// Another plugin took or released control of chat handling.
    Override { enabled: bool },
}
