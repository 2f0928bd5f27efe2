//! Connected-player roster.
//!
//! The host owns the roster; the router only ever reads snapshots of it so a
//! player leaving mid-broadcast cannot affect an event already in flight.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::common::types::{Player, Vector3};

/// Read-only view of the players currently connected.
pub trait Roster: Send + Sync {
    /// Snapshot of every connected player, in no particular order.
    fn players(&self) -> Vec<Player>;

    /// Look up one player by username.
    fn find(&self, username: &str) -> Option<Player> {
        self.players().into_iter().find(|p| p.username == username)
    }
}

/// In-memory roster keyed by username, shared between the host side and the
/// router.
#[derive(Debug, Clone, Default)]
pub struct SharedRoster {
    players: Arc<RwLock<HashMap<String, Player>>>,
}

impl SharedRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a roster seeded with `players`.
    pub fn with_players(players: impl IntoIterator<Item = Player>) -> Self {
        let roster = Self::new();
        for player in players {
            roster.join(player);
        }
        roster
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Player>> {
        self.players.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Player>> {
        self.players.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Add a player, replacing any previous entry with the same username.
    pub fn join(&self, player: Player) {
        debug!(username = %player.username, house = %player.house, "Player joined");
        self.write().insert(player.username.clone(), player);
    }

    /// Remove a player. Returns the removed entry.
    pub fn leave(&self, username: &str) -> Option<Player> {
        let removed = self.write().remove(username);
        if removed.is_some() {
            debug!(username, "Player left");
        }
        removed
    }

    /// Update a player's position. Returns `false` for unknown players.
    pub fn move_to(&self, username: &str, position: Vector3) -> bool {
        match self.write().get_mut(username) {
            Some(player) => {
                player.position = position;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}

impl Roster for SharedRoster {
    fn players(&self) -> Vec<Player> {
        self.read().values().cloned().collect()
    }

    fn find(&self, username: &str) -> Option<Player> {
        self.read().get(username).cloned()
    }
}
