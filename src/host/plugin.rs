//! Host plugin lifecycle.

use std::fmt;
use std::sync::Arc;

use tracing::{info, warn};

use crate::chat::builtins::register_builtins;
use crate::chat::router::ChatRouter;
use crate::config::types::ChatConfig;
use crate::host::actor::ActorSpawner;
use crate::host::roster::Roster;

/// Plugin version as reported to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PluginVersion {
    pub major: u16,
    pub minor: u16,
}

impl fmt::Display for PluginVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Lifecycle hooks the host calls on every plugin.
pub trait Plugin {
    fn name(&self) -> &str;
    fn author(&self) -> &str;
    fn version(&self) -> PluginVersion;

    /// Called once the host world is ready.
    fn post_load(&mut self, spawner: &dyn ActorSpawner);

    /// Called before the host exits.
    fn shutdown(&mut self);
}

/// The chat plugin: owns the router for the lifetime of a session.
#[derive(Debug)]
pub struct ChatPlugin {
    router: ChatRouter,
    loaded: bool,
}

impl ChatPlugin {
    pub const NAME: &'static str = "HogWarpChat";
    pub const AUTHOR: &'static str = "HogWarp Team";
    pub const VERSION: PluginVersion = PluginVersion { major: 1, minor: 0 };

    pub fn new(roster: Arc<dyn Roster>, config: &ChatConfig) -> Self {
        Self {
            router: ChatRouter::new(roster, config),
            loaded: false,
        }
    }

    pub fn router(&self) -> &ChatRouter {
        &self.router
    }

    pub fn router_mut(&mut self) -> &mut ChatRouter {
        &mut self.router
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }
}

impl Plugin for ChatPlugin {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn author(&self) -> &str {
        Self::AUTHOR
    }

    fn version(&self) -> PluginVersion {
        Self::VERSION
    }

    fn post_load(&mut self, spawner: &dyn ActorSpawner) {
        if self.loaded {
            warn!("{} post_load called twice, ignoring", Self::NAME);
            return;
        }

        self.router.attach_actor(spawner.spawn_display_actor());
        register_builtins(&mut self.router);
        self.loaded = true;

        info!(
            "{} v{} loaded with commands: {}",
            Self::NAME,
            Self::VERSION,
            self.router.command_tokens().join(", ")
        );
    }

    fn shutdown(&mut self) {
        info!("{} shutting down", Self::NAME);
    }
}
