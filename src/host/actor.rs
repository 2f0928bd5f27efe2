//! Display actor: the host-side object that renders chat on a client.

use tokio::sync::mpsc;
use tracing::debug;

use crate::common::messages::Delivery;
use crate::common::types::Player;

/// Renders text on one recipient's client.
///
/// Delivery is fire-and-forget; implementations must not block.
pub trait DisplayActor: Send + Sync {
    fn display(&self, recipient: &Player, text: &str);
}

/// Creates display actors in the host world.
pub trait ActorSpawner {
    fn spawn_display_actor(&self) -> Box<dyn DisplayActor>;
}

/// Display actor that queues each delivery on an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelActor {
    tx: mpsc::UnboundedSender<Delivery>,
}

impl ChannelActor {
    pub fn new(tx: mpsc::UnboundedSender<Delivery>) -> Self {
        Self { tx }
    }
}

impl DisplayActor for ChannelActor {
    fn display(&self, recipient: &Player, text: &str) {
        if let Err(e) = self.tx.send(Delivery::new(recipient.username.clone(), text)) {
            // Receiver gone (shutdown in progress)
            debug!(recipient = %recipient.username, "Delivery channel closed: {}", e);
        }
    }
}

/// Spawns [`ChannelActor`]s that all feed the same delivery channel.
#[derive(Debug, Clone)]
pub struct ChannelSpawner {
    tx: mpsc::UnboundedSender<Delivery>,
}

impl ChannelSpawner {
    pub fn new(tx: mpsc::UnboundedSender<Delivery>) -> Self {
        Self { tx }
    }
}

impl ActorSpawner for ChannelSpawner {
    fn spawn_display_actor(&self) -> Box<dyn DisplayActor> {
        debug!("Spawning display actor");
        Box::new(ChannelActor::new(self.tx.clone()))
    }
}
