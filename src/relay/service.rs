//! Serial relay loop.
//!
//! All chat events, roster changes, and command registrations go through one
//! queue and are handled to completion in arrival order. Nothing touches the
//! router concurrently.

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::chat::command::{CommandFn, Invocation};
use crate::chat::router::{ChatRouter, ListenerFn};
use crate::common::error::{AppError, Result};
use crate::common::messages::HostEvent;
use crate::common::types::{Player, Vector3};
use crate::host::plugin::{ChatPlugin, Plugin};
use crate::host::roster::SharedRoster;
use crate::relay::channels::RelaySideChannels;

/// Work item for the relay loop.
pub enum RelayRequest {
    /// Chat typed by the named player.
    Chat { sender: String, text: String },
    /// Register a slash-command.
    AddCommand {
        token: String,
        handler: Box<CommandFn>,
    },
    /// Subscribe to every incoming chat line.
    AddListener(Box<ListenerFn>),
    /// Take or release control of chat handling.
    SetOverride(bool),
    /// Push text straight to one player.
    Send { recipient: String, text: String },
    Join(Player),
    Leave(String),
    Move { username: String, position: Vector3 },
}

impl std::fmt::Debug for RelayRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Chat { sender, text } => f
                .debug_struct("Chat")
                .field("sender", sender)
                .field("text", text)
                .finish(),
            Self::AddCommand { token, .. } => {
                f.debug_struct("AddCommand").field("token", token).finish()
            }
            Self::AddListener(_) => f.write_str("AddListener"),
            Self::SetOverride(enabled) => f.debug_tuple("SetOverride").field(enabled).finish(),
            Self::Send { recipient, text } => f
                .debug_struct("Send")
                .field("recipient", recipient)
                .field("text", text)
                .finish(),
            Self::Join(player) => f.debug_tuple("Join").field(player).finish(),
            Self::Leave(username) => f.debug_tuple("Leave").field(username).finish(),
            Self::Move { username, position } => f
                .debug_struct("Move")
                .field("username", username)
                .field("position", position)
                .finish(),
        }
    }
}

impl From<HostEvent> for RelayRequest {
    fn from(event: HostEvent) -> Self {
        match event {
            HostEvent::Chat { sender, text } => Self::Chat { sender, text },
            HostEvent::Join { player } => Self::Join(player),
            HostEvent::Leave { username } => Self::Leave(username),
            HostEvent::Move { username, position } => Self::Move { username, position },
            HostEvent::Override { enabled } => Self::SetOverride(enabled),
        }
    }
}

/// Cloneable sender side of the relay queue.
#[derive(Debug, Clone)]
pub struct RelayHandle {
    tx: mpsc::UnboundedSender<RelayRequest>,
}

impl RelayHandle {
    pub fn new(tx: mpsc::UnboundedSender<RelayRequest>) -> Self {
        Self { tx }
    }

    pub fn submit(&self, request: RelayRequest) -> Result<()> {
        self.tx.send(request).map_err(|_| AppError::RelayClosed)
    }

    pub fn chat(&self, sender: impl Into<String>, text: impl Into<String>) -> Result<()> {
        self.submit(RelayRequest::Chat {
            sender: sender.into(),
            text: text.into(),
        })
    }

    pub fn add_command<F>(&self, token: impl Into<String>, handler: F) -> Result<()>
    where
        F: Fn(&ChatRouter, &Player, &Invocation<'_>) + Send + Sync + 'static,
    {
        self.submit(RelayRequest::AddCommand {
            token: token.into(),
            handler: Box::new(handler),
        })
    }

    pub fn add_listener<F>(&self, listener: F) -> Result<()>
    where
        F: Fn(&ChatRouter, &Player, &str) + Send + Sync + 'static,
    {
        self.submit(RelayRequest::AddListener(Box::new(listener)))
    }

    pub fn set_override(&self, enabled: bool) -> Result<()> {
        self.submit(RelayRequest::SetOverride(enabled))
    }

    pub fn send_message(&self, recipient: impl Into<String>, text: impl Into<String>) -> Result<()> {
        self.submit(RelayRequest::Send {
            recipient: recipient.into(),
            text: text.into(),
        })
    }
}

/// Owns the chat plugin and drains the request queue.
pub struct RelayService {
    plugin: ChatPlugin,
    roster: SharedRoster,
    channels: RelaySideChannels,
}

impl RelayService {
    /// `roster` must be the same roster the plugin's router reads from.
    pub fn new(plugin: ChatPlugin, roster: SharedRoster, channels: RelaySideChannels) -> Self {
        Self {
            plugin,
            roster,
            channels,
        }
    }

    /// Process requests until the queue closes or shutdown is signalled.
    ///
    /// Returns the plugin after its `shutdown` hook has run.
    pub async fn run(mut self) -> ChatPlugin {
        info!("Chat relay started");

        loop {
            tokio::select! {
                request = self.channels.request_rx.recv() => {
                    match request {
                        Some(request) => self.handle(request),
                        None => {
                            info!("Request channel closed, stopping relay");
                            break;
                        }
                    }
                }

                changed = self.channels.shutdown_rx.changed() => {
                    if changed.is_err() || *self.channels.shutdown_rx.borrow() {
                        info!("Shutdown signal received, stopping relay");
                        break;
                    }
                }
            }
        }

        self.plugin.shutdown();
        self.plugin
    }

    /// Handle one request to completion.
    pub fn handle(&mut self, request: RelayRequest) {
        match request {
            RelayRequest::Chat { sender, text } => {
                let router = self.plugin.router();
                match router.find_player(&sender) {
                    Some(player) => router.receive_message(&player, &text),
                    None => warn!(sender = %sender, "Dropping chat from unknown player"),
                }
            }
            RelayRequest::AddCommand { token, handler } => {
                // Rejections are logged by the router
                if self.plugin.router_mut().add_command(token, handler).is_ok() {
                    debug!("Command registered");
                }
            }
            RelayRequest::AddListener(listener) => {
                self.plugin.router_mut().add_listener(listener);
            }
            RelayRequest::SetOverride(enabled) => {
                self.plugin.router_mut().set_override(enabled);
            }
            RelayRequest::Send { recipient, text } => {
                let router = self.plugin.router();
                match router.find_player(&recipient) {
                    Some(player) => router.send_message(&player, &text),
                    None => debug!(recipient = %recipient, "Recipient not connected, dropping message"),
                }
            }
            RelayRequest::Join(player) => self.roster.join(player),
            RelayRequest::Leave(username) => {
                self.roster.leave(&username);
            }
            RelayRequest::Move { username, position } => {
                if !self.roster.move_to(&username, position) {
                    debug!(username = %username, "Move for unknown player ignored");
                }
            }
        }
    }

    pub fn plugin(&self) -> &ChatPlugin {
        &self.plugin
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio_test::{assert_err, assert_ok};

    use tokio::sync::watch;

    use super::*;
    use crate::common::types::House;
    use crate::config::types::ChatConfig;
    use crate::host::actor::ChannelSpawner;
    use crate::relay::channels::ChannelBundle;
    use crate::test_support::drain_sorted;

    struct Harness {
        handle: RelayHandle,
        service: RelayService,
        delivery_rx: mpsc::UnboundedReceiver<crate::common::Delivery>,
        shutdown_tx: watch::Sender<bool>,
    }

    fn harness(players: Vec<Player>) -> Harness {
        let channels = ChannelBundle::new();
        let roster = SharedRoster::with_players(players);
        let mut plugin = ChatPlugin::new(Arc::new(roster.clone()), &ChatConfig::default());
        plugin.post_load(&ChannelSpawner::new(channels.host.delivery_tx));

        Harness {
            handle: RelayHandle::new(channels.host.request_tx),
            service: RelayService::new(plugin, roster, channels.relay),
            delivery_rx: channels.host.delivery_rx,
            shutdown_tx: channels.control.shutdown_tx,
        }
    }

    fn player(name: &str, house: House, x: f32) -> Player {
        Player::new(name, house, Vector3::new(x, 0.0, 0.0))
    }

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(n, t)| (n.to_string(), t.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn test_requests_processed_in_order() {
        let Harness {
            handle,
            service,
            mut delivery_rx,
            shutdown_tx: _shutdown_tx,
        } = harness(vec![player("Harry", House::Gryffindor, 0.0)]);

        let task = tokio::spawn(service.run());

        assert_ok!(handle.submit(RelayRequest::Join(player("Ron", House::Gryffindor, 50.0))));
        assert_ok!(handle.chat("Harry", "/whisper psst"));
        assert_ok!(handle.submit(RelayRequest::Move {
            username: "Ron".to_string(),
            position: Vector3::new(500.0, 0.0, 0.0),
        }));
        assert_ok!(handle.chat("Harry", "/whisper again"));
        drop(handle);

        let plugin = task.await.unwrap();
        assert!(plugin.is_loaded());

        assert_eq!(
            drain_sorted(&mut delivery_rx),
            pairs(&[
                ("Harry", "Harry whispers: again"),
                ("Harry", "Harry whispers: psst"),
                ("Ron", "Harry whispers: psst"),
            ])
        );
    }

    #[tokio::test]
    async fn test_unknown_sender_dropped() {
        let Harness {
            handle,
            service,
            mut delivery_rx,
            shutdown_tx: _shutdown_tx,
        } = harness(vec![player("Harry", House::Gryffindor, 0.0)]);

        let task = tokio::spawn(service.run());
        assert_ok!(handle.chat("Voldemort", "hello"));
        drop(handle);
        task.await.unwrap();

        assert!(drain_sorted(&mut delivery_rx).is_empty());
    }

    #[tokio::test]
    async fn test_leave_before_chat() {
        let Harness {
            handle,
            service,
            mut delivery_rx,
            shutdown_tx: _shutdown_tx,
        } = harness(vec![
            player("Harry", House::Gryffindor, 0.0),
            player("Ron", House::Gryffindor, 0.0),
        ]);

        let task = tokio::spawn(service.run());
        assert_ok!(handle.submit(RelayRequest::Leave("Ron".to_string())));
        assert_ok!(handle.chat("Harry", "/house anyone?"));
        drop(handle);
        task.await.unwrap();

        assert_eq!(
            drain_sorted(&mut delivery_rx),
            pairs(&[(
                "Harry",
                r#"<img id="Gryffindor"/><Gryffindor>Harry: anyone?</>"#
            )])
        );
    }

    #[tokio::test]
    async fn test_command_and_override_through_queue() {
        let Harness {
            handle,
            service,
            mut delivery_rx,
            shutdown_tx: _shutdown_tx,
        } = harness(vec![player("Harry", House::Gryffindor, 0.0)]);

        let task = tokio::spawn(service.run());
        assert_ok!(handle.add_command(
            "/roll",
            |r: &ChatRouter, s: &Player, inv: &Invocation<'_>| {
                r.send_message(s, &format!("{} rolls {}", s.username, inv.body.unwrap_or("1d20")));
            }
        ));
        assert_ok!(handle.chat("Harry", "/roll"));
        assert_ok!(handle.set_override(true));
        assert_ok!(handle.chat("Harry", "/roll 2d6"));
        assert_ok!(handle.set_override(false));
        assert_ok!(handle.send_message("Harry", "direct"));
        assert_ok!(handle.send_message("Nobody", "lost"));
        drop(handle);
        task.await.unwrap();

        assert_eq!(
            drain_sorted(&mut delivery_rx),
            pairs(&[("Harry", "Harry rolls 1d20"), ("Harry", "direct")])
        );
    }

    #[tokio::test]
    async fn test_listener_through_queue() {
        let Harness {
            handle,
            service,
            mut delivery_rx,
            shutdown_tx: _shutdown_tx,
        } = harness(vec![player("Harry", House::Gryffindor, 0.0)]);

        let task = tokio::spawn(service.run());
        assert_ok!(handle.add_listener(|r: &ChatRouter, s: &Player, text: &str| {
            r.send_message(s, &format!("echo: {}", text));
        }));
        assert_ok!(handle.set_override(true));
        assert_ok!(handle.chat("Harry", "hi"));
        drop(handle);
        task.await.unwrap();

        assert_eq!(drain_sorted(&mut delivery_rx), pairs(&[("Harry", "echo: hi")]));
    }

    #[tokio::test]
    async fn test_shutdown_signal_stops_loop() {
        let Harness {
            handle,
            service,
            delivery_rx: _delivery_rx,
            shutdown_tx,
        } = harness(vec![]);

        let task = tokio::spawn(service.run());
        assert_ok!(shutdown_tx.send(true));

        let plugin = tokio::time::timeout(std::time::Duration::from_secs(5), task)
            .await
            .expect("relay did not stop")
            .unwrap();
        assert_eq!(plugin.router().command_tokens().len(), 5);

        // Queue is closed once the loop is gone
        assert_err!(handle.chat("Harry", "too late"));
    }

    #[test]
    fn test_host_event_conversion() {
        let request: RelayRequest = HostEvent::Override { enabled: true }.into();
        assert!(matches!(request, RelayRequest::SetOverride(true)));

        let request: RelayRequest = HostEvent::Leave {
            username: "Ron".to_string(),
        }
        .into();
        assert!(matches!(request, RelayRequest::Leave(ref name) if name == "Ron"));
    }

    #[test]
    fn test_handle_without_loop() {
        let mut h = harness(vec![player("Harry", House::Gryffindor, 0.0)]);
        h.service.handle(RelayRequest::Chat {
            sender: "Harry".to_string(),
            text: "/me naps".to_string(),
        });
        assert_eq!(
            drain_sorted(&mut h.delivery_rx),
            pairs(&[("Harry", "<Server>Harry naps</>")])
        );
        assert!(h.service.plugin().is_loaded());
    }
}
