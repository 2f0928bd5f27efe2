//! Chat routing: command dispatch and recipient selection.
//!
//! Every incoming line is first offered to the registered listeners. Unless
//! another plugin has taken over chat handling, the line is then either
//! handed to the matching slash-command or broadcast to the whole roster.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::chat::command::{CommandFn, CommandTable, Invocation};
use crate::chat::formatter::{render, FormatContext, BROADCAST_FORMAT};
use crate::common::error::CommandResult;
use crate::common::types::Player;
use crate::config::types::{ChatConfig, Distances};
use crate::host::actor::DisplayActor;
use crate::host::roster::Roster;

/// Subscriber to the "message received" event.
pub type ListenerFn = dyn Fn(&ChatRouter, &Player, &str) + Send + Sync;

/// Routes chat lines to commands or to the default broadcast.
pub struct ChatRouter {
    commands: CommandTable,
    listeners: Vec<Box<ListenerFn>>,
    distances: Distances,
    chat_msg_override: bool,
    roster: Arc<dyn Roster>,
    actor: Option<Box<dyn DisplayActor>>,
}

impl ChatRouter {
    /// Create a router with no commands and no display actor.
    pub fn new(roster: Arc<dyn Roster>, config: &ChatConfig) -> Self {
        Self {
            commands: CommandTable::new(),
            listeners: Vec::new(),
            distances: config.distances,
            chat_msg_override: config.chat_msg_override,
            roster,
            actor: None,
        }
    }

    /// Attach the actor that renders text on clients.
    pub fn attach_actor(&mut self, actor: Box<dyn DisplayActor>) {
        self.actor = Some(actor);
    }

    pub fn has_actor(&self) -> bool {
        self.actor.is_some()
    }

    /// Register a slash-command.
    ///
    /// A taken or invalid token is logged as a warning and the existing
    /// binding is kept. The error is returned for callers that care.
    pub fn add_command<F>(&mut self, token: impl Into<String>, handler: F) -> CommandResult<()>
    where
        F: Fn(&ChatRouter, &Player, &Invocation<'_>) + Send + Sync + 'static,
    {
        let handler: Box<CommandFn> = Box::new(handler);
        self.commands.insert(token, handler).map_err(|e| {
            warn!("{}", e);
            e
        })
    }

    pub fn has_command(&self, token: &str) -> bool {
        self.commands.contains(token)
    }

    /// Registered command tokens, sorted.
    pub fn command_tokens(&self) -> Vec<&str> {
        self.commands.tokens()
    }

    /// Subscribe to every incoming line, whether or not default handling runs.
    pub fn add_listener<F>(&mut self, listener: F)
    where
        F: Fn(&ChatRouter, &Player, &str) + Send + Sync + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// When set, incoming lines are only passed to listeners.
    pub fn set_override(&mut self, enabled: bool) {
        if self.chat_msg_override != enabled {
            info!(enabled, "Chat message override changed");
        }
        self.chat_msg_override = enabled;
    }

    pub fn chat_msg_override(&self) -> bool {
        self.chat_msg_override
    }

    pub fn distances(&self) -> &Distances {
        &self.distances
    }

    pub fn set_distances(&mut self, distances: Distances) {
        self.distances = distances;
    }

    /// Snapshot of the connected players.
    pub fn players(&self) -> Vec<Player> {
        self.roster.players()
    }

    /// Look up a connected player by username.
    pub fn find_player(&self, username: &str) -> Option<Player> {
        self.roster.find(username)
    }

    /// Entry point for chat typed by `sender`.
    pub fn receive_message(&self, sender: &Player, text: &str) {
        for listener in &self.listeners {
            listener(self, sender, text);
        }

        if self.chat_msg_override {
            debug!(sender = %sender.username, "Default chat handling overridden");
            return;
        }

        self.dispatch(sender, text);
    }

    /// Run the matching command, or broadcast to everyone.
    pub fn dispatch(&self, sender: &Player, text: &str) {
        info!("{}: {}", sender.username, text);

        let invocation = Invocation::parse(text);
        if let Some(handler) = self.commands.get(invocation.token) {
            debug!(token = invocation.token, "Dispatching command");
            handler(self, sender, &invocation);
            return;
        }

        let ctx = FormatContext::new(&sender.username, sender.house, text);
        self.send_to_all(self.players().iter(), &render(BROADCAST_FORMAT, &ctx));
    }

    /// Hand `text` to the display actor for exactly one recipient.
    ///
    /// Does nothing until an actor has been attached.
    pub fn send_message(&self, recipient: &Player, text: &str) {
        match &self.actor {
            Some(actor) => actor.display(recipient, text),
            None => debug!(
                recipient = %recipient.username,
                "No display actor yet, dropping message"
            ),
        }
    }

    /// Send the same text to each recipient once.
    pub fn send_to_all<'a>(&self, recipients: impl IntoIterator<Item = &'a Player>, text: &str) {
        for recipient in recipients {
            self.send_message(recipient, text);
        }
    }
}

impl std::fmt::Debug for ChatRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatRouter")
            .field("commands", &self.commands)
            .field("listeners", &self.listeners.len())
            .field("distances", &self.distances)
            .field("chat_msg_override", &self.chat_msg_override)
            .field("has_actor", &self.actor.is_some())
            .finish()
    }
}
