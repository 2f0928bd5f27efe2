//! Slash-command table and invocation parsing.
//!
//! A chat line is split once into its leading token and the remainder, so
//! handlers never re-derive how much of the raw text belongs to the command.

use std::collections::HashMap;

use crate::chat::router::ChatRouter;
use crate::common::error::{CommandError, CommandResult};
use crate::common::types::Player;

/// Every command token starts with this character.
pub const COMMAND_PREFIX: char = '/';

/// Signature shared by built-in and plugin-registered commands.
pub type CommandFn = dyn Fn(&ChatRouter, &Player, &Invocation<'_>) + Send + Sync;

/// A chat line split into command token and body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invocation<'a> {
    /// Text up to the first whitespace character.
    pub token: &'a str,
    /// Text after the single separator following the token.
    ///
    /// `None` when nothing (not even a separator) follows the token.
    pub body: Option<&'a str>,
    /// The unmodified chat line.
    pub raw: &'a str,
}

impl<'a> Invocation<'a> {
    /// Split a chat line into token and body.
    ///
    /// Only one separator character is consumed, so additional leading
    /// whitespace in the body is preserved. A line that starts with
    /// whitespace has an empty token.
    pub fn parse(raw: &'a str) -> Self {
        match raw.char_indices().find(|(_, c)| c.is_whitespace()) {
            Some((idx, sep)) => Self {
                token: &raw[..idx],
                body: Some(&raw[idx + sep.len_utf8()..]),
                raw,
            },
            None => Self {
                token: raw,
                body: None,
                raw,
            },
        }
    }

    /// Body for commands that cannot run without one.
    pub fn require_body(&self) -> CommandResult<&'a str> {
        self.body.ok_or_else(|| CommandError::MissingBody {
            token: self.token.to_string(),
        })
    }
}

/// Check that `token` is usable as a command key.
pub fn validate_token(token: &str) -> CommandResult<()> {
    let reason = if token.is_empty() {
        "token is empty"
    } else if !token.starts_with(COMMAND_PREFIX) {
        "token must start with '/'"
    } else if token.len() == COMMAND_PREFIX.len_utf8() {
        "token has no name after '/'"
    } else if token.chars().any(char::is_whitespace) {
        "token must not contain whitespace"
    } else {
        return Ok(());
    };

    Err(CommandError::InvalidToken {
        token: token.to_string(),
        reason: reason.to_string(),
    })
}

/// Mapping from command token to handler.
///
/// Tokens are unique; a second registration of the same token is rejected
/// and the first handler stays bound. Entries are never removed.
#[derive(Default)]
pub struct CommandTable {
    handlers: HashMap<String, Box<CommandFn>>,
}

impl CommandTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `handler` to `token` unless the token is invalid or taken.
    pub fn insert(&mut self, token: impl Into<String>, handler: Box<CommandFn>) -> CommandResult<()> {
        let token = token.into();
        validate_token(&token)?;

        if self.handlers.contains_key(&token) {
            return Err(CommandError::AlreadyRegistered { token });
        }

        self.handlers.insert(token, handler);
        Ok(())
    }

    pub fn get(&self, token: &str) -> Option<&CommandFn> {
        self.handlers.get(token).map(|h| h.as_ref())
    }

    pub fn contains(&self, token: &str) -> bool {
        self.handlers.contains_key(token)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Registered tokens, sorted.
    pub fn tokens(&self) -> Vec<&str> {
        let mut tokens: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        tokens.sort_unstable();
        tokens
    }
}

impl std::fmt::Debug for CommandTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandTable")
            .field("tokens", &self.tokens())
            .finish()
    }
}
