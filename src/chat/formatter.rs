//! Message formatting for display.
//!
//! Handles placeholder substitution in message format strings.
//! Supports placeholders: %user, %house, %message

use crate::common::types::House;

/// `/me` narration with a body. The body keeps its separating space.
pub const ACTION_FORMAT: &str = "<Server>%user %message</>";

/// `/me` narration with nothing after the token.
pub const ACTION_ONLY_FORMAT: &str = "<Server>%user</>";

/// `/house` chat. The whole line is house-coloured.
pub const HOUSE_FORMAT: &str = "<img id=\"%house\"/><%house>%user: %message</>";

/// Default global chat. Only the name prefix is house-coloured.
pub const BROADCAST_FORMAT: &str = "<img id=\"%house\"/><%house>%user: </>%message";

pub const SAY_FORMAT: &str = "%user says: %message";
pub const SHOUT_FORMAT: &str = "%user shouts: %message";
pub const WHISPER_FORMAT: &str = "%user whispers: %message";

/// Message formatter that substitutes placeholders in format strings.
#[derive(Debug, Clone)]
pub struct MessageFormatter {
    /// Format string for this formatter.
    format: String,
}

impl MessageFormatter {
    /// Create a new formatter with the given format string.
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
        }
    }

    /// Format a message with the given context.
    ///
    /// Substitution is single-pass: placeholder text appearing inside a
    /// username or message body is copied through untouched. Unknown
    /// `%` sequences are kept literally.
    pub fn format(&self, ctx: &FormatContext<'_>) -> String {
        let mut out = String::with_capacity(self.format.len() + ctx.message.len() + 16);
        let mut rest = self.format.as_str();

        while let Some(idx) = rest.find('%') {
            out.push_str(&rest[..idx]);
            let tail = &rest[idx + 1..];

            if let Some(after) = tail.strip_prefix("user") {
                out.push_str(ctx.user);
                rest = after;
            } else if let Some(after) = tail.strip_prefix("house") {
                out.push_str(ctx.house.name());
                rest = after;
            } else if let Some(after) = tail.strip_prefix("message") {
                out.push_str(ctx.message);
                rest = after;
            } else {
                out.push('%');
                rest = tail;
            }
        }

        out.push_str(rest);
        out
    }

    /// Get the format string.
    pub fn format_string(&self) -> &str {
        &self.format
    }
}

/// Context for message formatting.
#[derive(Debug, Clone, Copy)]
pub struct FormatContext<'a> {
    /// The sender's name.
    pub user: &'a str,
    /// The sender's house.
    pub house: House,
    /// The message content.
    pub message: &'a str,
}

impl<'a> FormatContext<'a> {
    pub fn new(user: &'a str, house: House, message: &'a str) -> Self {
        Self {
            user,
            house,
            message,
        }
    }
}

/// Render `format` for one sender and body.
pub fn render(format: &str, ctx: &FormatContext<'_>) -> String {
    MessageFormatter::new(format).format(ctx)
}
