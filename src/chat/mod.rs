//! Chat routing core.
//!
//! This module contains:
//! - Command table and invocation parsing
//! - Placeholder-based message formatting
//! - Proximity filtering
//! - The router and its built-in commands

pub mod builtins;
pub mod command;
pub mod formatter;
pub mod proximity;
pub mod router;

pub use builtins::register_builtins;
pub use command::{CommandFn, CommandTable, Invocation};
pub use proximity::ProximityKind;
pub use router::{ChatRouter, ListenerFn};
