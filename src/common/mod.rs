//! Common utilities and types shared across the application.

pub mod error;
pub mod messages;
pub mod types;

pub use error::{AppError, CommandError, ConfigError};
pub use messages::{Delivery, HostEvent};
pub use types::{House, Player, Vector3};
