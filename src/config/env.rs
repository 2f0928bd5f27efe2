//! Environment variable overrides for configuration.
//!
//! Supports overriding config values with environment variables:
//! - `HOGWARP_CHAT_CONFIG` - Config file path
//! - `HOGWARP_CHAT_SAY_DISTANCE` - `/say` range
//! - `HOGWARP_CHAT_SHOUT_DISTANCE` - `/shout` range
//! - `HOGWARP_CHAT_WHISPER_DISTANCE` - `/whisper` range
//! - `HOGWARP_CHAT_OVERRIDE` - Start with default chat handling suppressed

use std::env;

use tracing::warn;

use crate::config::types::Config;

/// Environment variable prefix for all config overrides.
const ENV_PREFIX: &str = "HOGWARP_CHAT";

/// Apply environment variable overrides to a config.
pub fn apply_env_overrides(config: Config) -> Config {
    apply_overrides_from(config, |name| env::var(name).ok())
}

/// Apply overrides using `lookup` to resolve variable names.
///
/// Values that fail to parse are logged and ignored.
pub fn apply_overrides_from<F>(mut config: Config, lookup: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    let distances = &mut config.chat.distances;
    for (suffix, slot) in [
        ("SAY_DISTANCE", &mut distances.say),
        ("SHOUT_DISTANCE", &mut distances.shout),
        ("WHISPER_DISTANCE", &mut distances.whisper),
    ] {
        let name = format!("{}_{}", ENV_PREFIX, suffix);
        if let Some(value) = lookup(&name) {
            match value.trim().parse::<f32>() {
                Ok(parsed) => *slot = parsed,
                Err(e) => warn!("Ignoring {}='{}': {}", name, value, e),
            }
        }
    }

    let name = format!("{}_OVERRIDE", ENV_PREFIX);
    if let Some(value) = lookup(&name) {
        match parse_bool(&value) {
            Some(enabled) => config.chat.chat_msg_override = enabled,
            None => warn!("Ignoring {}='{}': expected a boolean", name, value),
        }
    }

    config
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Get the config file path from environment or use default.
///
/// Checks `HOGWARP_CHAT_CONFIG` environment variable, otherwise returns "hogwarp-chat.conf".
pub fn get_config_path() -> String {
    env::var(format!("{}_CONFIG", ENV_PREFIX))
        .unwrap_or_else(|_| "hogwarp-chat.conf".to_string())
}
