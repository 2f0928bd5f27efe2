//! Configuration validation.
//!
//! Validates configuration values and provides helpful error messages.

use std::collections::HashSet;

use crate::common::error::ConfigError;
use crate::config::types::Config;

/// Validate a configuration and return detailed errors.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let mut errors = Vec::new();

    let distances = &config.chat.distances;
    for (name, value) in [
        ("say", distances.say),
        ("shout", distances.shout),
        ("whisper", distances.whisper),
    ] {
        if !value.is_finite() {
            errors.push(format!("chat.distances.{} must be a finite number", name));
        } else if value < 0.0 {
            errors.push(format!(
                "chat.distances.{} must not be negative (got {})",
                name, value
            ));
        }
    }

    let mut seen = HashSet::new();
    for (i, player) in config.roster.iter().enumerate() {
        if player.username.trim().is_empty() {
            errors.push(format!("roster[{}].username is required", i));
        } else if !seen.insert(player.username.as_str()) {
            errors.push(format!(
                "roster[{}].username '{}' is listed more than once",
                i, player.username
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError {
            message: errors.join("\n"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::types::{House, Player, Vector3};
    use crate::config::types::*;

    fn make_valid_config() -> Config {
        Config {
            chat: ChatConfig::default(),
            roster: vec![
                Player::new("Harry", House::Gryffindor, Vector3::default()),
                Player::new("Draco", House::Slytherin, Vector3::new(10.0, 0.0, 0.0)),
            ],
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate_config(&make_valid_config()).is_ok());
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_whisper_longer_than_say_allowed() {
        let mut config = make_valid_config();
        config.chat.distances.whisper = 900.0;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_negative_distance_fails() {
        let mut config = make_valid_config();
        config.chat.distances.say = -1.0;

        let result = validate_config(&config);
        assert!(result.unwrap_err().to_string().contains("chat.distances.say"));
    }

    #[test]
    fn test_nan_distance_fails() {
        let mut config = make_valid_config();
        config.chat.distances.shout = f32::NAN;

        let result = validate_config(&config);
        assert!(result.unwrap_err().to_string().contains("finite"));
    }

    #[test]
    fn test_duplicate_username_fails() {
        let mut config = make_valid_config();
        config
            .roster
            .push(Player::new("Harry", House::Hufflepuff, Vector3::default()));

        let result = validate_config(&config);
        assert!(result.unwrap_err().to_string().contains("more than once"));
    }

    #[test]
    fn test_errors_are_collected() {
        let mut config = make_valid_config();
        config.chat.distances.whisper = -5.0;
        config.roster[0].username = String::new();

        let message = validate_config(&config).unwrap_err().to_string();
        assert!(message.contains("whisper"));
        assert!(message.contains("roster[0].username is required"));
    }
}
