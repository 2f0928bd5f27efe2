//! Configuration parsing and types.

pub mod env;
pub mod parser;
pub mod types;
pub mod validate;

use std::path::Path;

use tracing::info;

use crate::common::error::ConfigError;

pub use parser::{load_config, load_config_str};
pub use types::*;
pub use validate::validate_config;

/// Load, apply environment overrides, and validate.
///
/// A missing file is not an error: defaults are used instead.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let config = if path.exists() {
        load_config(path)?
    } else {
        info!("{} not found, using default configuration", path.display());
        Config::default()
    };

    let config = env::apply_env_overrides(config);
    validate_config(&config)?;
    Ok(config)
}
