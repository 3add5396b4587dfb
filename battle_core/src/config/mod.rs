//! Configuration loading from TOML files

mod abilities;
mod constants;
mod setup;

pub use abilities::{load_ability_configs, parse_ability_configs};
pub use constants::{
    default_gameplay_config, load_gameplay_config, parse_gameplay_config, ActionPointConstants,
    AggroConstants, AiConstants, DamageConstants, GameplayConfig, HitConstants,
    ProgressionConstants, RegenConstants, ResourceConstants, StatusConstants, TimingConstants,
};
pub use setup::{default_battle_setup, BattleSetup, MemberConfig, MemberKind};

use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_toml(&content)
}

/// Load a TOML string and deserialize it
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let config: T = toml::from_str(content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_is_reported() {
        let result: Result<GameplayConfig, _> = parse_toml("[damage\nstrength_multiplier = ");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result: Result<GameplayConfig, _> = load_toml(Path::new("does/not/exist.toml"));
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }
}
