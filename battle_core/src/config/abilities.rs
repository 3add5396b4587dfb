//! Ability library loading

use crate::ability::AbilityData;
use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Container for ability definitions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilitiesConfig {
    #[serde(rename = "abilities")]
    pub abilities: Vec<AbilityData>,
}

/// Load ability definitions from a TOML file, keyed by name
pub fn load_ability_configs(path: &Path) -> Result<HashMap<String, AbilityData>, ConfigError> {
    let config: AbilitiesConfig = super::load_toml(path)?;
    into_library(config)
}

/// Load ability definitions from a TOML string, keyed by name
pub fn parse_ability_configs(content: &str) -> Result<HashMap<String, AbilityData>, ConfigError> {
    let config: AbilitiesConfig = super::parse_toml(content)?;
    into_library(config)
}

fn into_library(config: AbilitiesConfig) -> Result<HashMap<String, AbilityData>, ConfigError> {
    let mut map = HashMap::new();
    for ability in config.abilities {
        if ability.hit_count == 0 {
            return Err(ConfigError::ValidationError(format!(
                "ability '{}' must hit at least once",
                ability.name
            )));
        }
        if map.contains_key(&ability.name) {
            return Err(ConfigError::ValidationError(format!(
                "duplicate ability '{}'",
                ability.name
            )));
        }
        map.insert(ability.name.clone(), ability);
    }

    Ok(map)
}
