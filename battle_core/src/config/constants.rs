//! Gameplay constants configuration

use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunable gameplay constants.
///
/// Every formula in the engine reads its coefficients from here so balance can
/// change without touching code. Missing sections or keys fall back to the
/// defaults below.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    pub action_points: ActionPointConstants,
    pub aggro: AggroConstants,
    pub resources: ResourceConstants,
    pub damage: DamageConstants,
    pub hit: HitConstants,
    pub status: StatusConstants,
    pub regen: RegenConstants,
    pub timing: TimingConstants,
    pub progression: ProgressionConstants,
    pub ai: AiConstants,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionPointConstants {
    /// Long action points granted at turn start
    pub long: u32,
    /// Short action points granted at turn start
    pub short: u32,
}

impl Default for ActionPointConstants {
    fn default() -> Self {
        ActionPointConstants { long: 1, short: 1 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggroConstants {
    pub frontline_base: f64,
    pub backline_base: f64,
    pub protect_multiplier: f64,
    pub hide_multiplier: f64,
}

impl Default for AggroConstants {
    fn default() -> Self {
        AggroConstants {
            frontline_base: 0.30,
            backline_base: 0.20,
            protect_multiplier: 2.0,
            hide_multiplier: 0.25,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceConstants {
    pub base_hp: u32,
    pub hp_per_endurance: f64,
    pub base_energy: u32,
    pub energy_per_stamina: f64,
    pub base_mana: u32,
    pub mana_per_intellect: f64,
}

impl Default for ResourceConstants {
    fn default() -> Self {
        ResourceConstants {
            base_hp: 20,
            hp_per_endurance: 5.0,
            base_energy: 10,
            energy_per_stamina: 3.0,
            base_mana: 8,
            mana_per_intellect: 4.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DamageConstants {
    /// Physical damage added per point of strength
    pub strength_multiplier: f64,
    /// Floor for any damaging hit after armor / resist
    pub min_damage: u32,
}

impl Default for DamageConstants {
    fn default() -> Self {
        DamageConstants {
            strength_multiplier: 1.5,
            min_damage: 1,
        }
    }
}

/// Hit resolution chances. All chances are probabilities in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HitConstants {
    pub base_accuracy: f64,
    pub accuracy_per_dexterity: f64,
    pub base_crit_chance: f64,
    pub crit_per_dexterity: f64,
    pub crit_damage_multiplier: f64,
    pub base_dodge_chance: f64,
    pub dodge_per_dexterity: f64,
    pub base_effect_chance: f64,
    pub effect_chance_per_willpower: f64,
}

impl Default for HitConstants {
    fn default() -> Self {
        HitConstants {
            base_accuracy: 0.90,
            accuracy_per_dexterity: 0.01,
            base_crit_chance: 0.05,
            crit_per_dexterity: 0.01,
            crit_damage_multiplier: 1.5,
            base_dodge_chance: 0.03,
            dodge_per_dexterity: 0.005,
            base_effect_chance: 0.10,
            effect_chance_per_willpower: 0.02,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusConstants {
    /// Extra damage taken while marked (0.10 = +10%)
    pub mark_damage_bonus: f64,
    /// Turns a mark lasts on its target
    pub mark_duration: u32,
    /// Fraction of max energy / mana granted by Prepare
    pub prepare_bonus: f64,
    /// Mana gained per HP sacrificed by Ritual
    pub ritual_mana_per_hp: f64,
}

impl Default for StatusConstants {
    fn default() -> Self {
        StatusConstants {
            mark_damage_bonus: 0.10,
            mark_duration: 2,
            prepare_bonus: 0.10,
            ritual_mana_per_hp: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegenConstants {
    /// Fraction of max energy restored at turn start
    pub energy_per_turn: f64,
    /// Fraction of max mana restored at turn start
    pub mana_per_turn: f64,
}

impl Default for RegenConstants {
    fn default() -> Self {
        RegenConstants {
            energy_per_turn: 0.20,
            mana_per_turn: 0.05,
        }
    }
}

/// Pacing delays in seconds. Presentation only, never affects outcomes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConstants {
    pub battle_start_delay: f64,
    pub turn_start_delay: f64,
    pub post_action_delay: f64,
    pub enemy_think_delay: f64,
}

impl Default for TimingConstants {
    fn default() -> Self {
        TimingConstants {
            battle_start_delay: 0.5,
            turn_start_delay: 0.3,
            post_action_delay: 0.3,
            enemy_think_delay: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionConstants {
    pub base_xp_to_level: u32,
    pub xp_scaling_factor: f64,
}

impl Default for ProgressionConstants {
    fn default() -> Self {
        ProgressionConstants {
            base_xp_to_level: 100,
            xp_scaling_factor: 1.25,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConstants {
    /// Decision attempts per step before an AI turn is treated as a pass
    pub max_decision_attempts: u32,
}

impl Default for AiConstants {
    fn default() -> Self {
        AiConstants {
            max_decision_attempts: 3,
        }
    }
}

impl GameplayConfig {
    /// Check that the constants describe a playable battle
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.action_points.long == 0 && self.action_points.short == 0 {
            return Err(ConfigError::ValidationError(
                "at least one action point per turn is required".to_string(),
            ));
        }

        let chances = [
            ("hit.base_accuracy", self.hit.base_accuracy),
            ("hit.base_crit_chance", self.hit.base_crit_chance),
            ("hit.base_dodge_chance", self.hit.base_dodge_chance),
            ("hit.base_effect_chance", self.hit.base_effect_chance),
        ];
        for (name, value) in chances {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ValidationError(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }

        let multipliers = [
            ("hit.crit_damage_multiplier", self.hit.crit_damage_multiplier),
            ("aggro.frontline_base", self.aggro.frontline_base),
            ("aggro.backline_base", self.aggro.backline_base),
            ("aggro.protect_multiplier", self.aggro.protect_multiplier),
            ("aggro.hide_multiplier", self.aggro.hide_multiplier),
        ];
        for (name, value) in multipliers {
            if value <= 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }

        if self.ai.max_decision_attempts == 0 {
            return Err(ConfigError::ValidationError(
                "ai.max_decision_attempts must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

/// Load and validate gameplay constants from a TOML file
pub fn load_gameplay_config(path: &Path) -> Result<GameplayConfig, ConfigError> {
    let config: GameplayConfig = super::load_toml(path)?;
    config.validate()?;
    Ok(config)
}

/// Parse and validate gameplay constants from a TOML string
pub fn parse_gameplay_config(content: &str) -> Result<GameplayConfig, ConfigError> {
    let config: GameplayConfig = super::parse_toml(content)?;
    config.validate()?;
    Ok(config)
}

/// Get the bundled gameplay constants
pub fn default_gameplay_config() -> GameplayConfig {
    let toml = include_str!("../../config/gameplay.toml");
    parse_gameplay_config(toml).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let config = GameplayConfig::default();
        assert_eq!(config.action_points.long, 1);
        assert_eq!(config.resources.base_hp, 20);
        assert!((config.damage.strength_multiplier - 1.5).abs() < f64::EPSILON);
        assert!((config.status.mark_damage_bonus - 0.10).abs() < f64::EPSILON);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bundled_config_matches_defaults() {
        assert_eq!(default_gameplay_config(), GameplayConfig::default());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let toml = r#"
[damage]
strength_multiplier = 2.0

[status]
mark_duration = 3
"#;

        let config = parse_gameplay_config(toml).unwrap();
        assert!((config.damage.strength_multiplier - 2.0).abs() < f64::EPSILON);
        assert_eq!(config.damage.min_damage, 1);
        assert_eq!(config.status.mark_duration, 3);
        assert!((config.status.ritual_mana_per_hp - 2.0).abs() < f64::EPSILON);
        assert_eq!(config.resources.base_hp, 20);
    }

    #[test]
    fn test_rejects_out_of_range_chance() {
        let toml = r#"
[hit]
base_accuracy = 1.5
"#;

        let result = parse_gameplay_config(toml);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_rejects_zero_action_points() {
        let toml = r#"
[action_points]
long = 0
short = 0
"#;

        assert!(parse_gameplay_config(toml).is_err());
    }
}
