//! Battle setup loading - who fights, and where they stand

use super::ConfigError;
use crate::ability::AbilityData;
use crate::battle::Battlefield;
use crate::character::BattleCharacter;
use crate::config::GameplayConfig;
use crate::roster;
use crate::types::{CharacterClass, EnemyType, GridColumn, GridRow, TeamSide};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// What a party member is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    Class(CharacterClass),
    Enemy(EnemyType),
}

/// One participant of a battle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberConfig {
    /// Display name. Class members need one; enemies default to their kind's name.
    #[serde(default)]
    pub name: Option<String>,
    pub kind: MemberKind,
    #[serde(default)]
    pub row: GridRow,
    #[serde(default)]
    pub column: GridColumn,
    /// Extra abilities from the ability library, appended after the kind's own
    #[serde(default)]
    pub abilities: Vec<String>,
}

/// Both parties of an encounter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleSetup {
    pub players: Vec<MemberConfig>,
    pub enemies: Vec<MemberConfig>,
    #[serde(skip)]
    library: HashMap<String, AbilityData>,
}

impl BattleSetup {
    /// Load a setup from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let setup: BattleSetup = super::load_toml(path)?;
        setup.validate()?;
        Ok(setup)
    }

    /// Parse a setup from a TOML string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let setup: BattleSetup = super::parse_toml(content)?;
        setup.validate()?;
        Ok(setup)
    }

    /// Both sides need at least one member, and class members need a name
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.players.is_empty() || self.enemies.is_empty() {
            return Err(ConfigError::ValidationError(
                "both parties need at least one member".to_string(),
            ));
        }

        for member in self.players.iter().chain(self.enemies.iter()) {
            if matches!(member.kind, MemberKind::Class(_)) && member.name.is_none() {
                return Err(ConfigError::ValidationError(format!(
                    "{:?} member is missing a name",
                    member.kind
                )));
            }
        }

        Ok(())
    }

    /// Attach an ability library. Every ability a member names must be in it.
    pub fn with_ability_library(
        mut self,
        library: HashMap<String, AbilityData>,
    ) -> Result<Self, ConfigError> {
        for member in self.players.iter().chain(self.enemies.iter()) {
            if let Some(missing) = member.abilities.iter().find(|name| !library.contains_key(*name)) {
                return Err(ConfigError::ValidationError(format!(
                    "{} references unknown ability '{}'",
                    member.name.as_deref().unwrap_or("enemy"),
                    missing
                )));
            }
        }

        self.library = library;
        Ok(self)
    }

    /// Build the runtime battlefield for this setup
    pub fn build(&self, config: &GameplayConfig) -> Battlefield {
        let players = self
            .players
            .iter()
            .map(|m| build_member(m, TeamSide::Player, &self.library, config))
            .collect();
        let enemies = self
            .enemies
            .iter()
            .map(|m| build_member(m, TeamSide::Enemy, &self.library, config))
            .collect();
        Battlefield::new(players, enemies)
    }
}

fn build_member(
    member: &MemberConfig,
    side: TeamSide,
    library: &HashMap<String, AbilityData>,
    config: &GameplayConfig,
) -> BattleCharacter {
    let data = match member.kind {
        MemberKind::Class(class) => {
            let name = member.name.as_deref().unwrap_or("Adventurer");
            roster::create_character(name, class)
        }
        MemberKind::Enemy(kind) => {
            let mut data = roster::create_enemy(kind);
            if let Some(name) = &member.name {
                data.name = name.clone();
            }
            data
        }
    };

    let mut extras = Vec::with_capacity(member.abilities.len());
    for name in &member.abilities {
        match library.get(name) {
            Some(ability) => extras.push(ability.clone()),
            None => tracing::warn!("{}: ability '{}' not in library, skipped", data.name, name),
        }
    }
    let data = data.with_abilities(extras);

    BattleCharacter::new(Arc::new(data), side, member.row, member.column, config)
}

/// Get the bundled encounter
pub fn default_battle_setup() -> BattleSetup {
    let toml = include_str!("../../config/battle.toml");
    BattleSetup::parse(toml).unwrap_or_else(|_| BattleSetup {
        players: vec![MemberConfig {
            name: Some("Aldric".to_string()),
            kind: MemberKind::Class(CharacterClass::Warrior),
            row: GridRow::Front,
            column: GridColumn::Left,
            abilities: Vec::new(),
        }],
        enemies: vec![MemberConfig {
            name: None,
            kind: MemberKind::Enemy(EnemyType::Ratman),
            row: GridRow::Front,
            column: GridColumn::Left,
            abilities: Vec::new(),
        }],
        library: HashMap::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_ability_configs;
    use crate::types::TargetType;

    #[test]
    fn test_default_setup_loads_all() {
        let setup = default_battle_setup();
        assert_eq!(setup.players.len(), 4);
        assert_eq!(setup.enemies.len(), 4);
        assert_eq!(setup.players[0].name.as_deref(), Some("Aldric"));
        assert_eq!(setup.players[3].kind, MemberKind::Class(CharacterClass::Priest));
        assert_eq!(setup.enemies[2].kind, MemberKind::Enemy(EnemyType::GoblinArcher));
        assert_eq!(setup.enemies[3].row, GridRow::Back);
    }

    #[test]
    fn test_parse_setup() {
        let toml = r#"
[[players]]
name = "Vex"
kind = { class = "wizard" }
row = "back"

[[enemies]]
name = "Big Horns"
kind = { enemy = "minotaur" }
"#;

        let setup = BattleSetup::parse(toml).unwrap();
        assert_eq!(setup.players[0].column, GridColumn::Left);
        assert_eq!(setup.players[0].row, GridRow::Back);

        let field = setup.build(&GameplayConfig::default());
        assert_eq!(field.players().len(), 1);
        assert_eq!(field.enemies()[0].name(), "Big Horns");
        assert_eq!(field.enemies()[0].side, TeamSide::Enemy);
    }

    const LIBRARY: &str = r#"
[[abilities]]
name = "Fireball"
mana_cost = 6
damage_type = "magical"
element = "fire"
base_power = 9
target_type = "all_enemies"
"#;

    const LEARNED: &str = r#"
[[players]]
name = "Vex"
kind = { class = "warrior" }
abilities = ["Fireball"]

[[players]]
name = "Bram"
kind = { class = "warrior" }
column = "right"

[[enemies]]
kind = { enemy = "ratman" }
"#;

    #[test]
    fn test_members_learn_library_abilities() {
        let library = parse_ability_configs(LIBRARY).unwrap();
        let setup = BattleSetup::parse(LEARNED)
            .unwrap()
            .with_ability_library(library)
            .unwrap();
        assert_eq!(setup.players[0].abilities, vec!["Fireball".to_string()]);
        assert!(setup.players[1].abilities.is_empty());

        let field = setup.build(&GameplayConfig::default());
        let vex = field.players()[0].action_menu();
        let bram = field.players()[1].action_menu();
        assert_eq!(vex.len(), bram.len() + 1);

        let fireball = vex.last().unwrap();
        assert_eq!(fireball.name, "Fireball");
        assert_eq!(fireball.target_type, TargetType::AllEnemies);
        assert_eq!(bram.last().map(|a| a.name.as_str()), Some("Hide"));
    }

    #[test]
    fn test_rejects_unknown_library_ability() {
        let library = parse_ability_configs(LIBRARY).unwrap();
        let toml = LEARNED.replace("Fireball", "Meteor");
        let result = BattleSetup::parse(&toml).unwrap().with_ability_library(library);

        assert!(matches!(result, Err(ConfigError::ValidationError(msg)) if msg.contains("Meteor")));
    }

    #[test]
    fn test_unattached_library_names_are_skipped() {
        let field = BattleSetup::parse(LEARNED)
            .unwrap()
            .build(&GameplayConfig::default());

        let players = field.players();
        assert_eq!(players[0].action_menu().len(), players[1].action_menu().len());
    }

    #[test]
    fn test_rejects_empty_party() {
        let toml = r#"
players = []

[[enemies]]
kind = { enemy = "ratman" }
"#;

        assert!(matches!(
            BattleSetup::parse(toml),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_rejects_unnamed_class_member() {
        let toml = r#"
[[players]]
kind = { class = "rogue" }

[[enemies]]
kind = { enemy = "ratman" }
"#;

        assert!(BattleSetup::parse(toml).is_err());
    }
}
