//! Core enums shared across the battle engine

use serde::{Deserialize, Serialize};

/// Player character class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterClass {
    Warrior,
    Rogue,
    Ranger,
    Priest,
    Wizard,
    Warlock,
}

impl CharacterClass {
    /// Get all player classes
    pub fn all() -> &'static [CharacterClass] {
        &[
            CharacterClass::Warrior,
            CharacterClass::Rogue,
            CharacterClass::Ranger,
            CharacterClass::Priest,
            CharacterClass::Wizard,
            CharacterClass::Warlock,
        ]
    }
}

/// Built-in enemy kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyType {
    Ratman,
    GoblinArcher,
    Minotaur,
}

/// Action menu tab an ability is listed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbilityTab {
    #[default]
    Attacks,
    Skills,
    Spells,
    Items,
    Generic,
}

/// Which action point pool an ability spends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionPointType {
    #[default]
    Long,
    Short,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageType {
    #[default]
    Physical,
    Magical,
}

/// Spell school. Only tracked for the element-inheriting bolt and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Element {
    #[default]
    None,
    Fire,
    Ice,
    Lightning,
    Earth,
    Shadow,
    Holy,
    Arcane,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridRow {
    #[default]
    Front,
    Back,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridColumn {
    #[default]
    Left,
    Right,
}

/// Coarse turn-order tier. Dominates initiative within a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Negative,
    #[default]
    Normal,
    Positive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamSide {
    Player,
    Enemy,
}

impl TeamSide {
    /// The opposing side
    pub fn opponent(self) -> TeamSide {
        match self {
            TeamSide::Player => TeamSide::Enemy,
            TeamSide::Enemy => TeamSide::Player,
        }
    }
}

/// Equipment slot for gear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentSlot {
    Hand1,
    Hand2,
    Chest,
    Pants,
    Helmet,
    Trinket1,
    Trinket2,
}

impl EquipmentSlot {
    /// Get all equipment slots
    pub fn all() -> &'static [EquipmentSlot] {
        &[
            EquipmentSlot::Hand1,
            EquipmentSlot::Hand2,
            EquipmentSlot::Chest,
            EquipmentSlot::Pants,
            EquipmentSlot::Helmet,
            EquipmentSlot::Trinket1,
            EquipmentSlot::Trinket2,
        ]
    }
}

/// Status effect kinds. At most one instance of each lives on a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusEffectType {
    /// Absorbs incoming damage until its value is exhausted
    Shield,
    /// Incoming damage is increased
    Mark,
    /// Raised aggro weight until the owner's next turn
    Protect,
    /// Lowered aggro weight until the owner's next turn
    Hide,
    /// Costs a short action point at the owner's next turn start
    Anticipate,
    /// Grants bonus energy and mana at the owner's next turn start
    Prepare,
}

impl StatusEffectType {
    pub fn name(&self) -> &'static str {
        match self {
            StatusEffectType::Shield => "Shield",
            StatusEffectType::Mark => "Mark",
            StatusEffectType::Protect => "Protect",
            StatusEffectType::Hide => "Hide",
            StatusEffectType::Anticipate => "Anticipate",
            StatusEffectType::Prepare => "Prepare",
        }
    }
}

/// Selects an ability's execution handler.
///
/// `Standard` is the plain damage / heal / utility path; every other tag has
/// its own dedicated procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbilityTag {
    #[default]
    #[serde(alias = "none")]
    Standard,
    Swap,
    Anticipate,
    Prepare,
    Protect,
    Hide,
    Ritual,
    MagicBolt,
    Mark,
    WordOfProtection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetType {
    #[default]
    SingleEnemy,
    SingleAlly,
    #[serde(rename = "self")]
    OnSelf,
    AllEnemies,
    AllAllies,
    All,
}

impl TargetType {
    /// Whether a single target has to be picked by the player or AI.
    /// Every other target type resolves to its full valid set.
    pub fn requires_manual_selection(self) -> bool {
        matches!(self, TargetType::SingleEnemy | TargetType::SingleAlly)
    }

    /// Whether this targets the user's own side
    pub fn is_allied(self) -> bool {
        matches!(self, TargetType::SingleAlly | TargetType::AllAllies)
    }
}

/// Top-level battle loop state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleState {
    Setup,
    TurnStart,
    AwaitingInput,
    ExecutingAction,
    TurnEnd,
    Victory,
    Defeat,
}

impl BattleState {
    /// Whether the battle has finished
    pub fn is_terminal(self) -> bool {
        matches!(self, BattleState::Victory | BattleState::Defeat)
    }
}

/// Phase of the human input flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerInputPhase {
    #[default]
    SelectingAbility,
    SelectingTarget,
    AwaitingConfirmation,
}
