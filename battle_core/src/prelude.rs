//! Prelude module for convenient imports
//!
//! ```rust
//! use battle_core::prelude::*;
//! ```

// Core types
pub use crate::types::{
    AbilityTag, BattleState, CharacterClass, DamageType, Element, EnemyType, GridColumn, GridRow,
    PlayerInputPhase, Priority, StatusEffectType, TargetType, TeamSide,
};
pub use crate::stats::CharacterStats;

// Characters and abilities
pub use crate::ability::AbilityData;
pub use crate::character::{BattleCharacter, CharacterData, CharacterId};
pub use crate::roster::{create_character, create_enemy};

// Battle
pub use crate::battle::{Battle, Battlefield};
pub use crate::combat::{execute_ability, ActionReport, HitResult};

// Events
pub use crate::events::{BattleEvent, EventSink, InputCommand};

// Config
pub use crate::config::{default_battle_setup, default_gameplay_config, BattleSetup, GameplayConfig};
