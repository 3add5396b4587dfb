//! battle_core - Turn-based party combat engine
//!
//! This library provides:
//! - CharacterStats: Attributes and the formulas deriving resources from them
//! - AbilityData / CharacterData: Static definitions, with a built-in roster
//! - Battlefield / BattleCharacter: Runtime state of both parties
//! - execute_ability: Cost check, hit resolution and tag-specific effects
//! - Battle: The round/turn state machine, driven by ticks and input commands
//! - BattleEvent / EventSink: The outbound notification boundary

pub mod ability;
pub mod ai;
pub mod battle;
pub mod character;
pub mod combat;
pub mod config;
pub mod events;
pub mod input;
pub mod prelude;
pub mod roster;
pub mod source;
pub mod stats;
pub mod status;
pub mod targeting;
pub mod turn_order;
pub mod types;

// Re-export core types for convenience
pub use ability::AbilityData;
pub use ai::{decide_action, AiDecision};
pub use battle::{Battle, Battlefield};
pub use character::{BattleCharacter, CharacterData, CharacterId, CostError};
pub use combat::{execute_ability, resolve_hit_with_rng, ActionReport, HitResult, TargetOutcome};
pub use config::{default_battle_setup, default_gameplay_config, BattleSetup, ConfigError, GameplayConfig};
pub use events::{BattleEvent, CombatLog, EventBus, EventSink, InputCommand, JsonLinesSink};
pub use input::{ChosenAction, PlayerInputStateMachine};
pub use roster::{create_character, create_enemy};
pub use source::{BaseStatsSource, EquipmentData, StatSource};
pub use stats::CharacterStats;
pub use status::{EffectDuration, StatusEffectInstance, StatusEffects};
pub use targeting::{aggro_percent, select_aggro_target, valid_targets};
pub use turn_order::calculate_turn_order;
