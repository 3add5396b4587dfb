//! Status effects - instances, the per-character table and lifecycle hooks

mod effects;
mod engine;

pub use effects::{EffectDuration, StatusEffectInstance, StatusEffects};
pub use engine::{
    absorb_damage, aggro_modifier, apply_effect, apply_mark_bonus, mark_bonus, process_turn_end,
    process_turn_start, remove_effect,
};
