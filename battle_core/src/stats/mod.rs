//! Character attributes and the formulas deriving resources and chances from them

mod attributes;
pub mod calculator;

pub use attributes::CharacterStats;
pub use calculator::{
    accuracy, crit_chance, dodge_chance, effect_chance, magical_damage, max_energy, max_hp,
    max_mana, physical_damage, regen_amount, round_half_away, xp_to_level,
};
