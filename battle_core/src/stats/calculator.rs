//! Stat formulas
//!
//! Pure functions of attributes and configured constants. Rounding is half
//! away from zero throughout, so `round(22.5) == 23`.
//!
//! | Derived value   | Formula                                          |
//! |-----------------|--------------------------------------------------|
//! | Max HP          | base_hp + round(END × hp_per_endurance)          |
//! | Max energy      | base_energy + round(STA × energy_per_stamina)    |
//! | Max mana        | base_mana + round(INT × mana_per_intellect)      |
//! | Physical damage | max(min, round(power + STR × str_mult) − armor)  |
//! | Magical damage  | max(min, round(power × (1 − resist / 100)))      |
//! | Accuracy        | base + DEX × per_dex                             |
//! | Crit / dodge    | base + DEX × per_dex                             |
//! | Effect chance   | base + WIL × per_willpower                       |
//! | Regen           | max(1, round(max_pool × fraction))               |

use super::CharacterStats;
use crate::config::{DamageConstants, HitConstants, ProgressionConstants, ResourceConstants};

/// Round half away from zero
pub fn round_half_away(value: f64) -> i64 {
    value.round() as i64
}

fn pool(base: u32, attribute: i32, per_point: f64) -> i64 {
    base as i64 + round_half_away(attribute as f64 * per_point)
}

/// Maximum HP. Never below 1 so a fresh character is always alive.
pub fn max_hp(stats: &CharacterStats, constants: &ResourceConstants) -> u32 {
    pool(constants.base_hp, stats.endurance, constants.hp_per_endurance).max(1) as u32
}

pub fn max_energy(stats: &CharacterStats, constants: &ResourceConstants) -> u32 {
    pool(constants.base_energy, stats.stamina, constants.energy_per_stamina).max(0) as u32
}

pub fn max_mana(stats: &CharacterStats, constants: &ResourceConstants) -> u32 {
    pool(constants.base_mana, stats.intellect, constants.mana_per_intellect).max(0) as u32
}

/// Physical hit damage before crit and status modifiers
pub fn physical_damage(
    base_power: u32,
    strength: i32,
    target_armor: i32,
    constants: &DamageConstants,
) -> u32 {
    let raw = base_power as f64 + strength as f64 * constants.strength_multiplier;
    let after_armor = round_half_away(raw) - target_armor as i64;
    after_armor.max(constants.min_damage as i64) as u32
}

/// Magical hit damage before crit and status modifiers
pub fn magical_damage(base_power: u32, target_magic_resist: i32, constants: &DamageConstants) -> u32 {
    let reduction = target_magic_resist as f64 / 100.0;
    let after_resist = round_half_away(base_power as f64 * (1.0 - reduction));
    after_resist.max(constants.min_damage as i64) as u32
}

/// Chance that an attack connects at all
pub fn accuracy(dexterity: i32, constants: &HitConstants) -> f64 {
    constants.base_accuracy + dexterity as f64 * constants.accuracy_per_dexterity
}

pub fn crit_chance(dexterity: i32, constants: &HitConstants) -> f64 {
    constants.base_crit_chance + dexterity as f64 * constants.crit_per_dexterity
}

pub fn dodge_chance(dexterity: i32, constants: &HitConstants) -> f64 {
    constants.base_dodge_chance + dexterity as f64 * constants.dodge_per_dexterity
}

/// Chance for willpower-gated secondary effects to land
pub fn effect_chance(willpower: i32, constants: &HitConstants) -> f64 {
    constants.base_effect_chance + willpower as f64 * constants.effect_chance_per_willpower
}

/// Per-turn regeneration for a pool of the given size
pub fn regen_amount(max_pool: u32, fraction: f64) -> u32 {
    round_half_away(max_pool as f64 * fraction).max(1) as u32
}

/// Experience needed to advance from `level`
pub fn xp_to_level(level: u32, constants: &ProgressionConstants) -> u32 {
    let exponent = level.saturating_sub(1) as i32;
    let xp = constants.base_xp_to_level as f64 * constants.xp_scaling_factor.powi(exponent);
    round_half_away(xp).max(0) as u32
}
