//! Status effect lifecycle: turn-start and turn-end processing plus the
//! damage and aggro hooks consulted during combat.
//!
//! Turn start, in order:
//! 1. Anticipate: spend one short action point (floor 0), remove
//! 2. Prepare: bonus energy and mana of max(1, round(max × prepare_bonus)), remove
//! 3. Protect, Hide: remove
//!
//! Turn end: every timed effect counts down once and expires at zero.

use super::StatusEffectInstance;
use crate::character::{BattleCharacter, CharacterId};
use crate::config::{AggroConstants, GameplayConfig, StatusConstants};
use crate::events::{BattleEvent, EventSink};
use crate::stats::{regen_amount, round_half_away};
use crate::types::StatusEffectType;

/// Attach an effect, replacing any instance of the same type
pub fn apply_effect(
    character: &mut BattleCharacter,
    id: CharacterId,
    effect: StatusEffectInstance,
    events: &mut dyn EventSink,
) {
    let (effect_type, value) = (effect.effect_type, effect.value);
    character.status_effects.add(effect);
    events.publish(&BattleEvent::StatusEffectApplied {
        target: id,
        effect: effect_type,
        value,
    });
}

/// Remove an effect if present, announcing the removal
pub fn remove_effect(
    character: &mut BattleCharacter,
    id: CharacterId,
    effect_type: StatusEffectType,
    events: &mut dyn EventSink,
) -> Option<StatusEffectInstance> {
    let removed = character.status_effects.remove(effect_type)?;
    events.publish(&BattleEvent::StatusEffectRemoved {
        target: id,
        effect: effect_type,
    });
    Some(removed)
}

/// Run the owner's turn-start hooks
pub fn process_turn_start(
    character: &mut BattleCharacter,
    id: CharacterId,
    config: &GameplayConfig,
    events: &mut dyn EventSink,
) {
    if remove_effect(character, id, StatusEffectType::Anticipate, events).is_some() {
        character.short_actions = character.short_actions.saturating_sub(1);
    }

    if remove_effect(character, id, StatusEffectType::Prepare, events).is_some() {
        let bonus = config.status.prepare_bonus;
        let energy = regen_amount(character.max_energy, bonus);
        let mana = regen_amount(character.max_mana, bonus);
        character.restore_energy(energy);
        character.restore_mana(mana);
        tracing::debug!(
            "{} prepared: +{} energy, +{} mana",
            character.name(),
            energy,
            mana
        );
    }

    remove_effect(character, id, StatusEffectType::Protect, events);
    remove_effect(character, id, StatusEffectType::Hide, events);
}

/// Run the owner's turn-end countdown
pub fn process_turn_end(character: &mut BattleCharacter, id: CharacterId, events: &mut dyn EventSink) {
    for effect in character.status_effects.tick() {
        events.publish(&BattleEvent::StatusEffectRemoved { target: id, effect });
    }
}

/// Incoming damage multiplier from Mark
pub fn mark_bonus(character: &BattleCharacter, constants: &StatusConstants) -> f64 {
    if character.status_effects.has(StatusEffectType::Mark) {
        1.0 + constants.mark_damage_bonus
    } else {
        1.0
    }
}

/// Damage after the Mark multiplier, rounded half away from zero
pub fn apply_mark_bonus(damage: u32, character: &BattleCharacter, constants: &StatusConstants) -> u32 {
    let multiplied = round_half_away(damage as f64 * mark_bonus(character, constants));
    multiplied.max(0) as u32
}

/// Soak damage into a Shield, if any. Returns the damage that gets through.
///
/// Damage up to the shield's value is fully absorbed and the shield shrinks.
/// Anything beyond breaks the shield and passes the excess on.
pub fn absorb_damage(
    character: &mut BattleCharacter,
    id: CharacterId,
    damage: u32,
    events: &mut dyn EventSink,
) -> u32 {
    let Some(shield) = character.status_effects.get_mut(StatusEffectType::Shield) else {
        return damage;
    };

    if damage <= shield.value {
        shield.value -= damage;
        return 0;
    }

    let excess = damage - shield.value;
    remove_effect(character, id, StatusEffectType::Shield, events);
    excess
}

/// Aggro weight multiplier. Protect wins over Hide.
pub fn aggro_modifier(character: &BattleCharacter, constants: &AggroConstants) -> f64 {
    if character.status_effects.has(StatusEffectType::Protect) {
        constants.protect_multiplier
    } else if character.status_effects.has(StatusEffectType::Hide) {
        constants.hide_multiplier
    } else {
        1.0
    }
}
