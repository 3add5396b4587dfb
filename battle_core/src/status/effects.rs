//! Status effect instances and the type-keyed table holding them

use crate::character::CharacterId;
use crate::types::StatusEffectType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How long an effect lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectDuration {
    /// Counted down at each of the owner's turn ends
    Turns(u32),
    /// Only removed by an explicit rule
    UntilCleared,
}

/// One active effect on a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffectInstance {
    pub effect_type: StatusEffectType,
    pub duration: EffectDuration,
    /// Effect payload, e.g. the remaining shield pool
    pub value: u32,
    /// Who applied it. Attribution only.
    pub source: Option<CharacterId>,
}

impl StatusEffectInstance {
    pub fn new(
        effect_type: StatusEffectType,
        duration: EffectDuration,
        value: u32,
        source: Option<CharacterId>,
    ) -> Self {
        StatusEffectInstance {
            effect_type,
            duration,
            value,
            source,
        }
    }

    /// An effect with no countdown
    pub fn indefinite(effect_type: StatusEffectType, value: u32, source: Option<CharacterId>) -> Self {
        Self::new(effect_type, EffectDuration::UntilCleared, value, source)
    }

    pub fn is_expired(&self) -> bool {
        self.duration == EffectDuration::Turns(0)
    }
}

/// Active effects keyed by type. Adding a type that is already present
/// replaces the old instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusEffects {
    effects: BTreeMap<StatusEffectType, StatusEffectInstance>,
}

impl StatusEffects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an effect, returning the instance it replaced
    pub fn add(&mut self, effect: StatusEffectInstance) -> Option<StatusEffectInstance> {
        self.effects.insert(effect.effect_type, effect)
    }

    pub fn remove(&mut self, effect_type: StatusEffectType) -> Option<StatusEffectInstance> {
        self.effects.remove(&effect_type)
    }

    pub fn get(&self, effect_type: StatusEffectType) -> Option<&StatusEffectInstance> {
        self.effects.get(&effect_type)
    }

    pub fn get_mut(&mut self, effect_type: StatusEffectType) -> Option<&mut StatusEffectInstance> {
        self.effects.get_mut(&effect_type)
    }

    pub fn has(&self, effect_type: StatusEffectType) -> bool {
        self.effects.contains_key(&effect_type)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffectInstance> {
        self.effects.values()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Count down every timed effect and drop the ones reaching zero.
    /// Returns the expired types.
    pub fn tick(&mut self) -> Vec<StatusEffectType> {
        for effect in self.effects.values_mut() {
            if let EffectDuration::Turns(turns) = &mut effect.duration {
                *turns = turns.saturating_sub(1);
            }
        }

        let expired: Vec<StatusEffectType> = self
            .effects
            .values()
            .filter(|e| e.is_expired())
            .map(|e| e.effect_type)
            .collect();
        for effect_type in &expired {
            self.effects.remove(effect_type);
        }
        expired
    }
}
