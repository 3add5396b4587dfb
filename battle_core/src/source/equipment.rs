//! EquipmentData - Gear that shifts attributes while worn

use crate::source::StatSource;
use crate::stats::CharacterStats;
use crate::types::EquipmentSlot;
use serde::{Deserialize, Serialize};

/// A piece of gear. Its modifiers are added to the wearer's base stats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentData {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub slot: EquipmentSlot,
    #[serde(default)]
    pub stat_modifiers: CharacterStats,
}

impl EquipmentData {
    pub fn new(name: &str, slot: EquipmentSlot, stat_modifiers: CharacterStats) -> Self {
        EquipmentData {
            name: name.to_string(),
            description: String::new(),
            slot,
            stat_modifiers,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }
}

impl StatSource for EquipmentData {
    fn id(&self) -> &str {
        &self.name
    }

    fn apply(&self, stats: &mut CharacterStats) {
        *stats += self.stat_modifiers;
    }
}
