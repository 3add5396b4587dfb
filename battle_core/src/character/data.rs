//! CharacterData - The static sheet a battle participant is built from

use crate::ability::AbilityData;
use crate::config::ProgressionConstants;
use crate::source::{compose_stats, BaseStatsSource, EquipmentData, StatSource};
use crate::stats::{self, CharacterStats};
use crate::types::{CharacterClass, Element, EquipmentSlot};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Static character definition: class, attributes, abilities and gear
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterData {
    pub name: String,
    pub class: CharacterClass,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default)]
    pub current_xp: u32,
    #[serde(default)]
    pub base_stats: CharacterStats,
    /// Everything the action menu can offer, generic actions included
    #[serde(default)]
    pub abilities: Vec<AbilityData>,
    #[serde(default)]
    pub passives: Vec<AbilityData>,
    #[serde(default)]
    pub equipment: BTreeMap<EquipmentSlot, EquipmentData>,
    /// Element an element-inheriting bolt uses before any elemental spell is cast
    #[serde(default)]
    pub default_element: Element,
}

fn default_level() -> u32 {
    1
}

impl CharacterData {
    pub fn new(name: &str, class: CharacterClass, base_stats: CharacterStats) -> Self {
        CharacterData {
            name: name.to_string(),
            class,
            level: 1,
            current_xp: 0,
            base_stats,
            abilities: Vec::new(),
            passives: Vec::new(),
            equipment: BTreeMap::new(),
            default_element: Element::None,
        }
    }

    pub fn with_ability(mut self, ability: AbilityData) -> Self {
        self.abilities.push(ability);
        self
    }

    pub fn with_abilities(mut self, abilities: impl IntoIterator<Item = AbilityData>) -> Self {
        self.abilities.extend(abilities);
        self
    }

    pub fn with_passive(mut self, passive: AbilityData) -> Self {
        self.passives.push(passive);
        self
    }

    pub fn with_default_element(mut self, element: Element) -> Self {
        self.default_element = element;
        self
    }

    /// Equip an item in its slot, returning whatever was there before
    pub fn equip(&mut self, item: EquipmentData) -> Option<EquipmentData> {
        self.equipment.insert(item.slot, item)
    }

    pub fn unequip(&mut self, slot: EquipmentSlot) -> Option<EquipmentData> {
        self.equipment.remove(&slot)
    }

    /// Base stats plus every equipped modifier
    pub fn total_stats(&self) -> CharacterStats {
        let base = BaseStatsSource::new(self.base_stats);
        let mut sources: Vec<&dyn StatSource> = vec![&base];
        sources.extend(self.equipment.values().map(|item| item as &dyn StatSource));
        compose_stats(&sources)
    }

    /// Experience needed to reach the next level
    pub fn xp_to_next_level(&self, constants: &ProgressionConstants) -> u32 {
        stats::xp_to_level(self.level, constants)
    }

    pub fn ability(&self, name: &str) -> Option<&AbilityData> {
        self.abilities.iter().find(|a| a.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameplayConfig;

    fn knight() -> CharacterData {
        CharacterData::new(
            "Aldric",
            CharacterClass::Warrior,
            CharacterStats::new(8, 5, 2, 7, 4, 3, 6, 2, 4),
        )
    }

    #[test]
    fn test_total_stats_include_equipment() {
        let mut data = knight();
        data.equip(EquipmentData::new(
            "Greatsword",
            EquipmentSlot::Hand1,
            CharacterStats {
                strength: 3,
                initiative: -1,
                ..Default::default()
            },
        ));
        data.equip(EquipmentData::new(
            "Mail",
            EquipmentSlot::Chest,
            CharacterStats {
                armor: 4,
                ..Default::default()
            },
        ));

        let total = data.total_stats();
        assert_eq!(total.strength, 10);
        assert_eq!(total.armor, 10);
        assert_eq!(total.initiative, 3);
    }

    #[test]
    fn test_equip_replaces_slot() {
        let mut data = knight();
        let first = EquipmentData::new("Dagger", EquipmentSlot::Hand1, CharacterStats::default());
        let second = EquipmentData::new("Axe", EquipmentSlot::Hand1, CharacterStats::default());

        assert!(data.equip(first).is_none());
        let previous = data.equip(second);
        assert_eq!(previous.map(|item| item.name), Some("Dagger".to_string()));
        assert_eq!(data.equipment.len(), 1);

        assert!(data.unequip(EquipmentSlot::Hand1).is_some());
        assert_eq!(data.total_stats(), data.base_stats);
    }

    #[test]
    fn test_xp_to_next_level() {
        let config = GameplayConfig::default();
        let mut data = knight();
        assert_eq!(data.xp_to_next_level(&config.progression), 100);
        data.level = 2;
        assert_eq!(data.xp_to_next_level(&config.progression), 125);
    }
}
