//! AbilityData - Static definition of something a character can do

use crate::types::{AbilityTab, AbilityTag, ActionPointType, DamageType, Element, TargetType};
use serde::{Deserialize, Serialize};

/// Static ability definition: costs, damage profile, targeting and handler tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbilityData {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tab: AbilityTab,

    // === Costs ===
    #[serde(default)]
    pub action_cost: ActionPointType,
    #[serde(default = "default_one")]
    pub long_point_cost: u32,
    #[serde(default)]
    pub short_point_cost: u32,
    #[serde(default)]
    pub energy_cost: u32,
    #[serde(default)]
    pub mana_cost: u32,
    #[serde(default)]
    pub hp_cost: u32,

    // === Effect ===
    #[serde(default)]
    pub damage_type: DamageType,
    #[serde(default)]
    pub element: Element,
    /// Damage, healing or shield value depending on the handler
    #[serde(default)]
    pub base_power: u32,
    #[serde(default = "default_one")]
    pub hit_count: u32,

    // === Targeting ===
    #[serde(default)]
    pub target_type: TargetType,
    /// Remove the user from the resolved target set
    #[serde(default)]
    pub exclude_self: bool,

    #[serde(default)]
    pub tag: AbilityTag,
    /// Passives never show up in the action menu
    #[serde(default)]
    pub is_passive: bool,
}

fn default_one() -> u32 {
    1
}

impl Default for AbilityData {
    fn default() -> Self {
        AbilityData {
            name: String::new(),
            description: String::new(),
            tab: AbilityTab::Attacks,
            action_cost: ActionPointType::Long,
            long_point_cost: 1,
            short_point_cost: 0,
            energy_cost: 0,
            mana_cost: 0,
            hp_cost: 0,
            damage_type: DamageType::Physical,
            element: Element::None,
            base_power: 0,
            hit_count: 1,
            target_type: TargetType::SingleEnemy,
            exclude_self: false,
            tag: AbilityTag::Standard,
            is_passive: false,
        }
    }
}

impl AbilityData {
    /// Physical long-action attack paid with energy
    pub fn attack(name: &str, description: &str, base_power: u32, energy_cost: u32) -> Self {
        AbilityData {
            name: name.to_string(),
            description: description.to_string(),
            tab: AbilityTab::Attacks,
            energy_cost,
            base_power,
            ..Default::default()
        }
    }

    /// Physical long-action skill paid with energy
    pub fn skill(name: &str, description: &str, base_power: u32, energy_cost: u32) -> Self {
        AbilityData {
            tab: AbilityTab::Skills,
            ..Self::attack(name, description, base_power, energy_cost)
        }
    }

    /// Magical long-action spell paid with mana
    pub fn spell(name: &str, description: &str, base_power: u32, mana_cost: u32, element: Element) -> Self {
        AbilityData {
            name: name.to_string(),
            description: description.to_string(),
            tab: AbilityTab::Spells,
            mana_cost,
            damage_type: DamageType::Magical,
            element,
            base_power,
            ..Default::default()
        }
    }

    /// Self-targeted generic action costing one short point
    pub fn quick_action(name: &str, description: &str) -> Self {
        AbilityData {
            name: name.to_string(),
            description: description.to_string(),
            tab: AbilityTab::Generic,
            action_cost: ActionPointType::Short,
            long_point_cost: 0,
            short_point_cost: 1,
            target_type: TargetType::OnSelf,
            ..Default::default()
        }
    }

    /// Self-targeted generic action costing one long point
    pub fn stance(name: &str, description: &str, tag: AbilityTag) -> Self {
        AbilityData {
            name: name.to_string(),
            description: description.to_string(),
            tab: AbilityTab::Generic,
            target_type: TargetType::OnSelf,
            tag,
            ..Default::default()
        }
    }

    /// Passive trait shown on the character sheet only
    pub fn passive(name: &str, description: &str) -> Self {
        AbilityData {
            name: name.to_string(),
            description: description.to_string(),
            is_passive: true,
            ..Default::default()
        }
    }

    pub fn with_tag(mut self, tag: AbilityTag) -> Self {
        self.tag = tag;
        self
    }

    pub fn with_target(mut self, target_type: TargetType) -> Self {
        self.target_type = target_type;
        self
    }

    pub fn with_hits(mut self, hit_count: u32) -> Self {
        self.hit_count = hit_count;
        self
    }

    pub fn with_hp_cost(mut self, hp_cost: u32) -> Self {
        self.hp_cost = hp_cost;
        self
    }

    /// Spend short points instead of long points
    pub fn short_action(mut self, cost: u32) -> Self {
        self.action_cost = ActionPointType::Short;
        self.long_point_cost = 0;
        self.short_point_cost = cost;
        self
    }

    pub fn excluding_self(mut self) -> Self {
        self.exclude_self = true;
        self
    }

    /// Positive power aimed at allies heals rather than hurts
    pub fn is_healing(&self) -> bool {
        self.base_power > 0 && self.target_type.is_allied()
    }

    /// Human-readable cost summary, e.g. "Long, 3 EN"
    pub fn cost_summary(&self) -> String {
        let mut parts = vec![match self.action_cost {
            ActionPointType::Long if self.long_point_cost > 1 => format!("{} Long", self.long_point_cost),
            ActionPointType::Long => "Long".to_string(),
            ActionPointType::Short if self.short_point_cost > 1 => {
                format!("{} Short", self.short_point_cost)
            }
            ActionPointType::Short => "Short".to_string(),
        }];

        if self.energy_cost > 0 {
            parts.push(format!("{} EN", self.energy_cost));
        }
        if self.mana_cost > 0 {
            parts.push(format!("{} MP", self.mana_cost));
        }
        if self.hp_cost > 0 {
            parts.push(format!("{} HP", self.hp_cost));
        }

        parts.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let crush = AbilityData::skill("Crushing Blow", "", 12, 3);
        assert_eq!(crush.tab, AbilityTab::Skills);
        assert_eq!(crush.action_cost, ActionPointType::Long);
        assert_eq!(crush.long_point_cost, 1);
        assert_eq!(crush.energy_cost, 3);
        assert_eq!(crush.damage_type, DamageType::Physical);

        let bolt = AbilityData::spell("Bolt", "", 10, 4, Element::Arcane);
        assert_eq!(bolt.damage_type, DamageType::Magical);
        assert_eq!(bolt.mana_cost, 4);

        let quick = AbilityData::quick_action("Swap", "");
        assert_eq!(quick.action_cost, ActionPointType::Short);
        assert_eq!(quick.short_point_cost, 1);
        assert_eq!(quick.long_point_cost, 0);
    }

    #[test]
    fn test_healing_shape() {
        let heal = AbilityData::spell("Mend", "", 10, 3, Element::Holy).with_target(TargetType::SingleAlly);
        assert!(heal.is_healing());

        let party_heal = heal.clone().with_target(TargetType::AllAllies);
        assert!(party_heal.is_healing());

        let zero = AbilityData::spell("Bless", "", 0, 3, Element::Holy).with_target(TargetType::SingleAlly);
        assert!(!zero.is_healing());

        let nuke = AbilityData::spell("Nuke", "", 10, 3, Element::Fire);
        assert!(!nuke.is_healing());
    }

    #[test]
    fn test_cost_summary() {
        let crush = AbilityData::skill("Crushing Blow", "", 12, 3);
        assert_eq!(crush.cost_summary(), "Long, 3 EN");

        let ritual = AbilityData::stance("Ritual", "", AbilityTag::Ritual).with_hp_cost(5);
        assert_eq!(ritual.cost_summary(), "Long, 5 HP");

        let stab = AbilityData::attack("Stab", "", 6, 0).short_action(1);
        assert_eq!(stab.cost_summary(), "Short");
    }
}
