//! ActionReport - What one executed ability did

use super::HitResult;
use crate::character::CharacterId;
use crate::types::{AbilityTag, Element, StatusEffectType};
use serde::{Deserialize, Serialize};

/// Outcome of an executed ability across all of its targets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionReport {
    pub user: CharacterId,
    pub ability: String,
    pub tag: AbilityTag,
    /// Element the ability was cast with, after bolt inheritance
    pub element: Element,
    pub outcomes: Vec<TargetOutcome>,
    /// Mana restored to the user (Ritual)
    pub mana_gained: u32,
}

/// What happened to a single target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetOutcome {
    pub target: CharacterId,
    pub hits: Vec<HitResult>,
    /// Damage after Mark and Shield, summed over hits
    pub damage: u32,
    pub healed: u32,
    pub effect_applied: Option<StatusEffectType>,
    pub defeated: bool,
}

impl TargetOutcome {
    pub fn new(target: CharacterId) -> Self {
        TargetOutcome {
            target,
            hits: Vec::new(),
            damage: 0,
            healed: 0,
            effect_applied: None,
            defeated: false,
        }
    }
}

impl ActionReport {
    pub fn new(user: CharacterId, ability: &str, tag: AbilityTag, element: Element) -> Self {
        ActionReport {
            user,
            ability: ability.to_string(),
            tag,
            element,
            outcomes: Vec::new(),
            mana_gained: 0,
        }
    }

    pub fn outcome_for(&self, target: CharacterId) -> Option<&TargetOutcome> {
        self.outcomes.iter().find(|o| o.target == target)
    }

    pub fn total_damage(&self) -> u32 {
        self.outcomes.iter().map(|o| o.damage).sum()
    }

    pub fn total_healing(&self) -> u32 {
        self.outcomes.iter().map(|o| o.healed).sum()
    }

    /// Targets this action took down
    pub fn defeated(&self) -> Vec<CharacterId> {
        self.outcomes
            .iter()
            .filter(|o| o.defeated)
            .map(|o| o.target)
            .collect()
    }

    /// Get a summary string
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();

        let damage = self.total_damage();
        if damage > 0 {
            parts.push(format!("{} damage", damage));
        }

        let healing = self.total_healing();
        if healing > 0 {
            parts.push(format!("{} healed", healing));
        }

        if self.mana_gained > 0 {
            parts.push(format!("+{} mana", self.mana_gained));
        }

        let effects = self.outcomes.iter().filter_map(|o| o.effect_applied).count();
        if effects > 0 {
            parts.push(format!("{} effect(s) applied", effects));
        }

        let defeated = self.defeated().len();
        if defeated > 0 {
            parts.push(format!("{} defeated", defeated));
        }

        if parts.is_empty() {
            format!("{}: no effect", self.ability)
        } else {
            format!("{}: {}", self.ability, parts.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_totals_and_summary() {
        let mut report = ActionReport::new(
            CharacterId::enemy(2),
            "Stomp",
            AbilityTag::Standard,
            Element::None,
        );
        report.outcomes.push(TargetOutcome {
            damage: 8,
            defeated: true,
            ..TargetOutcome::new(CharacterId::player(0))
        });
        report.outcomes.push(TargetOutcome {
            damage: 5,
            ..TargetOutcome::new(CharacterId::player(1))
        });

        assert_eq!(report.total_damage(), 13);
        assert_eq!(report.defeated(), vec![CharacterId::player(0)]);
        assert_eq!(report.summary(), "Stomp: 13 damage, 1 defeated");
        assert!(report.outcome_for(CharacterId::player(1)).is_some());
    }

    #[test]
    fn test_empty_summary() {
        let report = ActionReport::new(CharacterId::player(0), "Wave", AbilityTag::Standard, Element::None);
        assert_eq!(report.summary(), "Wave: no effect");
    }
}
