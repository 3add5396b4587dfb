//! BattleCharacter - Mutable runtime state of one battle participant

use super::{CharacterData, CostError};
use crate::ability::AbilityData;
use crate::config::GameplayConfig;
use crate::stats::{self, CharacterStats};
use crate::status::StatusEffects;
use crate::types::{ActionPointType, Element, GridColumn, GridRow, Priority, TeamSide};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A character inside a battle.
///
/// Resource pools keep `current <= max` at all times; every mutation below
/// saturates at zero and caps at the maximum. Alive exactly while HP > 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleCharacter {
    pub data: Arc<CharacterData>,
    pub side: TeamSide,
    pub row: GridRow,
    pub column: GridColumn,

    /// Base stats plus equipment, fixed for the battle
    pub stats: CharacterStats,
    pub max_hp: u32,
    pub current_hp: u32,
    pub max_energy: u32,
    pub current_energy: u32,
    pub max_mana: u32,
    pub current_mana: u32,

    pub long_actions: u32,
    pub short_actions: u32,
    pub priority: Priority,
    pub status_effects: StatusEffects,
    /// Element of the last elemental spell cast, if any
    pub last_spell_element: Option<Element>,
}

impl BattleCharacter {
    /// Create a participant at full resources
    pub fn new(
        data: Arc<CharacterData>,
        side: TeamSide,
        row: GridRow,
        column: GridColumn,
        config: &GameplayConfig,
    ) -> Self {
        let stats = data.total_stats();
        let max_hp = stats::max_hp(&stats, &config.resources);
        let max_energy = stats::max_energy(&stats, &config.resources);
        let max_mana = stats::max_mana(&stats, &config.resources);

        BattleCharacter {
            data,
            side,
            row,
            column,
            stats,
            max_hp,
            current_hp: max_hp,
            max_energy,
            current_energy: max_energy,
            max_mana,
            current_mana: max_mana,
            long_actions: config.action_points.long,
            short_actions: config.action_points.short,
            priority: Priority::Normal,
            status_effects: StatusEffects::new(),
            last_spell_element: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.data.name
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    /// Refill action points and regenerate energy and mana
    pub fn start_turn(&mut self, config: &GameplayConfig) {
        self.long_actions = config.action_points.long;
        self.short_actions = config.action_points.short;

        let energy = stats::regen_amount(self.max_energy, config.regen.energy_per_turn);
        self.restore_energy(energy);
        let mana = stats::regen_amount(self.max_mana, config.regen.mana_per_turn);
        self.restore_mana(mana);
    }

    pub fn has_actions_remaining(&self) -> bool {
        self.long_actions > 0 || self.short_actions > 0
    }

    /// Drop all remaining action points, ending the turn
    pub fn forfeit_actions(&mut self) {
        self.long_actions = 0;
        self.short_actions = 0;
    }

    /// Check every cost of `ability` against current resources
    pub fn check_cost(&self, ability: &AbilityData) -> Result<(), CostError> {
        match ability.action_cost {
            ActionPointType::Long if self.long_actions < ability.long_point_cost => {
                return Err(CostError::InsufficientLongPoints {
                    needed: ability.long_point_cost,
                    available: self.long_actions,
                });
            }
            ActionPointType::Short => {
                let available = self.short_actions + self.long_actions;
                if available < ability.short_point_cost {
                    return Err(CostError::InsufficientActionPoints {
                        needed: ability.short_point_cost,
                        available,
                    });
                }
            }
            ActionPointType::Long => {}
        }

        if ability.energy_cost > self.current_energy {
            return Err(CostError::InsufficientEnergy {
                needed: ability.energy_cost,
                available: self.current_energy,
            });
        }
        if ability.mana_cost > self.current_mana {
            return Err(CostError::InsufficientMana {
                needed: ability.mana_cost,
                available: self.current_mana,
            });
        }
        if ability.hp_cost > 0 && ability.hp_cost >= self.current_hp {
            return Err(CostError::InsufficientHp {
                cost: ability.hp_cost,
                current: self.current_hp,
            });
        }

        Ok(())
    }

    pub fn can_use_ability(&self, ability: &AbilityData) -> bool {
        self.check_cost(ability).is_ok()
    }

    /// Pay for `ability`. Short costs drain the short pool first and borrow the
    /// shortfall from the long pool.
    pub fn consume_ability_cost(&mut self, ability: &AbilityData) {
        match ability.action_cost {
            ActionPointType::Long => {
                self.long_actions = self.long_actions.saturating_sub(ability.long_point_cost);
            }
            ActionPointType::Short => {
                let cost = ability.short_point_cost;
                if self.short_actions >= cost {
                    self.short_actions -= cost;
                } else {
                    let borrowed = cost - self.short_actions;
                    self.short_actions = 0;
                    self.long_actions = self.long_actions.saturating_sub(borrowed);
                }
            }
        }

        self.current_energy = self.current_energy.saturating_sub(ability.energy_cost);
        self.current_mana = self.current_mana.saturating_sub(ability.mana_cost);
        self.current_hp = self.current_hp.saturating_sub(ability.hp_cost);
    }

    /// Non-passive abilities, in menu order
    pub fn action_menu(&self) -> Vec<&AbilityData> {
        self.data.abilities.iter().filter(|a| !a.is_passive).collect()
    }

    /// Subtract HP, floored at zero. Returns the HP actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.current_hp);
        self.current_hp -= lost;
        lost
    }

    /// Add HP, capped at max. Returns the HP actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let gained = amount.min(self.max_hp - self.current_hp);
        self.current_hp += gained;
        gained
    }

    pub fn restore_energy(&mut self, amount: u32) -> u32 {
        let gained = amount.min(self.max_energy - self.current_energy);
        self.current_energy += gained;
        gained
    }

    pub fn restore_mana(&mut self, amount: u32) -> u32 {
        let gained = amount.min(self.max_mana - self.current_mana);
        self.current_mana += gained;
        gained
    }

    /// Element the next element-inheriting bolt will carry
    pub fn bolt_element(&self) -> Element {
        self.last_spell_element.unwrap_or(self.data.default_element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AbilityTag, CharacterClass};

    fn warrior(config: &GameplayConfig) -> BattleCharacter {
        let data = CharacterData::new(
            "Aldric",
            CharacterClass::Warrior,
            CharacterStats::new(8, 5, 2, 7, 4, 3, 6, 2, 4),
        );
        BattleCharacter::new(
            Arc::new(data),
            TeamSide::Player,
            GridRow::Front,
            GridColumn::Left,
            config,
        )
    }

    #[test]
    fn test_new_starts_full() {
        let config = GameplayConfig::default();
        let c = warrior(&config);

        assert_eq!(c.max_hp, 60);
        assert_eq!(c.current_hp, 60);
        assert_eq!(c.current_energy, 25);
        assert_eq!(c.current_mana, 16);
        assert_eq!(c.priority, Priority::Normal);
        assert!(c.is_alive());
    }

    #[test]
    fn test_start_turn_refreshes_and_regens() {
        let config = GameplayConfig::default();
        let mut c = warrior(&config);
        c.forfeit_actions();
        c.current_energy = 10;
        c.current_mana = 16;

        c.start_turn(&config);
        assert_eq!(c.long_actions, 1);
        assert_eq!(c.short_actions, 1);
        // 20% of 25
        assert_eq!(c.current_energy, 15);
        // Mana already full stays capped
        assert_eq!(c.current_mana, 16);
    }

    #[test]
    fn test_long_cost_needs_long_points() {
        let config = GameplayConfig::default();
        let mut c = warrior(&config);
        let crush = AbilityData::skill("Crushing Blow", "", 12, 3);

        assert!(c.can_use_ability(&crush));
        c.consume_ability_cost(&crush);
        assert_eq!(c.long_actions, 0);
        assert_eq!(c.short_actions, 1);
        assert_eq!(c.current_energy, 22);

        assert_eq!(
            c.check_cost(&crush),
            Err(CostError::InsufficientLongPoints {
                needed: 1,
                available: 0
            })
        );
    }

    #[test]
    fn test_short_cost_borrows_from_long() {
        let config = GameplayConfig::default();
        let mut c = warrior(&config);
        let swap = AbilityData::quick_action("Swap Position", "").with_tag(AbilityTag::Swap);

        c.consume_ability_cost(&swap);
        assert_eq!((c.long_actions, c.short_actions), (1, 0));

        // Second quick action borrows the long point
        assert!(c.can_use_ability(&swap));
        c.consume_ability_cost(&swap);
        assert_eq!((c.long_actions, c.short_actions), (0, 0));
        assert!(!c.has_actions_remaining());

        assert!(matches!(
            c.check_cost(&swap),
            Err(CostError::InsufficientActionPoints { .. })
        ));
    }

    #[test]
    fn test_short_borrow_is_exact() {
        let config = GameplayConfig::default();
        let mut c = warrior(&config);
        c.long_actions = 3;
        c.short_actions = 1;
        let flurry = AbilityData::attack("Flurry", "", 2, 0).short_action(3);

        c.consume_ability_cost(&flurry);
        assert_eq!((c.long_actions, c.short_actions), (1, 0));
    }

    #[test]
    fn test_hp_cost_cannot_be_fatal() {
        let config = GameplayConfig::default();
        let mut c = warrior(&config);
        let ritual = AbilityData::stance("Ritual", "", AbilityTag::Ritual).with_hp_cost(5);

        c.current_hp = 5;
        assert_eq!(
            c.check_cost(&ritual),
            Err(CostError::InsufficientHp { cost: 5, current: 5 })
        );

        c.current_hp = 6;
        assert!(c.can_use_ability(&ritual));
        c.consume_ability_cost(&ritual);
        assert_eq!(c.current_hp, 1);
        assert!(c.is_alive());
    }

    #[test]
    fn test_resource_costs() {
        let config = GameplayConfig::default();
        let mut c = warrior(&config);
        let bolt = AbilityData::spell("Bolt", "", 10, 20, Element::Arcane);
        assert!(matches!(
            c.check_cost(&bolt),
            Err(CostError::InsufficientMana { needed: 20, available: 16 })
        ));

        c.current_energy = 2;
        let crush = AbilityData::skill("Crushing Blow", "", 12, 3);
        assert!(matches!(
            c.check_cost(&crush),
            Err(CostError::InsufficientEnergy { .. })
        ));
    }

    #[test]
    fn test_damage_and_heal_clamp() {
        let config = GameplayConfig::default();
        let mut c = warrior(&config);

        assert_eq!(c.take_damage(15), 15);
        assert_eq!(c.heal(100), 15);
        assert_eq!(c.current_hp, c.max_hp);
        assert_eq!(c.heal(5), 0);

        assert_eq!(c.take_damage(500), 60);
        assert_eq!(c.current_hp, 0);
        assert!(!c.is_alive());
    }

    #[test]
    fn test_action_menu_skips_passives() {
        let config = GameplayConfig::default();
        let data = CharacterData::new("Shade", CharacterClass::Rogue, CharacterStats::default())
            .with_ability(AbilityData::attack("Quick Stab", "", 6, 0))
            .with_ability(AbilityData::passive("Hidden Talent", ""));
        let c = BattleCharacter::new(
            Arc::new(data),
            TeamSide::Player,
            GridRow::Front,
            GridColumn::Right,
            &config,
        );

        let menu: Vec<&str> = c.action_menu().iter().map(|a| a.name.as_str()).collect();
        assert_eq!(menu, vec!["Quick Stab"]);
    }

    #[test]
    fn test_bolt_element_falls_back_to_default() {
        let config = GameplayConfig::default();
        let data = CharacterData::new("Vex", CharacterClass::Wizard, CharacterStats::default())
            .with_default_element(Element::Arcane);
        let mut c = BattleCharacter::new(
            Arc::new(data),
            TeamSide::Player,
            GridRow::Back,
            GridColumn::Left,
            &config,
        );

        assert_eq!(c.bolt_element(), Element::Arcane);
        c.last_spell_element = Some(Element::Fire);
        assert_eq!(c.bolt_element(), Element::Fire);
    }
}
