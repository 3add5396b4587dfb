//! HitResult - Outcome of a single hit roll

use crate::ability::AbilityData;
use crate::config::GameplayConfig;
use crate::stats::{self, round_half_away, CharacterStats};
use crate::types::DamageType;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One resolved hit. Missed and dodged hits carry no damage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitResult {
    pub missed: bool,
    pub dodged: bool,
    pub is_crit: bool,
    pub damage: u32,
}

impl HitResult {
    pub fn miss() -> Self {
        HitResult {
            missed: true,
            ..Default::default()
        }
    }

    pub fn dodge() -> Self {
        HitResult {
            dodged: true,
            ..Default::default()
        }
    }

    pub fn hit(damage: u32, is_crit: bool) -> Self {
        HitResult {
            is_crit,
            damage,
            ..Default::default()
        }
    }

    /// Whether the hit connected
    pub fn is_effective(&self) -> bool {
        !self.missed && !self.dodged
    }
}

/// Resolve one hit with the battle's RNG
///
/// Draws, in order and only as far as needed:
/// 1. Accuracy: miss if the draw exceeds the user's accuracy
/// 2. Dodge: dodged if the draw is below the target's dodge chance
/// 3. Crit: base damage × crit multiplier if the draw is below the user's crit chance
pub fn resolve_hit_with_rng(
    user: &CharacterStats,
    target: &CharacterStats,
    ability: &AbilityData,
    config: &GameplayConfig,
    rng: &mut impl Rng,
) -> HitResult {
    let accuracy = stats::accuracy(user.dexterity, &config.hit);
    if rng.gen::<f64>() > accuracy {
        return HitResult::miss();
    }

    let dodge = stats::dodge_chance(target.dexterity, &config.hit);
    if rng.gen::<f64>() < dodge {
        return HitResult::dodge();
    }

    let mut damage = match ability.damage_type {
        DamageType::Physical => {
            stats::physical_damage(ability.base_power, user.strength, target.armor, &config.damage)
        }
        DamageType::Magical => {
            stats::magical_damage(ability.base_power, target.magic_resist, &config.damage)
        }
    };

    let crit = stats::crit_chance(user.dexterity, &config.hit);
    let is_crit = rng.gen::<f64>() < crit;
    if is_crit {
        damage = round_half_away(damage as f64 * config.hit.crit_damage_multiplier).max(0) as u32;
    }

    HitResult::hit(damage, is_crit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Element;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sure_hit_config() -> GameplayConfig {
        let mut config = GameplayConfig::default();
        config.hit.base_accuracy = 1.0;
        config.hit.base_dodge_chance = 0.0;
        config.hit.dodge_per_dexterity = 0.0;
        config.hit.base_crit_chance = 0.0;
        config.hit.crit_per_dexterity = 0.0;
        config
    }

    fn warrior() -> CharacterStats {
        CharacterStats {
            strength: 7,
            dexterity: 4,
            ..Default::default()
        }
    }

    fn armored_target() -> CharacterStats {
        CharacterStats::new(5, 4, 1, 5, 4, 1, 2, 1, 4)
    }

    #[test]
    fn test_physical_hit_damage() {
        let config = sure_hit_config();
        let crush = AbilityData::skill("Crushing Blow", "", 12, 3);
        let mut rng = StdRng::seed_from_u64(1);

        let result = resolve_hit_with_rng(&warrior(), &armored_target(), &crush, &config, &mut rng);
        assert!(result.is_effective());
        assert!(!result.is_crit);
        assert_eq!(result.damage, 21);
    }

    #[test]
    fn test_magical_hit_ignores_armor() {
        let config = sure_hit_config();
        let bolt = AbilityData::spell("Magic Bolt", "", 10, 4, Element::Arcane);
        let mut rng = StdRng::seed_from_u64(1);

        // MR 1: round(9.9) = 10
        let result = resolve_hit_with_rng(&warrior(), &armored_target(), &bolt, &config, &mut rng);
        assert_eq!(result.damage, 10);
    }

    #[test]
    fn test_guaranteed_crit() {
        let mut config = sure_hit_config();
        config.hit.base_crit_chance = 1.0;
        let crush = AbilityData::skill("Crushing Blow", "", 12, 3);
        let mut rng = StdRng::seed_from_u64(3);

        let result = resolve_hit_with_rng(&warrior(), &armored_target(), &crush, &config, &mut rng);
        assert!(result.is_crit);
        // round(21 * 1.5) = round(31.5)
        assert_eq!(result.damage, 32);
    }

    #[test]
    fn test_guaranteed_miss_and_dodge() {
        let crush = AbilityData::skill("Crushing Blow", "", 12, 3);
        let mut rng = StdRng::seed_from_u64(5);

        let mut blind = sure_hit_config();
        blind.hit.base_accuracy = -1.0;
        blind.hit.accuracy_per_dexterity = 0.0;
        let result = resolve_hit_with_rng(&warrior(), &armored_target(), &crush, &blind, &mut rng);
        assert_eq!(result, HitResult::miss());
        assert!(!result.is_effective());

        let mut slippery = sure_hit_config();
        slippery.hit.base_dodge_chance = 1.0;
        let result = resolve_hit_with_rng(&warrior(), &armored_target(), &crush, &slippery, &mut rng);
        assert_eq!(result, HitResult::dodge());
        assert_eq!(result.damage, 0);
    }

    #[test]
    fn test_same_seed_replays_same_hits() {
        let config = GameplayConfig::default();
        let crush = AbilityData::skill("Crushing Blow", "", 12, 3);
        let roll = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..50)
                .map(|_| resolve_hit_with_rng(&warrior(), &armored_target(), &crush, &config, &mut rng))
                .collect::<Vec<_>>()
        };

        assert_eq!(roll(7), roll(7));
    }

    #[test]
    fn test_default_hit_rates_are_plausible() {
        let config = GameplayConfig::default();
        let crush = AbilityData::skill("Crushing Blow", "", 12, 3);
        let mut rng = StdRng::seed_from_u64(99);

        let landed = (0..2000)
            .map(|_| resolve_hit_with_rng(&warrior(), &armored_target(), &crush, &config, &mut rng))
            .filter(HitResult::is_effective)
            .count();

        // 94% accuracy, 5% dodge: about 89%
        assert!(landed > 1700 && landed < 1860, "landed {}", landed);
    }
}
