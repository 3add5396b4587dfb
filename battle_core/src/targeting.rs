//! Target resolution and aggro-weighted target choice
//!
//! Aggro weight = row base (front 0.30, back 0.20) × status modifier
//! (Protect ×2.0, Hide ×0.25).

use crate::ability::AbilityData;
use crate::battle::Battlefield;
use crate::character::{BattleCharacter, CharacterId};
use crate::config::AggroConstants;
use crate::status::aggro_modifier;
use crate::types::{GridRow, TargetType};
use rand::Rng;

/// Every character `ability` may legally affect when used by `user`
pub fn valid_targets(field: &Battlefield, user: CharacterId, ability: &AbilityData) -> Vec<CharacterId> {
    let allies = user.side;
    let foes = user.side.opponent();

    let mut targets = match ability.target_type {
        TargetType::SingleEnemy | TargetType::AllEnemies => field.living(foes),
        TargetType::SingleAlly | TargetType::AllAllies => field.living(allies),
        TargetType::OnSelf => vec![user],
        TargetType::All => field.all_ids().filter(|&id| field.is_alive(id)).collect(),
    };

    if ability.exclude_self {
        targets.retain(|&id| id != user);
    }
    targets
}

/// Only single-target abilities need a player or AI pick
pub fn requires_manual_target_selection(target_type: TargetType) -> bool {
    target_type.requires_manual_selection()
}

/// Row base weight times the Protect/Hide modifier
pub fn aggro_weight(character: &BattleCharacter, constants: &AggroConstants) -> f64 {
    let base = match character.row {
        GridRow::Front => constants.frontline_base,
        GridRow::Back => constants.backline_base,
    };
    base * aggro_modifier(character, constants)
}

/// Share of its living team's aggro a character holds, in [0, 1]
pub fn aggro_percent(field: &Battlefield, id: CharacterId, constants: &AggroConstants) -> f64 {
    let Some(character) = field.get(id).filter(|c| c.is_alive()) else {
        return 0.0;
    };

    let total: f64 = field
        .team(id.side)
        .iter()
        .filter(|c| c.is_alive())
        .map(|c| aggro_weight(c, constants))
        .sum();

    if total > 0.0 {
        aggro_weight(character, constants) / total
    } else {
        0.0
    }
}

/// Weighted random pick among `candidates`.
///
/// Rolls in [0, total) and returns the first candidate whose cumulative
/// weight reaches the roll, falling back to the last one. A lone candidate is
/// returned without a roll; an empty pool yields `None`.
pub fn select_aggro_target(
    field: &Battlefield,
    candidates: &[CharacterId],
    constants: &AggroConstants,
    rng: &mut impl Rng,
) -> Option<CharacterId> {
    match candidates {
        [] => {
            tracing::warn!("aggro selection over an empty pool");
            return None;
        }
        [only] => return Some(*only),
        _ => {}
    }

    let weights: Vec<f64> = candidates
        .iter()
        .map(|&id| field.get(id).map_or(0.0, |c| aggro_weight(c, constants)))
        .collect();
    let total: f64 = weights.iter().sum();

    let roll = rng.gen::<f64>() * total;
    let mut cumulative = 0.0;
    for (&id, weight) in candidates.iter().zip(&weights) {
        cumulative += weight;
        if roll <= cumulative {
            return Some(id);
        }
    }

    candidates.last().copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{default_battle_setup, GameplayConfig};
    use crate::events::BattleEvent;
    use crate::status::{apply_effect, StatusEffectInstance};
    use crate::types::{StatusEffectType, TeamSide};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn field() -> Battlefield {
        default_battle_setup().build(&GameplayConfig::default())
    }

    #[test]
    fn test_valid_targets_by_type() {
        let mut field = field();
        let user = CharacterId::player(3);

        let strike = AbilityData::attack("Strike", "", 5, 0);
        assert_eq!(valid_targets(&field, user, &strike).len(), 4);

        if let Some(c) = field.get_mut(CharacterId::enemy(1)) {
            c.current_hp = 0;
        }
        let targets = valid_targets(&field, user, &strike);
        assert_eq!(
            targets,
            vec![CharacterId::enemy(0), CharacterId::enemy(2), CharacterId::enemy(3)]
        );

        let heal = strike.clone().with_target(TargetType::AllAllies);
        assert!(valid_targets(&field, user, &heal)
            .iter()
            .all(|id| id.side == TeamSide::Player));

        let me = strike.clone().with_target(TargetType::OnSelf);
        assert_eq!(valid_targets(&field, user, &me), vec![user]);

        let everyone = strike.with_target(TargetType::All);
        assert_eq!(valid_targets(&field, user, &everyone).len(), 7);
    }

    #[test]
    fn test_exclude_self() {
        let field = field();
        let user = CharacterId::player(1);
        let swap = AbilityData::quick_action("Swap Position", "")
            .with_target(TargetType::SingleAlly)
            .excluding_self();

        let targets = valid_targets(&field, user, &swap);
        assert_eq!(targets.len(), 3);
        assert!(!targets.contains(&user));
    }

    #[test]
    fn test_enemy_perspective_flips_sides() {
        let field = field();
        let strike = AbilityData::attack("Claw", "", 6, 0);
        let targets = valid_targets(&field, CharacterId::enemy(0), &strike);
        assert!(targets.iter().all(|id| id.side == TeamSide::Player));
    }

    #[test]
    fn test_aggro_percent() {
        let config = GameplayConfig::default();
        let mut field = field();
        // Two front (0.3) and two back (0.2): total 1.0
        let front = aggro_percent(&field, CharacterId::player(0), &config.aggro);
        assert!((front - 0.3).abs() < 1e-9);

        let mut events: Vec<BattleEvent> = Vec::new();
        if let Some(c) = field.get_mut(CharacterId::player(0)) {
            let protect = StatusEffectInstance::indefinite(StatusEffectType::Protect, 0, None);
            apply_effect(c, CharacterId::player(0), protect, &mut events);
        }
        // 0.6 / 1.3
        let protected = aggro_percent(&field, CharacterId::player(0), &config.aggro);
        assert!((protected - 0.6 / 1.3).abs() < 1e-9);

        if let Some(c) = field.get_mut(CharacterId::player(1)) {
            c.current_hp = 0;
        }
        assert_eq!(aggro_percent(&field, CharacterId::player(1), &config.aggro), 0.0);
    }

    #[test]
    fn test_select_aggro_target_edges() {
        let config = GameplayConfig::default();
        let field = field();
        let mut rng = StdRng::seed_from_u64(7);

        assert_eq!(select_aggro_target(&field, &[], &config.aggro, &mut rng), None);
        assert_eq!(
            select_aggro_target(&field, &[CharacterId::player(2)], &config.aggro, &mut rng),
            Some(CharacterId::player(2))
        );
    }

    #[test]
    fn test_select_aggro_target_follows_weights() {
        let config = GameplayConfig::default();
        let mut field = field();
        let mut events: Vec<BattleEvent> = Vec::new();
        // Hide everyone but the warrior, and protect the warrior
        for index in 1..4 {
            let id = CharacterId::player(index);
            if let Some(c) = field.get_mut(id) {
                let hide = StatusEffectInstance::indefinite(StatusEffectType::Hide, 0, None);
                apply_effect(c, id, hide, &mut events);
            }
        }
        if let Some(c) = field.get_mut(CharacterId::player(0)) {
            let protect = StatusEffectInstance::indefinite(StatusEffectType::Protect, 0, None);
            apply_effect(c, CharacterId::player(0), protect, &mut events);
        }

        let candidates = field.living(TeamSide::Player);
        let mut rng = StdRng::seed_from_u64(42);
        let picks = (0..1000)
            .filter_map(|_| select_aggro_target(&field, &candidates, &config.aggro, &mut rng))
            .filter(|&id| id == CharacterId::player(0))
            .count();

        // Warrior holds 0.6 of 0.6 + 0.075 + 0.05 + 0.05 = 0.775 (about 77%)
        assert!(picks > 700 && picks < 850, "picked warrior {} times", picks);
    }
}
