//! Enemy decision policy: random affordable ability, aggro-weighted target

use crate::battle::Battlefield;
use crate::character::CharacterId;
use crate::config::AggroConstants;
use crate::input::ChosenAction;
use crate::targeting::{requires_manual_target_selection, select_aggro_target, valid_targets};
use rand::seq::SliceRandom;
use rand::Rng;

/// What an AI-controlled character does with its next action
#[derive(Debug, Clone, PartialEq)]
pub enum AiDecision {
    Act(ChosenAction),
    /// Nothing affordable: the turn should end
    Pass,
    /// The picked ability had nobody to hit; the caller may try again
    NoTarget,
}

/// Choose an action for `actor`
pub fn decide_action(
    field: &Battlefield,
    actor: CharacterId,
    aggro: &AggroConstants,
    rng: &mut impl Rng,
) -> AiDecision {
    let Some(character) = field.get(actor) else {
        tracing::warn!("AI asked to act for unknown character {}", actor);
        return AiDecision::Pass;
    };

    let usable: Vec<_> = character
        .action_menu()
        .into_iter()
        .filter(|a| character.can_use_ability(a))
        .collect();

    let Some(ability) = usable.choose(rng).map(|a| (*a).clone()) else {
        return AiDecision::Pass;
    };

    let candidates = valid_targets(field, actor, &ability);
    if candidates.is_empty() {
        tracing::debug!("{} found no target for {}", character.name(), ability.name);
        return AiDecision::NoTarget;
    }

    let targets = if requires_manual_target_selection(ability.target_type) {
        match select_aggro_target(field, &candidates, aggro, rng) {
            Some(target) => vec![target],
            None => return AiDecision::NoTarget,
        }
    } else {
        candidates
    };

    AiDecision::Act(ChosenAction { ability, targets })
}
