//! Player input staging: ability, then target when needed, then confirmation
//!
//! ```text
//! SelectingAbility --ability--> SelectingTarget --target--> AwaitingConfirmation --confirm--> chosen
//!        ^                            |   ^                        |
//!        +----------cancel------------+   +---cancel (manual)------+
//!        +------------------------cancel (auto-targeted)-----------+
//! ```
//!
//! Picking another ability from any phase restarts the flow for that ability.

use crate::ability::AbilityData;
use crate::battle::Battlefield;
use crate::character::CharacterId;
use crate::events::{BattleEvent, EventSink, InputCommand};
use crate::targeting::{requires_manual_target_selection, valid_targets};
use crate::types::PlayerInputPhase;

/// A confirmed player choice, ready for execution
#[derive(Debug, Clone, PartialEq)]
pub struct ChosenAction {
    pub ability: AbilityData,
    pub targets: Vec<CharacterId>,
}

/// Staged selection for the active human-controlled character
#[derive(Debug, Clone, Default)]
pub struct PlayerInputStateMachine {
    actor: Option<CharacterId>,
    phase: PlayerInputPhase,
    staged: Option<AbilityData>,
    targets: Vec<CharacterId>,
}

impl PlayerInputStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> PlayerInputPhase {
        self.phase
    }

    pub fn actor(&self) -> Option<CharacterId> {
        self.actor
    }

    pub fn staged_ability(&self) -> Option<&AbilityData> {
        self.staged.as_ref()
    }

    pub fn staged_targets(&self) -> &[CharacterId] {
        &self.targets
    }

    /// Clear all staging and wait for `actor` to pick an ability
    pub fn begin(&mut self, actor: CharacterId, events: &mut dyn EventSink) {
        self.actor = Some(actor);
        self.staged = None;
        self.targets.clear();
        self.transition(PlayerInputPhase::SelectingAbility, events);
    }

    /// Stop accepting commands until the next [`begin`](Self::begin)
    pub fn finish(&mut self) {
        self.actor = None;
        self.staged = None;
        self.targets.clear();
        self.phase = PlayerInputPhase::SelectingAbility;
    }

    /// Feed one command. Returns the chosen action once confirmed.
    ///
    /// Commands that make no sense in the current phase are ignored.
    pub fn handle(
        &mut self,
        command: InputCommand,
        field: &Battlefield,
        events: &mut dyn EventSink,
    ) -> Option<ChosenAction> {
        let actor = self.actor?;

        match command {
            InputCommand::AbilitySelected { index } => {
                self.select_ability(actor, index, field, events);
                None
            }
            InputCommand::TargetSelected { target } => {
                self.select_target(actor, target, field, events);
                None
            }
            InputCommand::ActionConfirmed => self.confirm(),
            InputCommand::ActionCancelled => {
                self.cancel(events);
                None
            }
        }
    }

    fn select_ability(&mut self, actor: CharacterId, index: usize, field: &Battlefield, events: &mut dyn EventSink) {
        let Some(character) = field.get(actor) else {
            return;
        };
        let Some(ability) = character.action_menu().get(index).map(|a| (*a).clone()) else {
            tracing::debug!("no ability at menu slot {}", index);
            return;
        };
        if let Err(err) = character.check_cost(&ability) {
            tracing::debug!("{} cannot stage {}: {}", character.name(), ability.name, err);
            return;
        }

        self.targets.clear();
        if requires_manual_target_selection(ability.target_type) {
            self.staged = Some(ability);
            self.transition(PlayerInputPhase::SelectingTarget, events);
        } else {
            self.targets = valid_targets(field, actor, &ability);
            self.staged = Some(ability);
            self.publish_description(field, events);
            self.transition(PlayerInputPhase::AwaitingConfirmation, events);
        }
    }

    fn select_target(&mut self, actor: CharacterId, target: CharacterId, field: &Battlefield, events: &mut dyn EventSink) {
        if self.phase != PlayerInputPhase::SelectingTarget {
            return;
        }
        let Some(ability) = &self.staged else {
            return;
        };
        if !valid_targets(field, actor, ability).contains(&target) {
            tracing::debug!("{} is not a valid target for {}", target, ability.name);
            return;
        }

        self.targets = vec![target];
        self.publish_description(field, events);
        self.transition(PlayerInputPhase::AwaitingConfirmation, events);
    }

    fn confirm(&mut self) -> Option<ChosenAction> {
        if self.phase != PlayerInputPhase::AwaitingConfirmation {
            return None;
        }
        let ability = self.staged.take()?;
        let targets = std::mem::take(&mut self.targets);
        self.actor = None;
        self.phase = PlayerInputPhase::SelectingAbility;
        Some(ChosenAction { ability, targets })
    }

    fn cancel(&mut self, events: &mut dyn EventSink) {
        match self.phase {
            PlayerInputPhase::SelectingAbility => {}
            PlayerInputPhase::SelectingTarget => {
                self.staged = None;
                self.targets.clear();
                self.transition(PlayerInputPhase::SelectingAbility, events);
            }
            PlayerInputPhase::AwaitingConfirmation => {
                self.targets.clear();
                let manual = self
                    .staged
                    .as_ref()
                    .is_some_and(|a| requires_manual_target_selection(a.target_type));
                if manual {
                    self.transition(PlayerInputPhase::SelectingTarget, events);
                } else {
                    self.staged = None;
                    self.transition(PlayerInputPhase::SelectingAbility, events);
                }
            }
        }
    }

    fn transition(&mut self, phase: PlayerInputPhase, events: &mut dyn EventSink) {
        self.phase = phase;
        events.publish(&BattleEvent::PlayerInputPhaseChanged { phase });
    }

    fn publish_description(&self, field: &Battlefield, events: &mut dyn EventSink) {
        events.publish(&BattleEvent::StagedActionChanged {
            description: self.describe(field),
        });
    }

    /// "`<ability> > <targets>`", or "Confirm?" when nothing is resolved
    pub fn describe(&self, field: &Battlefield) -> String {
        match &self.staged {
            Some(ability) if !self.targets.is_empty() => {
                let names: Vec<&str> = self.targets.iter().map(|&id| field.name(id)).collect();
                format!("{} > {}", ability.name, names.join(", "))
            }
            _ => "Confirm?".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{default_battle_setup, GameplayConfig};
    use crate::types::TargetType;

    const ALDRIC: CharacterId = CharacterId::player(0);
    const MAREN: CharacterId = CharacterId::player(3);

    // Menu slots for every class: signature, swap, anticipate, prepare, protect, hide
    const SIGNATURE: usize = 0;
    const SWAP: usize = 1;
    const PROTECT: usize = 4;

    fn setup() -> (Battlefield, PlayerInputStateMachine, Vec<BattleEvent>) {
        let field = default_battle_setup().build(&GameplayConfig::default());
        (field, PlayerInputStateMachine::new(), Vec::new())
    }

    fn select(index: usize) -> InputCommand {
        InputCommand::AbilitySelected { index }
    }

    #[test]
    fn test_manual_flow_to_confirmation() {
        let (field, mut input, mut events) = setup();
        input.begin(ALDRIC, &mut events);

        assert!(input.handle(select(SIGNATURE), &field, &mut events).is_none());
        assert_eq!(input.phase(), PlayerInputPhase::SelectingTarget);

        let target = CharacterId::enemy(1);
        input.handle(InputCommand::TargetSelected { target }, &field, &mut events);
        assert_eq!(input.phase(), PlayerInputPhase::AwaitingConfirmation);
        assert!(events.contains(&BattleEvent::StagedActionChanged {
            description: "Crushing Blow > Ratman".to_string()
        }));

        let chosen = input
            .handle(InputCommand::ActionConfirmed, &field, &mut events)
            .unwrap();
        assert_eq!(chosen.ability.name, "Crushing Blow");
        assert_eq!(chosen.targets, vec![target]);

        // Consumed once
        assert!(input.handle(InputCommand::ActionConfirmed, &field, &mut events).is_none());
    }

    #[test]
    fn test_auto_targeted_skips_target_phase() {
        let (field, mut input, mut events) = setup();
        input.begin(ALDRIC, &mut events);

        input.handle(select(PROTECT), &field, &mut events);
        assert_eq!(input.phase(), PlayerInputPhase::AwaitingConfirmation);
        assert_eq!(input.staged_targets(), &[ALDRIC]);
        assert_eq!(input.describe(&field), "Protect > Aldric");
    }

    #[test]
    fn test_cancel_edges() {
        let (field, mut input, mut events) = setup();
        input.begin(ALDRIC, &mut events);

        // Cancel while picking an ability does nothing
        input.handle(InputCommand::ActionCancelled, &field, &mut events);
        assert_eq!(input.phase(), PlayerInputPhase::SelectingAbility);

        // Target phase cancels back to ability
        input.handle(select(SIGNATURE), &field, &mut events);
        input.handle(InputCommand::ActionCancelled, &field, &mut events);
        assert_eq!(input.phase(), PlayerInputPhase::SelectingAbility);
        assert!(input.staged_ability().is_none());

        // Confirmation of a manual ability cancels back to target
        input.handle(select(SIGNATURE), &field, &mut events);
        input.handle(
            InputCommand::TargetSelected {
                target: CharacterId::enemy(0),
            },
            &field,
            &mut events,
        );
        input.handle(InputCommand::ActionCancelled, &field, &mut events);
        assert_eq!(input.phase(), PlayerInputPhase::SelectingTarget);
        assert!(input.staged_ability().is_some());
        assert!(input.staged_targets().is_empty());

        // Confirmation of an auto ability cancels back to ability
        input.handle(select(PROTECT), &field, &mut events);
        input.handle(InputCommand::ActionCancelled, &field, &mut events);
        assert_eq!(input.phase(), PlayerInputPhase::SelectingAbility);
    }

    #[test]
    fn test_new_ability_preempts() {
        let (field, mut input, mut events) = setup();
        input.begin(ALDRIC, &mut events);

        input.handle(select(PROTECT), &field, &mut events);
        assert_eq!(input.phase(), PlayerInputPhase::AwaitingConfirmation);

        input.handle(select(SIGNATURE), &field, &mut events);
        assert_eq!(input.phase(), PlayerInputPhase::SelectingTarget);
        assert_eq!(input.staged_ability().map(|a| a.name.as_str()), Some("Crushing Blow"));
        assert!(input.staged_targets().is_empty());
    }

    #[test]
    fn test_new_ability_preempts_target_selection() {
        let (field, mut input, mut events) = setup();
        input.begin(ALDRIC, &mut events);

        input.handle(select(SIGNATURE), &field, &mut events);
        assert_eq!(input.phase(), PlayerInputPhase::SelectingTarget);

        assert!(input.handle(select(PROTECT), &field, &mut events).is_none());
        assert_eq!(input.phase(), PlayerInputPhase::AwaitingConfirmation);
        assert_eq!(input.staged_ability().map(|a| a.name.as_str()), Some("Protect"));
        assert_eq!(input.staged_targets(), &[ALDRIC]);
        assert_eq!(input.describe(&field), "Protect > Aldric");
        assert!(events.contains(&BattleEvent::StagedActionChanged {
            description: "Protect > Aldric".to_string()
        }));
    }

    #[test]
    fn test_invalid_target_is_ignored() {
        let (field, mut input, mut events) = setup();
        input.begin(MAREN, &mut events);

        // Word of Protection only lands on allies
        input.handle(select(SIGNATURE), &field, &mut events);
        assert_eq!(
            input.staged_ability().map(|a| a.target_type),
            Some(TargetType::SingleAlly)
        );
        input.handle(
            InputCommand::TargetSelected {
                target: CharacterId::enemy(0),
            },
            &field,
            &mut events,
        );
        assert_eq!(input.phase(), PlayerInputPhase::SelectingTarget);

        // Swap excludes the user
        input.handle(select(SWAP), &field, &mut events);
        input.handle(InputCommand::TargetSelected { target: MAREN }, &field, &mut events);
        assert_eq!(input.phase(), PlayerInputPhase::SelectingTarget);
    }

    #[test]
    fn test_unaffordable_ability_is_ignored() {
        let (mut field, mut input, mut events) = setup();
        if let Some(c) = field.get_mut(ALDRIC) {
            c.current_energy = 0;
        }
        input.begin(ALDRIC, &mut events);
        input.handle(select(SIGNATURE), &field, &mut events);
        assert_eq!(input.phase(), PlayerInputPhase::SelectingAbility);
        assert!(input.staged_ability().is_none());
    }

    #[test]
    fn test_confirm_outside_confirmation_is_ignored() {
        let (field, mut input, mut events) = setup();
        input.begin(ALDRIC, &mut events);
        input.handle(select(SIGNATURE), &field, &mut events);
        assert!(input.handle(InputCommand::ActionConfirmed, &field, &mut events).is_none());
        assert_eq!(input.phase(), PlayerInputPhase::SelectingTarget);
    }

    #[test]
    fn test_phase_changes_are_published() {
        let (field, mut input, mut events) = setup();
        input.begin(ALDRIC, &mut events);
        input.handle(select(PROTECT), &field, &mut events);

        let phases: Vec<PlayerInputPhase> = events
            .iter()
            .filter_map(|e| match e {
                BattleEvent::PlayerInputPhaseChanged { phase } => Some(*phase),
                _ => None,
            })
            .collect();
        assert_eq!(
            phases,
            vec![
                PlayerInputPhase::SelectingAbility,
                PlayerInputPhase::AwaitingConfirmation
            ]
        );
    }

    #[test]
    fn test_commands_without_actor_are_ignored() {
        let (field, mut input, mut events) = setup();
        assert!(input.handle(select(PROTECT), &field, &mut events).is_none());
        assert!(events.is_empty());
    }
}
