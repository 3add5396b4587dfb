//! Battle - The round/turn state machine driving a whole fight
//!
//! A [`Battle`] owns the [`Battlefield`], the round's turn queue and the
//! active character. Hosts advance it with [`Battle::step`] (one discrete
//! step) or [`Battle::tick`] (paced by the `timing` delays), and feed human
//! turns through [`Battle::submit`]. Everything observable goes out through
//! the owned [`EventBus`].

mod field;

pub use field::Battlefield;

use crate::ai::{decide_action, AiDecision};
use crate::character::CharacterId;
use crate::combat::{execute_ability, ActionReport};
use crate::config::GameplayConfig;
use crate::events::{log_message, BattleEvent, EventBus, EventSink, InputCommand};
use crate::input::{ChosenAction, PlayerInputStateMachine};
use crate::status::{process_turn_end, process_turn_start};
use crate::turn_order::calculate_turn_order;
use crate::types::{BattleState, Priority, StatusEffectType, TeamSide};
use rand::Rng;
use std::collections::VecDeque;

/// A fight in progress
pub struct Battle<R: Rng> {
    field: Battlefield,
    config: GameplayConfig,
    rng: R,
    events: EventBus,
    state: BattleState,
    round: u32,
    queue: VecDeque<CharacterId>,
    active: Option<CharacterId>,
    input: PlayerInputStateMachine,
    pending: Option<ChosenAction>,
    last_report: Option<ActionReport>,
    /// Players are driven by the enemy policy too
    auto_players: bool,
    /// Seconds left before the next paced step
    delay: f64,
}

impl<R: Rng> Battle<R> {
    pub fn new(field: Battlefield, config: GameplayConfig, rng: R) -> Self {
        Battle {
            field,
            config,
            rng,
            events: EventBus::new(),
            state: BattleState::Setup,
            round: 0,
            queue: VecDeque::new(),
            active: None,
            input: PlayerInputStateMachine::new(),
            pending: None,
            last_report: None,
            auto_players: false,
            delay: 0.0,
        }
    }

    /// Let the AI play the player side as well
    pub fn with_auto_players(mut self, auto: bool) -> Self {
        self.auto_players = auto;
        self
    }

    pub fn with_sink(mut self, sink: impl EventSink + 'static) -> Self {
        self.events.subscribe(sink);
        self
    }

    pub fn subscribe(&mut self, sink: impl EventSink + 'static) {
        self.events.subscribe(sink);
    }

    // --- Queries ---

    pub fn field(&self) -> &Battlefield {
        &self.field
    }

    pub fn config(&self) -> &GameplayConfig {
        &self.config
    }

    pub fn state(&self) -> BattleState {
        self.state
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn active(&self) -> Option<CharacterId> {
        self.active
    }

    /// Characters still waiting to act this round, in order
    pub fn queue(&self) -> &VecDeque<CharacterId> {
        &self.queue
    }

    pub fn input(&self) -> &PlayerInputStateMachine {
        &self.input
    }

    pub fn last_report(&self) -> Option<&ActionReport> {
        self.last_report.as_ref()
    }

    pub fn is_over(&self) -> bool {
        self.state.is_terminal()
    }

    /// Whether a human is expected to submit commands right now
    pub fn awaiting_input(&self) -> bool {
        self.state == BattleState::AwaitingInput
    }

    pub fn is_ai_controlled(&self, id: CharacterId) -> bool {
        id.side == TeamSide::Enemy || self.auto_players
    }

    // --- Driving ---

    /// Advance the battle by pacing time. Steps once the current delay has
    /// elapsed; returns whether a step ran.
    pub fn tick(&mut self, dt: f64) -> bool {
        if self.is_over() || self.awaiting_input() {
            return false;
        }
        self.delay -= dt;
        if self.delay > 0.0 {
            return false;
        }
        self.delay = 0.0;
        self.step();
        true
    }

    /// Run one discrete step, ignoring pacing. Does nothing while awaiting
    /// human input or once the battle is over.
    pub fn step(&mut self) -> BattleState {
        match self.state {
            BattleState::Setup => self.start_battle(),
            BattleState::TurnStart => self.start_next_turn(),
            BattleState::AwaitingInput => {}
            BattleState::ExecutingAction => self.execute_next_action(),
            BattleState::TurnEnd => self.end_turn(),
            BattleState::Victory | BattleState::Defeat => {}
        }
        self.state
    }

    /// Step until the battle ends, a human is needed, or `max_steps` ran out
    pub fn run(&mut self, max_steps: usize) -> BattleState {
        for _ in 0..max_steps {
            if self.is_over() || self.awaiting_input() {
                break;
            }
            self.step();
        }
        self.state
    }

    /// Feed a human command to the active character's input flow
    pub fn submit(&mut self, command: InputCommand) {
        if !self.awaiting_input() {
            tracing::debug!("ignoring {:?} outside of player input", command);
            return;
        }

        if let Some(chosen) = self.input.handle(command, &self.field, &mut self.events) {
            self.pending = Some(chosen);
            self.set_state(BattleState::ExecutingAction);
        }
    }

    /// End the active human turn without acting
    pub fn pass_turn(&mut self) {
        if !self.awaiting_input() {
            return;
        }
        self.input.finish();
        self.pass();
    }

    // --- State handlers ---

    fn set_state(&mut self, state: BattleState) {
        if self.state == state {
            return;
        }
        self.state = state;
        self.events.publish(&BattleEvent::BattleStateChanged { state });
    }

    fn log(&mut self, text: String) {
        log_message(&mut self.events, text);
    }

    fn start_battle(&mut self) {
        tracing::info!(
            "battle starting: {} players vs {} enemies",
            self.field.players().len(),
            self.field.enemies().len()
        );
        self.events.publish(&BattleEvent::BattleStateChanged {
            state: BattleState::Setup,
        });
        self.events.publish(&BattleEvent::BattleStarted);
        self.log("Battle begins!".to_string());
        self.delay = self.config.timing.battle_start_delay;

        if !self.check_battle_end() {
            self.set_state(BattleState::TurnStart);
        }
    }

    fn start_round(&mut self) {
        self.round += 1;
        self.queue = calculate_turn_order(&self.field);
        tracing::info!("round {}: {} combatants", self.round, self.queue.len());
    }

    fn start_next_turn(&mut self) {
        let next = loop {
            if self.queue.is_empty() {
                self.start_round();
                if self.queue.is_empty() {
                    // Nobody alive at all; the end check decides the outcome
                    self.check_battle_end();
                    return;
                }
            }
            match self.queue.pop_front() {
                Some(id) if self.field.is_alive(id) => break id,
                _ => continue,
            }
        };

        self.active = Some(next);
        let Some(actor) = self.field.get_mut(next) else {
            return;
        };
        actor.start_turn(&self.config);
        process_turn_start(actor, next, &self.config, &mut self.events);
        let name = actor.name().to_string();

        self.events.publish(&BattleEvent::TurnStarted { character: next });
        self.events.publish(&BattleEvent::TurnOrderUpdated {
            round: self.round,
            active: next,
            remaining: self.queue.iter().copied().collect(),
        });
        self.log(format!("{}'s turn!", name));
        self.delay = self.config.timing.turn_start_delay;

        self.await_action(next);
    }

    /// Hand control to whoever decides the actor's next action
    fn await_action(&mut self, actor: CharacterId) {
        let Some(character) = self.field.get(actor) else {
            self.set_state(BattleState::TurnEnd);
            return;
        };
        if !character.is_alive() || !character.has_actions_remaining() {
            self.set_state(BattleState::TurnEnd);
            return;
        }

        if self.is_ai_controlled(actor) {
            self.delay += self.config.timing.enemy_think_delay;
            self.set_state(BattleState::ExecutingAction);
            return;
        }

        let affordable = character
            .action_menu()
            .iter()
            .any(|a| character.can_use_ability(a));
        if !affordable {
            self.pass();
            return;
        }

        self.input.begin(actor, &mut self.events);
        self.set_state(BattleState::AwaitingInput);
    }

    fn execute_next_action(&mut self) {
        let Some(actor) = self.active else {
            self.set_state(BattleState::TurnStart);
            return;
        };

        let chosen = match self.pending.take() {
            Some(chosen) => chosen,
            None => match self.decide_for(actor) {
                Some(chosen) => chosen,
                None => {
                    self.pass();
                    return;
                }
            },
        };

        let result = execute_ability(
            &mut self.field,
            actor,
            &chosen.ability,
            &chosen.targets,
            &self.config,
            &mut self.rng,
            &mut self.events,
        );

        match result {
            Ok(report) => {
                self.last_report = Some(report);
                self.delay = self.config.timing.post_action_delay;
            }
            Err(err) if self.is_ai_controlled(actor) => {
                tracing::warn!("AI picked an unaffordable action: {}", err);
                self.pass();
                return;
            }
            Err(_) => {}
        }

        if self.check_battle_end() {
            return;
        }
        self.await_action(actor);
    }

    /// Ask the policy for an action, retrying when it finds no target
    fn decide_for(&mut self, actor: CharacterId) -> Option<ChosenAction> {
        for _ in 0..self.config.ai.max_decision_attempts {
            match decide_action(&self.field, actor, &self.config.aggro, &mut self.rng) {
                AiDecision::Act(chosen) => return Some(chosen),
                AiDecision::Pass => return None,
                AiDecision::NoTarget => continue,
            }
        }
        tracing::debug!("{} found nothing to do", self.field.name(actor));
        None
    }

    /// Drop the actor's remaining action points and end the turn
    fn pass(&mut self) {
        if let Some(actor) = self.active {
            let name = self.field.name(actor).to_string();
            if let Some(c) = self.field.get_mut(actor) {
                c.forfeit_actions();
            }
            self.log(format!("{} passes!", name));
        }
        self.set_state(BattleState::TurnEnd);
    }

    fn end_turn(&mut self) {
        let Some(actor) = self.active.take() else {
            self.set_state(BattleState::TurnStart);
            return;
        };
        self.input.finish();

        if let Some(c) = self.field.get_mut(actor) {
            process_turn_end(c, actor, &mut self.events);

            let holds_stance = c.status_effects.has(StatusEffectType::Anticipate)
                || c.status_effects.has(StatusEffectType::Prepare);
            if !holds_stance {
                c.priority = Priority::Normal;
            }
        }

        self.events.publish(&BattleEvent::TurnEnded { character: actor });
        self.set_state(BattleState::TurnStart);
    }

    /// Victory when every enemy is down, defeat when every player is
    fn check_battle_end(&mut self) -> bool {
        let outcome = if self.field.is_wiped(TeamSide::Enemy) {
            BattleState::Victory
        } else if self.field.is_wiped(TeamSide::Player) {
            BattleState::Defeat
        } else {
            return false;
        };

        self.active = None;
        self.pending = None;
        self.queue.clear();
        self.input.finish();

        self.set_state(outcome);
        self.events.publish(&BattleEvent::BattleEnded { outcome });
        self.log(match outcome {
            BattleState::Victory => "Victory!".to_string(),
            _ => "Defeat...".to_string(),
        });
        tracing::info!("battle over after {} rounds: {:?}", self.round, outcome);
        true
    }
}

impl<R: Rng> std::fmt::Debug for Battle<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Battle")
            .field("state", &self.state)
            .field("round", &self.round)
            .field("active", &self.active)
            .field("queue", &self.queue)
            .finish()
    }
}
