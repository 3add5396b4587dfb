//! Event/command boundary between the battle core and its hosts
//!
//! The core publishes [`BattleEvent`]s to an [`EventSink`] it is handed and
//! never keeps global subscribers. Hosts drive human turns by feeding
//! [`InputCommand`]s back in.

mod bus;
mod combat_log;
mod json;

pub use bus::EventBus;
pub use combat_log::CombatLog;
pub use json::JsonLinesSink;

use crate::character::CharacterId;
use crate::combat::HitResult;
use crate::types::{BattleState, DamageType, PlayerInputPhase, StatusEffectType};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

/// Outbound notification raised by the core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BattleEvent {
    BattleStarted,
    BattleEnded {
        outcome: BattleState,
    },
    BattleStateChanged {
        state: BattleState,
    },
    TurnStarted {
        character: CharacterId,
    },
    TurnEnded {
        character: CharacterId,
    },
    TurnOrderUpdated {
        round: u32,
        active: CharacterId,
        remaining: Vec<CharacterId>,
    },
    AbilityUsed {
        user: CharacterId,
        ability: String,
        target: CharacterId,
    },
    HitResolved {
        target: CharacterId,
        hit: HitResult,
        damage_type: DamageType,
    },
    DamageDealt {
        target: CharacterId,
        amount: u32,
        damage_type: DamageType,
    },
    HealingReceived {
        target: CharacterId,
        amount: u32,
    },
    CharacterDefeated {
        character: CharacterId,
    },
    StatusEffectApplied {
        target: CharacterId,
        effect: StatusEffectType,
        value: u32,
    },
    StatusEffectRemoved {
        target: CharacterId,
        effect: StatusEffectType,
    },
    PositionSwapped {
        first: CharacterId,
        second: CharacterId,
    },
    CombatLogMessage {
        text: String,
    },
    PlayerInputPhaseChanged {
        phase: PlayerInputPhase,
    },
    StagedActionChanged {
        description: String,
    },
}

/// Inbound command raised by a human-facing host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum InputCommand {
    /// Index into the active character's action menu
    AbilitySelected { index: usize },
    TargetSelected { target: CharacterId },
    ActionConfirmed,
    ActionCancelled,
}

/// Receiver of battle notifications. Fire-and-forget.
pub trait EventSink {
    fn publish(&mut self, event: &BattleEvent);
}

impl EventSink for Vec<BattleEvent> {
    fn publish(&mut self, event: &BattleEvent) {
        self.push(event.clone());
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn publish(&mut self, event: &BattleEvent) {
        (**self).publish(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn publish(&mut self, event: &BattleEvent) {
        (**self).publish(event);
    }
}

/// Shared handle so a host can keep reading a sink the bus also writes to
impl<S: EventSink + ?Sized> EventSink for Rc<RefCell<S>> {
    fn publish(&mut self, event: &BattleEvent) {
        self.borrow_mut().publish(event);
    }
}

/// Publish a player-facing combat log line
pub(crate) fn log_message(events: &mut dyn EventSink, text: String) {
    tracing::debug!(target: "combat_log", "{}", text);
    events.publish(&BattleEvent::CombatLogMessage { text });
}
