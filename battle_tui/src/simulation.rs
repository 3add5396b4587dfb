//! Headless AI-vs-AI battle runs

use battle_core::{
    Battle, BattleEvent, BattleSetup, CharacterId, EventSink, GameplayConfig, JsonLinesSink,
};
use battle_core::types::{BattleState, TeamSide};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

/// Hard stop for a battle that never resolves
const MAX_STEPS: usize = 100_000;

/// Forwards the combat log to `tracing`
pub struct TracingLog;

impl EventSink for TracingLog {
    fn publish(&mut self, event: &BattleEvent) {
        match event {
            BattleEvent::CombatLogMessage { text } => tracing::info!(target: "combat", "{}", text),
            BattleEvent::TurnOrderUpdated { round, active, remaining } => {
                tracing::debug!(
                    "round {}: {} acting, {} waiting",
                    round,
                    active,
                    remaining.len()
                );
            }
            _ => {}
        }
    }
}

/// Tallies what happened over a run
#[derive(Debug, Default)]
pub struct Tally {
    pub actions: usize,
    pub damage: u64,
    pub healing: u64,
    pub defeated: Vec<CharacterId>,
}

impl EventSink for Tally {
    fn publish(&mut self, event: &BattleEvent) {
        match event {
            BattleEvent::AbilityUsed { .. } => self.actions += 1,
            BattleEvent::DamageDealt { amount, .. } => self.damage += u64::from(*amount),
            BattleEvent::HealingReceived { amount, .. } => self.healing += u64::from(*amount),
            BattleEvent::CharacterDefeated { character } => self.defeated.push(*character),
            _ => {}
        }
    }
}

/// Result of one headless battle
#[derive(Debug, Clone, Serialize)]
pub struct SimulationSummary {
    pub seed: u64,
    pub outcome: BattleState,
    pub rounds: u32,
    pub actions: usize,
    pub total_damage: u64,
    pub total_healing: u64,
    pub defeated: usize,
    pub survivors: Vec<String>,
}

impl SimulationSummary {
    pub fn describe(&self) -> String {
        format!(
            "{:?} after {} rounds ({} actions, {} damage, {} healed, {} down). Survivors: {}",
            self.outcome,
            self.rounds,
            self.actions,
            self.total_damage,
            self.total_healing,
            self.defeated,
            if self.survivors.is_empty() {
                "none".to_string()
            } else {
                self.survivors.join(", ")
            }
        )
    }
}

/// Play `setup` to the end with both sides AI-driven
pub fn run_headless(
    setup: &BattleSetup,
    config: GameplayConfig,
    seed: u64,
    json: bool,
) -> io::Result<SimulationSummary> {
    let field = setup.build(&config);
    let tally = Rc::new(RefCell::new(Tally::default()));

    let mut battle = Battle::new(field, config, ChaCha8Rng::seed_from_u64(seed))
        .with_auto_players(true)
        .with_sink(TracingLog)
        .with_sink(Rc::clone(&tally));
    if json {
        battle.subscribe(JsonLinesSink::new(io::stdout()));
    }

    let outcome = battle.run(MAX_STEPS);
    if !outcome.is_terminal() {
        tracing::warn!("battle unresolved after {} steps", MAX_STEPS);
    }

    let survivors: Vec<String> = [TeamSide::Player, TeamSide::Enemy]
        .into_iter()
        .flat_map(|side| battle.field().living(side))
        .map(|id| battle.field().name(id).to_string())
        .collect();

    let tally = tally.borrow();
    let summary = SimulationSummary {
        seed,
        outcome,
        rounds: battle.round(),
        actions: tally.actions,
        total_damage: tally.damage,
        total_healing: tally.healing,
        defeated: tally.defeated.len(),
        survivors,
    };

    if json {
        let mut stdout = io::stdout().lock();
        serde_json::to_writer(&mut stdout, &summary)?;
        stdout.write_all(b"\n")?;
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::config::default_battle_setup;

    #[test]
    fn test_headless_run_finishes() {
        let summary = run_headless(&default_battle_setup(), GameplayConfig::default(), 3, false).unwrap();
        assert!(summary.outcome.is_terminal());
        assert!(summary.rounds >= 1);
        assert!(summary.actions > 0);
        assert!(!summary.survivors.is_empty());
    }

    #[test]
    fn test_same_seed_same_summary() {
        let a = run_headless(&default_battle_setup(), GameplayConfig::default(), 8, false).unwrap();
        let b = run_headless(&default_battle_setup(), GameplayConfig::default(), 8, false).unwrap();
        assert_eq!(a.outcome, b.outcome);
        assert_eq!(a.rounds, b.rounds);
        assert_eq!(a.total_damage, b.total_damage);
    }

    #[test]
    fn test_tally_counts_events() {
        let mut tally = Tally::default();
        tally.publish(&BattleEvent::DamageDealt {
            target: CharacterId::enemy(0),
            amount: 7,
            damage_type: battle_core::types::DamageType::Physical,
        });
        tally.publish(&BattleEvent::CharacterDefeated {
            character: CharacterId::enemy(0),
        });
        assert_eq!(tally.damage, 7);
        assert_eq!(tally.defeated, vec![CharacterId::enemy(0)]);
    }
}
