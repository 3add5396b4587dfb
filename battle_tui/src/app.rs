//! Application state

use battle_core::targeting::valid_targets;
use battle_core::types::PlayerInputPhase;
use battle_core::{
    AbilityData, Battle, BattleCharacter, BattleEvent, BattleSetup, CharacterId, CombatLog,
    EventSink, GameplayConfig, InputCommand,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::cell::RefCell;
use std::rc::Rc;

const LOG_CAPACITY: usize = 200;

/// Bits of event state the screen shows that the battle does not keep
#[derive(Debug, Default)]
pub struct Hud {
    pub staged: Option<String>,
    /// Most recent character to take damage, for highlighting
    pub last_hit: Option<CharacterId>,
}

impl EventSink for Hud {
    fn publish(&mut self, event: &BattleEvent) {
        match event {
            BattleEvent::StagedActionChanged { description } => {
                self.staged = Some(description.clone());
            }
            BattleEvent::PlayerInputPhaseChanged {
                phase: PlayerInputPhase::SelectingAbility,
            }
            | BattleEvent::TurnEnded { .. } => self.staged = None,
            BattleEvent::DamageDealt { target, .. } => self.last_hit = Some(*target),
            _ => {}
        }
    }
}

pub struct App {
    pub battle: Battle<ChaCha8Rng>,
    pub log: Rc<RefCell<CombatLog>>,
    pub hud: Rc<RefCell<Hud>>,
    pub menu_cursor: usize,
    pub target_cursor: usize,
    pub log_scroll: usize,
    pub show_help: bool,
    pub seed: u64,
    setup: BattleSetup,
    config: GameplayConfig,
}

impl App {
    pub fn new(setup: BattleSetup, config: GameplayConfig, seed: u64) -> Self {
        let log = Rc::new(RefCell::new(CombatLog::new(LOG_CAPACITY)));
        let hud = Rc::new(RefCell::new(Hud::default()));
        let battle = Self::start(&setup, &config, seed, &log, &hud);

        App {
            battle,
            log,
            hud,
            menu_cursor: 0,
            target_cursor: 0,
            log_scroll: 0,
            show_help: false,
            seed,
            setup,
            config,
        }
    }

    fn start(
        setup: &BattleSetup,
        config: &GameplayConfig,
        seed: u64,
        log: &Rc<RefCell<CombatLog>>,
        hud: &Rc<RefCell<Hud>>,
    ) -> Battle<ChaCha8Rng> {
        Battle::new(setup.build(config), config.clone(), ChaCha8Rng::seed_from_u64(seed))
            .with_sink(Rc::clone(log))
            .with_sink(Rc::clone(hud))
    }

    /// Start a fresh battle with the next seed
    pub fn reset(&mut self) {
        self.seed = self.seed.wrapping_add(1);
        *self.log.borrow_mut() = CombatLog::new(LOG_CAPACITY);
        *self.hud.borrow_mut() = Hud::default();
        self.battle = Self::start(&self.setup, &self.config, self.seed, &self.log, &self.hud);
        self.menu_cursor = 0;
        self.target_cursor = 0;
        self.log_scroll = 0;
    }

    pub fn tick(&mut self, delta: f64) {
        self.battle.tick(delta);
    }

    pub fn phase(&self) -> Option<PlayerInputPhase> {
        self.battle.awaiting_input().then(|| self.battle.input().phase())
    }

    pub fn active_character(&self) -> Option<&BattleCharacter> {
        self.battle.active().and_then(|id| self.battle.field().get(id))
    }

    /// Abilities the active human character can pick from
    pub fn menu(&self) -> Vec<&AbilityData> {
        match (self.phase(), self.active_character()) {
            (Some(_), Some(c)) => c.action_menu(),
            _ => Vec::new(),
        }
    }

    /// Legal targets for the staged ability, while a target is being picked
    pub fn target_candidates(&self) -> Vec<CharacterId> {
        if self.phase() != Some(PlayerInputPhase::SelectingTarget) {
            return Vec::new();
        }
        match (self.battle.active(), self.battle.input().staged_ability()) {
            (Some(actor), Some(ability)) => valid_targets(self.battle.field(), actor, ability),
            _ => Vec::new(),
        }
    }

    /// Character under the target cursor
    pub fn highlighted_target(&self) -> Option<CharacterId> {
        self.target_candidates().get(self.target_cursor).copied()
    }

    pub fn on_up(&mut self) {
        match self.phase() {
            Some(PlayerInputPhase::SelectingAbility) => {
                self.menu_cursor = self.menu_cursor.saturating_sub(1);
            }
            Some(PlayerInputPhase::SelectingTarget) => {
                self.target_cursor = self.target_cursor.saturating_sub(1);
            }
            _ => {}
        }
    }

    pub fn on_down(&mut self) {
        match self.phase() {
            Some(PlayerInputPhase::SelectingAbility) => {
                let len = self.menu().len();
                if self.menu_cursor + 1 < len {
                    self.menu_cursor += 1;
                }
            }
            Some(PlayerInputPhase::SelectingTarget) => {
                let len = self.target_candidates().len();
                if self.target_cursor + 1 < len {
                    self.target_cursor += 1;
                }
            }
            _ => {}
        }
    }

    pub fn on_enter(&mut self) {
        let command = match self.phase() {
            Some(PlayerInputPhase::SelectingAbility) => {
                self.target_cursor = 0;
                InputCommand::AbilitySelected {
                    index: self.menu_cursor,
                }
            }
            Some(PlayerInputPhase::SelectingTarget) => match self.highlighted_target() {
                Some(target) => InputCommand::TargetSelected { target },
                None => return,
            },
            Some(PlayerInputPhase::AwaitingConfirmation) => InputCommand::ActionConfirmed,
            None => return,
        };

        let actor = self.battle.active();
        self.battle.submit(command);
        if self.battle.active() != actor || !self.battle.awaiting_input() {
            self.menu_cursor = 0;
        }
    }

    pub fn on_cancel(&mut self) {
        if self.phase().is_some() {
            self.battle.submit(InputCommand::ActionCancelled);
        }
    }

    pub fn pass_turn(&mut self) {
        self.battle.pass_turn();
        self.menu_cursor = 0;
    }

    pub fn scroll_log_up(&mut self) {
        self.log_scroll = self.log_scroll.saturating_add(1);
    }

    pub fn scroll_log_down(&mut self) {
        self.log_scroll = self.log_scroll.saturating_sub(1);
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::config::default_battle_setup;
    use battle_core::types::BattleState;

    fn app() -> App {
        let mut app = App::new(default_battle_setup(), GameplayConfig::default(), 1);
        app.battle.run(100);
        app
    }

    #[test]
    fn test_menu_navigation_stays_in_bounds() {
        let mut app = app();
        assert_eq!(app.phase(), Some(PlayerInputPhase::SelectingAbility));
        let len = app.menu().len();

        for _ in 0..20 {
            app.on_down();
        }
        assert_eq!(app.menu_cursor, len - 1);
        for _ in 0..20 {
            app.on_up();
        }
        assert_eq!(app.menu_cursor, 0);
    }

    #[test]
    fn test_full_selection_flow() {
        let mut app = app();
        // Signature ability of the first actor needs a target
        app.on_enter();
        assert_eq!(app.phase(), Some(PlayerInputPhase::SelectingTarget));
        assert!(!app.target_candidates().is_empty());

        app.on_down();
        let target = app.highlighted_target();
        assert!(target.is_some());
        app.on_enter();
        assert_eq!(app.phase(), Some(PlayerInputPhase::AwaitingConfirmation));
        assert!(app.hud.borrow().staged.is_some());

        app.on_enter();
        assert_eq!(app.battle.state(), BattleState::ExecutingAction);
    }

    #[test]
    fn test_cancel_and_reset() {
        let mut app = app();
        app.on_enter();
        app.on_cancel();
        assert_eq!(app.phase(), Some(PlayerInputPhase::SelectingAbility));

        let seed = app.seed;
        app.reset();
        assert_eq!(app.seed, seed + 1);
        assert_eq!(app.battle.state(), BattleState::Setup);
        assert!(app.log.borrow().is_empty());
    }
}
