//! Battlefield - The two character lists a battle is fought over

use crate::character::{BattleCharacter, CharacterId};
use crate::types::TeamSide;

/// Both parties, addressed by [`CharacterId`]
#[derive(Debug, Clone, PartialEq)]
pub struct Battlefield {
    players: Vec<BattleCharacter>,
    enemies: Vec<BattleCharacter>,
}

impl Battlefield {
    /// Build a battlefield. Each character's side is forced to match its list.
    pub fn new(mut players: Vec<BattleCharacter>, mut enemies: Vec<BattleCharacter>) -> Self {
        for c in &mut players {
            c.side = TeamSide::Player;
        }
        for c in &mut enemies {
            c.side = TeamSide::Enemy;
        }
        Battlefield { players, enemies }
    }

    pub fn players(&self) -> &[BattleCharacter] {
        &self.players
    }

    pub fn enemies(&self) -> &[BattleCharacter] {
        &self.enemies
    }

    pub fn team(&self, side: TeamSide) -> &[BattleCharacter] {
        match side {
            TeamSide::Player => &self.players,
            TeamSide::Enemy => &self.enemies,
        }
    }

    pub fn team_mut(&mut self, side: TeamSide) -> &mut [BattleCharacter] {
        match side {
            TeamSide::Player => &mut self.players,
            TeamSide::Enemy => &mut self.enemies,
        }
    }

    pub fn get(&self, id: CharacterId) -> Option<&BattleCharacter> {
        self.team(id.side).get(id.index)
    }

    pub fn get_mut(&mut self, id: CharacterId) -> Option<&mut BattleCharacter> {
        match id.side {
            TeamSide::Player => self.players.get_mut(id.index),
            TeamSide::Enemy => self.enemies.get_mut(id.index),
        }
    }

    /// Display name, or "?" for an unknown id
    pub fn name(&self, id: CharacterId) -> &str {
        self.get(id).map(|c| c.name()).unwrap_or("?")
    }

    pub fn is_alive(&self, id: CharacterId) -> bool {
        self.get(id).is_some_and(|c| c.is_alive())
    }

    /// Every id of one side, in list order
    pub fn ids(&self, side: TeamSide) -> impl Iterator<Item = CharacterId> {
        (0..self.team(side).len()).map(move |index| CharacterId { side, index })
    }

    /// Every id, players first
    pub fn all_ids(&self) -> impl Iterator<Item = CharacterId> + '_ {
        self.ids(TeamSide::Player).chain(self.ids(TeamSide::Enemy))
    }

    /// Living ids of one side, in list order
    pub fn living(&self, side: TeamSide) -> Vec<CharacterId> {
        self.ids(side).filter(|&id| self.is_alive(id)).collect()
    }

    /// Whether every member of a side is down
    pub fn is_wiped(&self, side: TeamSide) -> bool {
        self.team(side).iter().all(|c| !c.is_alive())
    }
}
