//! Characters - static definitions and their per-battle runtime state

mod battle_character;
mod cost;
mod data;

pub use battle_character::BattleCharacter;
pub use cost::CostError;
pub use data::CharacterData;

use crate::types::TeamSide;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable handle to a battle participant: its side and index in that side's list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CharacterId {
    pub side: TeamSide,
    pub index: usize,
}

impl CharacterId {
    pub const fn player(index: usize) -> Self {
        CharacterId {
            side: TeamSide::Player,
            index,
        }
    }

    pub const fn enemy(index: usize) -> Self {
        CharacterId {
            side: TeamSide::Enemy,
            index,
        }
    }

    /// Whether both ids are on the same team
    pub fn is_ally_of(&self, other: &CharacterId) -> bool {
        self.side == other.side
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.side {
            TeamSide::Player => write!(f, "P{}", self.index),
            TeamSide::Enemy => write!(f, "E{}", self.index),
        }
    }
}
